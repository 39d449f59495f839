// Declare modules
pub mod backup;
pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod formatter;
pub mod gate;
pub mod matcher;
pub mod models;
pub mod scanner;
pub mod sink;
pub mod walker;

use anyhow::Result;
use clap::Parser;

use self::cli::Cli;
use self::config::resolve_config;
use self::formatter::OutputGenerator;
use self::gate::StdinDecider;
use self::models::RunResult;
use self::sink::{Sink, Transcript};
use self::walker::Walker;

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<RunResult> {
    // 1. Parse Args
    let args = Cli::parse();

    // 2. Resolve Configuration
    let config = resolve_config(args)?;

    if config.file_match.is_empty() && config.dir_match.is_empty() {
        log::warn!("No match patterns provided; only empty files will be deleted.");
    }

    // 3. Validate before touching anything
    let walker = Walker::new(&config)?;
    let mut transcript = Transcript::new(config.verbose, config.log_path.as_deref())?;

    // 4. Clean
    transcript.detail(&format!("Cleaning {}", walker.root().display()));
    let result = walker.run(&mut StdinDecider, &mut transcript);

    // 5. Report
    transcript.notice(&OutputGenerator::summary(&result));

    Ok(result)
}
