use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Delete empty files and files or directories matching regular expressions"
)]
pub struct Cli {
    /// Directory to clean
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Regex for file names to delete (e.g., '\.log$')
    #[arg(short = 'm', long = "match", num_args = 1..)]
    pub file_match: Option<Vec<String>>,

    /// Regex for directory names to delete, contents included
    #[arg(short = 'd', long, num_args = 1..)]
    pub dir_match: Option<Vec<String>>,

    /// Also clean every subdirectory
    #[arg(short, long)]
    pub recursive: bool,

    /// Ask for confirmation before each batch of deletions
    #[arg(short, long)]
    pub safe: bool,

    /// Maximum number of entries shown in a safe-mode preview [default: 15]
    #[arg(long)]
    pub safe_limit: Option<usize>,

    /// Append a record of every deletion to this file
    #[arg(short, long)]
    pub log: Option<PathBuf>,

    /// Copy files here (mirroring their paths) before deleting them
    #[arg(short, long)]
    pub backup: Option<PathBuf>,

    /// Print every deletion
    #[arg(short, long)]
    pub verbose: bool,

    /// Use a predefined set of options from presets.toml
    #[arg(long)]
    pub preset: Option<String>,
}
