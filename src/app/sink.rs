use crate::app::error::ConfigError;
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Progress lines; shown on the console only in verbose mode.
    Detail,
    /// Always shown on stdout (previews, summaries).
    Notice,
    /// Always shown on stderr.
    Error,
    /// Written to the log file only.
    Record,
}

/// Destination for the user-facing transcript of a run.
pub trait Sink {
    fn emit(&mut self, level: Level, message: &str);

    fn detail(&mut self, message: &str) {
        self.emit(Level::Detail, message);
    }

    fn notice(&mut self, message: &str) {
        self.emit(Level::Notice, message);
    }

    fn error(&mut self, message: &str) {
        self.emit(Level::Error, message);
    }

    fn record(&mut self, message: &str) {
        self.emit(Level::Record, message);
    }
}

/// Console output plus an optional append-only log file.
pub struct Transcript {
    verbose: bool,
    log_file: Option<File>,
}

impl Transcript {
    pub fn new(verbose: bool, log_path: Option<&Path>) -> Result<Self, ConfigError> {
        let log_file = match log_path {
            Some(path) => Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| ConfigError::LogOpen(path.to_path_buf(), e))?,
            ),
            None => None,
        };
        Ok(Self { verbose, log_file })
    }

    fn append(&mut self, message: &str) {
        if let Some(file) = self.log_file.as_mut() {
            let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
            if let Err(e) = writeln!(file, "[{}] {}", stamp, message) {
                log::warn!("Failed to write to log file: {}", e);
            }
        }
    }
}

impl Sink for Transcript {
    fn emit(&mut self, level: Level, message: &str) {
        log::debug!("{:?}: {}", level, message);
        match level {
            Level::Detail if self.verbose => println!("{}", message),
            Level::Detail => {}
            Level::Notice => println!("{}", message),
            Level::Error => eprintln!("{}", message),
            Level::Record => {}
        }
        self.append(message);
    }
}

/// Collects every record in memory.
#[cfg(test)]
#[derive(Default)]
pub struct MemorySink {
    pub records: Vec<(Level, String)>,
}

#[cfg(test)]
impl MemorySink {
    pub fn lines(&self) -> Vec<&str> {
        self.records.iter().map(|(_, m)| m.as_str()).collect()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter(|(l, _)| *l == Level::Error)
            .map(|(_, m)| m.as_str())
            .collect()
    }
}

#[cfg(test)]
impl Sink for MemorySink {
    fn emit(&mut self, level: Level, message: &str) {
        self.records.push((level, message.to_string()));
    }
}
