use crate::app::backup::BackupWriter;
use crate::app::error::{ConfigError, Failure};
use crate::app::executor;
use crate::app::gate::{self, DecisionProvider};
use crate::app::matcher::PatternMatcher;
use crate::app::models::{CleanConfig, RunResult};
use crate::app::scanner::{self, Scanner, Selection};
use crate::app::sink::Sink;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

enum State {
    ScanningTop,
    ScanningDescendant(usize),
    Done,
}

/// Runs one non-recursive pass over the root and, when recursive, over every
/// descendant directory captured before the first deletion.
pub struct Walker {
    root: PathBuf,
    recursive: bool,
    safe: bool,
    safe_limit: usize,
    scanner: Scanner,
    backup: Option<BackupWriter>,
}

impl Walker {
    /// Validates the configuration. Every fatal error surfaces here, before anything is deleted.
    pub fn new(config: &CleanConfig) -> Result<Self, ConfigError> {
        let root = resolve_root(&config.root)?;

        let backup = match &config.backup_root {
            Some(backup_root) => {
                let backup_root = resolve_path(backup_root)?;
                if backup_root.starts_with(&root) {
                    return Err(ConfigError::BackupConflict {
                        backup: backup_root,
                        root,
                    });
                }
                Some(BackupWriter::new(root.clone(), backup_root))
            }
            None => None,
        };

        let mut scanner = Scanner::new(
            PatternMatcher::new(&config.file_match)?,
            PatternMatcher::new(&config.dir_match)?,
        );
        if let Some(log_path) = &config.log_path {
            scanner = scanner.protect(resolve_path(log_path)?);
        }

        Ok(Self {
            root,
            recursive: config.recursive,
            safe: config.safe,
            safe_limit: config.safe_limit,
            scanner,
            backup,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn run(&self, decider: &mut dyn DecisionProvider, sink: &mut dyn Sink) -> RunResult {
        let mut result = RunResult::default();

        // Captured up front: passes below mutate the tree.
        let descendants = if self.recursive {
            let (dirs, failures) = scanner::descendant_dirs(&self.root);
            for failure in failures {
                report(failure, sink, &mut result);
            }
            dirs
        } else {
            Vec::new()
        };
        log::debug!("Scheduled {} descendant directories", descendants.len());

        let mut state = State::ScanningTop;
        loop {
            state = match state {
                State::ScanningTop => {
                    self.pass(&self.root, decider, sink, &mut result);
                    if descendants.is_empty() {
                        State::Done
                    } else {
                        State::ScanningDescendant(0)
                    }
                }
                State::ScanningDescendant(i) => {
                    self.pass(&descendants[i], decider, sink, &mut result);
                    if i + 1 < descendants.len() {
                        State::ScanningDescendant(i + 1)
                    } else {
                        State::Done
                    }
                }
                State::Done => break,
            };
        }

        result
    }

    /// Files first, then directories. An enumeration failure ends this directory's pass only.
    fn pass(
        &self,
        dir: &Path,
        decider: &mut dyn DecisionProvider,
        sink: &mut dyn Sink,
        result: &mut RunResult,
    ) {
        sink.detail(&format!("Scanning directory: {}", dir.display()));

        let files = match self.scanner.select_file_candidates(dir) {
            Ok(selection) => selection,
            Err(failure) => return report(failure, sink, result),
        };
        self.process("Files", files, true, decider, sink, result);

        let dirs = match self.scanner.select_dir_candidates(dir) {
            Ok(selection) => selection,
            Err(failure) => return report(failure, sink, result),
        };
        self.process("Directories", dirs, false, decider, sink, result);
    }

    fn process(
        &self,
        heading: &str,
        selection: Selection,
        with_backup: bool,
        decider: &mut dyn DecisionProvider,
        sink: &mut dyn Sink,
        result: &mut RunResult,
    ) {
        for failure in selection.skipped {
            report(failure, sink, result);
        }

        let batch = selection.candidates;
        if batch.is_empty() {
            return;
        }
        if self.safe && !gate::confirm(heading, &batch, self.safe_limit, decider, sink) {
            return;
        }

        let backup = if with_backup {
            self.backup.as_ref()
        } else {
            None
        };
        executor::execute(&batch, backup, sink, result);
    }
}

fn report(failure: Failure, sink: &mut dyn Sink, result: &mut RunResult) {
    sink.error(&failure.to_string());
    result.errors += 1;
}

fn resolve_root(root: &Path) -> Result<PathBuf, ConfigError> {
    let meta = fs::metadata(root).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ConfigError::MissingRoot(root.to_path_buf()),
        _ => ConfigError::Resolve(root.to_path_buf(), e),
    })?;
    if !meta.is_dir() {
        return Err(ConfigError::RootNotDirectory(root.to_path_buf()));
    }
    root.canonicalize()
        .map_err(|e| ConfigError::Resolve(root.to_path_buf(), e))
}

/// Absolute form of `path`, canonicalizing the nearest ancestor that exists.
fn resolve_path(path: &Path) -> Result<PathBuf, ConfigError> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()
            .map_err(|e| ConfigError::Resolve(path.to_path_buf(), e))?
            .join(path)
    };

    let mut existing = absolute.as_path();
    let mut tail = Vec::new();
    loop {
        match existing.canonicalize() {
            Ok(mut resolved) => {
                resolved.extend(tail.iter().rev());
                return Ok(resolved);
            }
            Err(e) => match (existing.parent(), existing.file_name()) {
                (Some(parent), Some(name)) => {
                    tail.push(name.to_os_string());
                    existing = parent;
                }
                _ => return Err(ConfigError::Resolve(path.to_path_buf(), e)),
            },
        }
    }
}
