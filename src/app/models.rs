use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_SAFE_LIMIT: usize = 15;

/// Represents the final configuration after merging presets and CLI args.
#[derive(Debug, Clone)]
pub struct CleanConfig {
    pub root: PathBuf,
    pub file_match: Vec<String>,
    pub dir_match: Vec<String>,
    pub recursive: bool,
    pub safe: bool,
    pub safe_limit: usize,
    pub log_path: Option<PathBuf>,
    pub backup_root: Option<PathBuf>,
    pub verbose: bool,
}

impl CleanConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            file_match: Vec::new(),
            dir_match: Vec::new(),
            recursive: false,
            safe: false,
            safe_limit: DEFAULT_SAFE_LIMIT,
            log_path: None,
            backup_root: None,
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    ZeroByte,
    PatternMatch,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::ZeroByte => f.write_str("empty"),
            Reason::PatternMatch => f.write_str("matched"),
        }
    }
}

/// An entry selected for deletion in the current directory pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub kind: EntryKind,
    pub reason: Reason,
}

/// Tally of one run, used for the closing summary and the exit code.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunResult {
    pub files_deleted: usize,
    pub dirs_deleted: usize,
    pub errors: usize,
}

impl RunResult {
    pub fn is_clean(&self) -> bool {
        self.errors == 0
    }
}
