use crate::app::error::Failure;
use crate::app::matcher::PatternMatcher;
use crate::app::models::{Candidate, EntryKind, Reason};
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};

/// Candidates found in one directory, plus entries that could not be inspected.
#[derive(Debug, Default)]
pub struct Selection {
    pub candidates: Vec<Candidate>,
    pub skipped: Vec<Failure>,
}

pub struct Scanner {
    file_matcher: PatternMatcher,
    dir_matcher: PatternMatcher,
    protected: Vec<PathBuf>,
}

impl Scanner {
    pub fn new(file_matcher: PatternMatcher, dir_matcher: PatternMatcher) -> Self {
        Self {
            file_matcher,
            dir_matcher,
            protected: Vec::new(),
        }
    }

    /// Paths that are never offered as candidates (e.g. the run's own log file).
    pub fn protect(mut self, path: PathBuf) -> Self {
        self.protected.push(path);
        self
    }

    /// Files directly inside `dir` that are empty or whose name matches a file pattern.
    pub fn select_file_candidates(&self, dir: &Path) -> Result<Selection, Failure> {
        let (entries, skipped) = read_entries(dir)?;
        let mut selection = Selection {
            candidates: Vec::new(),
            skipped,
        };

        for DirItem { path, name, is_dir } in entries {
            if is_dir || self.protected.contains(&path) {
                continue;
            }

            // Links are inspected, not followed.
            let len = match fs::symlink_metadata(&path) {
                Ok(meta) => meta.len(),
                Err(e) => {
                    selection.skipped.push(Failure::Metadata(path, e));
                    continue;
                }
            };

            let reason = if len == 0 {
                Reason::ZeroByte
            } else if self.file_matcher.matches(&name) {
                Reason::PatternMatch
            } else {
                continue;
            };

            selection.candidates.push(Candidate {
                path,
                kind: EntryKind::File,
                reason,
            });
        }

        Ok(selection)
    }

    /// Subdirectories directly inside `dir` whose name matches a directory pattern.
    pub fn select_dir_candidates(&self, dir: &Path) -> Result<Selection, Failure> {
        if self.dir_matcher.is_empty() {
            return Ok(Selection::default());
        }

        let (entries, skipped) = read_entries(dir)?;
        let mut selection = Selection {
            candidates: Vec::new(),
            skipped,
        };

        for DirItem { path, name, is_dir } in entries {
            if is_dir && self.dir_matcher.matches(&name) {
                selection.candidates.push(Candidate {
                    path,
                    kind: EntryKind::Directory,
                    reason: Reason::PatternMatch,
                });
            }
        }

        Ok(selection)
    }
}

struct DirItem {
    path: PathBuf,
    name: String,
    is_dir: bool,
}

/// Lists `dir` one level deep, sorted by name. Links are never reported as directories.
fn read_entries(dir: &Path) -> Result<(Vec<DirItem>, Vec<Failure>), Failure> {
    let read = fs::read_dir(dir).map_err(|e| Failure::Enumerate(dir.to_path_buf(), e))?;

    let mut entries = Vec::new();
    let mut skipped = Vec::new();
    for entry in read {
        let entry = entry.map_err(|e| Failure::Enumerate(dir.to_path_buf(), e))?;
        match entry.file_type() {
            Ok(ft) => entries.push(DirItem {
                path: entry.path(),
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: ft.is_dir(),
            }),
            Err(e) => skipped.push(Failure::Metadata(entry.path(), e)),
        }
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok((entries, skipped))
}

/// Every directory beneath `root` (excluding `root`), captured in one walk,
/// along with the entries the walk could not read.
pub fn descendant_dirs(root: &Path) -> (Vec<PathBuf>, Vec<Failure>) {
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut dirs = Vec::new();
    let mut failures = Vec::new();
    for result in walker {
        match result {
            Ok(entry) => {
                if entry.depth() == 0 {
                    continue;
                }
                if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                    dirs.push(entry.into_path());
                }
            }
            Err(err) => failures.push(Failure::Walk(err)),
        }
    }
    (dirs, failures)
}
