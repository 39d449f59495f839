use crate::app::models::{Candidate, EntryKind, RunResult};

pub struct OutputGenerator;

impl OutputGenerator {
    /// Heading plus at most `limit` candidate lines, in selection order.
    pub fn preview(heading: &str, candidates: &[Candidate], limit: usize) -> Vec<String> {
        let shown = candidates.len().min(limit);
        let mut lines = Vec::with_capacity(shown + 2);
        lines.push(format!(
            "{} to delete (showing {} of {}):",
            heading,
            shown,
            candidates.len()
        ));

        for candidate in &candidates[..shown] {
            let marker = if candidate.kind == EntryKind::Directory {
                "/"
            } else {
                ""
            };
            lines.push(format!(
                "  {}{} ({})",
                candidate.path.display(),
                marker,
                candidate.reason
            ));
        }

        let hidden = candidates.len() - shown;
        if hidden > 0 {
            lines.push(format!("  ... and {} more", hidden));
        }
        lines
    }

    pub fn deleted(candidate: &Candidate) -> String {
        match candidate.kind {
            EntryKind::File => format!("Deleted File: {}", candidate.path.display()),
            EntryKind::Directory => format!("Deleted Directory: {}", candidate.path.display()),
        }
    }

    pub fn summary(result: &RunResult) -> String {
        let dirs = if result.dirs_deleted == 1 {
            "directory"
        } else {
            "directories"
        };
        format!(
            "Deleted {} file(s) and {} {} with {} error(s).",
            result.files_deleted, result.dirs_deleted, dirs, result.errors
        )
    }
}
