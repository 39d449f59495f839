use crate::app::backup::BackupWriter;
use crate::app::error::Failure;
use crate::app::formatter::OutputGenerator;
use crate::app::models::{Candidate, EntryKind, RunResult};
use crate::app::sink::Sink;
use std::fs;
use std::path::Path;

pub fn delete_file(path: &Path) -> Result<(), Failure> {
    fs::remove_file(path).map_err(|e| Failure::Delete(path.to_path_buf(), e))
}

/// Removes the directory and everything beneath it.
pub fn delete_directory_recursive(path: &Path) -> Result<(), Failure> {
    fs::remove_dir_all(path).map_err(|e| Failure::Delete(path.to_path_buf(), e))
}

/// Deletes one confirmed batch. Files are backed up first when a writer is given;
/// a failed backup leaves that file in place. One failure never stops the batch.
pub fn execute(
    batch: &[Candidate],
    backup: Option<&BackupWriter>,
    sink: &mut dyn Sink,
    result: &mut RunResult,
) {
    for candidate in batch {
        match delete_one(candidate, backup) {
            Ok(()) => {
                sink.detail(&OutputGenerator::deleted(candidate));
                match candidate.kind {
                    EntryKind::File => result.files_deleted += 1,
                    EntryKind::Directory => result.dirs_deleted += 1,
                }
            }
            Err(failure) => {
                sink.error(&failure.to_string());
                result.errors += 1;
            }
        }
    }
}

fn delete_one(candidate: &Candidate, backup: Option<&BackupWriter>) -> Result<(), Failure> {
    match candidate.kind {
        EntryKind::File => {
            if let Some(writer) = backup {
                writer.backup(&candidate.path)?;
            }
            delete_file(&candidate.path)
        }
        EntryKind::Directory => delete_directory_recursive(&candidate.path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::Reason;
    use crate::app::sink::MemorySink;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn file(path: PathBuf) -> Candidate {
        Candidate {
            path,
            kind: EntryKind::File,
            reason: Reason::PatternMatch,
        }
    }

    #[test]
    fn failure_does_not_stop_the_batch() {
        let dir = tempdir().unwrap();
        let keep_going = dir.path().join("second.log");
        fs::write(&keep_going, "x").unwrap();
        let batch = vec![file(dir.path().join("vanished.log")), file(keep_going.clone())];

        let mut sink = MemorySink::default();
        let mut result = RunResult::default();
        execute(&batch, None, &mut sink, &mut result);

        assert!(!keep_going.exists());
        assert_eq!(result.files_deleted, 1);
        assert_eq!(result.errors, 1);
        assert_eq!(sink.errors().len(), 1);
        assert!(sink.errors()[0].contains("vanished.log"));
        assert!(sink
            .lines()
            .contains(&format!("Deleted File: {}", keep_going.display()).as_str()));
    }

    #[test]
    fn directory_removal_ignores_contents() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("cache");
        fs::create_dir_all(target.join("deep/er")).unwrap();
        fs::write(target.join("deep/er/keepme.rs"), "fn main() {}").unwrap();
        let batch = vec![Candidate {
            path: target.clone(),
            kind: EntryKind::Directory,
            reason: Reason::PatternMatch,
        }];

        let mut sink = MemorySink::default();
        let mut result = RunResult::default();
        execute(&batch, None, &mut sink, &mut result);

        assert!(!target.exists());
        assert_eq!(result.dirs_deleted, 1);
        assert_eq!(
            sink.lines(),
            vec![format!("Deleted Directory: {}", target.display())]
        );
    }

    #[test]
    fn failed_backup_keeps_the_file() {
        let src = tempdir().unwrap();
        let bak = tempdir().unwrap();
        let victim = src.path().join("sub/data.log");
        fs::create_dir_all(victim.parent().unwrap()).unwrap();
        fs::write(&victim, "precious").unwrap();
        // A plain file where the backup needs a directory.
        fs::write(bak.path().join("sub"), "blocker").unwrap();

        let writer = BackupWriter::new(src.path().to_path_buf(), bak.path().to_path_buf());
        let mut sink = MemorySink::default();
        let mut result = RunResult::default();
        execute(&[file(victim.clone())], Some(&writer), &mut sink, &mut result);

        assert!(victim.exists());
        assert_eq!(result.files_deleted, 0);
        assert_eq!(result.errors, 1);
        assert!(sink.errors()[0].starts_with("Backup failed for"));
    }

    #[cfg(unix)]
    #[test]
    fn fifo_with_backup_is_kept_and_reported() {
        let src = tempdir().unwrap();
        let bak = tempdir().unwrap();
        let pipe = src.path().join("pipe");
        let status = std::process::Command::new("mkfifo")
            .arg(&pipe)
            .status()
            .unwrap();
        assert!(status.success());

        let writer = BackupWriter::new(src.path().to_path_buf(), bak.path().to_path_buf());
        let mut sink = MemorySink::default();
        let mut result = RunResult::default();
        execute(&[file(pipe.clone())], Some(&writer), &mut sink, &mut result);

        assert!(fs::symlink_metadata(&pipe).is_ok());
        assert_eq!(result.files_deleted, 0);
        assert_eq!(result.errors, 1);
        assert!(sink.errors()[0].contains("not a regular file"));
    }

    #[cfg(unix)]
    #[test]
    fn links_are_backed_up_as_links_then_removed() {
        use std::os::unix::fs::symlink;

        let src = tempdir().unwrap();
        let bak = tempdir().unwrap();
        let real = src.path().join("real.txt");
        fs::write(&real, "content").unwrap();
        let live = src.path().join("link.log");
        let dangling = src.path().join("dangling.log");
        symlink("real.txt", &live).unwrap();
        symlink("/nonexistent/target", &dangling).unwrap();

        let writer = BackupWriter::new(src.path().to_path_buf(), bak.path().to_path_buf());
        let mut sink = MemorySink::default();
        let mut result = RunResult::default();
        execute(
            &[file(dangling.clone()), file(live.clone())],
            Some(&writer),
            &mut sink,
            &mut result,
        );

        assert_eq!(result.errors, 0, "{:?}", sink.errors());
        assert_eq!(result.files_deleted, 2);
        assert!(fs::symlink_metadata(&dangling).is_err());
        assert!(fs::symlink_metadata(&live).is_err());
        assert_eq!(fs::read_to_string(&real).unwrap(), "content");
        assert_eq!(
            fs::read_link(bak.path().join("dangling.log")).unwrap(),
            PathBuf::from("/nonexistent/target")
        );
        assert_eq!(
            fs::read_link(bak.path().join("link.log")).unwrap(),
            PathBuf::from("real.txt")
        );
    }
}
