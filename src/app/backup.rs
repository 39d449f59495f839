use crate::app::error::Failure;
use pathdiff::diff_paths;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Mirrors files under a backup root, keeping their path relative to the source root.
pub struct BackupWriter {
    source_root: PathBuf,
    backup_root: PathBuf,
}

impl BackupWriter {
    pub fn new(source_root: PathBuf, backup_root: PathBuf) -> Self {
        Self {
            source_root,
            backup_root,
        }
    }

    /// Where `file` lands inside the backup tree.
    pub fn destination(&self, file: &Path) -> Option<PathBuf> {
        let relative = diff_paths(file, &self.source_root)?;
        if relative.starts_with("..") {
            return None;
        }
        Some(self.backup_root.join(relative))
    }

    /// Copies `file` into the backup tree, replacing an earlier copy at the same path.
    /// Links are recreated as links; anything other than a file or link is refused.
    pub fn backup(&self, file: &Path) -> Result<PathBuf, Failure> {
        let fail = |e: io::Error| Failure::Backup(file.to_path_buf(), e);
        let dest = self.destination(file).ok_or_else(|| {
            fail(io::Error::new(
                io::ErrorKind::InvalidInput,
                "file is outside the target directory",
            ))
        })?;

        let file_type = fs::symlink_metadata(file).map_err(fail)?.file_type();
        if !file_type.is_file() && !file_type.is_symlink() {
            return Err(fail(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a regular file",
            )));
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(fail)?;
        }
        // Never write through a link left by an earlier run.
        if let Ok(previous) = fs::symlink_metadata(&dest) {
            if !previous.is_dir() {
                fs::remove_file(&dest).map_err(fail)?;
            }
        }

        if file_type.is_symlink() {
            copy_link(file, &dest).map_err(fail)?;
        } else {
            fs::copy(file, &dest).map_err(fail)?;
        }
        log::debug!("Backed up {} to {}", file.display(), dest.display());
        Ok(dest)
    }
}

#[cfg(unix)]
fn copy_link(link: &Path, dest: &Path) -> io::Result<()> {
    let target = fs::read_link(link)?;
    std::os::unix::fs::symlink(target, dest)
}

#[cfg(not(unix))]
fn copy_link(_link: &Path, _dest: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "symlink backup is only supported on unix",
    ))
}
