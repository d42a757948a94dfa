use api_scaffold_core::ScaffoldResult;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::report::FileStatus;

/// Copy `path` to `<path>.backup.<YYYYmmddHHMMSS>`.
///
/// Two backups taken within the same second share a name; the later one wins.
pub fn backup(path: &Path) -> ScaffoldResult<PathBuf> {
    let stamp = Local::now().format("%Y%m%d%H%M%S");
    let mut name = path.as_os_str().to_os_string();
    name.push(format!(".backup.{}", stamp));
    let target = PathBuf::from(name);

    fs::copy(path, &target)?;
    debug!("Backed up {} to {}", path.display(), target.display());
    Ok(target)
}

/// Writes generated files under the overwrite and backup policy.
#[derive(Debug, Clone, Copy)]
pub struct FileWriter {
    force: bool,
    backup_existing: bool,
}

impl FileWriter {
    pub fn new(force: bool, backup_existing: bool) -> Self {
        Self {
            force,
            backup_existing,
        }
    }

    /// Absent files are created; existing files are skipped unless forced,
    /// and backed up first when backups are on.
    pub fn write(&self, path: &Path, content: &str) -> ScaffoldResult<FileStatus> {
        if path.exists() {
            if !self.force {
                debug!("Skipping existing {}", path.display());
                return Ok(FileStatus::Skipped);
            }

            let backup = if self.backup_existing {
                Some(backup(path)?)
            } else {
                None
            };
            fs::write(path, content)?;
            info!("Overwrote {}", path.display());
            return Ok(FileStatus::Overwritten { backup });
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        info!("Created {}", path.display());
        Ok(FileStatus::Created)
    }
}
