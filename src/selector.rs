use std::{
    fs, io,
    path::{Path, PathBuf},
    time::SystemTime,
};

use crate::error::SelectError;

/// Which directory entries count as exports.
#[derive(Debug, Clone)]
pub struct FileFilter {
    pub suffix: String,

    /// Names with this prefix are bookkeeping files written by the sync tool.
    pub excluded_prefix: String,

    pub skip_hidden: bool,
}

impl Default for FileFilter {
    fn default() -> Self {
        Self {
            suffix: ".csv".to_string(),
            excluded_prefix: "_gsdata_".to_string(),
            skip_hidden: true,
        }
    }
}

impl FileFilter {
    pub fn matches(&self, name: &str) -> bool {
        if self.skip_hidden && name.starts_with('.') {
            return false;
        }
        if !self.excluded_prefix.is_empty() && name.starts_with(&self.excluded_prefix) {
            return false;
        }
        name.ends_with(&self.suffix)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestFile {
    pub name: String,
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// Finds the most recently modified regular file in `dir` that passes `filter`.
///
/// Ties on modification time go to the lexicographically greatest name.
pub fn latest_file(dir: &Path, filter: &FileFilter) -> Result<LatestFile, SelectError> {
    let unreadable = |source: io::Error| SelectError::DirectoryUnreadable {
        path: dir.to_path_buf(),
        source,
    };

    let mut latest: Option<LatestFile> = None;

    for entry in fs::read_dir(dir).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;

        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if !filter.matches(&name) {
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(m) => m,
            // Removed between listing and stat.
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(e) => return Err(unreadable(e)),
        };
        if !metadata.file_type().is_file() {
            continue;
        }
        let modified = metadata.modified().map_err(unreadable)?;

        let newer = latest
            .as_ref()
            .is_none_or(|l| (modified, name.as_str()) > (l.modified, l.name.as_str()));
        if newer {
            latest = Some(LatestFile {
                path: entry.path(),
                name,
                modified,
            });
        }
    }

    latest.ok_or_else(|| SelectError::NoQualifyingFile(dir.to_path_buf()))
}
