#![allow(dead_code)]

use std::{
    fs::{self, File},
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

use tempfile::TempDir;

/// Writes `name` into `dir` and stamps it `mtime_secs` after the epoch.
pub fn write_file(dir: &Path, name: &str, contents: &str, mtime_secs: u64) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write file");
    let file = File::options().write(true).open(&path).expect("open file");
    file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(mtime_secs))
        .expect("set mtime");
    path
}

pub fn export_dir() -> TempDir {
    TempDir::new().expect("tempdir")
}

/// Header, the discarded first row, then three readings over two quarters.
pub const EXPORT: &str = "Datum;Systemzeit ;LAS\n\
    01.08.2024;08:02:59;99,9\n\
    01.08.2024;08:03:00;50,0\n\
    01.08.2024;08:07:00;52,0\n\
    01.08.2024;08:20:00;48,0\n";
