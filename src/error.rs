use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors returned by [`crate::selector::latest_file`].
#[derive(Debug, Error)]
pub enum SelectError {
    /// The directory (or one of its entries) could not be read.
    #[error("failed to read directory {path:?}: {source}")]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Nothing in the directory matched the filter. Expected while no export exists yet.
    #[error("no qualifying file found in {0:?}")]
    NoQualifyingFile(PathBuf),
}

/// Per-row problems found while averaging. The row is dropped and aggregation continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("malformed time of day: {0:?}")]
    MalformedTimestamp(String),

    #[error("malformed reading: {0:?}")]
    MalformedReading(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to read CSV export: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV export has no {0:?} column")]
    MissingColumn(&'static str),
}

/// A failed refresh cycle. The previously published snapshot stays in place.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Select(#[from] SelectError),

    #[error("directory scan did not complete: {0}")]
    Scan(#[from] tokio::task::JoinError),

    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path:?}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: ExportError,
    },
}

impl FetchError {
    /// `true` when the cycle failed only because no export exists yet.
    pub fn is_no_qualifying_file(&self) -> bool {
        matches!(self, FetchError::Select(SelectError::NoQualifyingFile(_)))
    }
}
