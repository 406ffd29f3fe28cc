// anchor/src/domain/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Failure to read or write the anchor store.
///
/// Absence of a bookmark or of a default is not an error; those come back as `None`.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("cannot read anchor store {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write anchor store {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot create store directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid anchor store {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize anchors: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("session state unavailable: {0}")]
    Session(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
