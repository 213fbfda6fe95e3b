use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while talking to the store.
///
/// A missing record is not an error; [`crate::Store::load`] returns `Ok(None)`
/// for that case.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Internal database error {0}")]
    Internal(#[from] agdb::DbError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize configuration: {0}")]
    Config(#[from] toml::ser::Error),
    #[error("Background storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("Database schema version {found} is not supported (expected {expected})")]
    SchemaMismatch { found: u64, expected: u64 },
    #[error("Database file is corrupt or not a database: {}", .0.display())]
    Corrupt(PathBuf),
    #[error("Could not determine the home directory")]
    NoHomeDir,
    #[error("Path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),
    #[error("The database returned an unexpected result")]
    UnexpectedResult,
}
