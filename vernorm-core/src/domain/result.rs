//! Result and error types for the core library

use std::path::PathBuf;

use thiserror::Error;

/// Core library error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot read migrations directory {}: {source}", .path.display())]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Rename conflict: {from} -> {to} (destination already exists)")]
    RenameConflict { from: String, to: String },

    #[error("Failed to rename {from} -> {to}: {source}")]
    Rename {
        from: String,
        to: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Version group {version} has {size} files, more than a synthetic time can address")]
    GroupOverflow { version: String, size: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
