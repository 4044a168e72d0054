//! Error handling for the lswin crate.

use std::{io, result};

use thiserror::Error;

/// Convenient result type for lswin operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors that can occur while listing windows.
#[derive(Debug, Error)]
pub enum Error {
    /// Writing the listing failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Serializing the JSON listing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
