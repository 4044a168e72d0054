//! Error handling for the movewin crate.

use std::result;

use thiserror::Error;

/// Convenient result type for movewin operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors that can occur while moving a window.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// The positional arguments do not describe a move.
    #[error("{0}")]
    Usage(String),
    /// Window operation failures, including missing authorization.
    #[error("{0}")]
    Window(#[from] winutils::Error),
}

impl Error {
    /// Helper to build a usage error from an arbitrary message.
    pub fn usage<M: Into<String>>(msg: M) -> Self {
        Self::Usage(msg.into())
    }
}
