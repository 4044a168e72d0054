//! Error handling for the bouncewin crate.

use std::result;

use thiserror::Error;

/// Convenient result type for bouncewin operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors that end a bounce session.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// No eligible window matched the pattern.
    #[error("no window matches '{0}'")]
    NotFound(String),
    /// A window matched but has no Accessibility counterpart.
    #[error("unable to reach '{0}' through Accessibility")]
    Unresolved(String),
    /// Window operation failures, including missing authorization.
    #[error("{0}")]
    Window(#[from] winutils::Error),
}
