use thiserror::Error;

/// Errors that can occur during window operations.
///
/// "No matching window" is deliberately absent: enumeration reports a count
/// and resolution returns `Option`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Accessibility permission is required but not granted.
    #[error("not authorized to use accessibility API")]
    Permission,

    /// Failed to create an Accessibility API application element.
    #[error("Failed to create AX application element for pid {0}")]
    AppElement(i32),

    /// An Accessibility API operation failed with the given error code.
    #[error("AX operation failed: code {0}")]
    AxCode(i32),

    /// The AX element became invalid (e.g., window closed) during the operation.
    #[error("AX element invalid (window gone)")]
    WindowGone,

    /// The requested attribute or operation is not supported.
    #[error("Unsupported attribute")]
    Unsupported,

    /// A caller-supplied argument was rejected before touching the platform.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result alias for window operations.
pub type Result<T> = std::result::Result<T, Error>;
