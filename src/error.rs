//! Error types for communicator configuration validation

use thiserror::Error;

/// A single, user-correctable configuration problem.
///
/// `Config::prepare` collects these into a `Vec` instead of returning on
/// the first failure, so the user sees every problem in one pass. None
/// of these are process-fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The communicator type is not one of `none`, `ssh`, or `winrm`
    #[error("communicator type '{0}' is invalid, must be one of: none, ssh, winrm")]
    UnsupportedKind(String),

    /// A field required by the selected communicator is absent
    #[error("{0} must be specified")]
    MissingField(String),

    /// The shell communicator has no usable credential
    #[error("no authentication method configured: {0}")]
    MissingAuthentication(String),
}

/// Result type alias using ValidationError
pub type Result<T> = std::result::Result<T, ValidationError>;

impl ValidationError {
    /// Create an unsupported-kind error from the raw template value
    pub fn unsupported_kind(kind: impl Into<String>) -> Self {
        ValidationError::UnsupportedKind(kind.into())
    }

    /// Create a missing-field error naming the field
    pub fn missing_field(field: impl Into<String>) -> Self {
        ValidationError::MissingField(field.into())
    }

    /// Create a missing-authentication error
    pub fn missing_auth(msg: impl Into<String>) -> Self {
        ValidationError::MissingAuthentication(msg.into())
    }
}
