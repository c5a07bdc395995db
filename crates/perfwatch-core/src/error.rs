//! Shared error type across perfwatch crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed parameter or config.
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in error responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, PerfError>;

/// Unified error type used by core and gateway.
///
/// Only configuration and request-parameter mistakes surface here. Unknown
/// severity names and unknown graph names are normal outcomes and never
/// become errors.
#[derive(Debug, Error)]
pub enum PerfError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl PerfError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            PerfError::BadRequest(_) => ClientCode::BadRequest,
            PerfError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            PerfError::Internal(_) => ClientCode::Internal,
        }
    }
}
