//! Shared error type across cacheprism crates.

use thiserror::Error;

/// Stable error classes (drive the degrade-or-propagate decision).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Broken deployment configuration. Never degraded.
    Configuration,
    /// Backend unreachable or timed out. Degradable.
    TransientBackend,
    /// Any other backend failure.
    Backend,
    /// Internal invariant violation.
    Internal,
}

impl ErrorClass {
    /// String representation used in logs and metrics labels.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorClass::Configuration => "CONFIGURATION",
            ErrorClass::TransientBackend => "TRANSIENT_BACKEND",
            ErrorClass::Backend => "BACKEND",
            ErrorClass::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, CachePrismError>;

/// Unified error type used by core and runtime.
#[derive(Debug, Error)]
pub enum CachePrismError {
    #[error("unknown cache profile \"{profile}\" (pattern {pattern})")]
    UnknownProfile { pattern: String, profile: String },
    #[error("you must specify \"timeout\" option in \"{pattern}\" cache profile")]
    MissingTimeout { pattern: String },
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
    #[error("invalid declaration for {pattern}: {reason}")]
    InvalidDeclaration { pattern: String, reason: String },
    #[error("backend misconfigured: {0}")]
    BackendMisconfigured(String),
    #[error("unsupported config version: {0}")]
    UnsupportedVersion(u32),
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("backend connection failed: {0}")]
    BackendConnection(String),
    #[error("backend timed out: {0}")]
    BackendTimeout(String),
    #[error("backend error: {0}")]
    Backend(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl CachePrismError {
    /// Map an error to its stable class.
    pub fn error_class(&self) -> ErrorClass {
        match self {
            CachePrismError::UnknownProfile { .. }
            | CachePrismError::MissingTimeout { .. }
            | CachePrismError::InvalidPattern(_)
            | CachePrismError::InvalidDeclaration { .. }
            | CachePrismError::BackendMisconfigured(_)
            | CachePrismError::UnsupportedVersion(_)
            | CachePrismError::BadConfig(_) => ErrorClass::Configuration,
            CachePrismError::BackendConnection(_) | CachePrismError::BackendTimeout(_) => {
                ErrorClass::TransientBackend
            }
            CachePrismError::Backend(_) => ErrorClass::Backend,
            CachePrismError::Internal(_) => ErrorClass::Internal,
        }
    }

    /// True for the two failure kinds the degradation guard may swallow.
    pub fn is_transient(&self) -> bool {
        self.error_class() == ErrorClass::TransientBackend
    }
}
