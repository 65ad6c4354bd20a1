//! Common error types used throughout nas-cinema.
//!
//! The message carried by each variant is the caller-facing description; the
//! variant decides the HTTP status it maps to.

/// Common error type for nas-cinema.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested media does not exist or the backing store refused it.
    #[error("{0}")]
    NotFound(String),

    /// Invalid input was provided.
    #[error("{0}")]
    InvalidInput(String),

    /// The backing store could not be reached or failed mid-request.
    #[error("{0}")]
    Upstream(String),

    /// An internal error occurred.
    #[error("{0}")]
    Internal(String),
}

impl Error {
    /// Create a new NotFound error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new Upstream error.
    pub fn upstream<S: Into<String>>(msg: S) -> Self {
        Self::Upstream(msg.into())
    }

    /// Create a new Internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    /// HTTP status code this error maps to.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::InvalidInput(_) => 400,
            Self::Upstream(_) | Self::Internal(_) => 500,
        }
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
