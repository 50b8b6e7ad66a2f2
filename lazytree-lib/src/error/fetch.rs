//! Child fetch error types

use std::time::Duration;

/// Errors a [`crate::source::ChildSource`] can report for a page request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The data source could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// The page did not arrive in time.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// The data source answered with something that is not a page.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
    },
}

impl FetchError {
    /// Creates a new network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a new parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Returns `true` if this error is potentially retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout(_))
    }
}
