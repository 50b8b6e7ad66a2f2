//! Error types

mod fetch;
mod tree;

pub use fetch::*;
pub use tree::*;

/// Errors returned by [`crate::TreeController`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The child source failed to deliver a page.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The requested tree operation does not apply to the current model.
    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl Error {
    /// Returns `true` if repeating the operation may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Fetch(err) => err.is_retryable(),
            Self::Tree(TreeError::AlreadyLoading(_)) => true,
            Self::Tree(_) => false,
        }
    }
}
