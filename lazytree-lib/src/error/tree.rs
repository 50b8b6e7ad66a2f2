//! Tree operation error types

use crate::model::NodeId;
use crate::model::ParentKey;

/// Errors for operations that do not match the current tree model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// No regular node with this id exists in the model.
    #[error("Node '{0}' not found")]
    NodeNotFound(NodeId),

    /// The parent has no load-more entry to activate.
    #[error("No load-more entry under {0}")]
    SentinelNotFound(ParentKey),

    /// A page for this parent is already being fetched.
    #[error("Children of {0} are already loading")]
    AlreadyLoading(ParentKey),

    /// The node is a leaf.
    #[error("Node '{0}' has no children")]
    NotExpandable(NodeId),
}
