//! Tree data model.
//!
//! - [`TreeNode`] - a regular node or a "load more" sentinel
//! - [`FetchResult`] - one page of children delivered by a source
//! - [`TreeModel`] - the owned node hierarchy under the virtual root

mod node;
mod page;
mod tree;

pub use node::NodeId;
pub use node::NodeRef;
pub use node::ParentKey;
pub use node::RegularNode;
pub use node::SentinelNode;
pub use node::SentinelStatus;
pub use node::TreeNode;
pub use page::FetchResult;
pub use tree::FlatRow;
pub use tree::TreeModel;
