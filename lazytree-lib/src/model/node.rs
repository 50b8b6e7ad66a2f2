//! Node types.

use std::fmt;

/// Identifier of a regular tree node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
    /// Creates a node id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Owner of a child sequence.
///
/// `Root` is the virtual root holding the top-level nodes; it has no node of
/// its own in the model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParentKey {
    /// The top-level sequence.
    Root,
    /// The children of a regular node.
    Node(NodeId),
}

impl ParentKey {
    /// Key for the children of the node with this id.
    pub fn node(id: impl Into<NodeId>) -> Self {
        Self::Node(id.into())
    }

    /// Returns the owning node id, or `None` for the virtual root.
    pub fn node_id(&self) -> Option<&NodeId> {
        match self {
            Self::Root => None,
            Self::Node(id) => Some(id),
        }
    }
}

impl fmt::Display for ParentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("root"),
            Self::Node(id) => write!(f, "{id}"),
        }
    }
}

/// Handle to a node as seen by activation events.
///
/// A sentinel is addressed through the parent it belongs to, so it never
/// shares an id space with regular nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeRef {
    /// A regular node.
    Regular(NodeId),
    /// The load-more entry of a parent.
    Sentinel(ParentKey),
}

/// A node carrying user data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegularNode {
    /// Unique id within the tree.
    pub id: NodeId,
    /// Display name.
    pub name: String,
    /// Whether the node may have children.
    pub has_children: bool,
    /// Loaded children, `None` until the first fetch.
    pub children: Option<Vec<TreeNode>>,
    /// Whether the children are shown.
    pub expanded: bool,
}

impl RegularNode {
    /// Creates a node that never has children.
    pub fn leaf(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            has_children: false,
            children: None,
            expanded: false,
        }
    }

    /// Creates a node whose children are fetched on first expand.
    pub fn lazy(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            has_children: true,
            ..Self::leaf(id, name)
        }
    }

    /// Creates a node with its children already in place.
    pub fn with_children(
        id: impl Into<NodeId>,
        name: impl Into<String>,
        children: Vec<TreeNode>,
    ) -> Self {
        Self {
            has_children: true,
            children: Some(children),
            ..Self::leaf(id, name)
        }
    }

    /// Marks the node as expanded.
    pub fn expanded(mut self) -> Self {
        self.expanded = true;
        self
    }

    /// Returns `true` once children have been loaded.
    pub fn is_loaded(&self) -> bool {
        self.children.is_some()
    }

    /// Number of loaded regular children.
    pub fn loaded_count(&self) -> usize {
        self.children
            .as_deref()
            .map(|children| children.iter().filter(|c| !c.is_sentinel()).count())
            .unwrap_or(0)
    }
}

/// Progress of a load-more entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SentinelStatus {
    /// Waiting for activation.
    #[default]
    Idle,
    /// A page is being fetched.
    Loading,
    /// The last fetch failed; activating again retries it.
    Failed(String),
}

/// The "load more" entry appended after a partial page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentinelNode {
    /// The parent whose next page this entry loads.
    pub parent: ParentKey,
    /// Children not loaded yet.
    pub remaining: usize,
    /// Current status.
    pub status: SentinelStatus,
}

impl SentinelNode {
    /// Creates an idle load-more entry.
    pub fn new(parent: ParentKey, remaining: usize) -> Self {
        Self {
            parent,
            remaining,
            status: SentinelStatus::Idle,
        }
    }

    /// Text shown in place of a node name.
    pub fn label(&self) -> String {
        match &self.status {
            SentinelStatus::Idle => format!("Load more ({} remaining)", self.remaining),
            SentinelStatus::Loading => "Loading more nodes".to_string(),
            SentinelStatus::Failed(reason) => {
                format!("Failed to load more nodes: {reason} (activate to retry)")
            }
        }
    }
}

/// An entry in a child sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    /// A node carrying user data.
    Regular(RegularNode),
    /// The load-more entry, always last in its sequence.
    Sentinel(SentinelNode),
}

impl TreeNode {
    /// Returns `true` for a load-more entry.
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Self::Sentinel(_))
    }

    pub fn as_regular(&self) -> Option<&RegularNode> {
        match self {
            Self::Regular(node) => Some(node),
            Self::Sentinel(_) => None,
        }
    }

    pub fn as_sentinel(&self) -> Option<&SentinelNode> {
        match self {
            Self::Sentinel(node) => Some(node),
            Self::Regular(_) => None,
        }
    }

    pub fn as_sentinel_mut(&mut self) -> Option<&mut SentinelNode> {
        match self {
            Self::Sentinel(node) => Some(node),
            Self::Regular(_) => None,
        }
    }

    /// Handle used to activate this node.
    pub fn node_ref(&self) -> NodeRef {
        match self {
            Self::Regular(node) => NodeRef::Regular(node.id.clone()),
            Self::Sentinel(node) => NodeRef::Sentinel(node.parent.clone()),
        }
    }

    /// Display text.
    pub fn label(&self) -> String {
        match self {
            Self::Regular(node) => node.name.clone(),
            Self::Sentinel(node) => node.label(),
        }
    }
}

impl From<RegularNode> for TreeNode {
    fn from(node: RegularNode) -> Self {
        Self::Regular(node)
    }
}

impl From<SentinelNode> for TreeNode {
    fn from(node: SentinelNode) -> Self {
        Self::Sentinel(node)
    }
}
