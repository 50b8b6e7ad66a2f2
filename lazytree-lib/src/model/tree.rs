//! Owned node hierarchy.

use crate::error::TreeError;

use super::NodeId;
use super::NodeRef;
use super::ParentKey;
use super::RegularNode;
use super::SentinelNode;
use super::TreeNode;

/// A visible row in the flattened tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRow {
    /// Handle for activating the row.
    pub node: NodeRef,
    /// Display text.
    pub label: String,
    /// Depth in tree (0 = top level).
    pub depth: u16,
    /// Whether the node may have children.
    pub has_children: bool,
    /// Whether the node is currently expanded.
    pub is_expanded: bool,
}

/// The node hierarchy below the virtual root.
///
/// Every child sequence is owned by its parent; the top-level sequence is
/// owned by the model itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeModel {
    roots: Vec<TreeNode>,
}

impl TreeModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a model with initial top-level nodes.
    pub fn with_roots(roots: Vec<TreeNode>) -> Self {
        Self { roots }
    }

    /// Returns the top-level nodes.
    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    /// Finds a regular node by id (depth-first).
    pub fn find(&self, id: &NodeId) -> Option<&RegularNode> {
        find_in(&self.roots, id)
    }

    /// Finds a regular node by id for mutation.
    pub fn find_mut(&mut self, id: &NodeId) -> Option<&mut RegularNode> {
        find_in_mut(&mut self.roots, id)
    }

    /// Returns the loaded child sequence owned by `parent`.
    pub fn children(&self, parent: &ParentKey) -> Option<&[TreeNode]> {
        match parent {
            ParentKey::Root => Some(&self.roots),
            ParentKey::Node(id) => self.find(id)?.children.as_deref(),
        }
    }

    /// Returns the loaded child sequence owned by `parent` for mutation.
    pub fn children_mut(&mut self, parent: &ParentKey) -> Option<&mut Vec<TreeNode>> {
        match parent {
            ParentKey::Root => Some(&mut self.roots),
            ParentKey::Node(id) => self.find_mut(id)?.children.as_mut(),
        }
    }

    /// Returns the load-more entry of `parent`, if it has one.
    pub fn sentinel(&self, parent: &ParentKey) -> Option<&SentinelNode> {
        self.children(parent)?
            .iter()
            .rev()
            .find_map(TreeNode::as_sentinel)
    }

    /// Returns the load-more entry of `parent` for mutation.
    pub fn sentinel_mut(&mut self, parent: &ParentKey) -> Option<&mut SentinelNode> {
        self.children_mut(parent)?
            .iter_mut()
            .rev()
            .find_map(TreeNode::as_sentinel_mut)
    }

    /// Removes the load-more entry of `parent`.
    ///
    /// Pops it when it is last, which is where it always lives; otherwise
    /// falls back to filtering the whole sequence. Regular siblings keep
    /// their order either way. Returns `true` if an entry was removed.
    pub fn remove_sentinel(&mut self, parent: &ParentKey) -> bool {
        let Some(children) = self.children_mut(parent) else {
            return false;
        };

        if children.last().is_some_and(TreeNode::is_sentinel) {
            children.pop();
            return true;
        }

        let before = children.len();
        children.retain(|child| !child.is_sentinel());
        children.len() != before
    }

    /// Appends nodes to the child sequence of `parent`.
    ///
    /// At the virtual root the nodes go straight into the top-level sequence.
    /// For a node whose children were never loaded, the appended nodes become
    /// its first children.
    pub fn append(&mut self, parent: &ParentKey, nodes: Vec<TreeNode>) -> Result<(), TreeError> {
        match parent {
            ParentKey::Root => self.roots.extend(nodes),
            ParentKey::Node(id) => {
                let node = self
                    .find_mut(id)
                    .ok_or_else(|| TreeError::NodeNotFound(id.clone()))?;
                node.children.get_or_insert_with(Vec::new).extend(nodes);
            }
        }
        Ok(())
    }

    /// Flattens the visible part of the tree into rows.
    ///
    /// Children are included only below expanded nodes.
    pub fn flatten(&self) -> Vec<FlatRow> {
        let mut rows = Vec::new();
        flatten_into(&self.roots, 0, &mut rows);
        rows
    }
}

fn find_in<'a>(nodes: &'a [TreeNode], id: &NodeId) -> Option<&'a RegularNode> {
    for node in nodes {
        let TreeNode::Regular(regular) = node else {
            continue;
        };
        if regular.id == *id {
            return Some(regular);
        }
        if let Some(children) = regular.children.as_deref()
            && let Some(found) = find_in(children, id)
        {
            return Some(found);
        }
    }
    None
}

fn find_in_mut<'a>(nodes: &'a mut [TreeNode], id: &NodeId) -> Option<&'a mut RegularNode> {
    for node in nodes {
        let TreeNode::Regular(regular) = node else {
            continue;
        };
        if regular.id == *id {
            return Some(regular);
        }
        if let Some(children) = regular.children.as_mut()
            && let Some(found) = find_in_mut(children, id)
        {
            return Some(found);
        }
    }
    None
}

fn flatten_into(nodes: &[TreeNode], depth: u16, rows: &mut Vec<FlatRow>) {
    for node in nodes {
        match node {
            TreeNode::Regular(regular) => {
                rows.push(FlatRow {
                    node: node.node_ref(),
                    label: regular.name.clone(),
                    depth,
                    has_children: regular.has_children,
                    is_expanded: regular.expanded,
                });
                if regular.expanded
                    && let Some(children) = regular.children.as_deref()
                {
                    flatten_into(children, depth + 1, rows);
                }
            }
            TreeNode::Sentinel(sentinel) => rows.push(FlatRow {
                node: node.node_ref(),
                label: sentinel.label(),
                depth,
                has_children: false,
                is_expanded: false,
            }),
        }
    }
}
