//! Skip accounting and load-more entry injection.

use std::collections::HashMap;

use log::debug;
use log::warn;

use crate::model::ParentKey;
use crate::model::RegularNode;
use crate::model::SentinelNode;
use crate::model::TreeNode;

use super::LoadState;

/// Tracks, per parent, how many children have been loaded so far.
///
/// One tracker belongs to one tree session. Skip entries are created on the
/// first completed fetch for a parent, only ever grow, and are never
/// removed.
///
/// # Example
///
/// ```
/// use lazytree_lib::model::{ParentKey, RegularNode};
/// use lazytree_lib::pagination::PaginationTracker;
///
/// let parent = ParentKey::node("0");
/// let mut tracker = PaginationTracker::new();
///
/// let batch = (0..100)
///     .map(|i| RegularNode::leaf(format!("0-{i}"), format!("node-0-{i}")))
///     .collect();
/// let nodes = tracker.build_page(batch, 1000, &parent);
///
/// assert_eq!(nodes.len(), 101);
/// assert_eq!(nodes[100].label(), "Load more (900 remaining)");
/// assert_eq!(tracker.current_skip(&parent), 100);
/// ```
#[derive(Debug, Default)]
pub struct PaginationTracker {
    /// Children already fetched, per parent.
    skips: HashMap<ParentKey, usize>,
    /// Lifecycle state, per parent.
    states: HashMap<ParentKey, LoadState>,
}

impl PaginationTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of children already fetched for `parent`, or 0.
    pub fn current_skip(&self, parent: &ParentKey) -> usize {
        self.skips.get(parent).copied().unwrap_or(0)
    }

    /// Returns the lifecycle state of `parent`.
    pub fn load_state(&self, parent: &ParentKey) -> LoadState {
        self.states.get(parent).copied().unwrap_or_default()
    }

    /// Records that a page request for `parent` has started.
    pub fn begin(&mut self, parent: &ParentKey) {
        self.states.insert(parent.clone(), LoadState::Loading);
    }

    /// Puts `parent` back into `state`, for a request that was abandoned.
    ///
    /// Like a failure, this never touches the skip entry.
    pub fn restore(&mut self, parent: &ParentKey, state: LoadState) {
        self.states.insert(parent.clone(), state);
    }

    /// Records that a page request for `parent` failed.
    ///
    /// The skip entry is left as it was, so the same page is requested again
    /// on retry.
    pub fn fail(&mut self, parent: &ParentKey) {
        self.states.insert(parent.clone(), LoadState::Failed);
    }

    /// Turns a fetched batch into the nodes to append under `parent`.
    ///
    /// The skip entry advances by the batch length on every successful fetch,
    /// including the last one. A load-more entry showing the remaining count
    /// is appended only while `skip < total`.
    pub fn build_page(
        &mut self,
        batch: Vec<RegularNode>,
        total: usize,
        parent: &ParentKey,
    ) -> Vec<TreeNode> {
        let fetched = batch.len();
        let skip = {
            let entry = self.skips.entry(parent.clone()).or_insert(0);
            *entry += fetched;
            *entry
        };

        let mut nodes: Vec<TreeNode> = batch.into_iter().map(TreeNode::Regular).collect();

        if skip < total {
            if fetched == 0 {
                warn!("empty page for {parent} with {} children outstanding", total - skip);
            }
            nodes.push(SentinelNode::new(parent.clone(), total - skip).into());
            self.states.insert(parent.clone(), LoadState::PartiallyLoaded);
        } else {
            self.states.insert(parent.clone(), LoadState::FullyLoaded);
        }

        debug!("page for {parent}: {fetched} fetched, {skip}/{total} loaded");
        nodes
    }
}
