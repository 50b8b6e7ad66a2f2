//! Per-parent in-flight fetch registry.

use dashmap::DashSet;

use crate::model::ParentKey;

/// Parents with a page fetch outstanding.
#[derive(Debug, Default)]
pub(crate) struct InFlight {
    parents: DashSet<ParentKey>,
}

impl InFlight {
    /// Claims `parent`, or returns `None` if a fetch is already running.
    ///
    /// The claim is released when the guard is dropped, including when the
    /// fetching future itself is dropped.
    pub(crate) fn try_begin(&self, parent: &ParentKey) -> Option<InFlightGuard<'_>> {
        if !self.parents.insert(parent.clone()) {
            return None;
        }
        Some(InFlightGuard {
            parents: &self.parents,
            parent: parent.clone(),
        })
    }

    pub(crate) fn contains(&self, parent: &ParentKey) -> bool {
        self.parents.contains(parent)
    }
}

pub(crate) struct InFlightGuard<'a> {
    parents: &'a DashSet<ParentKey>,
    parent: ParentKey,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.parents.remove(&self.parent);
    }
}
