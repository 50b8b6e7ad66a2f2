//! Undo of a page load whose future was dropped mid-fetch.

use log::debug;
use log::warn;
use tokio::sync::Mutex;

use crate::model::ParentKey;
use crate::model::SentinelStatus;
use crate::pagination::LoadState;

use super::ControllerState;

/// Restores the pre-fetch state of a parent unless disarmed.
///
/// Armed while a page fetch is awaited. If the owning future is dropped
/// there, the parent's load state and its load-more entry go back to what
/// they were before the fetch started.
pub(super) struct ResetOnCancel<'a> {
    state: &'a Mutex<ControllerState>,
    parent: &'a ParentKey,
    load_state: LoadState,
    sentinel: Option<SentinelStatus>,
    armed: bool,
}

impl<'a> ResetOnCancel<'a> {
    pub(super) fn new(
        state: &'a Mutex<ControllerState>,
        parent: &'a ParentKey,
        load_state: LoadState,
        sentinel: Option<SentinelStatus>,
    ) -> Self {
        Self {
            state,
            parent,
            load_state,
            sentinel,
            armed: true,
        }
    }

    /// The fetch completed; nothing to undo.
    pub(super) fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for ResetOnCancel<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        // The lock is never held across a fetch, so it is normally free here.
        let Ok(mut state) = self.state.try_lock() else {
            warn!("load of {} cancelled but state is locked; not restored", self.parent);
            return;
        };
        state.tracker.restore(self.parent, self.load_state);
        if let Some(status) = self.sentinel.take()
            && let Some(sentinel) = state.model.sentinel_mut(self.parent)
        {
            sentinel.status = status;
        }
        debug!("load of {} cancelled; restored {}", self.parent, self.load_state);
    }
}
