//! Tree controller.
//!
//! Connects the model, the pagination tracker, a child source and a host.

mod in_flight;
mod reset;

use std::sync::Arc;

use log::debug;
use log::info;
use log::warn;
use tokio::sync::Mutex;

use crate::config::TreeConfig;
use crate::error::Error;
use crate::error::FetchError;
use crate::error::TreeError;
use crate::host::TreeHost;
use crate::model::FetchResult;
use crate::model::NodeId;
use crate::model::NodeRef;
use crate::model::ParentKey;
use crate::model::SentinelStatus;
use crate::model::TreeModel;
use crate::model::TreeNode;
use crate::pagination::LoadState;
use crate::pagination::PaginationTracker;
use crate::source::ChildSource;

use in_flight::InFlight;
use reset::ResetOnCancel;

/// State guarded by the controller lock.
#[derive(Debug, Default)]
struct ControllerState {
    model: TreeModel,
    tracker: PaginationTracker,
    /// The node most recently activated.
    active: Option<NodeRef>,
}

/// Owns a lazily loaded tree and drives its pagination.
///
/// All methods take `&self`; the controller can be shared behind an `Arc`
/// and driven from several tasks. At most one page fetch per parent is in
/// flight at any time. The internal lock is never held across a fetch.
///
/// Every loaded page is installed into the model under the same lock that
/// advances the parent's skip count, so the skip count always equals the
/// number of regular children loaded under that parent.
///
/// # Example
///
/// ```ignore
/// let controller = TreeController::new(model, Arc::new(source), Arc::new(NoopHost))
///     .with_config(TreeConfig::default().with_page_size(50));
///
/// controller.expand(&NodeId::new("0")).await?;
/// controller.on_activate(NodeRef::Sentinel(ParentKey::node("0"))).await?;
/// ```
pub struct TreeController {
    config: TreeConfig,
    source: Arc<dyn ChildSource>,
    host: Arc<dyn TreeHost>,
    state: Mutex<ControllerState>,
    in_flight: InFlight,
}

impl TreeController {
    /// Creates a controller over an initial model.
    pub fn new(model: TreeModel, source: Arc<dyn ChildSource>, host: Arc<dyn TreeHost>) -> Self {
        Self {
            config: TreeConfig::default(),
            source,
            host,
            state: Mutex::new(ControllerState {
                model,
                ..Default::default()
            }),
            in_flight: InFlight::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: TreeConfig) -> Self {
        self.config = config;
        self
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Returns a copy of the current model.
    pub async fn snapshot(&self) -> TreeModel {
        self.state.lock().await.model.clone()
    }

    /// Children of `parent` fetched so far.
    pub async fn skip(&self, parent: &ParentKey) -> usize {
        self.state.lock().await.tracker.current_skip(parent)
    }

    /// Lifecycle state of `parent`.
    ///
    /// `Loading` only while a fetch is actually outstanding: a load whose
    /// future is dropped mid-fetch puts the parent back into its previous
    /// state.
    pub async fn load_state(&self, parent: &ParentKey) -> LoadState {
        self.state.lock().await.tracker.load_state(parent)
    }

    /// The node most recently activated, if still active.
    pub async fn active(&self) -> Option<NodeRef> {
        self.state.lock().await.active.clone()
    }

    /// Returns `true` while a page fetch for `parent` is outstanding.
    pub fn is_loading(&self, parent: &ParentKey) -> bool {
        self.in_flight.contains(parent)
    }

    // -------------------------------------------------------------------------
    // Loading
    // -------------------------------------------------------------------------

    /// Loads the next page of children for `parent` and returns it.
    ///
    /// This is the lazy-load hook a host calls when it needs children. The
    /// page is appended to the model like any other page (replacing the
    /// previous load-more entry) and the returned nodes end with a new
    /// load-more entry when more remain. A fully loaded parent yields an
    /// empty page without fetching.
    pub async fn fetch_children(&self, parent: &ParentKey) -> Result<Vec<TreeNode>, Error> {
        let Some(_guard) = self.in_flight.try_begin(parent) else {
            return Err(TreeError::AlreadyLoading(parent.clone()).into());
        };
        if self.load_state(parent).await == LoadState::FullyLoaded {
            debug!("{parent} already fully loaded");
            return Ok(Vec::new());
        }

        let nodes = self.load_page(parent, None).await?;
        self.host.model_changed();
        Ok(nodes)
    }

    /// Expands a node, loading its first page of children if needed.
    pub async fn expand(&self, id: &NodeId) -> Result<(), Error> {
        if self.mark_expanded(id).await? {
            self.host.model_changed();
            return Ok(());
        }

        let parent = ParentKey::Node(id.clone());
        let Some(_guard) = self.in_flight.try_begin(&parent) else {
            return Err(TreeError::AlreadyLoading(parent).into());
        };
        // Another load may have finished while we waited for the claim.
        if self.mark_expanded(id).await? {
            self.host.model_changed();
            return Ok(());
        }

        debug!("expanding {id}: loading first page");
        self.load_page(&parent, None).await?;
        self.host.model_changed();
        Ok(())
    }

    /// Collapses a node. Loaded children are kept.
    pub async fn collapse(&self, id: &NodeId) -> Result<(), Error> {
        {
            let mut state = self.state.lock().await;
            let node = state
                .model
                .find_mut(id)
                .ok_or_else(|| TreeError::NodeNotFound(id.clone()))?;
            node.expanded = false;
        }
        self.host.model_changed();
        Ok(())
    }

    /// Loads the next page of top-level nodes.
    ///
    /// Does nothing once the root is fully loaded.
    pub async fn load_root(&self) -> Result<(), Error> {
        let parent = ParentKey::Root;
        let Some(_guard) = self.in_flight.try_begin(&parent) else {
            return Err(TreeError::AlreadyLoading(parent).into());
        };
        if self.load_state(&parent).await == LoadState::FullyLoaded {
            debug!("root already fully loaded");
            return Ok(());
        }

        self.load_page(&parent, None).await?;
        self.host.model_changed();
        Ok(())
    }

    /// Handles a user activation of any node.
    ///
    /// The node becomes the active one. Load-more entries trigger
    /// [`load_more`](Self::load_more); other nodes need no further work.
    pub async fn on_activate(&self, node: NodeRef) -> Result<(), Error> {
        self.state.lock().await.active = Some(node.clone());
        match node {
            NodeRef::Sentinel(parent) => self.load_more(&parent).await,
            NodeRef::Regular(_) => Ok(()),
        }
    }

    /// Loads the next page for the parent owning a load-more entry.
    ///
    /// The entry shows a loading label while the page is fetched. On success
    /// it is replaced by the new children (followed by a fresh entry if more
    /// remain) and the active node is deactivated. On failure the entry turns
    /// into a retryable error entry and the skip count is unchanged. If the
    /// returned future is dropped before the page arrives, the entry goes
    /// back to its previous status.
    ///
    /// A second activation while a fetch for the same parent is running is
    /// rejected with [`TreeError::AlreadyLoading`].
    pub async fn load_more(&self, parent: &ParentKey) -> Result<(), Error> {
        let Some(_guard) = self.in_flight.try_begin(parent) else {
            debug!("load more for {parent} ignored: already loading");
            return Err(TreeError::AlreadyLoading(parent.clone()).into());
        };

        let previous = {
            let mut state = self.state.lock().await;
            let sentinel = state
                .model
                .sentinel_mut(parent)
                .ok_or_else(|| TreeError::SentinelNotFound(parent.clone()))?;
            std::mem::replace(&mut sentinel.status, SentinelStatus::Loading)
        };
        self.host.model_changed();
        info!("loading more children of {parent}");

        match self.load_page(parent, Some(previous)).await {
            Ok(_) => {
                let deactivated = self.state.lock().await.active.take();
                self.host.model_changed();
                if let Some(node) = deactivated {
                    self.host.node_deactivated(&node);
                }
                Ok(())
            }
            Err(err) => {
                warn!("loading more children of {parent} failed: {err}");
                self.host.model_changed();
                Err(err)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Sets the expanded flag. Returns `true` if children are already loaded.
    async fn mark_expanded(&self, id: &NodeId) -> Result<bool, TreeError> {
        let mut state = self.state.lock().await;
        let node = state
            .model
            .find_mut(id)
            .ok_or_else(|| TreeError::NodeNotFound(id.clone()))?;
        if !node.has_children {
            return Err(TreeError::NotExpandable(id.clone()));
        }
        node.expanded = true;
        Ok(node.is_loaded())
    }

    /// Fetches the page at the current skip and installs it under `parent`.
    ///
    /// Callers hold the in-flight claim for `parent`. `sentinel` is the
    /// status the load-more entry had before the caller marked it loading;
    /// it is put back if this future is dropped mid-fetch. On failure the
    /// load-more entry, if any, is marked failed.
    async fn load_page(
        &self,
        parent: &ParentKey,
        sentinel: Option<SentinelStatus>,
    ) -> Result<Vec<TreeNode>, Error> {
        let (skip, previous) = {
            let mut state = self.state.lock().await;
            if let Some(id) = parent.node_id()
                && state.model.find(id).is_none()
            {
                return Err(TreeError::NodeNotFound(id.clone()).into());
            }
            let previous = state.tracker.load_state(parent);
            state.tracker.begin(parent);
            (state.tracker.current_skip(parent), previous)
        };

        let reset = ResetOnCancel::new(&self.state, parent, previous, sentinel);
        let result = self.fetch_page(parent, skip).await;
        let mut state = self.state.lock().await;
        reset.disarm();

        match result {
            Ok(page) => {
                let total = page.total();
                let nodes = state.tracker.build_page(page.into_items(), total, parent);
                state.model.remove_sentinel(parent);
                state.model.append(parent, nodes.clone())?;
                Ok(nodes)
            }
            Err(err) => {
                state.tracker.fail(parent);
                if let Some(sentinel) = state.model.sentinel_mut(parent) {
                    sentinel.status = SentinelStatus::Failed(err.to_string());
                }
                Err(err.into())
            }
        }
    }

    async fn fetch_page(&self, parent: &ParentKey, skip: usize) -> Result<FetchResult, FetchError> {
        let fetch = self.source.fetch(parent, skip, self.config.page_size.max(1));
        match self.config.fetch_timeout {
            Some(limit) => tokio::time::timeout(limit, fetch)
                .await
                .map_err(|_| FetchError::Timeout(limit))?,
            None => fetch.await,
        }
    }
}

impl std::fmt::Debug for TreeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeController")
            .field("config", &self.config)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}
