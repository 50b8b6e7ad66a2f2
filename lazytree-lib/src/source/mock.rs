//! Synthetic paged data source.

use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use log::debug;

use crate::config::MockSourceConfig;
use crate::error::FetchError;
use crate::model::FetchResult;
use crate::model::ParentKey;
use crate::model::RegularNode;

use super::ChildSource;

/// Generates leaf children for any parent after a fixed delay.
///
/// Every parent reports the same total. Child `i` of parent `p` has id
/// `p-i` (`root-i` at the top level) and name `node-p-i`.
///
/// # Example
///
/// ```
/// use lazytree_lib::config::MockSourceConfig;
/// use lazytree_lib::source::MockSource;
///
/// let source = MockSource::new(MockSourceConfig::instant().with_total(250));
/// source.fail_next(1);
/// ```
#[derive(Debug, Default)]
pub struct MockSource {
    config: MockSourceConfig,
    /// Fetches left that should fail.
    failures: AtomicUsize,
    /// Fetches started so far.
    calls: AtomicUsize,
}

impl MockSource {
    /// Creates a mock source.
    pub fn new(config: MockSourceConfig) -> Self {
        Self {
            config,
            failures: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    /// Makes the next `n` fetches fail with a network error.
    pub fn fail_next(&self, n: usize) {
        self.failures.store(n, Ordering::SeqCst);
    }

    /// Number of fetches started so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn child_id(parent: &ParentKey, index: usize) -> String {
        match parent {
            ParentKey::Root => format!("root-{index}"),
            ParentKey::Node(id) => format!("{id}-{index}"),
        }
    }
}

#[async_trait]
impl ChildSource for MockSource {
    async fn fetch(
        &self,
        parent: &ParentKey,
        skip: usize,
        limit: usize,
    ) -> Result<FetchResult, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        debug!("mock fetch for {parent}: skip {skip}, limit {limit}");

        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }

        let failing = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(FetchError::network(format!("simulated failure fetching {parent}")));
        }

        let total = self.config.total;
        let end = total.min(skip.saturating_add(limit));
        let items = (skip.min(end)..end)
            .map(|i| RegularNode::leaf(Self::child_id(parent, i), format!("node-{parent}-{i}")))
            .collect();

        Ok(FetchResult::new(items, total))
    }
}
