//! Controller and mock source configuration

use std::time::Duration;

/// Configuration for a [`crate::TreeController`].
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use lazytree_lib::TreeConfig;
///
/// let config = TreeConfig::default()
///     .with_page_size(50)
///     .with_fetch_timeout(Duration::from_secs(10));
///
/// assert_eq!(config.page_size, 50);
/// ```
#[derive(Debug, Clone)]
pub struct TreeConfig {
    /// Maximum children requested per page. Values below 1 are treated
    /// as 1.
    ///
    /// Default: 100
    pub page_size: usize,

    /// Upper bound on a single page fetch. `None` waits indefinitely.
    ///
    /// Default: none
    pub fetch_timeout: Option<Duration>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            page_size: 100,
            fetch_timeout: None,
        }
    }
}

impl TreeConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size, at least 1.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Sets the fetch timeout.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }
}

/// Configuration for [`crate::source::MockSource`].
#[derive(Debug, Clone)]
pub struct MockSourceConfig {
    /// Simulated network latency per fetch.
    ///
    /// Default: 3 seconds
    pub latency: Duration,

    /// Children every parent reports.
    ///
    /// Default: 1000
    pub total: usize,
}

impl Default for MockSourceConfig {
    fn default() -> Self {
        Self {
            latency: Duration::from_secs(3),
            total: 1000,
        }
    }
}

impl MockSourceConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the simulated latency.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Sets the total children per parent.
    pub fn with_total(mut self, total: usize) -> Self {
        self.total = total;
        self
    }

    /// A config with no latency, for tests.
    pub fn instant() -> Self {
        Self {
            latency: Duration::ZERO,
            ..Default::default()
        }
    }
}
