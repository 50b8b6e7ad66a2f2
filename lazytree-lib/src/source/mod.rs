//! Child data sources.
//!
//! A [`ChildSource`] answers "give me up to `limit` children of `parent`,
//! skipping the first `skip`". The controller holds one behind an `Arc` and
//! never blocks on it.
//!
//! - [`MockSource`] - synthetic paged data with simulated latency
//! - [`TemplateSource`] - copies of a fixed child list for every parent

mod mock;
mod template;

pub use mock::MockSource;
pub use template::ChildTemplate;
pub use template::TemplateSource;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::model::FetchResult;
use crate::model::ParentKey;

/// Paged provider of child nodes.
#[async_trait]
pub trait ChildSource: Send + Sync {
    /// Fetches up to `limit` children of `parent`, starting after the first
    /// `skip`.
    ///
    /// The returned [`FetchResult::total`] is the number of children the
    /// parent has in total.
    async fn fetch(
        &self,
        parent: &ParentKey,
        skip: usize,
        limit: usize,
    ) -> Result<FetchResult, FetchError>;
}
