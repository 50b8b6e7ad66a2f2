//! Lazily loaded, paginated tree model.
//!
//! A [`TreeController`] owns a [`model::TreeModel`] and fills it on demand
//! from an injected [`source::ChildSource`]. Large child lists are loaded a
//! page at a time: while more children remain, the last entry of a parent's
//! child sequence is a "load more" sentinel, and activating it fetches the
//! next page.
//!
//! # Example
//!
//! ```ignore
//! let source = Arc::new(MockSource::new(MockSourceConfig::default()));
//! let (host, mut events) = ChannelHost::new();
//! let controller = TreeController::new(model, source, Arc::new(host));
//!
//! controller.expand(&NodeId::new("0")).await?;
//! controller.on_activate(NodeRef::Sentinel(ParentKey::node("0"))).await?;
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod model;
pub mod pagination;
pub mod source;

pub use config::TreeConfig;
pub use controller::TreeController;
pub use error::Error;
