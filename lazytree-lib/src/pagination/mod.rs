//! Per-parent pagination bookkeeping.

mod state;
mod tracker;

pub use state::LoadState;
pub use tracker::PaginationTracker;
