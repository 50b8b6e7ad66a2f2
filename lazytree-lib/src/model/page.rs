//! Page type for child fetches.

use super::RegularNode;

/// One page of children returned by a [`crate::source::ChildSource`].
///
/// `total` is the number of children the parent has in the data source,
/// not the number of items in this page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    items: Vec<RegularNode>,
    total: usize,
}

impl FetchResult {
    /// Creates a page.
    pub fn new(items: Vec<RegularNode>, total: usize) -> Self {
        Self { items, total }
    }

    /// Returns the items in this page.
    pub fn items(&self) -> &[RegularNode] {
        &self.items
    }

    /// Consumes the page and returns the items.
    pub fn into_items(self) -> Vec<RegularNode> {
        self.items
    }

    /// Total children available for the parent.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Returns `true` if this page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}
