//! Loading lifecycle of a single parent.

use std::fmt;

/// Where a parent is in its loading lifecycle.
///
/// ```text
/// NotLoaded -> Loading -> PartiallyLoaded -> Loading -> ... -> FullyLoaded
///                 |                             |
///                 +--------> Failed <-----------+
/// ```
///
/// `PartiallyLoaded -> Loading` only happens on an explicit load-more
/// activation. `Failed -> Loading` is a retry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LoadState {
    /// No page has been requested.
    #[default]
    NotLoaded,
    /// A page request is outstanding.
    Loading,
    /// Some children are loaded and a load-more entry is present.
    PartiallyLoaded,
    /// All children are loaded.
    FullyLoaded,
    /// The last page request failed.
    Failed,
}

impl LoadState {
    /// Returns `true` if more pages can be requested.
    pub fn can_load_more(&self) -> bool {
        matches!(self, Self::NotLoaded | Self::PartiallyLoaded | Self::Failed)
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotLoaded => "not loaded",
            Self::Loading => "loading",
            Self::PartiallyLoaded => "partially loaded",
            Self::FullyLoaded => "fully loaded",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}
