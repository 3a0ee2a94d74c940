use serde::{Deserialize, Serialize};
use std::fmt;

/// Notifications a pageable collection emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollectionEvent {
    /// A fetch completed and the state reflects the new page.
    Sync,
    /// A sort is about to be applied.
    BeforeSort,
}

impl fmt::Display for CollectionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync => f.write_str("sync"),
            Self::BeforeSort => f.write_str("before-sort"),
        }
    }
}
