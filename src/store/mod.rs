pub mod feed_store;
pub mod registry;

use serde::Deserialize;

pub use feed_store::{FeedStore, RefreshOutcome};
pub use registry::FeedStores;

/// What a store shows after a refresh fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Drop the articles: `loading=false, articles=[]`.
    #[default]
    Clear,
    /// Keep the articles from the last successful refresh.
    Preserve,
}
