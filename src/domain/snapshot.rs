use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::Article;

/// Lifecycle position of a feed store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FeedStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// The last applied refresh failed; carries the rendered error.
    Error(String),
}

impl FeedStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, FeedStatus::Loading)
    }
}

/// The `{loading, articles}` pair read from a store at one instant.
#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    pub status: FeedStatus,
    pub articles: Arc<Vec<Article>>,
    /// Bumped on every state change.
    pub revision: u64,
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl FeedSnapshot {
    pub fn loading(&self) -> bool {
        self.status.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            FeedStatus::Error(message) => Some(message),
            _ => None,
        }
    }
}
