use std::sync::Arc;

use futures::future::join_all;

use crate::app::Result;
use crate::config::FeedsConfig;
use crate::domain::FeedSource;
use crate::fetcher::ArticleFetcher;
use crate::store::{ErrorPolicy, FeedStore, RefreshOutcome};

/// One shared store per feed source.
///
/// Stores share the fetcher and nothing else; a failing source never touches
/// the state of the others.
pub struct FeedStores {
    hacker_news: Arc<FeedStore>,
    reddit: Arc<FeedStore>,
    medium: Arc<FeedStore>,
}

impl FeedStores {
    pub fn new(
        fetcher: Arc<dyn ArticleFetcher + Send + Sync>,
        feeds: &FeedsConfig,
        on_error: ErrorPolicy,
    ) -> Self {
        let build = |source: FeedSource| {
            Arc::new(FeedStore::with_policy(
                source,
                feeds.endpoint(source),
                fetcher.clone(),
                on_error,
            ))
        };

        Self {
            hacker_news: build(FeedSource::HackerNews),
            reddit: build(FeedSource::Reddit),
            medium: build(FeedSource::Medium),
        }
    }

    pub fn get(&self, source: FeedSource) -> &Arc<FeedStore> {
        match source {
            FeedSource::HackerNews => &self.hacker_news,
            FeedSource::Reddit => &self.reddit,
            FeedSource::Medium => &self.medium,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<FeedStore>> {
        FeedSource::ALL.into_iter().map(|source| self.get(source))
    }

    /// Refresh every source concurrently.
    pub async fn refresh_all(&self) -> Vec<(FeedSource, Result<RefreshOutcome>)> {
        let refreshes = self.iter().map(|store| async move {
            let result = store.refresh().await;
            (store.source(), result)
        });

        join_all(refreshes).await
    }
}
