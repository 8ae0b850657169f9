pub mod http_fetcher;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::Article;

/// Fetch gateway: one GET per call, no retry.
///
/// Fails with [`DeckError::FetchFailed`](crate::app::DeckError::FetchFailed)
/// on transport errors, non-2xx responses and bodies that are not a JSON array.
#[async_trait]
pub trait ArticleFetcher {
    async fn fetch(&self, endpoint: &str) -> Result<Vec<Article>>;
}
