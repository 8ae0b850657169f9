use std::sync::Arc;

use crate::app::Result;
use crate::config::Config;
use crate::domain::FeedSource;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::ArticleFetcher;
use crate::store::FeedStores;
use crate::view::{FeedView, LogSink, TracingSink};
use crate::viewport::Viewport;

/// Wires the stores, viewport and log sink together.
///
/// Views are built from here so every view of a source shares its store.
pub struct AppContext {
    pub config: Config,
    pub stores: FeedStores,
    pub viewport: Viewport,
    pub sink: Arc<dyn LogSink>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher: Arc<dyn ArticleFetcher + Send + Sync> =
            Arc::new(HttpFetcher::new(&config.server)?);
        Ok(Self::with_fetcher(config, fetcher))
    }

    pub fn with_fetcher(config: Config, fetcher: Arc<dyn ArticleFetcher + Send + Sync>) -> Self {
        let stores = FeedStores::new(fetcher, &config.feeds, config.on_error);

        Self {
            config,
            stores,
            viewport: Viewport::default(),
            sink: Arc::new(TracingSink),
        }
    }

    pub fn view(&self, source: FeedSource) -> FeedView {
        FeedView::new(
            self.stores.get(source).clone(),
            self.viewport.subscribe(),
            self.sink.clone(),
        )
    }
}
