use crate::domain::FeedSource;

/// Observability hook for view lifecycle diagnostics.
pub trait LogSink: Send + Sync {
    /// A view mounted while its store held `previous_count` articles.
    fn mounted(&self, source: FeedSource, previous_count: usize);
}

/// Forwards view diagnostics to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn mounted(&self, source: FeedSource, previous_count: usize) {
        tracing::info!(%source, "Previous number of articles: {}", previous_count);
    }
}
