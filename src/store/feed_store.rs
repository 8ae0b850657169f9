use std::future::Future;
use std::ops::Deref;
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use chrono::Utc;
use tokio::task::JoinHandle;

use crate::app::Result;
use crate::domain::{Article, FeedSnapshot, FeedSource, FeedStatus};
use crate::fetcher::ArticleFetcher;
use crate::store::ErrorPolicy;

/// Error message left in the store when a refresh is dropped mid-flight.
pub const CANCELLED: &str = "refresh cancelled";

/// How a finished refresh was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The response was written to the store.
    Applied { count: usize },
    /// A later refresh was issued before this one resolved; its response was dropped.
    Superseded,
}

struct StoreState {
    snapshot: FeedSnapshot,
    latest_ticket: u64,
}

/// State container for one feed source.
///
/// Status and articles change together under one lock, so a reader never
/// sees a half-applied refresh. Shared via `Arc` between every view of the
/// same source for the life of the process.
pub struct FeedStore {
    source: FeedSource,
    endpoint: String,
    fetcher: Arc<dyn ArticleFetcher + Send + Sync>,
    on_error: ErrorPolicy,
    state: RwLock<StoreState>,
}

impl FeedStore {
    pub fn new(
        source: FeedSource,
        endpoint: impl Into<String>,
        fetcher: Arc<dyn ArticleFetcher + Send + Sync>,
    ) -> Self {
        Self::with_policy(source, endpoint, fetcher, ErrorPolicy::default())
    }

    pub fn with_policy(
        source: FeedSource,
        endpoint: impl Into<String>,
        fetcher: Arc<dyn ArticleFetcher + Send + Sync>,
        on_error: ErrorPolicy,
    ) -> Self {
        Self {
            source,
            endpoint: endpoint.into(),
            fetcher,
            on_error,
            state: RwLock::new(StoreState {
                snapshot: FeedSnapshot::default(),
                latest_ticket: 0,
            }),
        }
    }

    pub fn source(&self) -> FeedSource {
        self.source
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot
            .clone()
    }

    /// Re-fetch this source and replace its articles.
    ///
    /// The store is already loading when this returns, before the future is
    /// first polled. Overlapping calls are allowed. Only the most recently
    /// issued call may write its response; earlier ones resolve as
    /// [`RefreshOutcome::Superseded`]. Dropping the future before it resolves
    /// ends the load with [`CANCELLED`] as the error.
    pub fn refresh(&self) -> impl Future<Output = Result<RefreshOutcome>> + Send + '_ {
        let ticket = self.begin_refresh();
        PendingRefresh::new(self, ticket).finish()
    }

    /// Like [`refresh`](Self::refresh), but runs the fetch on the tokio runtime.
    pub fn spawn_refresh(self: &Arc<Self>) -> JoinHandle<Result<RefreshOutcome>> {
        let ticket = self.begin_refresh();
        tokio::spawn(PendingRefresh::new(Arc::clone(self), ticket).finish())
    }

    fn begin_refresh(&self) -> u64 {
        let mut state = self.write();
        state.latest_ticket += 1;
        state.snapshot.status = FeedStatus::Loading;
        state.snapshot.revision += 1;

        let ticket = state.latest_ticket;
        tracing::debug!(source = %self.source, ticket, "refresh started");
        ticket
    }

    fn apply(&self, ticket: u64, result: Result<Vec<Article>>) -> Result<RefreshOutcome> {
        let mut state = self.write();
        if state.latest_ticket != ticket {
            drop(state);
            match &result {
                Ok(_) => tracing::debug!(source = %self.source, ticket, "dropping superseded response"),
                Err(e) => tracing::warn!(source = %self.source, ticket, "superseded refresh failed: {}", e),
            }
            return Ok(RefreshOutcome::Superseded);
        }

        let snapshot = &mut state.snapshot;
        snapshot.revision += 1;
        match result {
            Ok(articles) => {
                let count = articles.len();
                snapshot.status = FeedStatus::Loaded;
                snapshot.articles = Arc::new(articles);
                snapshot.refreshed_at = Some(Utc::now());
                drop(state);

                tracing::info!(source = %self.source, count, "refresh applied");
                Ok(RefreshOutcome::Applied { count })
            }
            Err(e) => {
                snapshot.status = FeedStatus::Error(e.to_string());
                if self.on_error == ErrorPolicy::Clear {
                    snapshot.articles = Arc::new(Vec::new());
                }
                drop(state);

                tracing::warn!(source = %self.source, "refresh failed: {}", e);
                Err(e)
            }
        }
    }

    /// Ends the load of a refresh that was dropped before its response arrived.
    /// Articles are left as they were.
    fn abandon(&self, ticket: u64) {
        let mut state = self.write();
        if state.latest_ticket != ticket {
            return;
        }
        state.snapshot.status = FeedStatus::Error(CANCELLED.to_string());
        state.snapshot.revision += 1;
        drop(state);

        tracing::debug!(source = %self.source, ticket, "refresh cancelled");
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A refresh whose ticket has been issued but whose response is not yet applied.
struct PendingRefresh<S: Deref<Target = FeedStore>> {
    store: S,
    ticket: u64,
    settled: bool,
}

impl<S: Deref<Target = FeedStore>> PendingRefresh<S> {
    fn new(store: S, ticket: u64) -> Self {
        Self {
            store,
            ticket,
            settled: false,
        }
    }

    async fn finish(mut self) -> Result<RefreshOutcome> {
        let result = self.store.fetcher.fetch(&self.store.endpoint).await;
        self.settled = true;
        self.store.apply(self.ticket, result)
    }
}

impl<S: Deref<Target = FeedStore>> Drop for PendingRefresh<S> {
    fn drop(&mut self) {
        if !self.settled {
            self.store.abandon(self.ticket);
        }
    }
}
