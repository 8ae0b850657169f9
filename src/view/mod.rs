//! View controller for a single feed source.
//!
//! A [`FeedView`] is bound to one shared [`FeedStore`]. Mounting triggers one
//! refresh; the filter query lives here and is applied to whatever snapshot the
//! store holds when a frame is built.

pub mod sink;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::app::Result;
use crate::domain::{Article, FeedSnapshot, FeedSource};
use crate::filter::project;
use crate::store::{FeedStore, RefreshOutcome};
use crate::viewport::{Dimensions, ViewportSubscription};

pub use sink::{LogSink, TracingSink};

/// One rendered article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub key: String,
    pub title: String,
    pub author: Option<String>,
    pub score: Option<i64>,
    pub url: Option<String>,
}

impl Card {
    fn new(key: String, article: &Article) -> Self {
        Self {
            key,
            title: article.display_title(),
            author: article.author().map(String::from),
            score: article.score(),
            url: article.url().map(String::from),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewBody {
    Loading,
    Cards(Vec<Card>),
}

/// Everything the rendering layer needs for one draw.
#[derive(Debug, Clone)]
pub struct ViewFrame {
    pub source: FeedSource,
    pub viewport: Dimensions,
    pub query: String,
    pub body: ViewBody,
    pub error: Option<String>,
    /// Articles in the store before filtering.
    pub total: usize,
}

struct Memo {
    revision: u64,
    query: String,
    visible: Arc<Vec<Article>>,
}

pub struct FeedView {
    store: Arc<FeedStore>,
    sink: Arc<dyn LogSink>,
    viewport: ViewportSubscription,
    query: String,
    mounted: bool,
    memo: Option<Memo>,
}

impl FeedView {
    pub fn new(store: Arc<FeedStore>, viewport: ViewportSubscription, sink: Arc<dyn LogSink>) -> Self {
        Self {
            store,
            sink,
            viewport,
            query: String::new(),
            mounted: false,
            memo: None,
        }
    }

    pub fn source(&self) -> FeedSource {
        self.store.source()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Reset the query, report the previous article count and start one refresh.
    ///
    /// Must be called within a tokio runtime.
    pub fn mount(&mut self) -> JoinHandle<Result<RefreshOutcome>> {
        self.query.clear();
        self.mounted = true;

        let previous_count = self.store.snapshot().articles.len();
        self.sink.mounted(self.store.source(), previous_count);

        self.store.spawn_refresh()
    }

    /// The in-flight refresh keeps running; its result only lands in the store.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.memo = None;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
    }

    /// Filtered articles for the current snapshot and query.
    pub fn visible(&mut self) -> Arc<Vec<Article>> {
        let snapshot = self.store.snapshot();
        self.visible_for(&snapshot)
    }

    pub fn frame(&mut self) -> ViewFrame {
        let snapshot = self.store.snapshot();

        let body = if snapshot.loading() {
            ViewBody::Loading
        } else {
            ViewBody::Cards(cards(&self.visible_for(&snapshot)))
        };

        ViewFrame {
            source: self.store.source(),
            viewport: self.viewport.latest(),
            query: self.query.clone(),
            body,
            error: snapshot.error().map(String::from),
            total: snapshot.articles.len(),
        }
    }

    fn visible_for(&mut self, snapshot: &FeedSnapshot) -> Arc<Vec<Article>> {
        if let Some(memo) = &self.memo {
            if memo.revision == snapshot.revision && memo.query == self.query {
                return memo.visible.clone();
            }
        }

        let visible: Arc<Vec<Article>> = Arc::new(
            project(distinct(&snapshot.articles), &self.query)
                .into_iter()
                .cloned()
                .collect(),
        );
        self.memo = Some(Memo {
            revision: snapshot.revision,
            query: self.query.clone(),
            visible: visible.clone(),
        });
        visible
    }
}

/// One article per render key; a repeated key keeps only its last occurrence,
/// which stays at its own position.
fn distinct(articles: &[Article]) -> Vec<&Article> {
    let keys: Vec<String> = articles.iter().map(Article::render_key).collect();

    let mut last_index = HashMap::with_capacity(keys.len());
    for (index, key) in keys.iter().enumerate() {
        last_index.insert(key.as_str(), index);
    }

    articles
        .iter()
        .zip(&keys)
        .enumerate()
        .filter(|(index, (_, key))| last_index.get(key.as_str()) == Some(index))
        .map(|(_, (article, _))| article)
        .collect()
}

fn cards(articles: &[Article]) -> Vec<Card> {
    articles
        .iter()
        .map(|article| Card::new(article.render_key(), article))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::store::feed_store::test_support::*;
    use crate::viewport::Viewport;

    const ENDPOINT: &str = "/api/hackernews";

    #[derive(Default)]
    struct RecordingSink {
        mounts: Mutex<Vec<(FeedSource, usize)>>,
    }

    impl LogSink for RecordingSink {
        fn mounted(&self, source: FeedSource, previous_count: usize) {
            self.mounts.lock().unwrap().push((source, previous_count));
        }
    }

    fn setup(fetcher: StaticFetcher) -> (Arc<StaticFetcher>, Arc<FeedStore>, Arc<RecordingSink>, Viewport) {
        let fetcher = Arc::new(fetcher);
        let store = Arc::new(FeedStore::new(FeedSource::HackerNews, ENDPOINT, fetcher.clone()));
        (fetcher, store, Arc::new(RecordingSink::default()), Viewport::new(Dimensions::new(80, 24)))
    }

    fn titles(frame: &ViewFrame) -> Vec<&str> {
        match &frame.body {
            ViewBody::Cards(cards) => cards.iter().map(|c| c.title.as_str()).collect(),
            ViewBody::Loading => panic!("still loading"),
        }
    }

    #[tokio::test]
    async fn test_mount_triggers_exactly_one_refresh() {
        let (fetcher, store, sink, viewport) = setup(StaticFetcher::default().ok(ENDPOINT, foo_bar()));
        let mut view = FeedView::new(store, viewport.subscribe(), sink);

        let handle = view.mount();
        assert_eq!(view.frame().body, ViewBody::Loading);

        handle.await.unwrap().unwrap();
        assert_eq!(fetcher.call_count(), 1);

        let frame = view.frame();
        assert_eq!(titles(&frame), vec!["Foo", "Bar"]);
        assert_eq!(frame.total, 2);
        assert_eq!(frame.viewport, Dimensions::new(80, 24));
    }

    #[tokio::test]
    async fn test_mount_logs_previous_count() {
        let (_, store, sink, viewport) = setup(StaticFetcher::default().ok(ENDPOINT, foo_bar()));
        let mut view = FeedView::new(store, viewport.subscribe(), sink.clone());

        view.mount().await.unwrap().unwrap();
        view.unmount();
        view.mount().await.unwrap().unwrap();

        let mounts = sink.mounts.lock().unwrap().clone();
        assert_eq!(
            mounts,
            vec![(FeedSource::HackerNews, 0), (FeedSource::HackerNews, 2)]
        );
    }

    #[tokio::test]
    async fn test_query_filters_cards() {
        let (_, store, sink, viewport) = setup(StaticFetcher::default().ok(ENDPOINT, foo_bar()));
        let mut view = FeedView::new(store, viewport.subscribe(), sink);
        view.mount().await.unwrap().unwrap();

        view.push_char('o');
        view.push_char('o');
        let frame = view.frame();
        assert_eq!(frame.query, "oo");
        assert_eq!(titles(&frame), vec!["Foo"]);

        view.pop_char();
        view.pop_char();
        assert_eq!(titles(&view.frame()), vec!["Foo", "Bar"]);
    }

    #[tokio::test]
    async fn test_mount_resets_query() {
        let (_, store, sink, viewport) = setup(StaticFetcher::default().ok(ENDPOINT, foo_bar()));
        let mut view = FeedView::new(store, viewport.subscribe(), sink);

        view.set_query("bar");
        view.mount().await.unwrap().unwrap();
        assert_eq!(view.query(), "");
    }

    #[tokio::test]
    async fn test_visible_is_memoized_until_something_changes() {
        let (_, store, sink, viewport) = setup(StaticFetcher::default().ok(ENDPOINT, foo_bar()));
        let mut view = FeedView::new(store, viewport.subscribe(), sink);
        view.mount().await.unwrap().unwrap();

        let first = view.visible();
        let second = view.visible();
        assert!(Arc::ptr_eq(&first, &second));

        view.set_query("bar");
        let third = view.visible();
        assert!(!Arc::ptr_eq(&second, &third));
        assert_eq!(third.len(), 1);
    }

    #[tokio::test]
    async fn test_failure_clears_loading_indicator() {
        let (_, store, sink, viewport) =
            setup(StaticFetcher::default().failing(ENDPOINT, "connection refused"));
        let mut view = FeedView::new(store, viewport.subscribe(), sink);

        assert!(view.mount().await.unwrap().is_err());

        let frame = view.frame();
        assert_eq!(frame.body, ViewBody::Cards(Vec::new()));
        assert!(frame.error.unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_response_after_unmount_is_harmless() {
        let (_, store, sink, viewport) = setup(StaticFetcher::default().ok(ENDPOINT, foo_bar()));
        let mut view = FeedView::new(store.clone(), viewport.subscribe(), sink);

        let handle = view.mount();
        view.unmount();
        drop(view);

        assert!(handle.await.unwrap().is_ok());
        assert_eq!(*store.snapshot().articles, foo_bar());
    }

    #[tokio::test]
    async fn test_views_share_one_store() {
        let (fetcher, store, sink, viewport) = setup(StaticFetcher::default().ok(ENDPOINT, foo_bar()));
        let mut first = FeedView::new(store.clone(), viewport.subscribe(), sink.clone());
        let mut second = FeedView::new(store, viewport.subscribe(), sink);

        first.mount().await.unwrap().unwrap();
        second.set_query("bar");

        assert_eq!(titles(&second.frame()), vec!["Bar"]);
        assert_eq!(titles(&first.frame()), vec!["Foo", "Bar"]);
        assert_eq!(fetcher.call_count(), 1);
    }

    #[tokio::test]
    async fn test_frame_reads_latest_viewport() {
        let (_, store, sink, viewport) = setup(StaticFetcher::default().ok(ENDPOINT, foo_bar()));
        let mut view = FeedView::new(store, viewport.subscribe(), sink);

        viewport.resize(Dimensions::new(132, 50));
        assert_eq!(view.frame().viewport, Dimensions::new(132, 50));
    }

    fn keyed(frame: &ViewFrame) -> Vec<(&str, &str)> {
        match &frame.body {
            ViewBody::Cards(cards) => cards.iter().map(|c| (c.key.as_str(), c.title.as_str())).collect(),
            ViewBody::Loading => panic!("still loading"),
        }
    }

    #[tokio::test]
    async fn test_duplicate_ids_keep_last_occurrence() {
        let duplicated = vec![article(1, "first"), article(2, "other"), article(1, "second")];
        let (_, store, sink, viewport) = setup(StaticFetcher::default().ok(ENDPOINT, duplicated));
        let mut view = FeedView::new(store, viewport.subscribe(), sink);
        view.mount().await.unwrap().unwrap();

        assert_eq!(keyed(&view.frame()), vec![("2", "other"), ("1", "second")]);

        view.set_query("first");
        assert!(keyed(&view.frame()).is_empty());

        view.set_query("second");
        assert_eq!(keyed(&view.frame()), vec![("1", "second")]);
    }

    #[tokio::test]
    async fn test_numeric_and_text_ids_are_distinct_cards() {
        let mixed = vec![
            Article::new(serde_json::json!({"id": 1, "title": "numeric"})),
            Article::new(serde_json::json!({"id": "1", "title": "text"})),
        ];
        let (_, store, sink, viewport) = setup(StaticFetcher::default().ok(ENDPOINT, mixed));
        let mut view = FeedView::new(store, viewport.subscribe(), sink);
        view.mount().await.unwrap().unwrap();

        assert_eq!(keyed(&view.frame()), vec![("1", "numeric"), ("s:1", "text")]);
    }
}
