//! # newsdeck
//!
//! A terminal client that shows Hacker News, Reddit and Medium articles
//! served by a backend as JSON arrays.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → Normalizer → FeedStore → FeedView (filter) → TUI
//! ```
//!
//! - [`fetcher`]: single-attempt HTTP GET per feed endpoint
//! - [`normalizer`]: JSON array body to feed records
//! - [`store`]: one shared state container per feed source
//! - [`view`]: mount-time refresh, filter query, render output
//! - [`tui`]: terminal front-end built with ratatui
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the TUI
//! newsdeck
//!
//! # Print one feed, filtered
//! newsdeck fetch reddit --filter rust
//!
//! # Refresh every feed
//! newsdeck refresh
//! ```

/// Application context and error types.
///
/// The [`AppContext`](app::AppContext) struct wires together the feed stores,
/// the viewport and the log sink.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Configuration loaded from `~/.config/newsdeck/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`Article`](domain::Article): a feed record, passed through as raw JSON
/// - [`FeedSnapshot`](domain::FeedSnapshot): status and articles of one store
/// - [`FeedSource`](domain::FeedSource): Hacker News, Reddit, Medium
pub mod domain;

/// HTTP fetching.
///
/// - [`ArticleFetcher`](fetcher::ArticleFetcher): async trait for the gateway
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Title filtering.
pub mod filter;

/// Response body parsing.
pub mod normalizer;

/// Per-source feed state.
///
/// - [`FeedStore`](store::FeedStore): loading flag and articles, refreshed asynchronously
/// - [`FeedStores`](store::FeedStores): one store per source
pub mod store;

/// Terminal user interface.
///
/// Tab switches feeds, typing filters by title, Enter opens the selected
/// article, Ctrl+r reloads, Esc quits.
pub mod tui;

/// View controller bound to one feed store.
pub mod view;

/// Terminal size observer.
pub mod viewport;
