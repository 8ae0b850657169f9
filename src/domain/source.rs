use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::app::DeckError;

/// One of the independent article providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum FeedSource {
    #[value(name = "hackernews", alias = "hn")]
    HackerNews,
    Reddit,
    Medium,
}

impl FeedSource {
    pub const ALL: [FeedSource; 3] = [FeedSource::HackerNews, FeedSource::Reddit, FeedSource::Medium];

    pub fn label(self) -> &'static str {
        match self {
            FeedSource::HackerNews => "Hacker News",
            FeedSource::Reddit => "Reddit",
            FeedSource::Medium => "Medium",
        }
    }

    /// Path the backend serves this source's article array on.
    pub fn default_endpoint(self) -> &'static str {
        match self {
            FeedSource::HackerNews => "/api/hackernews",
            FeedSource::Reddit => "/api/reddit",
            FeedSource::Medium => "/api/medium",
        }
    }

    pub fn next(self) -> Self {
        match self {
            FeedSource::HackerNews => FeedSource::Reddit,
            FeedSource::Reddit => FeedSource::Medium,
            FeedSource::Medium => FeedSource::HackerNews,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FeedSource::HackerNews => FeedSource::Medium,
            FeedSource::Reddit => FeedSource::HackerNews,
            FeedSource::Medium => FeedSource::Reddit,
        }
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FeedSource {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '_', '-'], "").as_str() {
            "hackernews" | "hn" => Ok(FeedSource::HackerNews),
            "reddit" => Ok(FeedSource::Reddit),
            "medium" => Ok(FeedSource::Medium),
            _ => Err(DeckError::UnknownSource(s.to_string())),
        }
    }
}
