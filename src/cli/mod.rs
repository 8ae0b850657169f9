pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::FeedSource;

#[derive(Parser)]
#[command(name = "newsdeck")]
#[command(about = "Hacker News, Reddit and Medium in one terminal view", long_about = None)]
pub struct Cli {
    /// Path to the config file (default: ~/.config/newsdeck/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the backend base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the TUI (default)
    Tui {
        /// Feed shown first
        #[arg(short, long, value_enum, default_value_t = FeedSource::HackerNews)]
        source: FeedSource,
    },
    /// Fetch one feed and print its articles
    Fetch {
        #[arg(value_enum)]
        source: FeedSource,

        /// Only print articles whose title contains this text
        #[arg(short, long, default_value = "")]
        filter: String,
    },
    /// Refresh every feed concurrently and report the result per feed
    Refresh,
    /// List feed sources and their endpoints
    Sources,
}
