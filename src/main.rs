use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use newsdeck::app::AppContext;
use newsdeck::cli::{commands, Cli, Commands};
use newsdeck::config::Config;
use newsdeck::domain::FeedSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(base_url) = cli.base_url {
        config.server.base_url = base_url;
    }

    let ctx = AppContext::new(config)?;

    match cli.command.unwrap_or(Commands::Tui {
        source: FeedSource::HackerNews,
    }) {
        Commands::Tui { source } => {
            newsdeck::tui::run(Arc::new(ctx), source).await?;
        }
        Commands::Fetch { source, filter } => {
            commands::fetch_feed(&ctx, source, &filter).await?;
        }
        Commands::Refresh => {
            commands::refresh_all(&ctx).await?;
        }
        Commands::Sources => {
            commands::list_sources(&ctx);
        }
    }

    Ok(())
}
