use crate::app::{AppContext, Result};
use crate::domain::{Article, FeedSource};
use crate::filter::project;
use crate::store::RefreshOutcome;

pub async fn fetch_feed(ctx: &AppContext, source: FeedSource, filter: &str) -> Result<()> {
    let store = ctx.stores.get(source);
    store.refresh().await?;

    let snapshot = store.snapshot();
    let visible = project(snapshot.articles.iter(), filter);

    if visible.is_empty() {
        println!("No articles");
        return Ok(());
    }

    for article in &visible {
        println!("{}", format_article(article));
    }

    if !filter.is_empty() {
        println!(
            "\n{} of {} articles match \"{}\"",
            visible.len(),
            snapshot.articles.len(),
            filter
        );
    }

    Ok(())
}

pub async fn refresh_all(ctx: &AppContext) -> Result<()> {
    println!("Refreshing {} feeds...", FeedSource::ALL.len());

    let mut errors = 0;
    for (source, result) in ctx.stores.refresh_all().await {
        match result {
            Ok(RefreshOutcome::Applied { count }) => println!("  {}: {} articles", source, count),
            Ok(RefreshOutcome::Superseded) => println!("  {}: superseded", source),
            Err(e) => {
                errors += 1;
                eprintln!("  Error refreshing {}: {}", source, e);
            }
        }
    }

    println!("Refresh complete: {} errors", errors);
    Ok(())
}

pub fn list_sources(ctx: &AppContext) {
    for source in FeedSource::ALL {
        println!("{}\n  {}", source, ctx.config.feeds.endpoint(source));
    }
}

fn format_article(article: &Article) -> String {
    let score = article
        .score()
        .map(|s| format!("{:>5}", s))
        .unwrap_or_else(|| "     ".to_string());

    let mut line = format!("{} {}", score, article.display_title());
    if let Some(author) = article.author() {
        line.push_str(&format!(" ({})", author));
    }
    if let Some(url) = article.url() {
        line.push_str(&format!("\n      {}", url));
    }
    line
}
