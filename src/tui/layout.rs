use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::config::ColorConfig;
use crate::domain::FeedSource;
use crate::tui::app::TuiApp;
use crate::view::{Card, ViewBody, ViewFrame};

pub fn render(frame: &mut Frame, app: &mut TuiApp, view: &ViewFrame, colors: &ColorConfig) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Source tabs
            Constraint::Length(1), // Viewport
            Constraint::Length(3), // Filter input
            Constraint::Min(3),    // Cards
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_tabs(frame, view.source, chunks[0], colors);
    render_viewport(frame, view, chunks[1]);
    render_filter(frame, view, chunks[2], colors);
    render_cards(frame, app, view, chunks[3], colors);
    render_status_bar(frame, app, view, chunks[4], colors);
}

fn render_tabs(frame: &mut Frame, active: FeedSource, area: Rect, colors: &ColorConfig) {
    let mut spans = Vec::new();
    for source in FeedSource::ALL {
        let style = if source == active {
            Style::default()
                .fg(colors.active_tab)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(colors.inactive_tab)
        };
        spans.push(Span::styled(format!(" {} ", source.label()), style));
        spans.push(Span::raw(" "));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_viewport(frame: &mut Frame, view: &ViewFrame, area: Rect) {
    let text = format!(
        "Current window width: {}  height: {}",
        view.viewport.width, view.viewport.height
    );
    frame.render_widget(Paragraph::new(text), area);
}

fn render_filter(frame: &mut Frame, view: &ViewFrame, area: Rect, colors: &ColorConfig) {
    let block = Block::default()
        .title(" Filter ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    let input = if view.query.is_empty() {
        Paragraph::new(Span::styled(
            "Filter articles by title...",
            Style::default().fg(colors.inactive_tab),
        ))
    } else {
        Paragraph::new(view.query.as_str())
    };

    frame.render_widget(input.block(block), area);
}

fn render_cards(frame: &mut Frame, app: &mut TuiApp, view: &ViewFrame, area: Rect, colors: &ColorConfig) {
    let cards = match &view.body {
        ViewBody::Loading => {
            let loading = Paragraph::new("Loading...")
                .style(Style::default().fg(colors.loading))
                .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(colors.border)));
            frame.render_widget(loading, area);
            return;
        }
        ViewBody::Cards(cards) => cards,
    };

    let items: Vec<ListItem> = cards.iter().map(|card| card_item(card, colors)).collect();

    let title = if view.query.is_empty() {
        format!(" {} ({}) ", view.source, cards.len())
    } else {
        format!(" {} ({} of {}) ", view.source, cards.len(), view.total)
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(colors.selection_bg)
            .fg(colors.selection_fg)
            .add_modifier(Modifier::BOLD),
    );

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn card_item<'a>(card: &'a Card, colors: &ColorConfig) -> ListItem<'a> {
    let mut meta = Vec::new();
    if let Some(score) = card.score {
        meta.push(format!("{} points", score));
    }
    if let Some(author) = &card.author {
        meta.push(format!("by {}", author));
    }
    if let Some(url) = &card.url {
        meta.push(url.clone());
    }

    let mut lines = vec![Line::from(Span::styled(
        card.title.as_str(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if !meta.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  {}", meta.join(" | ")),
            Style::default().fg(colors.card_meta),
        )));
    }

    ListItem::new(lines)
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, view: &ViewFrame, area: Rect, colors: &ColorConfig) {
    let (status, fg) = if let Some(error) = &view.error {
        (format!("Error: {}", error), colors.error)
    } else if let Some(msg) = &app.status_message {
        (msg.clone(), colors.status_fg)
    } else {
        (
            "Type to filter  Tab:Source  Up/Down:Select  Enter:Open  Ctrl+r:Reload  Esc:Quit".to_string(),
            colors.status_fg,
        )
    };

    let paragraph = Paragraph::new(status).style(Style::default().fg(fg).bg(colors.status_bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    use crate::app::AppContext;
    use crate::config::Config;
    use crate::store::feed_store::test_support::*;
    use crate::viewport::Dimensions;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test]
    async fn test_renders_loading_then_cards() {
        let fetcher = StaticFetcher::default().ok("/api/hackernews", foo_bar());
        let ctx = AppContext::with_fetcher(Config::default(), Arc::new(fetcher));
        ctx.viewport.resize(Dimensions::new(60, 16));
        let mut app = TuiApp::new(&ctx, FeedSource::HackerNews);
        let colors = ColorConfig::default();
        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();

        let view = app.view.frame();
        terminal.draw(|f| render(f, &mut app, &view, &colors)).unwrap();
        assert!(buffer_text(&terminal).contains("Loading..."));

        ctx.stores.get(FeedSource::HackerNews).refresh().await.unwrap();
        let view = app.view.frame();
        terminal.draw(|f| render(f, &mut app, &view, &colors)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Foo"));
        assert!(text.contains("Bar"));
        assert!(text.contains("width: 60"));
        assert!(!text.contains("Loading..."));
    }
}
