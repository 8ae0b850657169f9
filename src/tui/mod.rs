pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{AppContext, Result};
use crate::domain::FeedSource;
use crate::view::ViewBody;
use crate::viewport::Dimensions;

use self::app::TuiApp;
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>, source: FeedSource) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx, source).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>, source: FeedSource) -> Result<()> {
    let (width, height) = terminal::size()?;
    ctx.viewport.resize(Dimensions::new(width, height));

    let mut tui_app = TuiApp::new(&ctx, source);
    let event_handler = EventHandler::new(Duration::from_millis(100));
    let colors = &ctx.config.colors;

    loop {
        tui_app.poll_refresh().await;

        let view = tui_app.view.frame();
        terminal.draw(|frame| layout::render(frame, &mut tui_app, &view, colors))?;

        match event_handler.next()? {
            AppEvent::Key(key) => match Action::from(key) {
                Action::Quit => {
                    tui_app.should_quit = true;
                }
                Action::NextSource => {
                    let next = tui_app.source().next();
                    tui_app.switch_to(&ctx, next);
                }
                Action::PrevSource => {
                    let prev = tui_app.source().prev();
                    tui_app.switch_to(&ctx, prev);
                }
                Action::MoveUp => {
                    tui_app.move_up();
                }
                Action::MoveDown => {
                    let count = match &view.body {
                        ViewBody::Cards(cards) => cards.len(),
                        ViewBody::Loading => 0,
                    };
                    tui_app.move_down(count);
                }
                Action::Open => {
                    let url = tui_app.selected_card(&view).and_then(|card| card.url.clone());
                    if let Some(url) = url {
                        if let Err(e) = open::that(&url) {
                            tui_app.set_status(format!("Failed to open browser: {}", e));
                        }
                    }
                }
                Action::Reload => {
                    tui_app.remount();
                }
                Action::ClearFilter => {
                    tui_app.clear_filter();
                }
                Action::Backspace => {
                    tui_app.pop_filter_char();
                }
                Action::Input(c) => {
                    tui_app.push_filter_char(c);
                }
                Action::None => {}
            },
            AppEvent::Resize(width, height) => {
                ctx.viewport.resize(Dimensions::new(width, height));
            }
            AppEvent::Tick => {}
        }

        if tui_app.should_quit {
            break;
        }
    }

    tui_app.view.unmount();
    Ok(())
}
