use ratatui::widgets::ListState;
use tokio::task::JoinHandle;

use crate::app::{AppContext, Result};
use crate::domain::FeedSource;
use crate::store::RefreshOutcome;
use crate::view::{Card, FeedView, ViewBody, ViewFrame};

pub struct TuiApp {
    pub view: FeedView,
    pub list_state: ListState,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pending: Option<JoinHandle<Result<RefreshOutcome>>>,
}

impl TuiApp {
    /// Build the app with `source` mounted.
    pub fn new(ctx: &AppContext, source: FeedSource) -> Self {
        let mut app = Self {
            view: ctx.view(source),
            list_state: ListState::default(),
            should_quit: false,
            status_message: None,
            pending: None,
        };
        app.mount();
        app
    }

    pub fn source(&self) -> FeedSource {
        self.view.source()
    }

    /// Unmount the current view and mount a fresh one for `source`.
    pub fn switch_to(&mut self, ctx: &AppContext, source: FeedSource) {
        self.view.unmount();
        self.view = ctx.view(source);
        self.mount();
    }

    pub fn remount(&mut self) {
        self.view.unmount();
        self.mount();
    }

    fn mount(&mut self) {
        self.list_state.select(None);
        self.status_message = None;
        // The previous view's refresh keeps running and lands in its own store.
        self.pending = Some(self.view.mount());
    }

    /// Report the mounted view's refresh once it has finished.
    pub async fn poll_refresh(&mut self) {
        let finished = self.pending.as_ref().is_some_and(|h| h.is_finished());
        if !finished {
            return;
        }

        if let Some(handle) = self.pending.take() {
            self.status_message = match handle.await {
                Ok(Ok(RefreshOutcome::Applied { count })) => {
                    Some(format!("{}: {} articles", self.source(), count))
                }
                Ok(Ok(RefreshOutcome::Superseded)) => None,
                Ok(Err(e)) => Some(format!("{}: {}", self.source(), e)),
                Err(e) => {
                    tracing::error!("Refresh task join error: {}", e);
                    None
                }
            };
        }
    }

    pub fn move_up(&mut self) {
        match self.list_state.selected() {
            Some(0) | None => {}
            Some(i) => self.list_state.select(Some(i - 1)),
        }
    }

    pub fn move_down(&mut self, card_count: usize) {
        if card_count == 0 {
            return;
        }
        let next = match self.list_state.selected() {
            None => 0,
            Some(i) => (i + 1).min(card_count - 1),
        };
        self.list_state.select(Some(next));
    }

    pub fn push_filter_char(&mut self, c: char) {
        self.view.push_char(c);
        self.list_state.select(None);
    }

    pub fn pop_filter_char(&mut self) {
        self.view.pop_char();
        self.list_state.select(None);
    }

    pub fn clear_filter(&mut self) {
        self.view.set_query("");
        self.list_state.select(None);
    }

    pub fn selected_card<'a>(&self, frame: &'a ViewFrame) -> Option<&'a Card> {
        match &frame.body {
            ViewBody::Cards(cards) => cards.get(self.list_state.selected()?),
            ViewBody::Loading => None,
        }
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }
}
