use std::sync::Arc;
use std::time::Duration;

use protocol::Toast;
use smartlex_adapters::{ChannelToast, DesktopNotifier, GeminiAnalyzer, JsonFileStore};
use smartlex_core::{AnalysisOrchestrator, AppContext, AppState, Origin, View, ViewController};
use tokio::sync::mpsc;

use crate::types::{ActiveToast, Focus};

pub type Orchestrator =
    AnalysisOrchestrator<GeminiAnalyzer, DesktopNotifier, ChannelToast, JsonFileStore>;

const TOAST_TTL: Duration = Duration::from_secs(4);

pub struct App {
    pub context: AppContext,
    pub views: ViewController,
    pub orchestrator: Arc<Orchestrator>,
    pub toast_rx: mpsc::Receiver<Toast>,
    pub toasts: Vec<ActiveToast>,
    pub term_input: String,
    pub context_input: String,
    pub focus: Focus,
    pub history_cursor: usize,
    pub library_cursor: usize,
    pub pinned: bool,
    pub model: String,
}

impl App {
    pub fn new(
        context: AppContext,
        orchestrator: Arc<Orchestrator>,
        toast_rx: mpsc::Receiver<Toast>,
        model: String,
    ) -> Self {
        let views = ViewController::new(context.clone());
        Self {
            context,
            views,
            orchestrator,
            toast_rx,
            toasts: Vec::new(),
            term_input: String::new(),
            context_input: String::new(),
            focus: Focus::Term,
            history_cursor: 0,
            library_cursor: 0,
            pinned: false,
            model,
        }
    }

    pub fn snapshot(&self) -> AppState {
        self.context.snapshot()
    }

    /// Drains pending toasts from the orchestrator and drops expired ones.
    pub fn poll_toasts(&mut self) {
        while let Ok(toast) = self.toast_rx.try_recv() {
            self.toasts.push(ActiveToast::new(toast));
        }
        self.toasts
            .retain(|active| active.shown_at.elapsed() < TOAST_TTL);
    }

    pub fn push_toast(&mut self, toast: Toast) {
        self.toasts.push(ActiveToast::new(toast));
    }

    /// Can the Home form be submitted right now? Mirrors the disabled state
    /// of the submit button; the orchestrator still carries its own guard.
    pub fn can_submit(&self) -> bool {
        !self.term_input.trim().is_empty()
            && !self.context_input.trim().is_empty()
            && !self.snapshot().is_analyzing
    }

    /// Fires the submission on a background task so the UI loop keeps
    /// running while the request is in flight.
    pub fn submit(&mut self) {
        if !self.can_submit() {
            return;
        }
        let orchestrator = self.orchestrator.clone();
        let term = self.term_input.clone();
        let context = self.context_input.clone();
        tokio::spawn(async move {
            if let Err(err) = orchestrator.submit(&term, &context, None).await {
                tracing::warn!(error = %err, "submission rejected");
            }
        });
    }

    pub fn toggle_pin(&mut self) {
        self.pinned = !self.pinned;
        let message = if self.pinned {
            "Window pinned on top"
        } else {
            "Window pin removed"
        };
        self.push_toast(Toast::info(message));
    }

    pub fn move_cursor(&mut self, down: bool) {
        let state = self.snapshot();
        let (cursor, len) = match state.view {
            View::History => (&mut self.history_cursor, state.history.len()),
            View::Library => (&mut self.library_cursor, state.library.len()),
            _ => return,
        };
        if len == 0 {
            *cursor = 0;
        } else if down {
            *cursor = (*cursor + 1).min(len - 1);
        } else {
            *cursor = cursor.saturating_sub(1);
        }
    }

    /// Opens the entry under the cursor in the current list view.
    pub fn select_current(&mut self) {
        let state = self.snapshot();
        match state.view {
            View::History => {
                if let Some(result) = state.history.get(self.history_cursor) {
                    self.views
                        .navigate_to_analysis(result.clone(), Origin::History);
                }
            }
            View::Library => {
                if let Some(result) = state.library.get(self.library_cursor) {
                    self.views
                        .navigate_to_analysis(result.clone(), Origin::Library);
                }
            }
            _ => {}
        }
    }
}
