use std::fmt;
use std::sync::Arc;

use protocol::AnalysisResult;

use crate::state::AppContext;

/// Top-level screens. Five states, none terminal; every one is reachable
/// from every other via `navigate`. AnalysisResult is only entered through
/// `navigate_to_analysis` (or the orchestrator's success path), which writes
/// the breadcrumb first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    History,
    Library,
    Settings,
    AnalysisResult,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Home => write!(f, "Home"),
            View::History => write!(f, "History"),
            View::Library => write!(f, "Library"),
            View::Settings => write!(f, "Settings"),
            View::AnalysisResult => write!(f, "Analysis"),
        }
    }
}

/// Where a displayed analysis was selected from. Only these three views can
/// host a selection, so a breadcrumb can never point at the result view
/// itself. Carries the label-relevant tag only, never the origin's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Home,
    History,
    Library,
}

impl Origin {
    pub fn label(&self) -> &'static str {
        match self {
            Origin::Home => "Home",
            Origin::Library => "Library",
            Origin::History => "History",
        }
    }

    pub fn view(&self) -> View {
        match self {
            Origin::Home => View::Home,
            Origin::History => View::History,
            Origin::Library => View::Library,
        }
    }
}

/// The recorded way back out of the result view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreadcrumbInfo {
    pub label: String,
    pub origin: Origin,
}

impl BreadcrumbInfo {
    pub fn from_origin(origin: Origin) -> Self {
        Self {
            label: origin.label().to_string(),
            origin,
        }
    }
}

/// Performs every view transition. The only other writer of view state is the
/// orchestrator's success path, which routes through this controller too.
pub struct ViewController {
    context: AppContext,
}

impl ViewController {
    pub fn new(context: AppContext) -> Self {
        Self { context }
    }

    pub fn current(&self) -> View {
        self.context.with(|state| state.view)
    }

    /// Unconditional transition used for direct navigation commands.
    /// Navigating to the view already shown is a no-op, which keeps repeated
    /// commands from clobbering `previous_view`.
    pub fn navigate(&self, view: View) {
        self.context.with(|state| {
            if state.view == view {
                return;
            }
            tracing::debug!(from = %state.view, to = %view, "navigate");
            state.previous_view = state.view;
            state.view = view;
        });
    }

    /// Shows `result`, recording where it was selected from. The breadcrumb
    /// write happens before the view write, inside the same critical section,
    /// so no reader can see the result view with a stale breadcrumb.
    pub fn navigate_to_analysis(&self, result: Arc<AnalysisResult>, origin: Origin) {
        self.context.with(|state| {
            state.current_analysis = Some(result);
            state.breadcrumb = BreadcrumbInfo::from_origin(origin);
            if state.view != View::AnalysisResult {
                state.previous_view = state.view;
            }
            state.view = View::AnalysisResult;
        });
    }

    /// Dismisses a full-screen overlay by returning to the previously
    /// recorded view; `fallback` covers the case where the previous view is
    /// the overlay itself.
    pub fn close(&self, fallback: View) {
        self.context.with(|state| {
            let target = if state.previous_view == state.view {
                fallback
            } else {
                state.previous_view
            };
            state.previous_view = state.view;
            state.view = target;
        });
    }

    /// Follows the breadcrumb back to wherever the displayed analysis was
    /// selected from.
    pub fn return_to_breadcrumb_origin(&self) {
        self.context.with(|state| {
            let target = state.breadcrumb.origin.view();
            if state.view == target {
                return;
            }
            state.previous_view = state.view;
            state.view = target;
        });
    }
}
