use std::sync::{Arc, Mutex};

use protocol::AnalysisResult;

use crate::history::HistoryCache;
use crate::view::{BreadcrumbInfo, Origin, View};

/// Everything the application mutates at runtime. All of it sits behind one
/// lock so a reader never observes a view/breadcrumb pair that straddles two
/// transitions.
#[derive(Debug, Clone)]
pub struct AppState {
    pub view: View,
    pub previous_view: View,
    pub breadcrumb: BreadcrumbInfo,
    pub current_analysis: Option<Arc<AnalysisResult>>,
    pub history: HistoryCache,
    pub library: Vec<Arc<AnalysisResult>>,
    pub is_analyzing: bool,
}

impl AppState {
    fn new() -> Self {
        Self {
            view: View::Home,
            previous_view: View::Home,
            // History is the default origin until something sets it.
            breadcrumb: BreadcrumbInfo::from_origin(Origin::History),
            current_analysis: None,
            history: HistoryCache::default(),
            library: Vec::new(),
            is_analyzing: false,
        }
    }
}

/// Shared handle to the application state. No ambient globals: the context is
/// handed by value into the view controller and the orchestrator, and every
/// mutation goes through their public operations. The lock is never held
/// across an await point.
#[derive(Clone)]
pub struct AppContext {
    inner: Arc<Mutex<AppState>>,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(AppState::new())),
        }
    }

    /// Coherent copy of the state as of one instant.
    pub fn snapshot(&self) -> AppState {
        self.inner.lock().unwrap().clone()
    }

    /// Runs `f` under the state lock. One call is one atomic transition from
    /// any reader's perspective.
    pub fn with<R>(&self, f: impl FnOnce(&mut AppState) -> R) -> R {
        let mut state = self.inner.lock().unwrap();
        f(&mut state)
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}
