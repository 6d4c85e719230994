use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, warn};

use protocol::{AnalysisError, AnalysisRequest, AnalysisResult, StoredState, Toast};

use crate::history::HistoryCache;
use crate::ports::{AnalyzerPort, NotifierPort, StorePort, ToastPort};
use crate::state::AppContext;
use crate::view::{BreadcrumbInfo, Origin, View};

/// What a call to `submit` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submit {
    /// The request ran to completion (success or failure side effects done).
    Completed,
    /// Another request was already in flight; nothing happened.
    Busy,
}

/// Drives exactly one analysis request at a time against the external
/// service, updating the shared state and emitting notification/toast side
/// effects on completion. Consumes its collaborators through ports.
pub struct AnalysisOrchestrator<A, N, T, S> {
    analyzer: A,
    notifier: N,
    toasts: T,
    store: S,
    context: AppContext,
}

/// Clears the in-flight flag on every exit path, unwind included.
struct FlightGuard(AppContext);

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.0.with(|state| state.is_analyzing = false);
    }
}

impl<A, N, T, S> AnalysisOrchestrator<A, N, T, S>
where
    A: AnalyzerPort,
    N: NotifierPort,
    T: ToastPort,
    S: StorePort,
{
    pub fn new(analyzer: A, notifier: N, toasts: T, store: S, context: AppContext) -> Self {
        Self {
            analyzer,
            notifier,
            toasts,
            store,
            context,
        }
    }

    /// Seeds the shared state from the persistent store and asks for
    /// notification permission once. Both are best-effort; a missing or
    /// unreadable store starts the session empty.
    pub async fn restore(&self) {
        let stored = match self.store.load().await {
            Ok(stored) => stored,
            Err(err) => {
                warn!(error = %err, "could not load persisted state, starting empty");
                StoredState::default()
            }
        };

        self.context.with(|state| {
            let mut history = HistoryCache::default();
            // Stored history is newest-first; replay oldest-first so inserts
            // rebuild the same order.
            for result in stored.history.into_iter().rev() {
                history.insert(Arc::new(result));
            }
            state.history = history;
            state.current_analysis = stored.current.map(Arc::new);
            state.library = stored.library.into_iter().map(Arc::new).collect();
        });

        match self.notifier.request_permission().await {
            Ok(true) => {}
            Ok(false) => debug!("notification permission denied"),
            Err(err) => debug!(error = %err, "notification permission request failed"),
        }
    }

    pub fn is_analyzing(&self) -> bool {
        self.context.with(|state| state.is_analyzing)
    }

    /// Submits one analysis request. A validation failure comes back to the
    /// caller and never reaches a toast; service failures become an error
    /// toast and leave all state untouched. While a request is in flight any
    /// further call is a silent no-op.
    pub async fn submit(
        &self,
        term: &str,
        context: &str,
        image_base64: Option<String>,
    ) -> Result<Submit, AnalysisError> {
        let request = AnalysisRequest::new(term, context, image_base64);
        request.validate()?;

        // Check-and-set under one lock: the secondary guard against a race
        // at the UI boundary.
        let busy = self.context.with(|state| {
            if state.is_analyzing {
                true
            } else {
                state.is_analyzing = true;
                false
            }
        });
        if busy {
            debug!(term = %request.term, "submit ignored, request already in flight");
            return Ok(Submit::Busy);
        }
        let _guard = FlightGuard(self.context.clone());

        debug!(term = %request.term, "analysis started");
        // Sole suspension point; no lock is held here, so navigation and
        // settings stay responsive while the request is out.
        match self.analyzer.analyze(&request).await {
            Ok(result) => self.complete(Arc::new(result)).await,
            Err(err) => {
                warn!(term = %request.term, error = %err, "analysis failed");
                self.show_toast(Toast::error(err.user_message())).await;
            }
        }
        Ok(Submit::Completed)
    }

    async fn complete(&self, result: Arc<AnalysisResult>) {
        let term = result.term.clone();

        // One critical section: history, current analysis, breadcrumb, and
        // the view transition land together, breadcrumb before view. A
        // reader can never see the new result in history with the rest of
        // the success state still pending.
        self.context.with(|state| {
            state.history.insert(result.clone());
            state.current_analysis = Some(result);
            // Submission only originates from Home today, hence the fixed
            // origin. Thread the real origin through here if that changes.
            state.breadcrumb = BreadcrumbInfo::from_origin(Origin::Home);
            if state.view != View::AnalysisResult {
                state.previous_view = state.view;
            }
            state.view = View::AnalysisResult;
        });

        self.persist().await;

        if let Err(err) = self
            .notifier
            .notify(
                "Analysis complete",
                &format!("Deep analysis for \"{}\" is ready.", term),
            )
            .await
        {
            debug!(error = %err, "completion notification skipped");
        }
        self.show_toast(Toast::success("Deep analysis complete")).await;
    }

    async fn persist(&self) {
        let stored = self.context.with(|state| StoredState {
            history: state
                .history
                .list()
                .iter()
                .map(|result| (**result).clone())
                .collect(),
            current: state
                .current_analysis
                .as_ref()
                .map(|result| (**result).clone()),
            library: state.library.iter().map(|result| (**result).clone()).collect(),
        });
        if let Err(err) = self.store.save(&stored).await {
            warn!(error = %err, "could not persist analysis state");
        }
    }

    async fn show_toast(&self, toast: Toast) {
        if let Err(err) = self.toasts.show(toast).await {
            debug!(error = %err, "toast dropped");
        }
    }
}
