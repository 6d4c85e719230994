pub mod history;
pub mod orchestrator;
pub mod ports;
pub mod state;
pub mod view;

pub use history::{HistoryCache, HISTORY_CAPACITY};
pub use orchestrator::{AnalysisOrchestrator, Submit};
pub use state::{AppContext, AppState};
pub use view::{BreadcrumbInfo, Origin, View, ViewController};

// Simple in-crate mocks for demo/testing
pub mod mocks {
    use std::sync::{Arc, Mutex};

    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use tokio::sync::{mpsc, Notify};

    use protocol::{AnalysisError, AnalysisRequest, AnalysisResult, StoredState, Toast};

    use crate::ports::{AnalyzerPort, NotifierPort, StorePort, ToastPort};

    /// Succeeds immediately, echoing the request back as a canned result.
    pub struct MockAnalyzer;

    #[async_trait]
    impl AnalyzerPort for MockAnalyzer {
        async fn analyze(
            &self,
            request: &AnalysisRequest,
        ) -> Result<AnalysisResult, AnalysisError> {
            Ok(AnalysisResult::new(
                request.term.as_str(),
                request.context.as_str(),
                "mock summary",
                "mock detail",
            ))
        }
    }

    /// Always fails with the configured error.
    pub struct FailingAnalyzer(pub AnalysisError);

    #[async_trait]
    impl AnalyzerPort for FailingAnalyzer {
        async fn analyze(
            &self,
            _request: &AnalysisRequest,
        ) -> Result<AnalysisResult, AnalysisError> {
            Err(self.0.clone())
        }
    }

    /// Holds the request in flight until `release` is notified; lets tests
    /// observe the in-flight window.
    pub struct GatedAnalyzer {
        pub release: Arc<Notify>,
    }

    #[async_trait]
    impl AnalyzerPort for GatedAnalyzer {
        async fn analyze(
            &self,
            request: &AnalysisRequest,
        ) -> Result<AnalysisResult, AnalysisError> {
            self.release.notified().await;
            Ok(AnalysisResult::new(
                request.term.as_str(),
                request.context.as_str(),
                "gated summary",
                "gated detail",
            ))
        }
    }

    /// Records notifications; refuses them when permission was not granted.
    #[derive(Clone)]
    pub struct RecordingNotifier {
        pub granted: bool,
        pub sent: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl RecordingNotifier {
        pub fn new(granted: bool) -> Self {
            Self {
                granted,
                sent: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl NotifierPort for RecordingNotifier {
        async fn request_permission(&self) -> Result<bool> {
            Ok(self.granted)
        }

        async fn notify(&self, title: &str, body: &str) -> Result<()> {
            if !self.granted {
                return Err(anyhow!("notification permission denied"));
            }
            self.sent
                .lock()
                .unwrap()
                .push((title.to_string(), body.to_string()));
            Ok(())
        }
    }

    /// Forwards toasts into a channel the test end can drain.
    #[derive(Clone)]
    pub struct ChannelToast(pub mpsc::Sender<Toast>);

    #[async_trait]
    impl ToastPort for ChannelToast {
        async fn show(&self, toast: Toast) -> Result<()> {
            self.0.send(toast).await.map_err(|e| anyhow!(e.to_string()))
        }
    }

    /// Store whose backing file is unreadable; both operations fail.
    pub struct BrokenStore;

    #[async_trait]
    impl StorePort for BrokenStore {
        async fn load(&self) -> Result<StoredState> {
            Err(anyhow!("corrupt state file"))
        }

        async fn save(&self, _state: &StoredState) -> Result<()> {
            Err(anyhow!("corrupt state file"))
        }
    }

    /// In-memory store with get/set semantics.
    #[derive(Clone, Default)]
    pub struct MemoryStore {
        pub saved: Arc<Mutex<StoredState>>,
    }

    #[async_trait]
    impl StorePort for MemoryStore {
        async fn load(&self) -> Result<StoredState> {
            Ok(self.saved.lock().unwrap().clone())
        }

        async fn save(&self, state: &StoredState) -> Result<()> {
            *self.saved.lock().unwrap() = state.clone();
            Ok(())
        }
    }
}
