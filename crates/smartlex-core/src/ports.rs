use anyhow::Result;
use async_trait::async_trait;

use protocol::{AnalysisError, AnalysisRequest, AnalysisResult, StoredState, Toast};

/// The external term analyzer. The only port with a typed error: its three
/// failure kinds are the whole error taxonomy of the analysis boundary, and
/// all of them are absorbed at the orchestrator.
#[async_trait]
pub trait AnalyzerPort: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError>;
}

/// Best-effort OS notifications. Denied permission or delivery failure must
/// never block request completion.
#[async_trait]
pub trait NotifierPort: Send + Sync {
    async fn request_permission(&self) -> Result<bool>;
    async fn notify(&self, title: &str, body: &str) -> Result<()>;
}

/// Ephemeral in-app feedback.
#[async_trait]
pub trait ToastPort: Send + Sync {
    async fn show(&self, toast: Toast) -> Result<()>;
}

/// Cross-session persistence of history, current analysis, and library.
/// Get/set semantics only; the format belongs to the adapter.
#[async_trait]
pub trait StorePort: Send + Sync {
    async fn load(&self) -> Result<StoredState>;
    async fn save(&self, state: &StoredState) -> Result<()>;
}
