use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// One submission to the analysis service. Lives only for the duration of a
/// single request; the orchestrator discards it on resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub term: String,
    pub context: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
}

impl AnalysisRequest {
    pub fn new<S: Into<String>>(term: S, context: S, image_base64: Option<String>) -> Self {
        Self {
            term: term.into(),
            context: context.into(),
            image_base64,
        }
    }

    /// Submission precondition: term is required; context may be omitted only
    /// when an image carries the context instead.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.term.trim().is_empty() {
            return Err(AnalysisError::Validation("term is required".into()));
        }
        if self.context.trim().is_empty() && self.image_base64.is_none() {
            return Err(AnalysisError::Validation(
                "context is required when no image is attached".into(),
            ));
        }
        Ok(())
    }
}

/// Immutable analysis record produced by the service. Never mutated after
/// creation; shared between the history cache and the current-analysis slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub id: Uuid,
    pub term: String,
    pub context: String,
    pub summary: String,
    pub detail: String,
    pub created_at: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn new<S: Into<String>>(term: S, context: S, summary: S, detail: S) -> Self {
        Self {
            id: Uuid::new_v4(),
            term: term.into(),
            context: context.into(),
            summary: summary.into(),
            detail: detail.into(),
            created_at: Utc::now(),
        }
    }
}

/// Everything the analysis boundary can fail with. All three kinds are caught
/// at the orchestrator; none propagate past it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    Network(String),
    Service(String),
    Validation(String),
}

impl AnalysisError {
    /// Message suitable for an error toast; falls back to a generic line when
    /// the carried message is empty.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::Network(msg) | AnalysisError::Service(msg) => {
                if msg.trim().is_empty() {
                    "Analysis failed, please check your network connection.".to_string()
                } else {
                    msg.clone()
                }
            }
            AnalysisError::Validation(msg) => msg.clone(),
        }
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::Network(msg) => write!(f, "network error: {}", msg),
            AnalysisError::Service(msg) => write!(f, "service error: {}", msg),
            AnalysisError::Validation(msg) => write!(f, "validation error: {}", msg),
        }
    }
}

impl std::error::Error for AnalysisError {}

/// Toast severity; mirrors the three feedback levels the UI renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// Ephemeral in-app feedback message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
}

impl Toast {
    pub fn info<S: Into<String>>(message: S) -> Self {
        Self { message: message.into(), severity: Severity::Info }
    }

    pub fn success<S: Into<String>>(message: S) -> Self {
        Self { message: message.into(), severity: Severity::Success }
    }

    pub fn error<S: Into<String>>(message: S) -> Self {
        Self { message: message.into(), severity: Severity::Error }
    }
}

/// Cross-session snapshot handed to and from the persistent store.
/// History is newest-first, matching the cache order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredState {
    #[serde(default)]
    pub history: Vec<AnalysisResult>,
    #[serde(default)]
    pub current: Option<AnalysisResult>,
    #[serde(default)]
    pub library: Vec<AnalysisResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_requires_term() {
        let req = AnalysisRequest::new("", "some context", None);
        assert!(matches!(req.validate(), Err(AnalysisError::Validation(_))));
    }

    #[test]
    fn validate_accepts_image_in_place_of_context() {
        let req = AnalysisRequest::new("term", "", Some("aW1hZ2U=".into()));
        assert!(req.validate().is_ok());

        let req = AnalysisRequest::new("term", "", None);
        assert!(req.validate().is_err());
    }

    #[test]
    fn user_message_falls_back_when_empty() {
        let err = AnalysisError::Service(String::new());
        assert!(err.user_message().contains("network connection"));

        let err = AnalysisError::Service("quota exceeded".into());
        assert_eq!(err.user_message(), "quota exceeded");
    }

    #[test]
    fn stored_state_roundtrips() {
        let stored = StoredState {
            history: vec![AnalysisResult::new("a", "b", "c", "d")],
            current: None,
            library: Vec::new(),
        };
        let json = serde_json::to_string(&stored).unwrap();
        let back: StoredState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.history, stored.history);
        assert!(back.current.is_none());
    }
}
