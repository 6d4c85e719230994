use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use protocol::StoredState;
use smartlex_core::ports::StorePort;

const STATE_FILE: &str = "smartlex_state.json";

/// Persists the session snapshot as one JSON file under a data directory.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(STATE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StorePort for JsonFileStore {
    async fn load(&self) -> Result<StoredState> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no persisted state yet");
            return Ok(StoredState::default());
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let state = serde_json::from_str(&raw)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(state)
    }

    async fn save(&self, state: &StoredState) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }
        let raw = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, raw).with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocol::AnalysisResult;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("smartlex-store-{}", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let store = JsonFileStore::new(&temp_dir());
        let state = store.load().await.unwrap();
        assert!(state.history.is_empty());
        assert!(state.current.is_none());
    }

    #[tokio::test]
    async fn save_then_load_roundtrips() {
        let dir = temp_dir();
        let store = JsonFileStore::new(&dir);

        let state = StoredState {
            history: vec![AnalysisResult::new("term", "ctx", "summary", "detail")],
            current: Some(AnalysisResult::new("term", "ctx", "summary", "detail")),
            library: Vec::new(),
        };
        store.save(&state).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.history, state.history);
        assert_eq!(loaded.current, state.current);

        let _ = fs::remove_dir_all(&dir);
    }
}
