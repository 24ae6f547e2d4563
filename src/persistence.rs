//! View-state persistence keyed by the edited document.
//!
//! File format:
//! ```json
//! { "main-page": { "transform": { "translate": { "x": 0, "y": 0 }, "scale": 1 } } }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

use crate::error::CanvasResult;
use crate::transform::PersistedTransform;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersistedViewState {
    pub transform: PersistedTransform,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewStateStore {
    entries: BTreeMap<String, PersistedViewState>,
}

impl ViewStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a store file. A missing file yields an empty store.
    pub fn load(path: impl AsRef<Path>) -> CanvasResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "No view-state file, starting empty");
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path)?;
        let store: ViewStateStore = serde_json::from_str(&json)?;
        info!(path = %path.display(), entries = store.entries.len(), "View state loaded");
        Ok(store)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> CanvasResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        debug!(path = %path.display(), entries = self.entries.len(), "View state saved");
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&PersistedViewState> {
        self.entries.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, state: PersistedViewState) {
        self.entries.insert(key.into(), state);
    }

    pub fn remove(&mut self, key: &str) -> Option<PersistedViewState> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
