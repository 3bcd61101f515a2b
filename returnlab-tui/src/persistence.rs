//! Dashboard state persistence: JSON save/load across restarts.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::app::{AppState, View};

/// The part of the dashboard state that survives a restart.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    /// Id of the last selected market.
    pub market: Option<String>,
    #[serde(default)]
    pub view: View,
}

/// `<config dir>/returnlab/state.json`, falling back to the working directory.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("returnlab")
        .join("state.json")
}

/// Load persisted state from disk. Returns defaults if the file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        market: app.current().map(|m| m.id().to_string()),
        view: app.view,
    }
}

/// Apply persisted state. A market that is no longer configured is ignored.
pub fn apply(app: &mut AppState, state: PersistedState) {
    if let Some(id) = state.market {
        app.select_market(&id);
    }
    app.view = state.view;
}
