//! Editor configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::types::{Millis, Result};

/// Tunables for the world-edit engine
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Quiet period before a burst of edits becomes one history entry
    pub history_debounce_ms: Millis,
    /// Minimum spacing between hover updates (~33Hz at 30ms)
    pub hover_throttle_ms: Millis,
    /// Key the editor state is stored under
    pub storage_key: String,
    /// Oldest snapshots are dropped past this many entries
    pub max_history_entries: usize,
    /// Pointer travel in pixels that turns a click into a drag
    pub drag_threshold_px: f32,
    /// Block type selected in a fresh session
    pub default_block_type: String,
    /// Color selected in a fresh session
    pub default_color: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_debounce_ms: 500,
            hover_throttle_ms: 30,
            storage_key: "iso-builder-storage".to_string(),
            max_history_entries: 256,
            drag_threshold_px: 5.0,
            default_block_type: "cube".to_string(),
            default_color: "#ffffff".to_string(),
        }
    }
}

impl EditorConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load_sync(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Save as pretty JSON, creating parent directories
    pub fn save_sync(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, json)?;
        Ok(())
    }
}
