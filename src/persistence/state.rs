//! Persisted editor state.
//!
//! Only the durable subset of the editor is stored: blocks, selection,
//! history, theme and saved builds. Hover state is never persisted. The
//! state is wrapped in a versioned envelope under a single storage key.

use serde::Serialize;
use serde::de::{DeserializeOwned, Error as _};
use serde_json::{Map, Value};

use crate::core::types::Result;
use crate::world::block::Block;
use crate::world::theme::Theme;
use super::build::SavedBuild;

/// Current envelope version
pub const STATE_VERSION: u32 = 0;

/// Borrowed view of the state, used when writing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedStateRef<'a> {
    pub blocks: &'a [Block],
    pub selected_block_type: &'a str,
    pub selected_color: &'a str,
    pub history: &'a [Vec<Block>],
    pub history_index: usize,
    pub theme: Theme,
    pub saved_builds: &'a [SavedBuild],
}

/// Owned state, produced when reading
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistedState {
    pub blocks: Vec<Block>,
    pub selected_block_type: Option<String>,
    pub selected_color: Option<String>,
    pub history: Vec<Vec<Block>>,
    pub history_index: usize,
    pub theme: Theme,
    pub saved_builds: Vec<SavedBuild>,
}

/// Result of reading stored state. Fields that could not be read fall back
/// to their defaults and are listed in `dropped`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedState {
    pub state: PersistedState,
    pub dropped: Vec<String>,
}

impl DecodedState {
    /// True when part of the stored data was discarded
    pub fn is_lossy(&self) -> bool {
        !self.dropped.is_empty()
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    state: PersistedStateRef<'a>,
    version: u32,
}

/// Serialize state into its stored form
pub fn encode_state(state: PersistedStateRef<'_>) -> Result<String> {
    Ok(serde_json::to_string(&EnvelopeRef {
        state,
        version: STATE_VERSION,
    })?)
}

/// Parse stored state.
///
/// Only data that is not a JSON object, or an envelope without a `state`
/// object, is an error. Inside the state each field is read on its own; list
/// fields keep every entry that parses.
pub fn decode_state(data: &str) -> Result<DecodedState> {
    let mut envelope: Map<String, Value> = serde_json::from_str(data)?;

    let version = envelope.get("version").and_then(Value::as_u64).unwrap_or(0);
    if version != u64::from(STATE_VERSION) {
        log::warn!(
            "Stored state version {} differs from {}, loading anyway",
            version,
            STATE_VERSION
        );
    }

    let Some(Value::Object(mut fields)) = envelope.remove("state") else {
        return Err(serde_json::Error::custom("stored envelope has no state object").into());
    };

    let mut dropped = Vec::new();
    let history_index = match fields.remove("historyIndex") {
        None | Some(Value::Null) => 0,
        Some(value) => match value.as_u64().and_then(|i| usize::try_from(i).ok()) {
            Some(index) => index,
            None => {
                log::warn!("Unreadable stored historyIndex {}, using 0", value);
                dropped.push("historyIndex".to_string());
                0
            }
        },
    };

    let state = PersistedState {
        blocks: list_field(&mut fields, "blocks", &mut dropped),
        selected_block_type: field(&mut fields, "selectedBlockType", &mut dropped),
        selected_color: field(&mut fields, "selectedColor", &mut dropped),
        history: field(&mut fields, "history", &mut dropped),
        history_index,
        theme: field(&mut fields, "theme", &mut dropped),
        saved_builds: list_field(&mut fields, "savedBuilds", &mut dropped),
    };

    Ok(DecodedState { state, dropped })
}

/// Read one field, falling back to the default when it is missing or bad
fn field<T: DeserializeOwned + Default>(fields: &mut Map<String, Value>, key: &str, dropped: &mut Vec<String>) -> T {
    match fields.remove(key) {
        None | Some(Value::Null) => T::default(),
        Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
            log::warn!("Unreadable stored {}, using default: {}", key, e);
            dropped.push(key.to_string());
            T::default()
        }),
    }
}

/// Read a list field entry by entry, skipping entries that do not parse
fn list_field<T: DeserializeOwned>(fields: &mut Map<String, Value>, key: &str, dropped: &mut Vec<String>) -> Vec<T> {
    let entries = match fields.remove(key) {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            log::warn!("Stored {} is not a list: {}", key, other);
            dropped.push(key.to_string());
            return Vec::new();
        }
    };

    let mut items = Vec::with_capacity(entries.len());
    for (i, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value(entry) {
            Ok(item) => items.push(item),
            Err(e) => {
                log::warn!("Skipping unreadable stored {}[{}]: {}", key, i, e);
                dropped.push(format!("{}[{}]", key, i));
            }
        }
    }
    items
}
