//! Saved builds and the portable export format.
//!
//! An exported build is the build's JSON encoded as standard base64, so it
//! survives a clipboard round trip.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::core::types::{BuildId, Millis, Result, generate_id};
use crate::world::block::Block;

/// A named snapshot of the block collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedBuild {
    pub id: BuildId,
    pub name: String,
    pub blocks: Vec<Block>,
    pub created_at: Millis,
    pub updated_at: Millis,
}

/// The part of an exported build that import trusts.
/// Any id or timestamps in the payload are ignored.
#[derive(Deserialize)]
struct ImportedBuild {
    #[serde(default)]
    name: String,
    blocks: Vec<Block>,
}

impl SavedBuild {
    /// Copy `blocks` into a new build with a fresh id
    pub fn snapshot(name: impl Into<String>, blocks: &[Block], now: Millis) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            blocks: blocks.to_vec(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the blocks wholesale and bump `updated_at`
    pub fn replace_blocks(&mut self, blocks: &[Block], now: Millis) {
        self.blocks = blocks.to_vec();
        self.updated_at = now;
    }

    /// Encode as base64 JSON
    pub fn export(&self) -> Result<String> {
        let json = serde_json::to_string(self)?;
        Ok(STANDARD.encode(json))
    }

    /// Decode an exported build. The result gets a new id and timestamps.
    pub fn import(data: &str, now: Millis) -> Result<Self> {
        let bytes = STANDARD.decode(data.trim())?;
        let json = String::from_utf8(bytes)?;
        let imported: ImportedBuild = serde_json::from_str(&json)?;

        Ok(Self {
            id: generate_id(),
            name: imported.name,
            blocks: imported.blocks,
            created_at: now,
            updated_at: now,
        })
    }
}
