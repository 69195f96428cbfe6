//! Placed block representation

use serde::{Deserialize, Serialize};

use crate::core::types::{BlockId, Vec3};
use crate::math::positions_equal;

/// A unit-footprint block placed in the world.
///
/// Blocks are never edited in place; an edit is a remove followed by an add.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    #[serde(with = "position_repr")]
    pub position: Vec3,
    #[serde(rename = "type")]
    pub block_type: String,
    pub color: String,
}

impl Block {
    /// True if this block sits in the same cell as `position`
    pub fn occupies(&self, position: Vec3) -> bool {
        positions_equal(self.position, position)
    }
}

/// A block that has been resolved but not yet added (no id assigned)
#[derive(Debug, Clone, PartialEq)]
pub struct NewBlock {
    pub position: Vec3,
    pub block_type: String,
    pub color: String,
}

impl NewBlock {
    pub fn new(position: Vec3, block_type: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            position,
            block_type: block_type.into(),
            color: color.into(),
        }
    }

    /// Attach an id, producing a placed block
    pub fn with_id(self, id: BlockId) -> Block {
        Block {
            id,
            position: self.position,
            block_type: self.block_type,
            color: self.color,
        }
    }
}

/// True if any block in `blocks` occupies `position`
pub fn is_occupied(blocks: &[Block], position: Vec3) -> bool {
    blocks.iter().any(|b| b.occupies(position))
}

/// Positions are stored as plain `{ "x", "y", "z" }` objects and
/// rehydrated into `Vec3` on load.
mod position_repr {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::core::types::Vec3;

    #[derive(Serialize, Deserialize)]
    struct Xyz {
        x: f32,
        y: f32,
        z: f32,
    }

    pub fn serialize<S: Serializer>(v: &Vec3, serializer: S) -> Result<S::Ok, S::Error> {
        Xyz { x: v.x, y: v.y, z: v.z }.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec3, D::Error> {
        let p = Xyz::deserialize(deserializer)?;
        Ok(Vec3::new(p.x, p.y, p.z))
    }
}
