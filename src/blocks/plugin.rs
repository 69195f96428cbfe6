//! Block type plugin interface.
//!
//! A plugin supplies everything type-specific about a block: how it is
//! named in the toolbar, its geometry, where a new block lands when placed
//! against a face, and whether a cell is free for it.

use crate::core::types::Vec3;
use crate::math::Aabb;
use crate::world::block::{Block, is_occupied};
use super::face::Face;

/// Render geometry of a block relative to its cell position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockGeometry {
    /// Box dimensions
    pub size: Vec3,
    /// Offset of the box center from the block position
    pub offset: Vec3,
}

impl BlockGeometry {
    pub const UNIT: BlockGeometry = BlockGeometry {
        size: Vec3::ONE,
        offset: Vec3::ZERO,
    };

    /// Bounds of the box around the block position
    pub fn local_bounds(&self) -> Aabb {
        Aabb::from_center_half_extent(self.offset, self.size * 0.5)
    }
}

/// Toolbar-facing description of a block type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockTypeInfo {
    pub block_type: String,
    pub display_name: String,
    pub description: String,
}

/// Placement and geometry policy for one block type
pub trait BlockPlugin: Send + Sync {
    /// Tag stored on blocks of this type
    fn block_type(&self) -> &str;

    fn display_name(&self) -> &str;

    fn description(&self) -> &str;

    fn geometry(&self) -> BlockGeometry {
        BlockGeometry::UNIT
    }

    /// Where a new block lands when placed against `face` of the block at
    /// `anchor`. Without a face the anchor is already the target cell.
    fn placement_position(&self, anchor: Vec3, face: Option<Face>) -> Vec3 {
        match face {
            Some(face) => anchor + self.placement_offset(face),
            None => anchor,
        }
    }

    /// Occupancy check against existing blocks
    fn can_place(&self, position: Vec3, existing: &[Block]) -> bool {
        !is_occupied(existing, position)
    }

    fn can_place_on_face(&self, _face: Face) -> bool {
        true
    }

    /// Step from the anchor block to the new one. One cell out by default.
    fn placement_offset(&self, face: Face) -> Vec3 {
        face.normal()
    }

    fn info(&self) -> BlockTypeInfo {
        BlockTypeInfo {
            block_type: self.block_type().to_string(),
            display_name: self.display_name().to_string(),
            description: self.description().to_string(),
        }
    }
}
