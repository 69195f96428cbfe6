//! Placement resolver.
//!
//! Given where the pointer ray landed, decide where a new block goes:
//!
//! 1. Face of an existing block: the selected type's plugin offsets from the
//!    hit block's position along the face normal.
//! 2. Bare ground: snap X/Z to the cell center, then stack into the first
//!    empty level of that column, scanning up from y = 0.
//! 3. Reject if the cell is already occupied.

use thiserror::Error;

use crate::blocks::{BlockRegistry, Face};
use crate::core::types::{BlockId, Vec3};
use crate::math::{cell_center, positions_equal, same_column};
use crate::world::block::{Block, NewBlock};

/// A resolved pointer interaction, as delivered by the rendering layer
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementRequest {
    /// World-space intersection with the ground plane or a block surface
    pub hit_point: Vec3,
    /// Outward normal of the block face that was hit, if any
    pub face_normal: Option<Vec3>,
    /// Block whose face was hit, if any
    pub hit_block_id: Option<BlockId>,
}

impl PlacementRequest {
    /// Click on the ground plane
    pub fn ground(hit_point: Vec3) -> Self {
        Self {
            hit_point,
            face_normal: None,
            hit_block_id: None,
        }
    }

    /// Click on a face of an existing block
    pub fn face(hit_point: Vec3, face_normal: Vec3, hit_block_id: impl Into<BlockId>) -> Self {
        Self {
            hit_point,
            face_normal: Some(face_normal),
            hit_block_id: Some(hit_block_id.into()),
        }
    }
}

/// Why a placement produced no block. Callers treat every variant as a no-op.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementRejection {
    #[error("hit point is not a finite position")]
    InvalidHitPoint,

    #[error("face normal is not a usable direction")]
    InvalidFaceNormal,

    #[error("unknown block type '{0}'")]
    UnknownBlockType(String),

    #[error("hit block '{0}' does not exist")]
    UnknownTarget(BlockId),

    #[error("block type does not attach to the {0:?} face")]
    FaceNotPlaceable(Face),

    #[error("cell at {0} is occupied")]
    Occupied(Vec3),
}

/// Resolve where a block of `block_type`/`color` should be placed.
///
/// `blocks` is only read; the caller adds the returned payload.
pub fn resolve_placement(
    registry: &BlockRegistry,
    blocks: &[Block],
    request: &PlacementRequest,
    block_type: &str,
    color: &str,
) -> Result<NewBlock, PlacementRejection> {
    let plugin = registry
        .get(block_type)
        .ok_or_else(|| PlacementRejection::UnknownBlockType(block_type.to_string()))?;

    let position = match (request.face_normal, request.hit_block_id.as_deref()) {
        (Some(normal), Some(target_id)) => {
            let target = blocks
                .iter()
                .find(|b| b.id == target_id)
                .ok_or_else(|| PlacementRejection::UnknownTarget(target_id.to_string()))?;
            let face = Face::from_normal(normal).ok_or(PlacementRejection::InvalidFaceNormal)?;
            if !plugin.can_place_on_face(face) {
                return Err(PlacementRejection::FaceNotPlaceable(face));
            }
            plugin.placement_position(target.position, Some(face))
        }
        _ => {
            if !request.hit_point.is_finite() {
                return Err(PlacementRejection::InvalidHitPoint);
            }
            let x = cell_center(request.hit_point.x);
            let z = cell_center(request.hit_point.z);
            Vec3::new(x, lowest_free_level(blocks, x, z), z)
        }
    };

    if !plugin.can_place(position, blocks) {
        return Err(PlacementRejection::Occupied(position));
    }

    Ok(NewBlock::new(position, block_type, color))
}

/// First empty whole-unit level in the column at (x, z), counting up from 0
pub fn lowest_free_level(blocks: &[Block], x: f32, z: f32) -> f32 {
    let column_base = Vec3::new(x, 0.0, z);
    let column: Vec<Vec3> = blocks
        .iter()
        .map(|b| b.position)
        .filter(|&p| same_column(p, column_base))
        .collect();

    let mut y = 0.0;
    while column.iter().any(|&p| positions_equal(p, Vec3::new(x, y, z))) {
        y += 1.0;
    }
    y
}
