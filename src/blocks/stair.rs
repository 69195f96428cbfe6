//! Half-height stair block

use crate::core::types::Vec3;
use super::face::Face;
use super::plugin::{BlockGeometry, BlockPlugin};

pub const STAIR: &str = "stair";

/// Stair height as a fraction of a cell
const STAIR_HEIGHT: f32 = 0.5;

/// Vertical bias when stacking onto a top face, half the stair height,
/// so the stair sits flush on the block below.
pub const STAIR_TOP_BIAS: f32 = STAIR_HEIGHT * 0.5;

/// A stair block that can be used to create stairs
#[derive(Debug, Clone, Copy, Default)]
pub struct StairPlugin;

impl BlockPlugin for StairPlugin {
    fn block_type(&self) -> &str {
        STAIR
    }

    fn display_name(&self) -> &str {
        "Stair"
    }

    fn description(&self) -> &str {
        "A stair block that can be used to create stairs"
    }

    fn geometry(&self) -> BlockGeometry {
        BlockGeometry {
            size: Vec3::new(1.0, STAIR_HEIGHT, 1.0),
            offset: Vec3::new(0.0, STAIR_HEIGHT * 0.5, 0.0),
        }
    }

    fn placement_position(&self, anchor: Vec3, face: Option<Face>) -> Vec3 {
        let mut position = match face {
            Some(face) => anchor + self.placement_offset(face),
            None => anchor,
        };
        if face == Some(Face::Top) {
            position.y += STAIR_TOP_BIAS;
        }
        position
    }
}
