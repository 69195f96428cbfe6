//! Pointer events delivered by the rendering layer

use crate::core::types::{BlockId, Vec3};
use crate::placement::PlacementRequest;

/// Mouse button behind a click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
}

/// A click already resolved to a world-space hit
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub world_point: Vec3,
    /// Normal of the block face under the pointer, if a block was hit
    pub face_normal: Option<Vec3>,
    /// Block under the pointer, if any
    pub hit_block_id: Option<BlockId>,
    pub button: PointerButton,
    /// Shift held during the click
    pub shift: bool,
}

impl PointerEvent {
    /// Primary click on the ground plane
    pub fn ground(world_point: Vec3) -> Self {
        Self {
            world_point,
            face_normal: None,
            hit_block_id: None,
            button: PointerButton::Primary,
            shift: false,
        }
    }

    /// Primary click on a block face
    pub fn block(world_point: Vec3, face_normal: Vec3, hit_block_id: impl Into<BlockId>) -> Self {
        Self {
            world_point,
            face_normal: Some(face_normal),
            hit_block_id: Some(hit_block_id.into()),
            button: PointerButton::Primary,
            shift: false,
        }
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    pub fn with_shift(mut self, shift: bool) -> Self {
        self.shift = shift;
        self
    }

    pub fn placement_request(&self) -> PlacementRequest {
        PlacementRequest {
            hit_point: self.world_point,
            face_normal: self.face_normal,
            hit_block_id: self.hit_block_id.clone(),
        }
    }
}
