//! Routes pointer input into store operations.
//!
//! - Primary click: place a block through the resolver.
//! - Secondary click, or shift + primary click, on a block: remove it.
//!   Removal never goes through the resolver.
//! - Any click ending a drag is ignored.

use crate::blocks::Face;
use crate::core::types::{BlockId, Vec3};
use crate::core::EditorConfig;
use crate::placement::PlacementRejection;
use crate::world::WorldStore;
use super::drag::DragDetector;
use super::pointer::{PointerButton, PointerEvent};

/// What a click ended up doing
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionOutcome {
    Placed(BlockId),
    Removed(BlockId),
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone, PartialEq)]
pub enum IgnoreReason {
    /// The press turned into a drag
    Dragged,
    /// Secondary click with no block under the pointer
    NothingToRemove,
    /// Removal target no longer exists
    UnknownBlock(BlockId),
    Rejected(PlacementRejection),
}

/// Stateful pointer handler; one per viewport
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    drag: DragDetector,
}

impl InteractionController {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            drag: DragDetector::new(config.drag_threshold_px),
        }
    }

    pub fn pointer_down(&mut self, screen_x: f32, screen_y: f32) {
        self.drag.pointer_down(screen_x, screen_y);
    }

    pub fn pointer_move(&mut self, screen_x: f32, screen_y: f32) {
        self.drag.pointer_move(screen_x, screen_y);
    }

    pub fn pointer_up(&mut self) {
        self.drag.pointer_up();
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Handle a click that the rendering layer has resolved to a hit
    pub fn click(&mut self, store: &mut WorldStore, event: &PointerEvent) -> InteractionOutcome {
        if self.drag.is_dragging() {
            return InteractionOutcome::Ignored(IgnoreReason::Dragged);
        }

        let wants_removal = event.button == PointerButton::Secondary || event.shift;
        if wants_removal {
            let Some(id) = event.hit_block_id.clone() else {
                return InteractionOutcome::Ignored(IgnoreReason::NothingToRemove);
            };
            return if store.remove_block(&id) {
                InteractionOutcome::Removed(id)
            } else {
                InteractionOutcome::Ignored(IgnoreReason::UnknownBlock(id))
            };
        }

        match store.place_block(&event.placement_request()) {
            Ok(id) => InteractionOutcome::Placed(id),
            Err(rejection) => {
                log::debug!("Placement rejected: {}", rejection);
                InteractionOutcome::Ignored(IgnoreReason::Rejected(rejection))
            }
        }
    }

    /// Forward what the pointer is over to the store's throttled hover state
    pub fn hover(&mut self, store: &mut WorldStore, hit: Option<(BlockId, Vec3)>) {
        match hit {
            Some((id, normal)) => {
                store.set_hovered_block(Some(id));
                store.set_hovered_face(Face::from_normal(normal).map(Face::index));
            }
            None => {
                store.set_hovered_block(None);
                store.set_hovered_face(None);
            }
        }
    }
}
