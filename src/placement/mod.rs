//! Placement resolution: turning a pointer hit into a new block position.

pub mod resolver;

pub use resolver::{PlacementRejection, PlacementRequest, lowest_free_level, resolve_placement};
