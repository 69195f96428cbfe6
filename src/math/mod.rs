//! Mathematical utilities and data structures

pub mod aabb;
pub mod cell;

pub use aabb::Aabb;
pub use cell::{POSITION_EPSILON, cell_center, positions_equal, same_column};
