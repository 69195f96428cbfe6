//! Grid cell helpers.
//!
//! Blocks occupy unit cells whose centers sit at `n + 0.5` on X and Z.
//! Positions are floats, so cell identity is decided with a per-axis
//! epsilon rather than exact equality.

use crate::core::types::Vec3;

/// Two positions closer than this on every axis name the same cell
pub const POSITION_EPSILON: f32 = 0.1;

/// Per-axis epsilon equality
pub fn positions_equal(a: Vec3, b: Vec3) -> bool {
    let diff = (a - b).abs();
    diff.x < POSITION_EPSILON && diff.y < POSITION_EPSILON && diff.z < POSITION_EPSILON
}

/// True when `a` and `b` share an X/Z column, ignoring height
pub fn same_column(a: Vec3, b: Vec3) -> bool {
    (a.x - b.x).abs() < POSITION_EPSILON && (a.z - b.z).abs() < POSITION_EPSILON
}

/// Center of the unit cell containing `coord` along one horizontal axis
pub fn cell_center(coord: f32) -> f32 {
    coord.floor() + 0.5
}
