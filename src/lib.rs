//! Isobuild - world-edit engine for an isometric block builder
//!
//! Places and removes unit blocks on an unbounded grid, keeps a debounced
//! undo/redo log, and saves, loads and shares named builds.

pub mod core;
pub mod math;
pub mod blocks;
pub mod placement;
pub mod world;
pub mod persistence;
pub mod input;
