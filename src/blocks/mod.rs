//! Block type plugins.
//!
//! Each block type is a plugin looked up by its tag. Resolution is a table
//! lookup; there is no fallback type.

pub mod face;
pub mod plugin;
pub mod cube;
pub mod stair;
pub mod registry;

pub use face::Face;
pub use plugin::{BlockGeometry, BlockPlugin, BlockTypeInfo};
pub use cube::{CubePlugin, CUBE};
pub use stair::{StairPlugin, STAIR};
pub use registry::BlockRegistry;
