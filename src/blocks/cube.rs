//! Standard unit cube

use super::plugin::BlockPlugin;

pub const CUBE: &str = "cube";

/// A basic cube block; every policy is the default one
#[derive(Debug, Clone, Copy, Default)]
pub struct CubePlugin;

impl BlockPlugin for CubePlugin {
    fn block_type(&self) -> &str {
        CUBE
    }

    fn display_name(&self) -> &str {
        "Cube"
    }

    fn description(&self) -> &str {
        "A basic cube block"
    }
}
