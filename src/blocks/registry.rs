//! Block type registry

use std::collections::HashMap;

use crate::core::{Error, Result};
use super::cube::CubePlugin;
use super::plugin::{BlockPlugin, BlockTypeInfo};
use super::stair::StairPlugin;

/// Maps block type tags to their plugins, in registration order.
///
/// Registering a tag twice is rejected; plugins are never merged or
/// silently replaced.
#[derive(Default)]
pub struct BlockRegistry {
    plugins: Vec<Box<dyn BlockPlugin>>,
    /// Tag -> index into `plugins`
    by_type: HashMap<String, usize>,
}

impl BlockRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in cube and stair types
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for plugin in default_plugins() {
            // Built-in tags are distinct, so this cannot collide
            if let Err(e) = registry.register(plugin) {
                log::warn!("Skipping built-in block type: {}", e);
            }
        }
        registry
    }

    /// Register a plugin under its type tag
    pub fn register(&mut self, plugin: Box<dyn BlockPlugin>) -> Result<()> {
        let tag = plugin.block_type().to_string();
        if self.by_type.contains_key(&tag) {
            log::warn!("Rejected duplicate registration of block type '{}'", tag);
            return Err(Error::DuplicateBlockType(tag));
        }

        log::debug!("Registered block type '{}'", tag);
        self.by_type.insert(tag, self.plugins.len());
        self.plugins.push(plugin);
        Ok(())
    }

    /// Remove a plugin, returning it if it was registered
    pub fn unregister(&mut self, block_type: &str) -> Option<Box<dyn BlockPlugin>> {
        let index = self.by_type.remove(block_type)?;
        let plugin = self.plugins.remove(index);
        self.rebuild_index();
        Some(plugin)
    }

    /// Look up a plugin by tag
    pub fn get(&self, block_type: &str) -> Option<&dyn BlockPlugin> {
        self.by_type
            .get(block_type)
            .map(|&i| self.plugins[i].as_ref())
    }

    /// Look up a plugin, treating absence as an error
    pub fn require(&self, block_type: &str) -> Result<&dyn BlockPlugin> {
        self.get(block_type)
            .ok_or_else(|| Error::UnknownBlockType(block_type.to_string()))
    }

    pub fn contains(&self, block_type: &str) -> bool {
        self.by_type.contains_key(block_type)
    }

    /// All plugins in registration order
    pub fn get_all(&self) -> impl Iterator<Item = &dyn BlockPlugin> {
        self.plugins.iter().map(|p| p.as_ref())
    }

    /// All tags in registration order
    pub fn types(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.block_type()).collect()
    }

    /// Toolbar entries in registration order
    pub fn infos(&self) -> Vec<BlockTypeInfo> {
        self.plugins.iter().map(|p| p.info()).collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    fn rebuild_index(&mut self) {
        self.by_type.clear();
        for (i, plugin) in self.plugins.iter().enumerate() {
            self.by_type.insert(plugin.block_type().to_string(), i);
        }
    }
}

impl std::fmt::Debug for BlockRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockRegistry")
            .field("types", &self.types())
            .finish()
    }
}

fn default_plugins() -> Vec<Box<dyn BlockPlugin>> {
    vec![Box::new(CubePlugin), Box::new(StairPlugin)]
}
