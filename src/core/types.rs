//! Core type aliases and re-exports

pub use glam::Vec3;

/// Standard Result type for the engine
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;

/// Opaque identifier of a placed block
pub type BlockId = String;

/// Opaque identifier of a saved build
pub type BuildId = String;

/// Milliseconds since the Unix epoch (or since a virtual clock's origin)
pub type Millis = u64;

/// Generate a fresh opaque identifier
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
