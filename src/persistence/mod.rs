//! Build persistence and durable editor state

pub mod build;
pub mod storage;
pub mod state;

pub use build::SavedBuild;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use state::{DecodedState, PersistedState, PersistedStateRef, decode_state, encode_state};
