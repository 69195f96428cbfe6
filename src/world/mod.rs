//! The editable world: blocks, history and the store that owns them.

pub mod block;
pub mod history;
pub mod store;
pub mod theme;

pub use block::{Block, NewBlock, is_occupied};
pub use history::{History, Snapshot};
pub use store::{HoverState, WorldStore};
pub use theme::Theme;
