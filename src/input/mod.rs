//! Pointer input handling

pub mod pointer;
pub mod drag;
pub mod interaction;

pub use pointer::{PointerButton, PointerEvent};
pub use drag::DragDetector;
pub use interaction::{IgnoreReason, InteractionController, InteractionOutcome};
