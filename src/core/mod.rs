//! Core engine types and utilities

pub mod types;
pub mod error;
pub mod logging;
pub mod clock;
pub mod timer;
pub mod config;

pub use types::*;
pub use error::Error;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::EditorConfig;
