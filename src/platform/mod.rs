//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (monotonic clock)
//! - Input (fixed key-to-move table)

pub mod clock;
pub mod input;

pub use clock::{Clock, ManualClock};
pub use input::move_for_key;
