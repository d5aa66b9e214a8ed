//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The runtime translates keyboard events into `KeyEvent`s; the viewer feeds
//! them to an `InteractionState` it owns.

mod interaction;
pub(crate) mod platform;
mod types;

pub use interaction::{InteractionConfig, InteractionState, KeyOutcome};
pub use types::{Key, KeyEvent, KeyState};
