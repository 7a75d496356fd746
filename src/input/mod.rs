//! Input handling
//!
//! Action-based keyboard and mouse input. Bindings live on `Action`;
//! `InputState` polls the devices and produces one `FrameInput` per frame.

mod actions;
mod state;

pub use actions::*;
pub use state::*;
