//! Spyglass Runtime - Frame infrastructure for the host update loop
//!
//! - `FrameClock`: clamped per-frame delta time
//! - `InputState`: keyboard and mouse tracking with action bindings
//! - `InputSample`: the per-frame snapshot handed to per-frame consumers

mod clock;
mod input;

pub use clock::FrameClock;
pub use input::{actions, InputSample, InputState, MoveKeys};
