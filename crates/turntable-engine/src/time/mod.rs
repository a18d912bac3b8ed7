//! Frame timing.
//!
//! - `FrameClock`: one per render loop, `tick()` once per frame
//! - `FramePacer`: flat sleep after each frame
//! - `FrameStats`: periodic frame-rate logging

mod frame_clock;
mod pacer;
mod stats;

pub use frame_clock::{FrameClock, FrameTime};
pub use pacer::{interval_for_rate, FramePacer};
pub use stats::FrameStats;
