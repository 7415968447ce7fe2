//! Time subsystem.
//!
//! - `FrameClock`: wall-clock deltas, one per window
//! - `MainLoop`: turns those deltas into fixed-step updates plus one draw per frame

mod frame_clock;
mod main_loop;

pub use frame_clock::{FrameClock, FrameTime};
pub use main_loop::{
    Lag, LoopState, MainLoop, Simulation, DEFAULT_MAX_UPDATE_STEPS, DEFAULT_TIMESTEP_MS,
};
