//! UI layer: turns pointer input into scene commands.

mod controller;

pub use controller::{PointerController, CLICK_SLOP_PX, DOUBLE_CLICK_MS};
