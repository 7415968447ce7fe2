//! Input subsystem.
//!
//! Public types are platform-agnostic and do not expose winit. The runtime
//! translates window events through `platform::winit` into `PointerEvent`s.

mod frame;
pub(crate) mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{MouseButton, PointerEvent, PointerEventKind};
