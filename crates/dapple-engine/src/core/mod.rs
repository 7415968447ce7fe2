//! Core engine-facing contracts.
//!
//! The stable interface between the runtime (platform loop) and the
//! application: per-frame context plus the `App` callbacks.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
