//! Dapple engine crate.
//!
//! A small 2D scene host: a scene graph of gradient circles and animated
//! sprites, per-kind wgpu renderers, a fixed-step frame loop and a pointer
//! controller, plus the winit runtime that ties them to a window.

pub mod core;
pub mod device;
pub mod input;
pub mod time;
pub mod window;

pub mod coords;
pub mod error;
pub mod host;
pub mod logging;
pub mod math;
pub mod paint;
pub mod render;
pub mod resources;
pub mod scene;
pub mod text;
pub mod ui;

pub use error::SceneError;
