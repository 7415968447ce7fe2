//! Fonts and on-screen text labels.

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem};

use glam::Vec2;

use crate::paint::Color;

/// One line of text drawn over the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub font: FontId,
    /// Pixel height of the em square.
    pub size: f32,
    /// Top-left corner of the layout box, in canvas pixels.
    pub origin: Vec2,
    pub color: Color,
}
