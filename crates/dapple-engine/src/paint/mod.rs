//! Color model shared by the scene and the renderers.

pub mod color;
pub mod palette;

pub use color::Color;
pub use palette::CircleColor;
