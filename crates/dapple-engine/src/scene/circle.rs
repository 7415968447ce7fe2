use glam::Vec4;

use crate::paint::CircleColor;

use super::object::{position_at, ObjectKind, SceneObject};

/// Diameter, in pixels, of circles spawned without an explicit size.
pub const DEFAULT_DIAMETER: f32 = 256.0;

/// Filled disc rendered with a radial gradient of its palette color.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientCircle {
    position: Vec4,
    diameter: f32,
    color: CircleColor,
}

impl GradientCircle {
    /// Creates a circle whose bounding box starts at `(x, y)`.
    pub fn new(x: f32, y: f32, diameter: f32, color: CircleColor) -> Self {
        Self { position: position_at(x, y), diameter: diameter.max(0.0), color }
    }

    /// Creates a circle centred on `(cx, cy)`.
    pub fn centered_at(cx: f32, cy: f32, diameter: f32, color: CircleColor) -> Self {
        let r = diameter.max(0.0) * 0.5;
        Self::new(cx - r, cy - r, diameter, color)
    }

    #[inline]
    pub fn diameter(&self) -> f32 {
        self.diameter
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.diameter * 0.5
    }

    #[inline]
    pub fn color(&self) -> CircleColor {
        self.color
    }
}

impl Default for GradientCircle {
    fn default() -> Self {
        Self::new(0.0, 0.0, DEFAULT_DIAMETER, CircleColor::default())
    }
}

impl SceneObject for GradientCircle {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Circle
    }

    fn position(&self) -> Vec4 {
        self.position
    }

    fn set_position(&mut self, position: Vec4) {
        self.position = position;
    }

    fn width(&self) -> f32 {
        self.diameter
    }

    fn height(&self) -> f32 {
        self.diameter
    }

    /// Euclidean test against the disc; the rim itself counts as inside.
    fn contains(&self, x: f32, y: f32) -> bool {
        let c = self.center();
        let dx = x - c.x;
        let dy = y - c.y;
        let r = self.radius();
        dx * dx + dy * dy <= r * r
    }
}
