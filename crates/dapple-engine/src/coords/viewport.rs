use glam::Vec2;

/// Canvas size in logical pixels.
///
/// Renderers map pixel positions to NDC against this size on the CPU before
/// uploading each object's transform.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Half the canvas size; one NDC unit in pixels along each axis.
    #[inline]
    pub fn half_extent(self) -> Vec2 {
        Vec2::new(self.width.max(1.0) * 0.5, self.height.max(1.0) * 0.5)
    }
}
