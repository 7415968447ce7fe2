use glam::Vec2;

/// Axis-aligned rectangle in pixels (top-left origin, +Y down).
///
/// Used both for object bounds on the canvas and for frame regions inside the
/// sprite atlas.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Closed containment: `[min, max]` on both axes.
    ///
    /// Hit testing uses the closed form so a point exactly on an object's edge
    /// still selects it.
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.origin.x && p.y >= self.origin.y && p.x <= max.x && p.y <= max.y
    }

    /// Maps this pixel region into normalized `[0, 1]` texture coordinates of
    /// a `width` x `height` image. Returns `(uv_min, uv_max)`.
    #[inline]
    pub fn to_uv(self, width: u32, height: u32) -> (Vec2, Vec2) {
        let size = Vec2::new(width.max(1) as f32, height.max(1) as f32);
        (self.min() / size, self.max() / size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    #[test]
    fn contains_interior_point() {
        assert!(r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn contains_edges_inclusive() {
        let rect = r(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Vec2::new(0.0, 0.0)));
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(rect.contains(Vec2::new(10.0, 0.0)));
    }

    #[test]
    fn contains_outside() {
        assert!(!r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(-1.0, 5.0)));
        assert!(!r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(5.0, 10.5)));
    }

    #[test]
    fn center_is_midpoint() {
        assert_eq!(r(10.0, 20.0, 30.0, 40.0).center(), Vec2::new(25.0, 40.0));
    }

    #[test]
    fn to_uv_normalizes_by_image_size() {
        let (min, max) = r(64.0, 0.0, 64.0, 32.0).to_uv(256, 128);
        assert_eq!(min, Vec2::new(0.25, 0.0));
        assert_eq!(max, Vec2::new(0.5, 0.25));
    }

    #[test]
    fn is_empty_zero_size() {
        assert!(r(0.0, 0.0, 0.0, 5.0).is_empty());
        assert!(!r(0.0, 0.0, 1.0, 1.0).is_empty());
    }
}
