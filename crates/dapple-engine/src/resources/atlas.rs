use crate::coords::Rect;
use crate::error::SceneError;

/// CPU-side RGBA8 image every sprite frame region points into.
///
/// Pixels are tightly packed, row-major, top row first, straight alpha.
#[derive(Debug, Clone, PartialEq)]
pub struct AtlasImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl AtlasImage {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, SceneError> {
        let expected = (width as usize) * (height as usize) * 4;
        if width == 0 || height == 0 || rgba.len() != expected {
            return Err(SceneError::InvalidAtlas {
                width,
                height,
                len: rgba.len(),
                expected,
            });
        }
        Ok(Self { width, height, rgba })
    }

    /// 1x1 opaque white image; sprites render as flat quads against it.
    pub fn white() -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: vec![255; 4],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Normalized UV rectangle of a pixel region.
    #[inline]
    pub fn uv_rect(&self, region: Rect) -> (glam::Vec2, glam::Vec2) {
        region.to_uv(self.width, self.height)
    }
}

impl Default for AtlasImage {
    fn default() -> Self {
        Self::white()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_size_mismatch() {
        let err = AtlasImage::new(2, 2, vec![0; 15]).unwrap_err();
        assert_eq!(
            err,
            SceneError::InvalidAtlas { width: 2, height: 2, len: 15, expected: 16 }
        );
    }

    #[test]
    fn rejects_zero_extent() {
        assert!(AtlasImage::new(0, 4, Vec::new()).is_err());
    }

    #[test]
    fn accepts_packed_rgba() {
        let atlas = AtlasImage::new(2, 1, vec![1; 8]).unwrap();
        assert_eq!((atlas.width(), atlas.height()), (2, 1));
        assert_eq!(atlas.rgba().len(), 8);
    }
}
