use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};

use crate::coords::Viewport;

/// Composes `translate * rotate * scale` into a model matrix.
///
/// `rotate` holds Euler angles in radians (applied X, then Y, then Z).
#[inline]
pub fn model(translate: Vec3, rotate: Vec3, scale: Vec3) -> Mat4 {
    let rotation = Quat::from_euler(EulerRot::XYZ, rotate.x, rotate.y, rotate.z);
    Mat4::from_translation(translate) * Mat4::from_quat(rotation) * Mat4::from_scale(scale)
}

/// Maps a canvas pixel position to normalized device coordinates.
///
/// `ndc = (pixel - canvas / 2) / (canvas / 2)` with Y flipped, since the canvas
/// grows downward while clip space grows upward.
#[inline]
pub fn pixel_to_ndc(pixel: Vec2, viewport: Viewport) -> Vec2 {
    let half = viewport.half_extent();
    let n = (pixel - half) / half;
    Vec2::new(n.x, -n.y)
}

/// Model transform that maps the unit quad (`[-0.5, 0.5]²`) onto a
/// `size_px` footprint centred at `center_px`.
#[inline]
pub fn quad_transform(center_px: Vec2, size_px: Vec2, viewport: Viewport) -> Mat4 {
    let translate = pixel_to_ndc(center_px, viewport);
    let scale = size_px / viewport.half_extent();
    model(
        Vec3::new(translate.x, translate.y, 0.0),
        Vec3::ZERO,
        Vec3::new(scale.x, scale.y, 1.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec4;

    const VP: Viewport = Viewport::new(800.0, 600.0);

    #[test]
    fn canvas_center_maps_to_origin() {
        assert_eq!(pixel_to_ndc(Vec2::new(400.0, 300.0), VP), Vec2::ZERO);
    }

    #[test]
    fn top_left_maps_to_minus_one_plus_one() {
        assert_eq!(pixel_to_ndc(Vec2::ZERO, VP), Vec2::new(-1.0, 1.0));
        assert_eq!(pixel_to_ndc(Vec2::new(800.0, 600.0), VP), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn identity_model_for_neutral_inputs() {
        let m = model(Vec3::ZERO, Vec3::ZERO, Vec3::ONE);
        assert!(m.abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn model_scales_before_translating() {
        let m = model(Vec3::new(1.0, 2.0, 0.0), Vec3::ZERO, Vec3::new(2.0, 3.0, 1.0));
        let p = m * Vec4::new(1.0, 1.0, 0.0, 1.0);
        assert_relative_eq!(p.x, 3.0);
        assert_relative_eq!(p.y, 5.0);
    }

    #[test]
    fn model_rotates_about_z() {
        let m = model(Vec3::ZERO, Vec3::new(0.0, 0.0, std::f32::consts::FRAC_PI_2), Vec3::ONE);
        let p = m * Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn quad_transform_covers_pixel_footprint() {
        // 256px disc whose top-left sits at the canvas origin.
        let m = quad_transform(Vec2::new(128.0, 128.0), Vec2::splat(256.0), VP);

        let top_right = m * Vec4::new(0.5, 0.5, 0.0, 1.0);
        let expected = pixel_to_ndc(Vec2::new(256.0, 0.0), VP);
        assert_relative_eq!(top_right.x, expected.x, epsilon = 1e-5);
        assert_relative_eq!(top_right.y, expected.y, epsilon = 1e-5);

        let bottom_left = m * Vec4::new(-0.5, -0.5, 0.0, 1.0);
        let expected = pixel_to_ndc(Vec2::new(0.0, 256.0), VP);
        assert_relative_eq!(bottom_left.x, expected.x, epsilon = 1e-5);
        assert_relative_eq!(bottom_left.y, expected.y, epsilon = 1e-5);
    }
}
