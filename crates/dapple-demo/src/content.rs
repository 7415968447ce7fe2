//! Procedural demo content: two sprite types and the atlas they share.
//!
//! Atlas layout (256 x 128, 64 px cells):
//! - row 0: `RedCircleMan`, four frames of a pulsing red figure
//! - row 1: `MultiColorBlock`, four frames of a block cycling colors

use dapple_engine::coords::Rect;
use dapple_engine::resources::{AtlasImage, ResourceManager};
use dapple_engine::scene::{AnimatedSpriteType, AnimationFrame};
use dapple_engine::SceneError;

pub const RED_CIRCLE_MAN: &str = "RedCircleMan";
pub const MULTI_COLOR_BLOCK: &str = "MultiColorBlock";

const CELL: u32 = 64;
const FRAMES: u32 = 4;
const ATLAS_W: u32 = CELL * FRAMES;
const ATLAS_H: u32 = CELL * 2;

/// Registers both sprite types and installs their atlas.
pub fn build_resources() -> Result<ResourceManager, SceneError> {
    let mut resources = ResourceManager::new();
    resources.register_sprite_type(red_circle_man()?);
    resources.register_sprite_type(multi_color_block()?);
    resources.set_atlas(build_atlas()?);
    Ok(resources)
}

fn row_frames(row: u32, duration_ms: f64) -> impl Iterator<Item = AnimationFrame> {
    (0..FRAMES).map(move |i| {
        let region = Rect::new((i * CELL) as f32, (row * CELL) as f32, CELL as f32, CELL as f32);
        AnimationFrame::new(region, duration_ms)
    })
}

fn red_circle_man() -> Result<AnimatedSpriteType, SceneError> {
    let frames: Vec<_> = row_frames(0, 120.0).collect();
    let idle = frames[0];
    AnimatedSpriteType::builder(RED_CIRCLE_MAN, CELL as f32, CELL as f32)
        .sequence("FORWARD", frames)
        .sequence("IDLE", [AnimationFrame::new(idle.region, 1000.0)])
        .build()
}

fn multi_color_block() -> Result<AnimatedSpriteType, SceneError> {
    AnimatedSpriteType::builder(MULTI_COLOR_BLOCK, CELL as f32, CELL as f32)
        .sequence("FORWARD", row_frames(1, 200.0))
        .build()
}

fn build_atlas() -> Result<AtlasImage, SceneError> {
    let mut rgba = vec![0u8; (ATLAS_W * ATLAS_H * 4) as usize];

    for frame in 0..FRAMES {
        paint_cell(&mut rgba, frame, 0, |x, y| circle_man_texel(frame, x, y));
        paint_cell(&mut rgba, frame, 1, |x, y| block_texel(frame, x, y));
    }

    AtlasImage::new(ATLAS_W, ATLAS_H, rgba)
}

fn paint_cell(rgba: &mut [u8], col: u32, row: u32, texel: impl Fn(f32, f32) -> [u8; 4]) {
    for y in 0..CELL {
        for x in 0..CELL {
            // Cell-local coordinates in [-1, 1], texel centres.
            let fx = (x as f32 + 0.5) / CELL as f32 * 2.0 - 1.0;
            let fy = (y as f32 + 0.5) / CELL as f32 * 2.0 - 1.0;
            let px = col * CELL + x;
            let py = row * CELL + y;
            let i = ((py * ATLAS_W + px) * 4) as usize;
            rgba[i..i + 4].copy_from_slice(&texel(fx, fy));
        }
    }
}

fn circle_man_texel(frame: u32, x: f32, y: f32) -> [u8; 4] {
    let pulse = [0.70, 0.80, 0.90, 0.80][frame as usize];
    let head = (x * x + (y + 0.45) * (y + 0.45)).sqrt() <= 0.35 * pulse;
    let body = (x * x + (y - 0.35) * (y - 0.35)).sqrt() <= 0.55 * pulse;
    let eye = ((x.abs() - 0.12).powi(2) + (y + 0.5).powi(2)).sqrt() <= 0.06;

    if eye && head {
        [255, 255, 255, 255]
    } else if head || body {
        [220, 30, 40, 255]
    } else {
        [0, 0, 0, 0]
    }
}

fn block_texel(frame: u32, x: f32, y: f32) -> [u8; 4] {
    const COLORS: [[u8; 3]; 4] = [[240, 200, 40], [40, 200, 90], [50, 120, 230], [200, 60, 200]];
    let edge = x.abs().max(y.abs());
    if edge > 0.9 {
        [30, 30, 30, 255]
    } else {
        let [r, g, b] = COLORS[frame as usize];
        [r, g, b, 255]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resources_hold_both_types_and_atlas() {
        let resources = build_resources().unwrap();
        assert_eq!(resources.sprite_type_ids(), vec![MULTI_COLOR_BLOCK, RED_CIRCLE_MAN]);
        assert_eq!((resources.atlas().width(), resources.atlas().height()), (ATLAS_W, ATLAS_H));

        let man = resources.get_animated_sprite_type_by_id(RED_CIRCLE_MAN).unwrap();
        assert_eq!(man.sequence("FORWARD").map(<[_]>::len), Some(4));
        assert!(man.has_sequence("IDLE"));
    }

    #[test]
    fn frame_regions_stay_inside_atlas() {
        let resources = build_resources().unwrap();
        for id in [RED_CIRCLE_MAN, MULTI_COLOR_BLOCK] {
            let ty = resources.get_animated_sprite_type_by_id(id).unwrap();
            for frame in ty.sequence("FORWARD").unwrap() {
                let max = frame.region.max();
                assert!(max.x <= ATLAS_W as f32 && max.y <= ATLAS_H as f32);
            }
        }
    }
}
