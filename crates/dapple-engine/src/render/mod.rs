//! GPU rendering subsystem.
//!
//! One renderer per object kind, each owning its pipeline and buffers, plus
//! `SceneRenderer` to run them over a scene's visible set and `TextRenderer`
//! for overlay labels.
//!
//! Convention:
//! - every object is a unit quad (`[-0.5, 0.5]²`) placed by a model matrix
//! - one draw call per object; its uniform slot is picked by dynamic offset
//! - `circle_draws` / `sprite_draws` compute those uniforms without a GPU

mod circle;
mod common;
mod ctx;
mod scene_renderer;
mod sprite;
mod text;

pub use circle::{circle_draws, CircleRenderer, CircleUniform};
pub use ctx::{RenderCtx, RenderTarget};
pub use scene_renderer::{RenderStats, SceneRenderer};
pub use sprite::{sprite_draws, SpriteRenderer, SpriteUniform};
pub use text::TextRenderer;
