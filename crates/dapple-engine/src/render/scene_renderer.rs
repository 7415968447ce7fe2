use crate::resources::ResourceManager;
use crate::scene::SceneGraph;

use super::circle::CircleRenderer;
use super::sprite::SpriteRenderer;
use super::{RenderCtx, RenderTarget};

/// Draw calls issued for one frame, per kind.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct RenderStats {
    pub sprites: usize,
    pub circles: usize,
}

impl RenderStats {
    pub fn total(self) -> usize {
        self.sprites + self.circles
    }
}

/// Renders a scene's visible set: sprites first, then circles.
///
/// Each kind goes through its own renderer and render pass.
#[derive(Default)]
pub struct SceneRenderer {
    sprites: SpriteRenderer,
    circles: CircleRenderer,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws what the last `SceneGraph::scope` selected.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        scene: &SceneGraph,
        resources: &ResourceManager,
    ) -> RenderStats {
        let sprites = self
            .sprites
            .render(ctx, target, scene.visible_sprites(), resources);
        let circles = self.circles.render(ctx, target, scene.visible_circles());
        RenderStats { sprites, circles }
    }
}
