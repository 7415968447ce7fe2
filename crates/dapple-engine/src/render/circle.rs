use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use wgpu::util::DeviceExt;

use crate::coords::Viewport;
use crate::math::quad_transform;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{GradientCircle, SceneObject};

use super::common::{
    dynamic_uniform_entry, load_attachment, premul_alpha_blend, strip_primitive, QuadVertex,
    UniformSlots, QUAD_VERTEX_COUNT, QUAD_VERTICES,
};

/// Per-draw uniform for one gradient circle (80 bytes).
///
///  offset  0  transform [[f32; 4]; 4]  model matrix, column-major
///  offset 64  color     [f32; 4]       premultiplied rim color
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CircleUniform {
    pub transform: [[f32; 4]; 4],
    pub color: [f32; 4],
}

/// Uniforms the circle renderer uploads for `circles`, one per draw call.
pub fn circle_draws<'a, I>(circles: I, viewport: Viewport) -> Vec<CircleUniform>
where
    I: IntoIterator<Item = &'a GradientCircle>,
{
    circles
        .into_iter()
        .filter(|c| c.diameter() > 0.0)
        .map(|c| {
            let d = c.diameter();
            CircleUniform {
                transform: quad_transform(c.center(), Vec2::splat(d), viewport).to_cols_array_2d(),
                color: c.color().color().to_array(),
            }
        })
        .collect()
}

/// Renderer for `GradientCircle`s.
///
/// One draw call per circle over a shared unit quad; each draw selects its
/// own uniform slot with a dynamic offset.
pub struct CircleRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    uniforms: UniformSlots<CircleUniform>,

    quad_vbo: Option<wgpu::Buffer>,
}

impl Default for CircleRenderer {
    fn default() -> Self {
        Self {
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            uniforms: UniformSlots::new("dapple circle uniforms"),
            quad_vbo: None,
        }
    }
}

impl CircleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws `circles` in order. Returns the number of draw calls issued.
    pub fn render<'a, I>(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, circles: I) -> usize
    where
        I: IntoIterator<Item = &'a GradientCircle>,
    {
        let draws = circle_draws(circles, ctx.viewport);
        if draws.is_empty() {
            return 0;
        }

        self.ensure_pipeline(ctx);
        self.ensure_static_buffers(ctx);
        if self.uniforms.ensure_capacity(ctx, draws.len()) {
            self.bind_group = None;
        }
        self.ensure_bindings(ctx);
        self.uniforms.write(ctx, &draws);

        let Some(pipeline) = self.pipeline.as_ref() else { return 0 };
        let Some(bind_group) = self.bind_group.as_ref() else { return 0 };
        let Some(quad_vbo) = self.quad_vbo.as_ref() else { return 0 };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("dapple circle pass"),
            color_attachments: &[Some(load_attachment(target.color_view))],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));

        for i in 0..draws.len() {
            rpass.set_bind_group(0, bind_group, &[self.uniforms.offset(i)]);
            rpass.draw(0..QUAD_VERTEX_COUNT, 0..1);
        }

        draws.len()
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("dapple circle shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/circle.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("dapple circle bgl"),
                entries: &[dynamic_uniform_entry(0, UniformSlots::<CircleUniform>::item_size())],
            });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("dapple circle pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("dapple circle pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: strip_primitive(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("circle pipeline created for {:?}", ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };
        let Some(resource) = self.uniforms.binding() else { return };

        self.bind_group = Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("dapple circle bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry { binding: 0, resource }],
        }));
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() {
            return;
        }

        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("dapple circle quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::{Mat4, Vec4};

    use crate::paint::CircleColor;
    use crate::scene::{SceneGraph, DEFAULT_DIAMETER};

    const VP: Viewport = Viewport::new(800.0, 600.0);

    #[test]
    fn uniform_is_80_bytes() {
        assert_eq!(std::mem::size_of::<CircleUniform>(), 80);
    }

    #[test]
    fn empty_scene_plans_no_draws() {
        let mut scene = SceneGraph::new();
        scene.scope();
        assert!(circle_draws(scene.visible_circles(), VP).is_empty());
    }

    #[test]
    fn one_draw_per_visible_circle() {
        let mut scene = SceneGraph::new();
        for i in 0..3 {
            scene.add_gradient_circle(GradientCircle::centered_at(
                100.0 * i as f32,
                100.0,
                DEFAULT_DIAMETER,
                CircleColor::Blue,
            ));
        }
        scene.scope();
        assert_eq!(circle_draws(scene.visible_circles(), VP).len(), 3);
    }

    #[test]
    fn transform_maps_quad_onto_circle_footprint() {
        // Centre (400, 300) is the canvas centre; diameter 200.
        let circle = GradientCircle::centered_at(400.0, 300.0, 200.0, CircleColor::Red);
        let draws = circle_draws([&circle], VP);
        let m = Mat4::from_cols_array_2d(&draws[0].transform);

        let centre = m * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(centre.x, 0.0);
        assert_relative_eq!(centre.y, 0.0);

        // Right edge of the quad lands 100px right of centre: 100 / 400 NDC.
        let right = m * Vec4::new(0.5, 0.0, 0.0, 1.0);
        assert_relative_eq!(right.x, 0.25);

        // Top edge: 100px up, 100 / 300 NDC.
        let top = m * Vec4::new(0.0, 0.5, 0.0, 1.0);
        assert_relative_eq!(top.y, 1.0 / 3.0);
    }

    #[test]
    fn off_centre_circle_translates_with_flipped_y() {
        let circle = GradientCircle::new(0.0, 0.0, 200.0, CircleColor::Blue);
        let draws = circle_draws([&circle], VP);
        let m = Mat4::from_cols_array_2d(&draws[0].transform);
        let centre = m * Vec4::new(0.0, 0.0, 0.0, 1.0);

        // Pixel centre (100, 100).
        assert_relative_eq!(centre.x, -0.75);
        assert_relative_eq!(centre.y, 2.0 / 3.0);
    }

    #[test]
    fn color_comes_from_palette() {
        let circle = GradientCircle::centered_at(0.0, 0.0, 10.0, CircleColor::Green);
        let draws = circle_draws([&circle], VP);
        assert_eq!(draws[0].color, [0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn zero_diameter_is_skipped() {
        let circle = GradientCircle::centered_at(0.0, 0.0, 0.0, CircleColor::Green);
        assert!(circle_draws([&circle], VP).is_empty());
    }
}
