use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use wgpu::util::DeviceExt;

use crate::coords::Viewport;
use crate::math::quad_transform;
use crate::render::{RenderCtx, RenderTarget};
use crate::resources::{AtlasImage, ResourceManager};
use crate::scene::{AnimatedSprite, SceneObject};

use super::common::{
    dynamic_uniform_entry, load_attachment, premul_alpha_blend, strip_primitive, QuadVertex,
    UniformSlots, QUAD_VERTEX_COUNT, QUAD_VERTICES,
};

/// Per-draw uniform for one animated sprite (80 bytes).
///
///  offset  0  transform [[f32; 4]; 4]  model matrix, column-major
///  offset 64  uv_rect   [f32; 4]       current frame: (u_min, v_min, u_max, v_max)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SpriteUniform {
    pub transform: [[f32; 4]; 4],
    pub uv_rect: [f32; 4],
}

/// Uniforms the sprite renderer uploads for `sprites`, one per draw call.
///
/// Each sprite samples the atlas region of its current animation frame.
pub fn sprite_draws<'a, I>(sprites: I, viewport: Viewport, atlas: &AtlasImage) -> Vec<SpriteUniform>
where
    I: IntoIterator<Item = &'a AnimatedSprite>,
{
    sprites
        .into_iter()
        .map(|s| {
            let size = Vec2::new(s.width(), s.height());
            let (uv_min, uv_max) = atlas.uv_rect(s.current_frame().region);
            SpriteUniform {
                transform: quad_transform(s.center(), size, viewport).to_cols_array_2d(),
                uv_rect: [uv_min.x, uv_min.y, uv_max.x, uv_max.y],
            }
        })
        .collect()
}

/// Renderer for `AnimatedSprite`s.
///
/// Holds a GPU copy of the resource manager's atlas, re-uploaded whenever the
/// atlas generation changes.
pub struct SpriteRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    uniforms: UniformSlots<SpriteUniform>,

    sampler: Option<wgpu::Sampler>,
    atlas_texture: Option<wgpu::Texture>,
    atlas_view: Option<wgpu::TextureView>,
    atlas_generation: Option<u64>,

    quad_vbo: Option<wgpu::Buffer>,
}

impl Default for SpriteRenderer {
    fn default() -> Self {
        Self {
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            uniforms: UniformSlots::new("dapple sprite uniforms"),
            sampler: None,
            atlas_texture: None,
            atlas_view: None,
            atlas_generation: None,
            quad_vbo: None,
        }
    }
}

impl SpriteRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws `sprites` in order. Returns the number of draw calls issued.
    pub fn render<'a, I>(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        sprites: I,
        resources: &ResourceManager,
    ) -> usize
    where
        I: IntoIterator<Item = &'a AnimatedSprite>,
    {
        let atlas = resources.atlas();
        let draws = sprite_draws(sprites, ctx.viewport, atlas);
        if draws.is_empty() {
            return 0;
        }

        self.ensure_pipeline(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_sampler(ctx);
        self.ensure_atlas(ctx, atlas, resources.atlas_generation());
        if self.uniforms.ensure_capacity(ctx, draws.len()) {
            self.bind_group = None;
        }
        self.ensure_bindings(ctx);
        self.uniforms.write(ctx, &draws);

        let Some(pipeline) = self.pipeline.as_ref() else { return 0 };
        let Some(bind_group) = self.bind_group.as_ref() else { return 0 };
        let Some(quad_vbo) = self.quad_vbo.as_ref() else { return 0 };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("dapple sprite pass"),
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

    // ── lazy-init helpers ──────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("dapple sprite shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("dapple sprite bgl"),
            entries: &[
                dynamic_uniform_entry(0, UniformSlots::<SpriteUniform>::item_size()),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("dapple sprite pipeline layout"),
            bind_group_layouts: &[&bgl],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("dapple sprite pipeline"),
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

        log::debug!("sprite pipeline created for {:?}", ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bgl);
        self.bind_group = None;
    }

    fn ensure_atlas(&mut self, ctx: &RenderCtx<'_>, atlas: &AtlasImage, generation: u64) {
        if self.atlas_generation == Some(generation) && self.atlas_texture.is_some() {
            return;
        }

        let size = wgpu::Extent3d {
            width: atlas.width(),
            height: atlas.height(),
            depth_or_array_layers: 1,
        };

        let reuse = self
            .atlas_texture
            .as_ref()
            .is_some_and(|t| t.size() == size);

        if !reuse {
            let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
                label: Some("dapple sprite atlas"),
                size,
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            });
            self.atlas_view = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
            self.atlas_texture = Some(texture);
            self.bind_group = None;
        }

        let Some(texture) = self.atlas_texture.as_ref() else { return };
        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            atlas.rgba(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * atlas.width()),
                rows_per_image: Some(atlas.height()),
            },
            size,
        );

        log::debug!("sprite atlas uploaded: {}x{} (generation {generation})", atlas.width(), atlas.height());
        self.atlas_generation = Some(generation);
    }

    fn ensure_sampler(&mut self, ctx: &RenderCtx<'_>) {
        if self.sampler.is_some() {
            return;
        }
        // Nearest filtering keeps neighbouring atlas frames from bleeding in.
        self.sampler = Some(ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("dapple sprite sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        }));
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() {
            return;
        }

        let Some(bgl) = self.bind_group_layout.as_ref() else { return };
        let Some(atlas_view) = self.atlas_view.as_ref() else { return };
        let Some(sampler) = self.sampler.as_ref() else { return };
        let Some(uniforms) = self.uniforms.binding() else { return };

        self.bind_group = Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("dapple sprite bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniforms,
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(atlas_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        }));
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() {
            return;
        }

        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("dapple sprite quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use approx::assert_relative_eq;
    use glam::{Mat4, Vec4};

    use crate::coords::Rect;
    use crate::scene::{AnimatedSpriteType, AnimationFrame};

    const VP: Viewport = Viewport::new(800.0, 600.0);

    fn sprite(cx: f32, cy: f32) -> AnimatedSprite {
        let ty = AnimatedSpriteType::builder("strip", 64.0, 32.0)
            .sequence(
                "FORWARD",
                [
                    AnimationFrame::new(Rect::new(0.0, 0.0, 64.0, 32.0), 100.0),
                    AnimationFrame::new(Rect::new(64.0, 0.0, 64.0, 32.0), 100.0),
                ],
            )
            .build()
            .unwrap();
        AnimatedSprite::centered_at(Rc::new(ty), "FORWARD", cx, cy).unwrap()
    }

    fn atlas() -> AtlasImage {
        AtlasImage::new(128, 32, vec![0; 128 * 32 * 4]).unwrap()
    }

    #[test]
    fn uniform_is_80_bytes() {
        assert_eq!(std::mem::size_of::<SpriteUniform>(), 80);
    }

    #[test]
    fn uv_rect_follows_current_frame() {
        let mut s = sprite(400.0, 300.0);
        let draws = sprite_draws([&s], VP, &atlas());
        assert_eq!(draws[0].uv_rect, [0.0, 0.0, 0.5, 1.0]);

        s.update(100.0);
        let draws = sprite_draws([&s], VP, &atlas());
        assert_eq!(draws[0].uv_rect, [0.5, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn transform_scales_to_sprite_size() {
        let s = sprite(400.0, 300.0);
        let draws = sprite_draws([&s], VP, &atlas());
        let m = Mat4::from_cols_array_2d(&draws[0].transform);

        let corner = m * Vec4::new(0.5, 0.5, 0.0, 1.0);
        assert_relative_eq!(corner.x, 32.0 / 400.0);
        assert_relative_eq!(corner.y, 16.0 / 300.0);
    }

    #[test]
    fn one_draw_per_sprite() {
        let a = sprite(0.0, 0.0);
        let b = sprite(10.0, 10.0);
        assert_eq!(sprite_draws([&a, &b], VP, &atlas()).len(), 2);
        assert!(sprite_draws(std::iter::empty(), VP, &atlas()).is_empty());
    }
}
