//! Shared GPU types and utilities used by the per-kind renderers.

use bytemuck::{Pod, Zeroable};

use super::RenderCtx;

// ── blend ─────────────────────────────────────────────────────────────────

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

pub(super) fn strip_primitive() -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology: wgpu::PrimitiveTopology::TriangleStrip,
        strip_index_format: None,
        front_face: wgpu::FrontFace::Ccw,
        cull_mode: None,
        polygon_mode: wgpu::PolygonMode::Fill,
        unclipped_depth: false,
        conservative: false,
    }
}

// ── quad vertex ───────────────────────────────────────────────────────────

/// Unit quad vertex (16 bytes).
///
///  offset 0  position [f32; 2]  loc 0  (-0.5..0.5, +Y up)
///  offset 8  value    [f32; 2]  loc 1  interpolated to the fragment stage
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub position: [f32; 2],
    pub value: [f32; 2],
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Triangle-strip order. `value` equals `position`, so `length(value)` is the
/// distance from the quad centre.
pub(super) const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { position: [-0.5, -0.5], value: [-0.5, -0.5] },
    QuadVertex { position: [0.5, -0.5], value: [0.5, -0.5] },
    QuadVertex { position: [-0.5, 0.5], value: [-0.5, 0.5] },
    QuadVertex { position: [0.5, 0.5], value: [0.5, 0.5] },
];

pub(super) const QUAD_VERTEX_COUNT: u32 = QUAD_VERTICES.len() as u32;

// ── dynamic-offset uniforms ───────────────────────────────────────────────

/// Rounds `size` up to a multiple of `alignment` (a power of two, or 0/1).
#[inline]
pub(super) fn align_to(size: u64, alignment: u64) -> u64 {
    if alignment <= 1 {
        return size;
    }
    size.div_ceil(alignment) * alignment
}

/// One uniform buffer holding a slot per draw, bound with dynamic offsets.
pub(super) struct UniformSlots<T> {
    label: &'static str,
    buffer: Option<wgpu::Buffer>,
    capacity: usize,
    stride: u64,
    staging: Vec<u8>,
    _item: std::marker::PhantomData<T>,
}

impl<T: Pod> UniformSlots<T> {
    pub(super) fn new(label: &'static str) -> Self {
        Self {
            label,
            buffer: None,
            capacity: 0,
            stride: 0,
            staging: Vec::new(),
            _item: std::marker::PhantomData,
        }
    }

    pub(super) const fn item_size() -> u64 {
        std::mem::size_of::<T>() as u64
    }

    /// Grows the buffer to hold `required` slots.
    ///
    /// Returns `true` when the buffer was recreated; bind groups pointing at
    /// the old one must be rebuilt.
    pub(super) fn ensure_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) -> bool {
        if required <= self.capacity && self.buffer.is_some() {
            return false;
        }

        let stride = align_to(Self::item_size(), ctx.uniform_alignment());
        let capacity = required.next_power_of_two().max(16);

        self.buffer = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(self.label),
            size: stride * capacity as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.capacity = capacity;
        self.stride = stride;
        log::debug!("{}: {capacity} slots, stride {stride}", self.label);
        true
    }

    /// Uploads `items`, one per slot.
    pub(super) fn write(&mut self, ctx: &RenderCtx<'_>, items: &[T]) {
        let Some(buffer) = self.buffer.as_ref() else { return };
        let stride = self.stride as usize;

        self.staging.clear();
        self.staging.resize(stride * items.len(), 0);
        for (slot, item) in self.staging.chunks_exact_mut(stride).zip(items) {
            let bytes = bytemuck::bytes_of(item);
            slot[..bytes.len()].copy_from_slice(bytes);
        }
        ctx.queue.write_buffer(buffer, 0, &self.staging);
    }

    #[inline]
    pub(super) fn offset(&self, index: usize) -> u32 {
        (self.stride * index as u64) as u32
    }

    /// Binding covering a single slot.
    pub(super) fn binding(&self) -> Option<wgpu::BindingResource<'_>> {
        let buffer = self.buffer.as_ref()?;
        Some(wgpu::BindingResource::Buffer(wgpu::BufferBinding {
            buffer,
            offset: 0,
            size: wgpu::BufferSize::new(Self::item_size()),
        }))
    }
}

/// Bind group layout entry for a per-draw uniform slot.
pub(super) fn dynamic_uniform_entry(binding: u32, size: u64) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: true,
            min_binding_size: wgpu::BufferSize::new(size),
        },
        count: None,
    }
}

/// Color attachment that keeps what earlier passes drew.
pub(super) fn load_attachment(view: &wgpu::TextureView) -> wgpu::RenderPassColorAttachment<'_> {
    wgpu::RenderPassColorAttachment {
        view,
        resolve_target: None,
        ops: wgpu::Operations {
            load: wgpu::LoadOp::Load,
            store: wgpu::StoreOp::Store,
        },
        depth_slice: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_stride_is_16_bytes() {
        assert_eq!(std::mem::size_of::<QuadVertex>(), 16);
        assert_eq!(QuadVertex::layout().array_stride, 16);
    }

    #[test]
    fn quad_spans_unit_square_centred_on_origin() {
        for v in QUAD_VERTICES {
            assert_eq!(v.position, v.value);
            assert_eq!(v.position[0].abs(), 0.5);
            assert_eq!(v.position[1].abs(), 0.5);
        }
    }

    #[test]
    fn align_to_rounds_up() {
        assert_eq!(align_to(80, 256), 256);
        assert_eq!(align_to(256, 256), 256);
        assert_eq!(align_to(257, 256), 512);
        assert_eq!(align_to(80, 0), 80);
    }
}
