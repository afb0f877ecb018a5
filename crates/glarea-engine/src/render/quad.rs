use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::Rect;
use crate::paint::Color;
use crate::render::pipeline::capture_validation;
use crate::render::{PipelineState, RenderCtx, RenderTarget};

/// One flat-colored rectangle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quad {
    pub rect: Rect,
    pub color: Color,
}

impl Quad {
    #[inline]
    pub const fn new(rect: Rect, color: Color) -> Self {
        Self { rect, color }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ViewportUniform {
    viewport: [f32; 2],
    _pad: [f32; 2], // 16-byte alignment
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadVertex {
    corner: [f32; 2], // 0..1
}

const UNIT_QUAD: [QuadVertex; 4] = [
    QuadVertex { corner: [0.0, 0.0] },
    QuadVertex { corner: [1.0, 0.0] },
    QuadVertex { corner: [1.0, 1.0] },
    QuadVertex { corner: [0.0, 1.0] },
];

const UNIT_QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadInstance {
    origin: [f32; 2],
    size: [f32; 2],
    color: [f32; 4],
}

impl QuadInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x2, // origin
        2 => Float32x2, // size
        3 => Float32x4  // color
    ];
}

/// Hands out non-overlapping slots of the instance buffer.
///
/// Queued buffer writes all land before the frame's commands run, so every
/// batch drawn in a frame needs its own region.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
struct InstanceCursor {
    capacity: usize,
    used: usize,
}

impl InstanceCursor {
    fn reset(&mut self) {
        self.used = 0;
    }

    /// Next `len` free slots, or `None` when the buffer has to grow first.
    fn reserve(&mut self, len: usize) -> Option<Range<usize>> {
        let end = self.used.checked_add(len)?;
        if end > self.capacity {
            return None;
        }
        let slots = self.used..end;
        self.used = end;
        Some(slots)
    }

    /// Switches to a fresh buffer able to hold at least `required` slots.
    fn grow(&mut self, required: usize) -> usize {
        self.capacity = required.next_power_of_two().max(16);
        self.used = 0;
        self.capacity
    }
}

struct QuadResources {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    viewport_ubo: wgpu::Buffer,
    quad_vbo: wgpu::Buffer,
    quad_ibo: wgpu::Buffer,
}

/// Instanced renderer for flat rectangles (panels, slider tracks, thumbs).
///
/// Quads are drawn in slice order with premultiplied-alpha blending.
/// `render` may be called several times per frame; call [`begin_frame`]
/// first so the batches reuse the instance buffer from the start.
///
/// [`begin_frame`]: QuadRenderer::begin_frame
#[derive(Default)]
pub struct QuadRenderer {
    state: PipelineState<QuadResources>,
    instance_vbo: Option<wgpu::Buffer>,
    cursor: InstanceCursor,
}

impl QuadRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Releases the slots used by the previous frame's batches.
    pub fn begin_frame(&mut self) {
        self.cursor.reset();
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, quads: &[Quad]) {
        let instances: Vec<QuadInstance> = quads
            .iter()
            .filter(|q| !q.rect.is_empty())
            .map(|q| QuadInstance {
                origin: [q.rect.x, q.rect.y],
                size: [q.rect.width, q.rect.height],
                color: q.color.to_array(),
            })
            .collect();

        if instances.is_empty() || !ctx.viewport.is_valid() {
            return;
        }

        // Mutating methods must happen before borrowing resources immutably.
        let slots = self.reserve_slots(ctx, instances.len());
        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };

        let Some(res) = self
            .state
            .ensure(ctx.surface_format, "quad", || build_resources(ctx))
        else {
            return;
        };

        let u = ViewportUniform {
            viewport: [ctx.viewport.width, ctx.viewport.height],
            _pad: [0.0; 2],
        };
        ctx.queue.write_buffer(&res.viewport_ubo, 0, bytemuck::bytes_of(&u));
        let stride = std::mem::size_of::<QuadInstance>() as u64;
        let bytes = slots.start as u64 * stride..slots.end as u64 * stride;
        ctx.queue.write_buffer(instance_vbo, bytes.start, bytemuck::cast_slice(&instances));

        let mut rpass = target.load_pass("glarea quad pass");
        rpass.set_pipeline(&res.pipeline);
        rpass.set_bind_group(0, &res.bind_group, &[]);
        rpass.set_vertex_buffer(0, res.quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(bytes));
        rpass.set_index_buffer(res.quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..UNIT_QUAD_INDICES.len() as u32, 0, 0..instances.len() as u32);
    }

    /// Reserves buffer slots for one batch, replacing the buffer when full.
    ///
    /// Passes recorded earlier keep the old buffer alive, so their data stays
    /// intact.
    fn reserve_slots(&mut self, ctx: &RenderCtx<'_>, len: usize) -> Range<usize> {
        if self.instance_vbo.is_some() {
            if let Some(slots) = self.cursor.reserve(len) {
                return slots;
            }
        }

        let capacity = self.cursor.grow(len);
        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("glarea quad instance vbo"),
            size: (capacity * std::mem::size_of::<QuadInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        // A fresh buffer always fits `len`.
        self.cursor.reserve(len).unwrap_or(0..len)
    }
}

fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState { color: component, alpha: component }
}

fn build_resources(ctx: &RenderCtx<'_>) -> Result<QuadResources, wgpu::Error> {
    capture_validation(ctx.device, |device| {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("glarea quad shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/quad.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("glarea quad bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<ViewportUniform>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("glarea quad pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("glarea quad pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<QuadVertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![0 => Float32x2],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<QuadInstance>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &QuadInstance::ATTRS,
                    },
                ],
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
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let viewport_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("glarea quad viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("glarea quad bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        let quad_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("glarea quad vbo"),
            contents: bytemuck::cast_slice(&UNIT_QUAD),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let quad_ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("glarea quad ibo"),
            contents: bytemuck::cast_slice(&UNIT_QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        QuadResources {
            pipeline,
            bind_group,
            viewport_ubo,
            quad_vbo,
            quad_ibo,
        }
    })
}
