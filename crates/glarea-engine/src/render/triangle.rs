use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::Rect;
use crate::render::pipeline::capture_validation;
use crate::render::{PipelineState, RenderCtx, RenderTarget};

/// The object being drawn: three homogeneous positions.
pub const TRIANGLE_VERTICES: [[f32; 4]; 3] = [
    [0.0, 0.5, 0.0, 1.0],
    [0.5, -0.366, 0.0, 1.0],
    [-0.5, -0.366, 0.0, 1.0],
];

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct TransformUniform {
    /// Column-major.
    mvp: [[f32; 4]; 4],
    /// Drawing area in physical px: x, y, width, height.
    area: [f32; 4],
}

struct TriangleResources {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform: wgpu::Buffer,
    vertices: wgpu::Buffer,
}

/// Draws the fixed triangle through a model matrix into a sub-rect of the surface.
///
/// Resources are created on first use. If the shader or pipeline fails
/// validation the renderer disables itself and draws nothing from then on.
#[derive(Default)]
pub struct TriangleRenderer {
    state: PipelineState<TriangleResources>,
}

impl TriangleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws into `area` (logical px) with `mvp` given column-major.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        area: Rect,
        mvp: [[f32; 4]; 4],
    ) {
        let Some((x, y, w, h)) = ctx.physical_rect(area) else { return };

        let Some(res) = self
            .state
            .ensure(ctx.surface_format, "triangle", || build_resources(ctx))
        else {
            return;
        };

        let u = TransformUniform {
            mvp,
            area: [x as f32, y as f32, w as f32, h as f32],
        };
        ctx.queue.write_buffer(&res.uniform, 0, bytemuck::bytes_of(&u));

        let mut rpass = target.load_pass("glarea triangle pass");
        rpass.set_viewport(x as f32, y as f32, w as f32, h as f32, 0.0, 1.0);
        rpass.set_scissor_rect(x, y, w, h);
        rpass.set_pipeline(&res.pipeline);
        rpass.set_bind_group(0, &res.bind_group, &[]);
        rpass.set_vertex_buffer(0, res.vertices.slice(..));
        rpass.draw(0..TRIANGLE_VERTICES.len() as u32, 0..1);
    }
}

fn build_resources(ctx: &RenderCtx<'_>) -> Result<TriangleResources, wgpu::Error> {
    capture_validation(ctx.device, |device| {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("glarea triangle shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/triangle.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("glarea triangle bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<TransformUniform>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("glarea triangle pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("glarea triangle pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<[f32; 4]>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x4],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Back faces must stay visible while the triangle spins.
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

        let uniform = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("glarea triangle ubo"),
            size: std::mem::size_of::<TransformUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("glarea triangle bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform.as_entire_binding(),
            }],
        });

        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("glarea triangle vbo"),
            contents: bytemuck::cast_slice(&TRIANGLE_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        TriangleResources {
            pipeline,
            bind_group,
            uniform,
            vertices,
        }
    })
}
