//! Rendering system for the atom viewer
//!
//! Nucleons and electrons are drawn as instanced, lit sphere billboards;
//! shells are drawn as line rings. Both share one camera uniform and one
//! depth buffer.

use common::{create_depth_view, CameraUniform, GraphicsContext, OrbitCamera, DEPTH_FORMAT};
use glam::{Quat, Vec3};
use std::f32::consts::TAU;
use wgpu::util::DeviceExt;

use crate::atom::{AtomState, NucleonKind};

/// Line segments per orbit ring
pub const RING_SEGMENTS: usize = 96;

/// Instance data for one sphere
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SphereInstance {
    pub position: [f32; 3],
    pub radius: f32,
    pub color: [f32; 4],
}

impl SphereInstance {
    const ATTRIBS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        2 => Float32x3,  // center
        3 => Float32,    // radius
        4 => Float32x4,  // color
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SphereInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Quad vertex for billboards
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
}

impl QuadVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

const QUAD_VERTICES: &[QuadVertex] = &[
    QuadVertex { position: [-1.0, -1.0] },
    QuadVertex { position: [1.0, -1.0] },
    QuadVertex { position: [1.0, 1.0] },
    QuadVertex { position: [-1.0, -1.0] },
    QuadVertex { position: [1.0, 1.0] },
    QuadVertex { position: [-1.0, 1.0] },
];

/// Orbit ring vertex
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl LineVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x4,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

pub struct AtomRenderer {
    sphere_pipeline: wgpu::RenderPipeline,
    ring_pipeline: wgpu::RenderPipeline,
    quad_buffer: wgpu::Buffer,
    sphere_buffer: wgpu::Buffer,
    ring_buffer: wgpu::Buffer,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    depth_view: wgpu::TextureView,
    max_spheres: usize,
    max_ring_vertices: usize,
}

impl AtomRenderer {
    pub fn new(ctx: &GraphicsContext, max_spheres: usize, max_rings: usize) -> Self {
        let device = &ctx.device;
        let max_ring_vertices = max_rings * RING_SEGMENTS * 2;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Atom Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/atom.wgsl").into()),
        });

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Camera Buffer"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Atom Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout],
            push_constant_ranges: &[],
        });

        let sphere_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sphere Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_sphere",
                buffers: &[QuadVertex::layout(), SphereInstance::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_sphere",
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        // Rings are translucent: test against spheres but never occlude them
        let ring_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Ring Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_line",
                buffers: &[LineVertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_line",
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        let quad_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Buffer"),
            contents: bytemuck::cast_slice(QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let sphere_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Sphere Instance Buffer"),
            size: (std::mem::size_of::<SphereInstance>() * max_spheres) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let ring_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Ring Buffer"),
            size: (std::mem::size_of::<LineVertex>() * max_ring_vertices) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let depth_view = create_depth_view(device, ctx.config.width, ctx.config.height);

        Self {
            sphere_pipeline,
            ring_pipeline,
            quad_buffer,
            sphere_buffer,
            ring_buffer,
            camera_buffer,
            camera_bind_group,
            depth_view,
            max_spheres,
            max_ring_vertices,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_view = create_depth_view(device, width, height);
    }

    pub fn update_camera(&self, queue: &wgpu::Queue, camera: &OrbitCamera) {
        let uniform = CameraUniform::from_camera(camera);
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    /// Upload the atom's spheres and rings; returns `(spheres, ring vertices)` to draw
    pub fn update_atom(&self, queue: &wgpu::Queue, atom: &AtomState) -> (u32, u32) {
        let spheres = sphere_instances(atom);
        let spheres = &spheres[..spheres.len().min(self.max_spheres)];
        if !spheres.is_empty() {
            queue.write_buffer(&self.sphere_buffer, 0, bytemuck::cast_slice(spheres));
        }

        let rings = ring_vertices(atom);
        let rings = &rings[..rings.len().min(self.max_ring_vertices)];
        if !rings.is_empty() {
            queue.write_buffer(&self.ring_buffer, 0, bytemuck::cast_slice(rings));
        }

        (spheres.len() as u32, rings.len() as u32)
    }

    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        num_spheres: u32,
        num_ring_vertices: u32,
    ) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Atom Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: 0.02,
                        g: 0.02,
                        b: 0.06,
                        a: 1.0,
                    }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if num_spheres > 0 {
            render_pass.set_pipeline(&self.sphere_pipeline);
            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.quad_buffer.slice(..));
            render_pass.set_vertex_buffer(1, self.sphere_buffer.slice(..));
            render_pass.draw(0..6, 0..num_spheres);
        }

        if num_ring_vertices > 0 {
            render_pass.set_pipeline(&self.ring_pipeline);
            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.ring_buffer.slice(..));
            render_pass.draw(0..num_ring_vertices, 0..1);
        }
    }
}

/// Nucleons followed by electrons, ready for the instance buffer
pub fn sphere_instances(atom: &AtomState) -> Vec<SphereInstance> {
    let layout = atom.layout();

    let nucleons = atom.nucleons().map(|n| SphereInstance {
        position: n.position.to_array(),
        radius: layout.nucleon_radius,
        color: match n.kind {
            NucleonKind::Proton => layout.proton_color,
            NucleonKind::Neutron => layout.neutron_color,
        },
    });

    let electrons = atom.electrons().map(|p| SphereInstance {
        position: p.to_array(),
        radius: layout.electron_radius,
        color: layout.electron_color,
    });

    nucleons.chain(electrons).collect()
}

/// Line-list vertices for every occupied shell's ring
pub fn ring_vertices(atom: &AtomState) -> Vec<LineVertex> {
    let color = atom.layout().ring_color;
    atom.orbit_rings()
        .into_iter()
        .flat_map(|(radius, tilt)| ring(radius, tilt, color))
        .collect()
}

fn ring(radius: f32, tilt: f32, color: [f32; 4]) -> Vec<LineVertex> {
    let rotation = Quat::from_rotation_x(tilt);
    let point = |k: usize| {
        let angle = k as f32 / RING_SEGMENTS as f32 * TAU;
        let p = rotation * Vec3::new(radius * angle.cos(), 0.0, radius * angle.sin());
        LineVertex {
            position: p.to_array(),
            color,
        }
    };

    (0..RING_SEGMENTS)
        .flat_map(|k| [point(k), point(k + 1)])
        .collect()
}
