use wgpu::util::DeviceExt;

use warp_core::{FrameView, LineVertex, Particle, ThemeColor};

use crate::instances::{build_glow_instances, GlowInstance, Globals};
use crate::SCENE_WGSL;

pub(crate) const STAR_ENTRY_POINTS: (&str, &str) = ("vs_star", "fs_sprite");
pub(crate) const BACKDROP_ENTRY_POINTS: (&str, &str) = ("vs_backdrop", "fs_backdrop");

const QUAD_VERTICES: [f32; 12] = [
    -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
];
const QUAD_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
const STAR_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![1 => Float32x3, 2 => Float32x3];
const GLOW_ATTRS: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![1 => Float32x3, 2 => Float32, 3 => Float32x4];
const LINE_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

/// Vertex buffer that grows in whole elements of `stride` bytes.
struct DynamicBuffer {
    buffer: wgpu::Buffer,
    capacity: usize,
    stride: usize,
    label: &'static str,
    usage: wgpu::BufferUsages,
}

impl DynamicBuffer {
    fn new(device: &wgpu::Device, label: &'static str, stride: usize, capacity: usize) -> Self {
        let usage = wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST;
        Self {
            buffer: Self::alloc(device, label, stride, capacity, usage),
            capacity: capacity.max(1),
            stride,
            label,
            usage,
        }
    }

    fn alloc(
        device: &wgpu::Device,
        label: &str,
        stride: usize,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (stride * capacity.max(1)) as u64,
            usage,
            mapped_at_creation: false,
        })
    }

    /// Returns true when the buffer was reallocated (previous contents lost).
    fn ensure(&mut self, device: &wgpu::Device, len: usize) -> bool {
        if len <= self.capacity {
            return false;
        }
        let capacity = len.next_power_of_two();
        log::debug!("[render] grow {} buffer to {} elements", self.label, capacity);
        self.buffer = Self::alloc(device, self.label, self.stride, capacity, self.usage);
        self.capacity = capacity;
        true
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct DrawCounts {
    backdrop: u32,
    stars: u32,
    line_vertices: u32,
    glow_background: u32,
    glow_total: u32,
}

pub struct SceneRenderer {
    backdrop_pipeline: wgpu::RenderPipeline,
    star_pipeline: wgpu::RenderPipeline,
    glow_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    quad_vb: wgpu::Buffer,
    star_vb: DynamicBuffer,
    line_vb: DynamicBuffer,
    glow_vb: DynamicBuffer,
    glow_scratch: Vec<GlowInstance>,
    backdrop_uploaded: bool,
    counts: DrawCounts,
    clear_color: wgpu::Color,
}

impl SceneRenderer {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let quad_layout = wgpu::VertexBufferLayout {
            array_stride: (std::mem::size_of::<f32>() * 2) as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &QUAD_ATTRS,
        };
        let star_buffers = [
            quad_layout.clone(),
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Particle>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &STAR_ATTRS,
            },
        ];
        let star_pipeline = build_pipeline(
            device,
            &layout,
            &shader,
            format,
            "stars",
            STAR_ENTRY_POINTS,
            &star_buffers,
            wgpu::PrimitiveTopology::TriangleList,
        );
        let backdrop_pipeline = build_pipeline(
            device,
            &layout,
            &shader,
            format,
            "backdrop",
            BACKDROP_ENTRY_POINTS,
            &star_buffers,
            wgpu::PrimitiveTopology::TriangleList,
        );
        let glow_pipeline = build_pipeline(
            device,
            &layout,
            &shader,
            format,
            "glow",
            ("vs_glow", "fs_sprite"),
            &[
                quad_layout,
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<GlowInstance>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &GLOW_ATTRS,
                },
            ],
            wgpu::PrimitiveTopology::TriangleList,
        );
        let line_pipeline = build_pipeline(
            device,
            &layout,
            &shader,
            format,
            "streaks",
            ("vs_line", "fs_line"),
            &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<LineVertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &LINE_ATTRS,
            }],
            wgpu::PrimitiveTopology::LineList,
        );

        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let bg = ThemeColor::Background.rgb();
        Self {
            backdrop_pipeline,
            star_pipeline,
            glow_pipeline,
            line_pipeline,
            globals_buffer,
            bind_group,
            quad_vb,
            star_vb: DynamicBuffer::new(device, "star_vb", std::mem::size_of::<Particle>(), 1024),
            line_vb: DynamicBuffer::new(device, "line_vb", std::mem::size_of::<LineVertex>(), 1024),
            glow_vb: DynamicBuffer::new(device, "glow_vb", std::mem::size_of::<GlowInstance>(), 256),
            glow_scratch: Vec::with_capacity(256),
            backdrop_uploaded: false,
            counts: DrawCounts::default(),
            clear_color: wgpu::Color {
                r: bg[0] as f64,
                g: bg[1] as f64,
                b: bg[2] as f64,
                a: 1.0,
            },
        }
    }

    /// Upload everything `frame` needs. The backdrop shares the star buffer,
    /// ahead of the moving stars, and is written only when the buffer is new.
    pub fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, frame: &FrameView<'_>) {
        queue.write_buffer(
            &self.globals_buffer,
            0,
            bytemuck::bytes_of(&Globals::from_frame(frame)),
        );

        let backdrop_len = frame.backdrop.len();
        if self.star_vb.ensure(device, backdrop_len + frame.stars.len()) {
            self.backdrop_uploaded = false;
        }
        if !self.backdrop_uploaded {
            queue.write_buffer(&self.star_vb.buffer, 0, bytemuck::cast_slice(frame.backdrop));
            self.backdrop_uploaded = true;
        }
        let star_offset = (backdrop_len * std::mem::size_of::<Particle>()) as u64;
        queue.write_buffer(
            &self.star_vb.buffer,
            star_offset,
            bytemuck::cast_slice(frame.stars),
        );

        self.line_vb.ensure(device, frame.streak_vertices.len());
        queue.write_buffer(
            &self.line_vb.buffer,
            0,
            bytemuck::cast_slice(frame.streak_vertices),
        );

        let glow_background = build_glow_instances(frame, &mut self.glow_scratch);
        self.glow_vb.ensure(device, self.glow_scratch.len());
        queue.write_buffer(
            &self.glow_vb.buffer,
            0,
            bytemuck::cast_slice(&self.glow_scratch),
        );

        self.counts = DrawCounts {
            backdrop: backdrop_len as u32,
            stars: frame.stars.len() as u32,
            line_vertices: frame.streak_vertices.len() as u32,
            glow_background: glow_background as u32,
            glow_total: self.glow_scratch.len() as u32,
        };
    }

    /// Record draws back to front: backdrop, nebulae, streaks, stars, then
    /// the core, rings and orbiters.
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        let c = self.counts;
        rpass.set_bind_group(0, &self.bind_group, &[]);

        rpass.set_pipeline(&self.backdrop_pipeline);
        rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
        rpass.set_vertex_buffer(1, self.star_vb.buffer.slice(..));
        if c.backdrop > 0 {
            rpass.draw(0..6, 0..c.backdrop);
        }

        rpass.set_pipeline(&self.glow_pipeline);
        rpass.set_vertex_buffer(1, self.glow_vb.buffer.slice(..));
        if c.glow_background > 0 {
            rpass.draw(0..6, 0..c.glow_background);
        }

        if c.line_vertices > 0 {
            rpass.set_pipeline(&self.line_pipeline);
            rpass.set_vertex_buffer(0, self.line_vb.buffer.slice(..));
            rpass.draw(0..c.line_vertices, 0..1);
        }

        rpass.set_pipeline(&self.star_pipeline);
        rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
        rpass.set_vertex_buffer(1, self.star_vb.buffer.slice(..));
        if c.stars > 0 {
            rpass.draw(0..6, c.backdrop..c.backdrop + c.stars);
        }

        rpass.set_pipeline(&self.glow_pipeline);
        rpass.set_vertex_buffer(1, self.glow_vb.buffer.slice(..));
        if c.glow_total > c.glow_background {
            rpass.draw(0..6, c.glow_background..c.glow_total);
        }
    }

    /// Prepare, clear `target` to the background color and draw one frame.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        frame: &FrameView<'_>,
    ) {
        self.prepare(device, queue, frame);
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("scene_encoder"),
        });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.draw(&mut rpass);
        }
        queue.submit(Some(encoder.finish()));
    }
}

#[allow(clippy::too_many_arguments)]
fn build_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    label: &str,
    (vs_entry, fs_entry): (&str, &str),
    buffers: &[wgpu::VertexBufferLayout<'_>],
    topology: wgpu::PrimitiveTopology,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(vs_entry),
            buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology,
            ..wgpu::PrimitiveState::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fs_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}
