//! Point-sprite particle rendering

use crate::camera::{Camera, CameraUniform};
use crate::context::GpuContext;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use particle_physics::Particle;
use particle_simulation::RenderTarget;
use wgpu::util::DeviceExt;

/// Multisampling used for the color target
pub const SAMPLE_COUNT: u32 = 4;

/// Sprite diameter in pixels
pub const POINT_SIZE: f32 = 2.0;

/// Per-particle data owned by the renderer. Never touched after creation.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ParticleDecor {
    pub orient: [[f32; 4]; 4],
    pub color: [f32; 3],
    pub _padding: f32,
}

const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

const DECOR_ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
    1 => Float32x4,
    2 => Float32x4,
    3 => Float32x4,
    4 => Float32x4,
    5 => Float32x3
];

/// Convert an 8-bit sRGB channel to linear space
fn srgb_to_linear(channel: u8) -> f32 {
    let c = channel as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_rgb(color: &catppuccin::Color) -> [f32; 3] {
    [
        srgb_to_linear(color.rgb.r),
        srgb_to_linear(color.rgb.g),
        srgb_to_linear(color.rgb.b),
    ]
}

/// Identity orientation and a red, green, yellow colour cycle
pub fn particle_decorations(count: usize) -> Vec<ParticleDecor> {
    let colors = &catppuccin::PALETTE.mocha.colors;
    let palette = [
        linear_rgb(&colors.red),
        linear_rgb(&colors.green),
        linear_rgb(&colors.yellow),
    ];

    palette
        .iter()
        .cycle()
        .take(count)
        .map(|&color| ParticleDecor {
            orient: Mat4::IDENTITY.to_cols_array_2d(),
            color,
            _padding: 0.0,
        })
        .collect()
}

fn background() -> wgpu::Color {
    let [r, g, b] = linear_rgb(&catppuccin::PALETTE.mocha.colors.base);
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: 1.0,
    }
}

pub struct ParticleRenderer {
    render_pipeline: wgpu::RenderPipeline,
    queue: wgpu::Queue,
    camera_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    position_buffer: wgpu::Buffer,
    decor_buffer: wgpu::Buffer,
    msaa_view: wgpu::TextureView,
    particle_count: u32,
    clear_color: wgpu::Color,
}

impl ParticleRenderer {
    /// `particles` seeds the position buffer and fixes its size for good.
    pub fn new(context: &GpuContext, particles: &[Particle]) -> Self {
        let device = &context.device;

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Camera Buffer"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // Rewritten every frame
        let position_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Particle Position Buffer"),
            contents: bytemuck::cast_slice(particles),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        let decor_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Particle Decor Buffer"),
            contents: bytemuck::cast_slice(&particle_decorations(particles.len())),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Particle Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/particle.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Particle Bind Group Layout"),
            entries: &[
                // Camera (Uniform) - Binding 0
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Particle Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Render Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Particle Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vertex"),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<Particle>() as wgpu::BufferAddress,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &POSITION_ATTRIBUTES,
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<ParticleDecor>() as wgpu::BufferAddress,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &DECOR_ATTRIBUTES,
                    },
                ],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fragment"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: context.config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: SAMPLE_COUNT,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        let msaa_view = Self::create_msaa_view(device, &context.config);

        log::debug!(
            "Particle renderer ready: {} sprites, {}x MSAA",
            particles.len(),
            SAMPLE_COUNT
        );

        Self {
            render_pipeline,
            queue: context.queue.clone(),
            camera_buffer,
            bind_group,
            position_buffer,
            decor_buffer,
            msaa_view,
            particle_count: particles.len() as u32,
            clear_color: background(),
        }
    }

    fn create_msaa_view(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("MSAA Color Texture"),
            size: wgpu::Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: SAMPLE_COUNT,
            dimension: wgpu::TextureDimension::D2,
            format: config.format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    pub fn resize(&mut self, context: &GpuContext) {
        self.msaa_view = Self::create_msaa_view(&context.device, &context.config);
    }

    pub fn render(&self, context: &GpuContext, surface_view: &wgpu::TextureView, camera: &Camera) {
        self.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[camera.to_uniform(POINT_SIZE)]),
        );

        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.msaa_view,
                    resolve_target: Some(surface_view),
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let viewport = camera.viewport();
            render_pass.set_viewport(
                viewport.x,
                viewport.y,
                viewport.width,
                viewport.height,
                0.0,
                1.0,
            );
            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.position_buffer.slice(..));
            render_pass.set_vertex_buffer(1, self.decor_buffer.slice(..));
            render_pass.draw(0..6, 0..self.particle_count);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
    }
}

impl RenderTarget for ParticleRenderer {
    fn upload_positions(&mut self, particles: &[Particle]) {
        if particles.len() != self.particle_count as usize {
            log::warn!(
                "Ignoring upload of {} particles into a buffer sized for {}",
                particles.len(),
                self.particle_count
            );
            return;
        }

        self.queue
            .write_buffer(&self.position_buffer, 0, bytemuck::cast_slice(particles));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decor_matches_vertex_layout() {
        assert_eq!(std::mem::size_of::<ParticleDecor>(), 80);
        assert_eq!(DECOR_ATTRIBUTES[4].offset, 64);
    }

    #[test]
    fn test_decorations_cycle_three_colors() {
        let decor = particle_decorations(7);
        assert_eq!(decor.len(), 7);
        assert_eq!(decor[0].color, decor[3].color);
        assert_eq!(decor[1].color, decor[4].color);
        assert_eq!(decor[2].color, decor[5].color);
        assert_ne!(decor[0].color, decor[1].color);
        assert_ne!(decor[1].color, decor[2].color);
        assert!(decor
            .iter()
            .all(|d| d.orient == Mat4::IDENTITY.to_cols_array_2d()));
    }

    #[test]
    fn test_srgb_to_linear_endpoints() {
        assert_eq!(srgb_to_linear(0), 0.0);
        assert!((srgb_to_linear(255) - 1.0).abs() < 1e-6);
        assert!(srgb_to_linear(128) < 0.5);
    }
}
