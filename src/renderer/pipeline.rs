//! WebGPU render pipeline
//!
//! One pipeline, one vertex buffer. Every frame the flat triangle list from
//! `shapes` is projected from canvas space to NDC, written into a persistent
//! buffer (grown when a frame outgrows it) and drawn in a single pass.

use thiserror::Error;

use super::vertex::{Vertex, colors};
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Vertices the buffer holds before its first resize
const INITIAL_VERTEX_CAPACITY: usize = 4096;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no texture formats")]
    NoSurfaceFormat,
}

/// Map logical canvas coordinates (origin top-left, y down) to NDC
pub fn canvas_to_ndc(x: f32, y: f32) -> (f32, f32) {
    (
        x / CANVAS_WIDTH * 2.0 - 1.0,
        1.0 - y / CANVAS_HEIGHT * 2.0,
    )
}

/// Project a canvas-space frame into NDC. The canvas element keeps the
/// 4:3 logical aspect ratio, so no letterboxing is needed.
pub fn project(vertices: &[Vertex]) -> Vec<Vertex> {
    vertices
        .iter()
        .map(|v| {
            let (x, y) = canvas_to_ndc(v.position[0], v.position[1]);
            Vertex::new(x, y, v.color)
        })
        .collect()
}

/// Buffer capacity (in vertices) able to hold `needed`
fn grown_capacity(current: usize, needed: usize) -> usize {
    if needed <= current {
        current
    } else {
        needed.next_power_of_two()
    }
}

fn clear_color() -> wgpu::Color {
    let [r, g, b, a] = colors::BACKGROUND;
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: a as f64,
    }
}

fn vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("frame_vertices"),
        size: (capacity * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn flat_pipeline(device: &wgpu::Device, format: wgpu::TextureFormat) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("flat_shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("flat_layout"),
        bind_group_layouts: &[],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("flat_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                // The pause overlay is translucent
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    vertices: wgpu::Buffer,
    /// Capacity of `vertices`, in vertices
    capacity: usize,
    /// Backing-store size in device pixels
    pub size: (u32, u32),
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("alien-barrage-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let caps = surface.get_capabilities(adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or(RenderError::NoSurfaceFormat)?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let pipeline = flat_pipeline(&device, format);
        let vertices = vertex_buffer(&device, INITIAL_VERTEX_CAPACITY);

        log::info!("Render pipeline ready ({}x{}, {:?})", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertices,
            capacity: INITIAL_VERTEX_CAPACITY,
            size: (width, height),
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.size = (width, height);
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Draw one frame of canvas-space triangles
    pub fn render(&mut self, frame: &[Vertex]) -> Result<(), wgpu::SurfaceError> {
        let ndc = project(frame);

        let capacity = grown_capacity(self.capacity, ndc.len());
        if capacity != self.capacity {
            log::debug!("Growing vertex buffer to {} vertices", capacity);
            self.vertices = vertex_buffer(&self.device, capacity);
            self.capacity = capacity;
        }
        if !ndc.is_empty() {
            self.queue
                .write_buffer(&self.vertices, 0, bytemuck::cast_slice(&ndc));
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("frame_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if !ndc.is_empty() {
                pass.set_pipeline(&self.pipeline);
                pass.set_vertex_buffer(0, self.vertices.slice(..));
                pass.draw(0..ndc.len() as u32, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_corners_to_ndc() {
        assert_eq!(canvas_to_ndc(0.0, 0.0), (-1.0, 1.0));
        assert_eq!(canvas_to_ndc(CANVAS_WIDTH, CANVAS_HEIGHT), (1.0, -1.0));
        assert_eq!(canvas_to_ndc(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0), (0.0, 0.0));
    }

    #[test]
    fn test_project_keeps_colors() {
        let frame = [Vertex::new(200.0, 450.0, colors::PLAYER)];
        let ndc = project(&frame);
        assert_eq!(ndc[0].position, [-0.5, -0.5]);
        assert_eq!(ndc[0].color, colors::PLAYER);
    }

    #[test]
    fn test_buffer_growth() {
        assert_eq!(grown_capacity(4096, 0), 4096);
        assert_eq!(grown_capacity(4096, 4096), 4096);
        assert_eq!(grown_capacity(4096, 4097), 8192);
        assert_eq!(grown_capacity(4096, 10_000), 16_384);
    }
}
