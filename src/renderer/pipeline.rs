//! WebGPU render pipeline setup

use glam::Vec2;
use wgpu::util::DeviceExt;

use super::shapes::tessellate;
use super::vertex::Vertex;
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::draw::{Color, DrawCommand, Palette};

/// Pixels per logical unit, fitting the whole sketch in the viewport
fn fit_scale(size: (u32, u32)) -> f32 {
    let (w, h) = size;
    (w as f32 / CANVAS_WIDTH).min(h as f32 / CANVAS_HEIGHT)
}

/// Convert sketch coordinates (y down, 1000x600) to normalized device
/// coordinates, letterboxed and centered in a viewport of `size` pixels
pub fn logical_to_ndc(size: (u32, u32), p: Vec2) -> Vec2 {
    let (w, h) = size;
    let scale = fit_scale(size);
    let centered = p - Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT) / 2.0;
    Vec2::new(
        centered.x * scale / (w as f32 / 2.0),
        -centered.y * scale / (h as f32 / 2.0),
    )
}

/// Convert a pointer position in viewport pixels back to sketch coordinates
pub fn screen_to_logical(size: (u32, u32), px: f32, py: f32) -> Vec2 {
    let (w, h) = size;
    let scale = fit_scale(size);
    let from_center = Vec2::new(px - w as f32 / 2.0, py - h as f32 / 2.0);
    from_center / scale + Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT) / 2.0
}

/// Main render state
pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,
    pub vertex_buffer: wgpu::Buffer,
    pub vertex_count: u32,
    /// Viewport size in pixels
    pub size: (u32, u32),
    /// Used when the render list has no clear command
    pub background: Color,
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<Self, wgpu::RequestDeviceError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("mirror-sketch-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sketch_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("render_pipeline"),
            layout: Some(&pipeline_layout),
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
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
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

        // Replaced every frame
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("vertex_buffer"),
            contents: bytemuck::cast_slice(&[Vertex::new(0.0, 0.0, [1.0; 4])]),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        log::info!("Render pipeline ready ({:?}, {}x{})", surface_format, width, height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer,
            vertex_count: 0,
            size: (width, height),
            background: Palette::default().background,
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Tessellate a render list, upload it and draw the frame
    pub fn render(&mut self, commands: &[DrawCommand]) -> Result<(), wgpu::SurfaceError> {
        let (clear, vertices) = tessellate(commands);
        let clear = clear.unwrap_or(self.background);

        let ndc_vertices: Vec<Vertex> = vertices
            .iter()
            .map(|v| {
                let p = logical_to_ndc(self.size, Vec2::from(v.position));
                Vertex::new(p.x, p.y, v.color)
            })
            .collect();

        if !ndc_vertices.is_empty() {
            self.vertex_buffer =
                self.device
                    .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("vertex_buffer"),
                        contents: bytemuck::cast_slice(&ndc_vertices),
                        usage: wgpu::BufferUsages::VERTEX,
                    });
        }
        self.vertex_count = ndc_vertices.len() as u32;

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear[0] as f64,
                            g: clear[1] as f64,
                            b: clear[2] as f64,
                            a: clear[3] as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if self.vertex_count > 0 {
                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                render_pass.draw(0..self.vertex_count, 0..1);
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
    fn test_corners_map_to_ndc_edges() {
        // Viewport with the sketch's own aspect ratio
        let size = (1000, 600);
        let tl = logical_to_ndc(size, Vec2::new(0.0, 0.0));
        let br = logical_to_ndc(size, Vec2::new(1000.0, 600.0));
        assert!((tl - Vec2::new(-1.0, 1.0)).length() < 1e-5);
        assert!((br - Vec2::new(1.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_letterboxed_in_tall_viewport() {
        // Width limits the scale, so the sketch spans full width only
        let size = (500, 1000);
        let left = logical_to_ndc(size, Vec2::new(0.0, 300.0));
        let top = logical_to_ndc(size, Vec2::new(500.0, 0.0));
        assert!((left.x + 1.0).abs() < 1e-5);
        assert!(top.y < 1.0);
    }

    #[test]
    fn test_screen_to_logical_inverts_mapping() {
        let size = (1280, 720);
        // Center of the viewport is the center of the sketch
        let c = screen_to_logical(size, 640.0, 360.0);
        assert!((c - Vec2::new(500.0, 300.0)).length() < 1e-3);

        let p = Vec2::new(420.0, 305.0);
        let ndc = logical_to_ndc(size, p);
        let px = (ndc.x + 1.0) / 2.0 * 1280.0;
        let py = (1.0 - ndc.y) / 2.0 * 720.0;
        assert!((screen_to_logical(size, px, py) - p).length() < 1e-2);
    }
}
