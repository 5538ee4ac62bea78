// Rendering system using wgpu
//
// Game code only sees `DrawSurface`; the wgpu side turns the blits into
// textured quads over a fixed 800x600 logical canvas.

mod blit;
mod camera;
mod sprite;
mod texture;
mod vertex;

pub use blit::{Blit, DrawSurface, Rect};
pub use camera::{Camera, CameraUniform};
pub use sprite::{SpriteBatch, SpriteRenderer};
pub use texture::Texture;
pub use vertex::Vertex;

use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;
use winit::window::Window;

/// Logical canvas width in pixels
pub const CANVAS_WIDTH: f32 = 800.0;
/// Logical canvas height in pixels
pub const CANVAS_HEIGHT: f32 = 600.0;

/// Main renderer responsible for initializing wgpu and coordinating rendering
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    sprite_renderer: SpriteRenderer,
}

impl Renderer {
    /// Create a new renderer for the given window, uploading `sheet` as the sprite sheet
    pub async fn new(window: Arc<Window>, sheet: &image::DynamicImage) -> Result<Self> {
        let size = window.inner_size();

        // Create wgpu instance
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Create surface
        let surface = instance.create_surface(window.clone())?;

        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("Failed to find suitable GPU adapter"))?;

        info!("Using GPU: {}", adapter.get_info().name);

        // Request device and queue
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_defaults(),
                },
                None,
            )
            .await?;

        // Configure surface
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        let texture = Texture::from_image(&device, &queue, sheet, Some("Sprite Sheet"))?;
        let camera = Camera::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        let sprite_renderer = SpriteRenderer::new(&device, &config, &texture, &camera)?;

        info!(
            "Renderer initialized with {}x{} surface, {}x{} sprite sheet",
            config.width,
            config.height,
            texture.width(),
            texture.height()
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            sprite_renderer,
        })
    }

    /// Resize the renderer
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            info!("Renderer resized to {}x{}", new_size.width, new_size.height);
        }
    }

    /// The surface this frame's blits go into
    pub fn surface(&mut self) -> &mut SpriteBatch {
        self.sprite_renderer.batch_mut()
    }

    /// Present everything blitted since the last frame
    pub fn render(&mut self) -> Result<()> {
        // The next frame starts empty even if this one is never presented
        let frame = self.sprite_renderer.batch_mut().take();

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost, reconfiguring");
                self.resize(self.size);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.sprite_renderer.prepare(&self.queue, &frame);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.sprite_renderer.render(&mut render_pass);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
