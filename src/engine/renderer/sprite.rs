// Sprite rendering: blit batching and the textured-quad pipeline

use super::{Blit, Camera, CameraUniform, DrawSurface, Texture, Vertex};
use anyhow::Result;
use glam::Vec2;
use log::warn;
use wgpu::util::DeviceExt;

/// Maximum number of blits drawn per frame
pub const MAX_SPRITES: usize = 256;

/// Build the four corners of a blit (bottom-left, bottom-right, top-right, top-left)
///
/// `sheet` is the sprite-sheet size in pixels. Source rects are bottom-origin,
/// texture coordinates are top-origin, so `v` is flipped here.
pub fn quad(blit: &Blit, sheet: Vec2) -> [Vertex; 4] {
    let half = blit.dest_size() * 0.5;
    let rotation = Vec2::from_angle(blit.rotation);

    let u0 = blit.src.x / sheet.x;
    let u1 = (blit.src.x + blit.src.width) / sheet.x;
    let v_bottom = 1.0 - blit.src.y / sheet.y;
    let v_top = 1.0 - (blit.src.y + blit.src.height) / sheet.y;

    let corner = |offset: Vec2, uv: Vec2| Vertex::new(blit.dest + rotation.rotate(offset), uv);

    [
        corner(Vec2::new(-half.x, -half.y), Vec2::new(u0, v_bottom)),
        corner(Vec2::new(half.x, -half.y), Vec2::new(u1, v_bottom)),
        corner(Vec2::new(half.x, half.y), Vec2::new(u1, v_top)),
        corner(Vec2::new(-half.x, half.y), Vec2::new(u0, v_top)),
    ]
}

/// Blits collected for the current frame
#[derive(Debug, Default)]
pub struct SpriteBatch {
    blits: Vec<Blit>,
}

impl SpriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand over the queued blits, leaving this batch empty
    pub fn take(&mut self) -> SpriteBatch {
        std::mem::take(self)
    }

    /// Number of queued blits
    pub fn len(&self) -> usize {
        self.blits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blits.is_empty()
    }

    /// Vertices for every queued blit, in submission order
    pub fn vertices(&self, sheet: Vec2) -> Vec<Vertex> {
        self.blits.iter().flat_map(|blit| quad(blit, sheet)).collect()
    }
}

impl DrawSurface for SpriteBatch {
    fn blit(&mut self, blit: Blit) {
        self.blits.push(blit);
    }
}

/// Index data for `count` quads laid out as in [`quad`]
fn quad_indices(count: usize) -> Vec<u16> {
    (0..count as u16)
        .flat_map(|i| {
            let base = i * 4;
            [base, base + 1, base + 2, base, base + 2, base + 3]
        })
        .collect()
}

/// Draws the sprite batch with the sprite-sheet texture
pub struct SpriteRenderer {
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    sheet_bind_group: wgpu::BindGroup,
    sheet_size: Vec2,
    batch: SpriteBatch,
    index_count: u32,
}

impl SpriteRenderer {
    /// Create a new sprite renderer
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        sheet: &Texture,
        camera: &Camera,
    ) -> Result<Self> {
        // Create shader module
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sprite Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        // Create camera bind group layout
        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        // Create texture bind group layout
        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Texture Bind Group Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            multisampled: false,
                            view_dimension: wgpu::TextureViewDimension::D2,
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sprite Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &texture_bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sprite Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[Vertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
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
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Sprite Vertex Buffer"),
            size: (MAX_SPRITES * 4 * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sprite Index Buffer"),
            contents: bytemuck::cast_slice(&quad_indices(MAX_SPRITES)),
            usage: wgpu::BufferUsages::INDEX,
        });

        // The camera never moves, so its uniform is written once
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[CameraUniform::new(camera)]),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let sheet_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Sprite Sheet Bind Group"),
            layout: &texture_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&sheet.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sheet.sampler),
                },
            ],
        });

        Ok(Self {
            render_pipeline,
            vertex_buffer,
            index_buffer,
            camera_bind_group,
            sheet_bind_group,
            sheet_size: Vec2::new(sheet.width() as f32, sheet.height() as f32),
            batch: SpriteBatch::new(),
            index_count: 0,
        })
    }

    /// The surface game code draws into
    pub fn batch_mut(&mut self) -> &mut SpriteBatch {
        &mut self.batch
    }

    /// Upload a frame's blits
    pub fn prepare(&mut self, queue: &wgpu::Queue, frame: &SpriteBatch) {
        let mut vertices = frame.vertices(self.sheet_size);
        if vertices.len() > MAX_SPRITES * 4 {
            warn!(
                "Dropping {} blits over the {} sprite limit",
                frame.len() - MAX_SPRITES,
                MAX_SPRITES
            );
            vertices.truncate(MAX_SPRITES * 4);
        }

        if !vertices.is_empty() {
            queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&vertices));
        }

        self.index_count = (vertices.len() / 4 * 6) as u32;
    }

    /// Record draw commands for the prepared blits
    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        if self.index_count == 0 {
            return;
        }

        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_bind_group(1, &self.sheet_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::renderer::Rect;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    const SHEET: Vec2 = Vec2::new(800.0, 400.0);

    #[test]
    fn test_quad_positions_centered_on_dest() {
        let blit = Blit::new(Rect::new(0.0, 300.0, 100.0, 100.0), Vec2::new(400.0, 90.0));
        let [bl, br, tr, tl] = quad(&blit, SHEET);

        assert_eq!(bl.position, [350.0, 40.0]);
        assert_eq!(br.position, [450.0, 40.0]);
        assert_eq!(tr.position, [450.0, 140.0]);
        assert_eq!(tl.position, [350.0, 140.0]);
    }

    #[test]
    fn test_quad_uvs_flip_bottom_origin_rows() {
        // Top row of a 400px sheet starts at y = 300 from the bottom
        let blit = Blit::new(Rect::new(100.0, 300.0, 100.0, 100.0), Vec2::ZERO);
        let [bl, _, tr, _] = quad(&blit, SHEET);

        assert_relative_eq!(bl.tex_coords[0], 0.125);
        assert_relative_eq!(bl.tex_coords[1], 0.25);
        assert_relative_eq!(tr.tex_coords[0], 0.25);
        assert_relative_eq!(tr.tex_coords[1], 0.0);
    }

    #[test]
    fn test_quad_rotation_is_counter_clockwise() {
        let blit = Blit::new(Rect::new(0.0, 0.0, 100.0, 100.0), Vec2::ZERO)
            .with_rotation(FRAC_PI_2);
        let [bl, _, _, _] = quad(&blit, SHEET);

        // (-50, -50) turned a quarter counter-clockwise
        assert_relative_eq!(bl.position[0], 50.0, epsilon = 1e-4);
        assert_relative_eq!(bl.position[1], -50.0, epsilon = 1e-4);
    }

    #[test]
    fn test_quad_uses_scaled_size() {
        let blit = Blit::new(Rect::new(0.0, 0.0, 100.0, 100.0), Vec2::ZERO)
            .with_size(Vec2::splat(150.0));
        let [bl, _, tr, _] = quad(&blit, SHEET);

        assert_eq!(bl.position, [-75.0, -75.0]);
        assert_eq!(tr.position, [75.0, 75.0]);
    }

    #[test]
    fn test_batch_collects_blits() {
        let mut batch = SpriteBatch::new();
        assert!(batch.is_empty());

        batch.blit(Blit::new(Rect::new(0.0, 0.0, 100.0, 100.0), Vec2::ZERO));
        batch.blit(Blit::new(Rect::new(100.0, 0.0, 100.0, 100.0), Vec2::ONE));
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.vertices(SHEET).len(), 8);
    }

    #[test]
    fn test_take_starts_next_frame_empty() {
        let mut batch = SpriteBatch::new();
        batch.blit(Blit::new(Rect::new(0.0, 0.0, 100.0, 100.0), Vec2::ZERO));

        let frame = batch.take();
        assert_eq!(frame.len(), 1);
        assert!(batch.is_empty());

        // A dropped frame does not leak into the next one
        drop(frame);
        batch.blit(Blit::new(Rect::new(100.0, 0.0, 100.0, 100.0), Vec2::ONE));
        assert_eq!(batch.take().len(), 1);
    }

    #[test]
    fn test_quad_indices_layout() {
        assert_eq!(quad_indices(2), vec![0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);
    }
}
