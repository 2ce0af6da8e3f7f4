mod pipeline;
mod texture;

use wgpu::{
    BindGroup, BindGroupDescriptor, BindGroupEntry, Buffer, BufferDescriptor, BufferUsages,
    CommandEncoder, Device, IndexFormat, LoadOp, Operations, Queue, RenderPassColorAttachment,
    RenderPassDescriptor, StoreOp, TextureFormat, TextureView,
    util::{BufferInitDescriptor, DeviceExt},
};

use crate::{
    Color, Error, Result,
    device::{Filter, GraphicsDevice, IndexedDraw, Shading, TextureId, Transform},
    vertex::Vertex,
};

use self::{
    pipeline::BatchPipeline,
    texture::{GpuTexture, Samplers},
};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl From<Transform> for CameraUniform {
    fn from(transform: Transform) -> Self {
        Self {
            view_proj: transform.view_projection().to_cols_array_2d(),
        }
    }
}

struct Backbuffer {
    view: TextureView,
    width: u32,
    height: u32,
}

/// [`GraphicsDevice`] over a caller-provided `wgpu` device & queue
///
/// The caller owns the surface: each frame it hands over the acquired backbuffer
/// view with [`WgpuDevice::set_backbuffer`], then presents after drawing. Every
/// clear & draw is encoded & submitted on its own, so uniform & buffer writes
/// never leak between draws
pub struct WgpuDevice {
    device: Device,
    queue: Queue,
    format: TextureFormat,
    pipeline: BatchPipeline,
    samplers: Samplers,
    camera_buffer: Buffer,
    camera_bind_group: BindGroup,
    vertex_buffer: Buffer,
    index_buffer: Buffer,
    white: GpuTexture,
    textures: Vec<Option<GpuTexture>>,
    backbuffer: Option<Backbuffer>,
    target: Option<TextureId>,
}

impl WgpuDevice {
    const INITIAL_VERTICES: u64 = 2048;
    const INITIAL_INDICES: u64 = Self::INITIAL_VERTICES * 3;

    /// `format` is the surface format; off-screen targets are created in it too
    pub fn new(device: Device, queue: Queue, format: TextureFormat) -> Self {
        let pipeline = BatchPipeline::new(&device, format);
        let samplers = Samplers::new(&device);

        let camera_buffer = device.create_buffer_init(&BufferInitDescriptor {
            label: Some("Camera Uniform"),
            contents: bytemuck::bytes_of(&CameraUniform::from(Transform::IDENTITY)),
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        });
        let camera_bind_group = device.create_bind_group(&BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &pipeline.camera_layout,
            entries: &[BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let vertex_buffer = create_vertex_buffer(
            &device,
            Self::INITIAL_VERTICES * size_of::<Vertex>() as u64,
        );
        let index_buffer =
            create_index_buffer(&device, Self::INITIAL_INDICES * size_of::<u16>() as u64);
        let white = GpuTexture::white(&device, &queue, &pipeline.texture_layout, &samplers);

        Self {
            device,
            queue,
            format,
            pipeline,
            samplers,
            camera_buffer,
            camera_bind_group,
            vertex_buffer,
            index_buffer,
            white,
            textures: Vec::new(),
            backbuffer: None,
            target: None,
        }
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    pub fn format(&self) -> TextureFormat {
        self.format
    }

    /// Hands over this frame's backbuffer view & its pixel size
    pub fn set_backbuffer(&mut self, view: TextureView, width: u32, height: u32) {
        self.backbuffer = Some(Backbuffer {
            view,
            width,
            height,
        });
    }

    /// Drops the backbuffer view so the surface texture can be presented
    pub fn take_backbuffer(&mut self) -> Option<TextureView> {
        self.backbuffer.take().map(|b| b.view)
    }

    fn texture(&self, id: TextureId) -> Option<&GpuTexture> {
        self.textures.get(id.0).and_then(Option::as_ref)
    }

    // Current render destination; `None` when drawing to a backbuffer that was never set
    fn destination(&self) -> Option<&TextureView> {
        match self.target {
            Some(id) => self.texture(id).map(GpuTexture::view),
            None => self.backbuffer.as_ref().map(|b| &b.view),
        }
    }

    // Ids are never reused, so a stale id can't alias a newer texture
    fn push_texture(&mut self, texture: GpuTexture) -> TextureId {
        self.textures.push(Some(texture));
        TextureId(self.textures.len() - 1)
    }

    // Grows the shared vertex/index buffers to hold `vertices` & `indices` bytes
    fn reserve(&mut self, vertices: u64, indices: u64) {
        if self.vertex_buffer.size() < vertices {
            log::debug!("growing vertex buffer to {vertices} bytes");
            self.vertex_buffer = create_vertex_buffer(&self.device, vertices.next_power_of_two());
        }
        if self.index_buffer.size() < indices {
            log::debug!("growing index buffer to {indices} bytes");
            self.index_buffer = create_index_buffer(&self.device, indices.next_power_of_two());
        }
    }

    fn submit(&self, encoder: CommandEncoder) {
        self.queue.submit(Some(encoder.finish()));
    }
}

impl GraphicsDevice for WgpuDevice {
    fn backbuffer_size(&self) -> (u32, u32) {
        self.backbuffer
            .as_ref()
            .map_or((0, 0), |b| (b.width, b.height))
    }

    fn viewport_size(&self) -> (u32, u32) {
        match self.target.and_then(|id| self.texture(id)) {
            Some(texture) => texture.size(),
            None => self.backbuffer_size(),
        }
    }

    fn create_render_target(&mut self, width: u32, height: u32) -> TextureId {
        let texture = GpuTexture::render_target(
            &self.device,
            &self.pipeline.texture_layout,
            &self.samplers,
            self.format,
            width,
            height,
        );
        self.push_texture(texture)
    }

    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> TextureId {
        let texture = GpuTexture::from_rgba(
            &self.device,
            &self.queue,
            &self.pipeline.texture_layout,
            &self.samplers,
            rgba,
            width,
            height,
        );
        self.push_texture(texture)
    }

    fn texture_size(&self, texture: TextureId) -> Option<(u32, u32)> {
        self.texture(texture).map(GpuTexture::size)
    }

    fn release_texture(&mut self, texture: TextureId) {
        if self.target == Some(texture) {
            self.target = None;
        }
        if let Some(slot) = self.textures.get_mut(texture.0) {
            *slot = None;
        }
    }

    fn set_render_target(&mut self, target: Option<TextureId>) -> Result<()> {
        if let Some(id) = target {
            self.texture(id).ok_or(Error::UnknownTexture(id))?;
        }
        self.target = target;
        Ok(())
    }

    fn clear(&mut self, color: Color) {
        let Some(view) = self.destination() else {
            log::warn!("clear skipped, no backbuffer set");
            return;
        };

        let mut encoder = self.device.create_command_encoder(&Default::default());
        encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("Clear Pass"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: Operations {
                    load: LoadOp::Clear(color.into()),
                    store: StoreOp::Store,
                },
            })],
            ..Default::default()
        });
        self.submit(encoder);
    }

    fn draw_indexed(&mut self, draw: IndexedDraw<'_>) {
        if draw.indices.is_empty() {
            return;
        }

        let index_bytes = padded_index_bytes(draw.indices);
        let vertex_bytes: &[u8] = bytemuck::cast_slice(draw.vertices);
        self.reserve(vertex_bytes.len() as u64, index_bytes.len() as u64);

        let bind_group = match draw.shading {
            Shading::VertexColor => self.white.bind_group(Filter::Linear),
            Shading::Textured { texture, filter } => match self.texture(texture) {
                Some(t) => t.bind_group(filter),
                None => {
                    log::warn!("draw skipped, {texture:?} was released");
                    return;
                }
            },
        };
        if let Shading::Textured { texture, .. } = draw.shading {
            if self.target == Some(texture) {
                log::warn!("draw skipped, {texture:?} is both the source & the destination");
                return;
            }
        }
        let Some(view) = self.destination() else {
            log::warn!("draw skipped, no backbuffer set");
            return;
        };

        self.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&CameraUniform::from(draw.transform)),
        );
        self.queue.write_buffer(&self.vertex_buffer, 0, vertex_bytes);
        self.queue.write_buffer(&self.index_buffer, 0, &index_bytes);

        let mut encoder = self.device.create_command_encoder(&Default::default());
        {
            let mut pass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("Batch Pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Load,
                        store: StoreOp::Store,
                    },
                })],
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline.pipeline);
            pass.set_bind_group(0, bind_group, &[]);
            pass.set_bind_group(1, &self.camera_bind_group, &[]);
            pass.set_vertex_buffer(0, self.vertex_buffer.slice(..vertex_bytes.len() as u64));
            pass.set_index_buffer(
                self.index_buffer.slice(..index_bytes.len() as u64),
                IndexFormat::Uint16,
            );
            pass.draw_indexed(0..draw.indices.len() as u32, 0, 0..1);
        }
        self.submit(encoder);

        log::trace!("drew {} triangles", draw.triangle_count());
    }
}

fn create_vertex_buffer(device: &Device, size: u64) -> Buffer {
    device.create_buffer(&BufferDescriptor {
        label: Some("Batch Vertex Buffer"),
        size,
        usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_index_buffer(device: &Device, size: u64) -> Buffer {
    device.create_buffer(&BufferDescriptor {
        label: Some("Batch Index Buffer"),
        size,
        usage: BufferUsages::INDEX | BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Index bytes padded with zeros to a multiple of `COPY_BUFFER_ALIGNMENT`
fn padded_index_bytes(indices: &[u16]) -> Vec<u8> {
    let mut bytes: Vec<u8> = bytemuck::cast_slice(indices).to_vec();
    let remainder = bytes.len() % wgpu::COPY_BUFFER_ALIGNMENT as usize;
    if remainder != 0 {
        let pad_len = wgpu::COPY_BUFFER_ALIGNMENT as usize - remainder;
        bytes.resize(bytes.len() + pad_len, 0);
    }
    bytes
}
