use wgpu::{
    BindGroup, BindGroupDescriptor, BindGroupEntry, BindGroupLayout, BindingResource, Device,
    Extent3d, FilterMode, Origin3d, Queue, Sampler, SamplerDescriptor, TexelCopyBufferLayout,
    TexelCopyTextureInfo, TextureAspect, TextureDescriptor, TextureDimension, TextureFormat,
    TextureUsages, TextureView,
};

use crate::device::Filter;

/// One sampler per [`Filter`], shared by every texture
pub struct Samplers {
    nearest: Sampler,
    linear: Sampler,
}

impl Samplers {
    pub fn new(device: &Device) -> Self {
        let sampler = |label, filter| {
            device.create_sampler(&SamplerDescriptor {
                label: Some(label),
                mag_filter: filter,
                min_filter: filter,
                ..Default::default()
            })
        };

        Self {
            nearest: sampler("Nearest Sampler", FilterMode::Nearest),
            linear: sampler("Linear Sampler", FilterMode::Linear),
        }
    }
}

/// A sampleable GPU texture, optionally also a render attachment
///
/// Holds a bind group per filter so switching filters never rebuilds anything
pub struct GpuTexture {
    _texture: wgpu::Texture,
    view: TextureView,
    width: u32,
    height: u32,
    nearest: BindGroup,
    linear: BindGroup,
}

impl GpuTexture {
    /// Uploads tightly packed 8-bit RGBA pixels
    ///
    /// Pixel data of the wrong length is skipped with a warning, leaving the texture blank
    pub fn from_rgba(
        device: &Device,
        queue: &Queue,
        layout: &BindGroupLayout,
        samplers: &Samplers,
        rgba: &[u8],
        width: u32,
        height: u32,
    ) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        let texture = create_texture(
            device,
            "Sprite Texture",
            width,
            height,
            TextureFormat::Rgba8UnormSrgb,
            TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST,
        );

        let expected = 4 * width as usize * height as usize;
        if rgba.len() == expected {
            queue.write_texture(
                TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: 0,
                    origin: Origin3d::ZERO,
                    aspect: TextureAspect::All,
                },
                rgba,
                TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * width),
                    rows_per_image: Some(height),
                },
                extent(width, height),
            );
        } else {
            log::warn!(
                "texture data is {} bytes, expected {expected} for {width}x{height}",
                rgba.len()
            );
        }

        Self::from_texture(device, layout, samplers, texture, width, height)
    }

    /// Off-screen color target in the pipeline's format, sampleable once drawing into it ends
    pub fn render_target(
        device: &Device,
        layout: &BindGroupLayout,
        samplers: &Samplers,
        format: TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        let texture = create_texture(
            device,
            "Screen Target",
            width,
            height,
            format,
            TextureUsages::RENDER_ATTACHMENT | TextureUsages::TEXTURE_BINDING,
        );
        Self::from_texture(device, layout, samplers, texture, width, height)
    }

    /// 1×1 white texture bound for vertex-color draws
    pub fn white(
        device: &Device,
        queue: &Queue,
        layout: &BindGroupLayout,
        samplers: &Samplers,
    ) -> Self {
        Self::from_rgba(device, queue, layout, samplers, &[255; 4], 1, 1)
    }

    fn from_texture(
        device: &Device,
        layout: &BindGroupLayout,
        samplers: &Samplers,
        texture: wgpu::Texture,
        width: u32,
        height: u32,
    ) -> Self {
        let view = texture.create_view(&Default::default());
        let bind_group = |sampler: &Sampler| {
            device.create_bind_group(&BindGroupDescriptor {
                label: None,
                layout,
                entries: &[
                    BindGroupEntry {
                        binding: 0,
                        resource: BindingResource::TextureView(&view),
                    },
                    BindGroupEntry {
                        binding: 1,
                        resource: BindingResource::Sampler(sampler),
                    },
                ],
            })
        };
        let nearest = bind_group(&samplers.nearest);
        let linear = bind_group(&samplers.linear);

        Self {
            _texture: texture,
            view,
            width,
            height,
            nearest,
            linear,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn view(&self) -> &TextureView {
        &self.view
    }

    pub fn bind_group(&self, filter: Filter) -> &BindGroup {
        match filter {
            Filter::Nearest => &self.nearest,
            Filter::Linear => &self.linear,
        }
    }
}

fn extent(width: u32, height: u32) -> Extent3d {
    Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    }
}

fn create_texture(
    device: &Device,
    label: &str,
    width: u32,
    height: u32,
    format: TextureFormat,
    usage: TextureUsages,
) -> wgpu::Texture {
    device.create_texture(&TextureDescriptor {
        label: Some(label),
        size: extent(width, height),
        mip_level_count: 1,
        sample_count: 1,
        dimension: TextureDimension::D2,
        format,
        usage,
        view_formats: &[],
    })
}
