use wgpu::{
    BindGroupLayout, BindGroupLayoutDescriptor, BindGroupLayoutEntry, BindingType, BlendState,
    BufferBindingType, ColorTargetState, ColorWrites, Device, FragmentState,
    PipelineLayoutDescriptor, RenderPipeline, RenderPipelineDescriptor, SamplerBindingType,
    ShaderStages, TextureFormat, TextureSampleType, TextureViewDimension, VertexState,
    include_wgsl,
};

use crate::vertex::Vertex;

/// The single pipeline shapes & sprites draw through, plus its bind group layouts
///
/// - group 0: texture + sampler (fragment)
/// - group 1: camera uniform (vertex)
pub struct BatchPipeline {
    pub pipeline: RenderPipeline,
    pub texture_layout: BindGroupLayout,
    pub camera_layout: BindGroupLayout,
}

impl BatchPipeline {
    /// `format` must match both the backbuffer & every off-screen target drawn into
    pub fn new(device: &Device, format: TextureFormat) -> Self {
        let texture_layout = create_texture_layout(device);
        let camera_layout = create_camera_layout(device);
        let pipeline = create_pipeline(device, format, &texture_layout, &camera_layout);

        Self {
            pipeline,
            texture_layout,
            camera_layout,
        }
    }
}

fn create_texture_layout(device: &Device) -> BindGroupLayout {
    device.create_bind_group_layout(&BindGroupLayoutDescriptor {
        label: Some("Batch Texture Layout"),
        entries: &[
            BindGroupLayoutEntry {
                binding: 0,
                visibility: ShaderStages::FRAGMENT,
                ty: BindingType::Texture {
                    sample_type: TextureSampleType::Float { filterable: true },
                    view_dimension: TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            BindGroupLayoutEntry {
                binding: 1,
                visibility: ShaderStages::FRAGMENT,
                ty: BindingType::Sampler(SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

fn create_camera_layout(device: &Device) -> BindGroupLayout {
    device.create_bind_group_layout(&BindGroupLayoutDescriptor {
        label: Some("Batch Camera Layout"),
        entries: &[BindGroupLayoutEntry {
            binding: 0,
            visibility: ShaderStages::VERTEX,
            ty: BindingType::Buffer {
                ty: BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

/// Alpha-blended triangle list, no depth, no culling (border quads wind either way)
fn create_pipeline(
    device: &Device,
    format: TextureFormat,
    texture_layout: &BindGroupLayout,
    camera_layout: &BindGroupLayout,
) -> RenderPipeline {
    let shader = device.create_shader_module(include_wgsl!("../../shader.wgsl"));

    let layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
        label: Some("Batch Pipeline Layout"),
        bind_group_layouts: &[texture_layout, camera_layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&RenderPipelineDescriptor {
        label: Some("Batch Pipeline"),
        layout: Some(&layout),
        vertex: VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        primitive: Default::default(),
        depth_stencil: None,
        multisample: Default::default(),
        fragment: Some(FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(ColorTargetState {
                format,
                blend: Some(BlendState::ALPHA_BLENDING),
                write_mask: ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        multiview: None,
        cache: None,
    })
}
