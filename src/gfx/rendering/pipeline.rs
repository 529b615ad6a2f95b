//! Render pipeline configuration and creation

use wgpu::*;

use crate::gfx::{resources::texture_resource::TextureResource, scene::vertex::Vertex3D};

/// Parameters for a mesh pipeline drawing [`Vertex3D`] triangles into a depth-tested target.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub label: String,
    pub vertex_entry: String,
    pub fragment_entry: String,
    pub cull_mode: Option<Face>,
    pub color_format: TextureFormat,
    pub depth_format: TextureFormat,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            label: "Default Pipeline".to_string(),
            vertex_entry: "vs_main".to_string(),
            fragment_entry: "fs_main".to_string(),
            cull_mode: Some(Face::Back),
            color_format: TextureFormat::Bgra8UnormSrgb,
            depth_format: TextureResource::DEPTH_FORMAT,
        }
    }
}

impl PipelineConfig {
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_owned();
        self
    }

    pub fn with_cull_mode(mut self, face: Option<Face>) -> Self {
        self.cull_mode = face;
        self
    }

    pub fn with_color_format(mut self, format: TextureFormat) -> Self {
        self.color_format = format;
        self
    }
}

pub fn create_pipeline(
    device: &Device,
    shader: &ShaderModule,
    bind_group_layouts: &[&BindGroupLayout],
    config: &PipelineConfig,
) -> RenderPipeline {
    let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
        label: Some(&format!("{} Layout", config.label)),
        bind_group_layouts,
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&RenderPipelineDescriptor {
        label: Some(&config.label),
        layout: Some(&pipeline_layout),
        vertex: VertexState {
            module: shader,
            entry_point: Some(&config.vertex_entry),
            buffers: &[Vertex3D::desc()],
            compilation_options: PipelineCompilationOptions::default(),
        },
        fragment: Some(FragmentState {
            module: shader,
            entry_point: Some(&config.fragment_entry),
            targets: &[Some(ColorTargetState {
                format: config.color_format,
                blend: Some(BlendState::REPLACE),
                write_mask: ColorWrites::ALL,
            })],
            compilation_options: PipelineCompilationOptions::default(),
        }),
        primitive: PrimitiveState {
            topology: PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: FrontFace::Ccw,
            cull_mode: config.cull_mode,
            polygon_mode: PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(DepthStencilState {
            format: config.depth_format,
            depth_write_enabled: true,
            depth_compare: CompareFunction::Less,
            stencil: StencilState::default(),
            bias: DepthBiasState::default(),
        }),
        multisample: MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
