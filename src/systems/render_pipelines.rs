use crate::components::{
    mesh::{MeshKind, Vertex},
    render_pipelines::{RenderPipelineComponent, ScenePipelines},
};

pub struct SceneRenderPipelineSystem<'a> {
    device: &'a wgpu::Device,
}

impl<'a> SceneRenderPipelineSystem<'a> {
    pub fn new(device: &'a wgpu::Device) -> SceneRenderPipelineSystem {
        Self { device }
    }

    pub fn create_pipelines(
        &self,
        bind_group_layouts: &[&wgpu::BindGroupLayout],
        shader_module: &wgpu::ShaderModule,
        texture_format: wgpu::TextureFormat,
    ) -> ScenePipelines {
        ScenePipelines {
            lines: self.create_pipeline(
                bind_group_layouts,
                shader_module,
                texture_format,
                MeshKind::Lines,
            ),
            triangles: self.create_pipeline(
                bind_group_layouts,
                shader_module,
                texture_format,
                MeshKind::Triangles,
            ),
        }
    }

    fn create_pipeline(
        &self,
        bind_group_layouts: &[&wgpu::BindGroupLayout],
        shader_module: &wgpu::ShaderModule,
        texture_format: wgpu::TextureFormat,
        kind: MeshKind,
    ) -> RenderPipelineComponent {
        let render_pipeline_layout = self.layout_desc(bind_group_layouts);
        let render_pipeline =
            self.pipeline_desc(&render_pipeline_layout, shader_module, texture_format, kind);
        RenderPipelineComponent { render_pipeline }
    }

    pub fn layout_desc(
        &self,
        bind_group_layouts: &[&wgpu::BindGroupLayout],
    ) -> wgpu::PipelineLayout {
        self.device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Scene Render Pipeline Layout"),
                bind_group_layouts,
                push_constant_ranges: &[],
            })
    }

    pub fn pipeline_desc(
        &self,
        pipeline_layout: &wgpu::PipelineLayout,
        shader_module: &wgpu::ShaderModule,
        texture_format: wgpu::TextureFormat,
        kind: MeshKind,
    ) -> wgpu::RenderPipeline {
        let (label, topology) = match kind {
            MeshKind::Lines => ("Scene Line Pipeline", wgpu::PrimitiveTopology::LineList),
            MeshKind::Triangles => (
                "Scene Triangle Pipeline",
                wgpu::PrimitiveTopology::TriangleList,
            ),
        };

        self.device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(pipeline_layout),

                vertex: wgpu::VertexState {
                    module: shader_module,
                    entry_point: "vs_main",
                    buffers: &[Vertex::desc()],
                },

                fragment: Some(wgpu::FragmentState {
                    module: shader_module,
                    entry_point: "fs_main",
                    targets: &[Some(wgpu::ColorTargetState {
                        format: texture_format,
                        // the wireframe and plane points are translucent
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    // markers are seen from every side
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
            })
    }
}
