pub struct RenderPipelineComponent {
    pub render_pipeline: wgpu::RenderPipeline,
}

/// One pipeline per primitive topology; every scene mesh shares the same
/// shader and camera bind group.
pub struct ScenePipelines {
    pub lines: RenderPipelineComponent,
    pub triangles: RenderPipelineComponent,
}

impl ScenePipelines {
    pub fn for_kind(&self, kind: super::mesh::MeshKind) -> &RenderPipelineComponent {
        match kind {
            super::mesh::MeshKind::Lines => &self.lines,
            super::mesh::MeshKind::Triangles => &self.triangles,
        }
    }
}
