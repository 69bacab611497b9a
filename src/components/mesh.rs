use bevy_ecs::component::Component;

/// Which pipeline a mesh is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshKind {
    Lines,
    Triangles,
}

#[derive(Component)]
pub struct MeshComponent {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_indices: u32,
    pub kind: MeshKind,
}

unsafe impl Send for MeshComponent {}
unsafe impl Sync for MeshComponent {}

/// Draw order of a scene entity; there is no depth buffer, so later layers
/// paint over earlier ones.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LayerComponent {
    Wireframe,
    Axes,
    PlanePoints,
    SpherePoints,
    NorthPole,
    Ray,
    Highlight,
}

/// CPU side mesh data, uploaded into a `MeshComponent` by the mesh system.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub kind: MeshKind,
}

impl Geometry {
    pub fn new(kind: MeshKind) -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            kind,
        }
    }

    /// Appends `other`, rebasing its indices. Both must be the same kind.
    pub fn append(&mut self, other: Geometry) {
        debug_assert_eq!(self.kind, other.kind);
        let base = self.vertices.len() as u32;
        self.vertices.extend(other.vertices);
        self.indices.extend(other.indices.into_iter().map(|i| i + base));
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    pub const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;

        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(x: f32) -> Vertex {
        Vertex {
            position: [x, 0.0, 0.0],
            color: [1.0; 4],
        }
    }

    #[test]
    fn append_rebases_indices() {
        let mut first = Geometry::new(MeshKind::Lines);
        first.vertices = vec![vertex(0.0), vertex(1.0)];
        first.indices = vec![0, 1];

        let mut second = Geometry::new(MeshKind::Lines);
        second.vertices = vec![vertex(2.0), vertex(3.0)];
        second.indices = vec![1, 0];

        first.append(second);
        assert_eq!(first.vertices.len(), 4);
        assert_eq!(first.indices, vec![0, 1, 3, 2]);
    }

    #[test]
    fn layers_are_ordered_back_to_front() {
        assert!(LayerComponent::Wireframe < LayerComponent::SpherePoints);
        assert!(LayerComponent::SpherePoints < LayerComponent::Ray);
        assert!(LayerComponent::Ray < LayerComponent::Highlight);
    }

    #[test]
    fn vertex_layout_matches_struct_size() {
        assert_eq!(std::mem::size_of::<Vertex>(), 28);
        assert_eq!(Vertex::desc().array_stride, 28);
    }
}
