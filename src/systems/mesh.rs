use cgmath::Point3;
use wgpu::util::DeviceExt;

use crate::components::mesh::{Geometry, MeshComponent, MeshKind, Vertex};

pub struct MeshSystem<'a> {
    device: &'a wgpu::Device,
}

impl<'a> MeshSystem<'a> {
    pub fn new(device: &'a wgpu::Device) -> Self {
        Self { device }
    }

    pub fn create_vertex_buffer(&self, data: &[Vertex]) -> wgpu::Buffer {
        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Vertex Buffer"),
                contents: bytemuck::cast_slice(data),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            })
    }

    pub fn create_index_buffer(&self, data: &[u32]) -> wgpu::Buffer {
        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Index Buffer"),
                contents: bytemuck::cast_slice(data),
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            })
    }

    pub fn upload(&self, geometry: &Geometry) -> MeshComponent {
        MeshComponent {
            vertex_buffer: self.create_vertex_buffer(&geometry.vertices),
            index_buffer: self.create_index_buffer(&geometry.indices),
            num_indices: geometry.indices.len() as u32,
            kind: geometry.kind,
        }
    }
}

impl MeshSystem<'_> {
    fn map(value: u32, start1: u32, stop1: u32, start2: f32, stop2: f32) -> f32 {
        start2
            + (stop2 - start2) * ((value as f32 - start1 as f32) / (stop1 as f32 - start1 as f32))
    }

    fn create_vertex(phi: f32, theta: f32, color: [f32; 4]) -> Vertex {
        Vertex {
            position: [phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos()],
            color,
        }
    }

    /// Unit sphere wireframe with `samples` polar and `samples` azimuthal
    /// positions, both ranges inclusive: each row and each column of the
    /// sample grid becomes a polyline.
    pub fn generate_wireframe_sphere(samples: u32, color: [f32; 4]) -> Geometry {
        let mut geometry = Geometry::new(MeshKind::Lines);
        if samples < 2 {
            return geometry;
        }
        let last = samples - 1;

        for i in 0..samples {
            let phi = MeshSystem::map(i, 0, last, 0.0, std::f32::consts::PI);
            for j in 0..samples {
                let theta = MeshSystem::map(j, 0, last, 0.0, 2.0 * std::f32::consts::PI);
                geometry
                    .vertices
                    .push(MeshSystem::create_vertex(phi, theta, color));
            }
        }

        for i in 0..samples {
            for j in 0..last {
                // along a latitude ring
                geometry.indices.push(i * samples + j);
                geometry.indices.push(i * samples + j + 1);
                // along a meridian
                geometry.indices.push(j * samples + i);
                geometry.indices.push((j + 1) * samples + i);
            }
        }

        geometry
    }

    /// Straight polyline through `points`.
    pub fn generate_polyline(points: &[Point3<f32>], color: [f32; 4]) -> Geometry {
        let mut geometry = Geometry::new(MeshKind::Lines);
        geometry.vertices = points
            .iter()
            .map(|p| Vertex {
                position: [p.x, p.y, p.z],
                color,
            })
            .collect();
        for i in 1..points.len() as u32 {
            geometry.indices.push(i - 1);
            geometry.indices.push(i);
        }
        geometry
    }

    /// Filled octahedron centred on `center`; reads as a round dot at the
    /// marker sizes used in the scene.
    pub fn generate_dot(center: Point3<f32>, size: f32, color: [f32; 4]) -> Geometry {
        let mut geometry = Geometry::new(MeshKind::Triangles);
        geometry.vertices = MeshSystem::octahedron_corners(center, size)
            .iter()
            .map(|&position| Vertex { position, color })
            .collect();
        geometry.indices = vec![
            0, 2, 4, 2, 1, 4, 1, 3, 4, 3, 0, 4, // upper half
            2, 0, 5, 1, 2, 5, 3, 1, 5, 0, 3, 5, // lower half
        ];
        geometry
    }

    /// The twelve edges of the octahedron drawn by `generate_dot`.
    pub fn generate_dot_outline(center: Point3<f32>, size: f32, color: [f32; 4]) -> Geometry {
        let mut geometry = Geometry::new(MeshKind::Lines);
        geometry.vertices = MeshSystem::octahedron_corners(center, size)
            .iter()
            .map(|&position| Vertex { position, color })
            .collect();
        geometry.indices = vec![
            0, 2, 2, 1, 1, 3, 3, 0, // equator
            0, 4, 1, 4, 2, 4, 3, 4, // to the top
            0, 5, 1, 5, 2, 5, 3, 5, // to the bottom
        ];
        geometry
    }

    // +x, -x, +y, -y, +z, -z
    fn octahedron_corners(center: Point3<f32>, size: f32) -> [[f32; 3]; 6] {
        let Point3 { x, y, z } = center;
        [
            [x + size, y, z],
            [x - size, y, z],
            [x, y + size, z],
            [x, y - size, z],
            [x, y, z + size],
            [x, y, z - size],
        ]
    }

    /// An "x" lying in the horizontal plane through `center`.
    pub fn generate_cross(center: Point3<f32>, size: f32, color: [f32; 4]) -> Geometry {
        let Point3 { x, y, z } = center;
        let mut geometry = Geometry::new(MeshKind::Lines);
        for (dx, dy) in [(1.0, 1.0), (1.0, -1.0)] {
            geometry.append(MeshSystem::generate_polyline(
                &[
                    Point3::new(x - dx * size, y - dy * size, z),
                    Point3::new(x + dx * size, y + dy * size, z),
                ],
                color,
            ));
        }
        geometry
    }

    /// Six pointed star made of three perpendicular strokes through `center`.
    pub fn generate_star(center: Point3<f32>, size: f32, color: [f32; 4]) -> Geometry {
        let Point3 { x, y, z } = center;
        let mut geometry = Geometry::new(MeshKind::Lines);
        for (dx, dy, dz) in [(1.0, 0.0, 0.0), (0.0, 1.0, 0.0), (0.0, 0.0, 1.0)] {
            geometry.append(MeshSystem::generate_polyline(
                &[
                    Point3::new(x - dx * size, y - dy * size, z - dz * size),
                    Point3::new(x + dx * size, y + dy * size, z + dz * size),
                ],
                color,
            ));
        }
        geometry
    }
}
