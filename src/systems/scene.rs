use cgmath::Point3;

use crate::{
    components::mesh::{Geometry, LayerComponent, MeshKind},
    config::{Palette, SceneConfig},
    grid::ProjectionGrid,
    transform,
};

use super::mesh::MeshSystem;

pub struct SceneSystem {}

impl SceneSystem {
    /// Everything drawn before the first selection, back to front.
    pub fn static_layers(
        grid: &ProjectionGrid,
        config: &SceneConfig,
    ) -> Vec<(LayerComponent, Geometry)> {
        vec![
            (
                LayerComponent::Wireframe,
                MeshSystem::generate_wireframe_sphere(config.wireframe_samples, Palette::WIREFRAME),
            ),
            (LayerComponent::Axes, SceneSystem::axes(config.axis_length)),
            (
                LayerComponent::PlanePoints,
                SceneSystem::plane_points(grid, config.plane_marker_size),
            ),
            (
                LayerComponent::SpherePoints,
                SceneSystem::sphere_points(grid, config.sphere_marker_size),
            ),
            (
                LayerComponent::NorthPole,
                SceneSystem::north_pole(config.north_pole_marker_size),
            ),
        ]
    }

    pub fn ray(from: Point3<f64>, to: Point3<f64>) -> Geometry {
        MeshSystem::generate_polyline(&[to_f32(from), to_f32(to)], Palette::RAY)
    }

    /// Yellow dot with a black outline.
    pub fn highlight(at: Point3<f64>, size: f32) -> [Geometry; 2] {
        let center = to_f32(at);
        [
            MeshSystem::generate_dot(center, size, Palette::HIGHLIGHT),
            MeshSystem::generate_dot_outline(center, size, Palette::HIGHLIGHT_EDGE),
        ]
    }

    fn axes(length: f32) -> Geometry {
        let mut geometry = Geometry::new(MeshKind::Lines);
        for axis in [
            Point3::new(length, 0.0, 0.0),
            Point3::new(0.0, length, 0.0),
            Point3::new(0.0, 0.0, length),
        ] {
            geometry.append(MeshSystem::generate_polyline(
                &[Point3::new(-axis.x, -axis.y, -axis.z), axis],
                Palette::AXIS,
            ));
        }
        geometry
    }

    fn plane_points(grid: &ProjectionGrid, size: f32) -> Geometry {
        let mut geometry = Geometry::new(MeshKind::Lines);
        for point in grid.plane_points() {
            let center = Point3::new(point.x as f32, point.y as f32, 0.0);
            geometry.append(MeshSystem::generate_cross(center, size, Palette::PLANE_POINT));
        }
        geometry
    }

    fn sphere_points(grid: &ProjectionGrid, size: f32) -> Geometry {
        let mut geometry = Geometry::new(MeshKind::Triangles);
        for &point in grid.sphere_points() {
            geometry.append(MeshSystem::generate_dot(
                to_f32(point),
                size,
                Palette::SPHERE_POINT,
            ));
        }
        geometry
    }

    fn north_pole(size: f32) -> Geometry {
        MeshSystem::generate_star(to_f32(transform::NORTH_POLE), size, Palette::NORTH_POLE)
    }
}

pub fn to_f32(point: Point3<f64>) -> Point3<f32> {
    Point3::new(point.x as f32, point.y as f32, point.z as f32)
}
