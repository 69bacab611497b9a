use bevy_ecs::{entity::Entity, world::World};
use cgmath::Point3;
use winit::window::Window;

use crate::{
    components::mesh::{Geometry, LayerComponent},
    selection::RayCanvas,
};

use super::{mesh::MeshSystem, scene::SceneSystem};

/// Entities that together make up one drawn artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneArtifact {
    entities: Vec<Entity>,
}

/// The live scene as seen by the selection handler: drawing spawns mesh
/// entities into the world, removing despawns them.
pub struct SceneCanvas<'a> {
    pub world: &'a mut World,
    pub device: &'a wgpu::Device,
    pub window: &'a Window,
    pub highlight_size: f32,
}

impl SceneCanvas<'_> {
    fn spawn(&mut self, layer: LayerComponent, geometry: &Geometry) -> Entity {
        let mesh = MeshSystem::new(self.device).upload(geometry);
        self.world.spawn((mesh, layer)).id()
    }
}

impl RayCanvas for SceneCanvas<'_> {
    type Handle = SceneArtifact;

    fn draw_ray(&mut self, from: Point3<f64>, to: Point3<f64>) -> SceneArtifact {
        let entity = self.spawn(LayerComponent::Ray, &SceneSystem::ray(from, to));
        SceneArtifact {
            entities: vec![entity],
        }
    }

    fn draw_highlight(&mut self, at: Point3<f64>) -> SceneArtifact {
        let entities = SceneSystem::highlight(at, self.highlight_size)
            .iter()
            .map(|geometry| self.spawn(LayerComponent::Highlight, geometry))
            .collect();
        SceneArtifact { entities }
    }

    fn remove(&mut self, handle: SceneArtifact) {
        for entity in handle.entities {
            if !self.world.despawn(entity) {
                tracing::warn!(?entity, "scene artifact was already gone");
            }
        }
    }

    fn request_redraw(&mut self) {
        self.window.request_redraw();
    }
}
