pub mod camera;
pub mod mesh;
pub mod render_pipelines;
