pub mod camera;
pub mod canvas;
pub mod mesh;
pub mod picking;
pub mod render_pipelines;
pub mod scene;
