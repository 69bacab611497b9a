pub const WINDOW_TITLE: &str =
    "Click on a RED point on the sphere! (Interactive Stereographic Projection)";

pub struct SceneConfig {
    /// points per grid axis
    pub grid_resolution: usize,
    /// the plane grid covers [-extent, extent] on both axes
    pub grid_extent: f64,
    /// logical pixels around a sphere point that still count as a click on it
    pub pick_tolerance: f32,
    pub window_width: f64,
    pub window_height: f64,
    /// |u| below this is reported as low distortion
    pub low_distortion_threshold: f64,
    pub wireframe_samples: u32,
    pub sphere_marker_size: f32,
    pub plane_marker_size: f32,
    pub north_pole_marker_size: f32,
    pub highlight_marker_size: f32,
    pub axis_length: f32,
    pub camera_eye: (f32, f32, f32),
    pub camera_zoom_speed: f32,
    /// degrees per update while an orbit key is held
    pub camera_orbit_speed: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            grid_resolution: 15,
            grid_extent: 3.0,
            pick_tolerance: 5.0,
            window_width: 1200.0,
            window_height: 800.0,
            low_distortion_threshold: 0.5,
            wireframe_samples: 20,
            sphere_marker_size: 0.035,
            plane_marker_size: 0.06,
            north_pole_marker_size: 0.09,
            highlight_marker_size: 0.08,
            axis_length: 3.5,
            camera_eye: (6.0, -6.0, 4.5),
            camera_zoom_speed: 0.2,
            camera_orbit_speed: 2.0,
        }
    }
}

// Color as RGBA
pub struct Palette;

impl Palette {
    pub const BACKGROUND: wgpu::Color = wgpu::Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    pub const WIREFRAME: [f32; 4] = [0.5, 0.5, 0.5, 0.1];
    pub const AXIS: [f32; 4] = [0.3, 0.3, 0.3, 0.6];
    pub const NORTH_POLE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const PLANE_POINT: [f32; 4] = [0.0, 0.0, 1.0, 0.3];
    pub const SPHERE_POINT: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const RAY: [f32; 4] = [0.0, 0.5, 0.0, 1.0];
    pub const HIGHLIGHT: [f32; 4] = [1.0, 0.85, 0.0, 1.0];
    pub const HIGHLIGHT_EDGE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}
