use cgmath::{InnerSpace, Matrix4, Point3};
use winit::event::{ElementState, KeyboardInput, VirtualKeyCode, WindowEvent};

// cgmath targets OpenGL clip space (z in -1..1); wgpu expects z in 0..1.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);
pub const IDENTITY_MATRIX_4: [[f32; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

pub struct CameraComponent {
    pub camera: Camera,
    pub camera_uniform: CameraUniform,
    pub camera_buffer: wgpu::Buffer,
    pub camera_bind_group: wgpu::BindGroup,
    pub camera_bind_group_layout: wgpu::BindGroupLayout,
    pub camera_controller: CameraController,
}

pub struct Camera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: cgmath::Vector3<f32>,
    pub aspect: f32,
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let view = Matrix4::look_at_rh(self.eye, self.target, self.up);
        let proj = cgmath::perspective(cgmath::Deg(self.fovy), self.aspect, self.znear, self.zfar);
        OPENGL_TO_WGPU_MATRIX * proj * view
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }
}

/// Keyboard orbit controller: W/S zoom towards and away from the target,
/// A/D orbit around the camera's up axis.
pub struct CameraController {
    zoom_speed: f32,
    orbit_speed: f32,
    is_forward_pressed: bool,
    is_backward_pressed: bool,
    is_left_pressed: bool,
    is_right_pressed: bool,
}

impl CameraController {
    pub fn new(zoom_speed: f32, orbit_speed: f32) -> Self {
        Self {
            zoom_speed,
            orbit_speed,
            is_forward_pressed: false,
            is_backward_pressed: false,
            is_left_pressed: false,
            is_right_pressed: false,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.is_forward_pressed
            || self.is_backward_pressed
            || self.is_left_pressed
            || self.is_right_pressed
    }

    pub fn process_key_events(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput {
                input:
                    KeyboardInput {
                        state,
                        virtual_keycode: Some(keycode),
                        ..
                    },
                ..
            } => self.process_key(*keycode, *state == ElementState::Pressed),
            _ => false,
        }
    }

    fn process_key(&mut self, keycode: VirtualKeyCode, is_pressed: bool) -> bool {
        match keycode {
            VirtualKeyCode::W | VirtualKeyCode::Up => {
                self.is_forward_pressed = is_pressed;
                true
            }
            VirtualKeyCode::A | VirtualKeyCode::Left => {
                self.is_left_pressed = is_pressed;
                true
            }
            VirtualKeyCode::S | VirtualKeyCode::Down => {
                self.is_backward_pressed = is_pressed;
                true
            }
            VirtualKeyCode::D | VirtualKeyCode::Right => {
                self.is_right_pressed = is_pressed;
                true
            }
            _ => false,
        }
    }

    pub fn update_camera(&self, camera: &mut Camera) {
        let forward = camera.target - camera.eye;
        let forward_norm = forward.normalize();
        let forward_mag = forward.magnitude();

        // Prevents glitching when camera gets too close to the
        // center of the scene.
        if self.is_forward_pressed && forward_mag > self.zoom_speed {
            camera.eye += forward_norm * self.zoom_speed;
        }
        if self.is_backward_pressed {
            camera.eye -= forward_norm * self.zoom_speed;
        }

        let mut orbit = 0.0;
        if self.is_right_pressed {
            orbit -= self.orbit_speed;
        }
        if self.is_left_pressed {
            orbit += self.orbit_speed;
        }
        if orbit != 0.0 {
            let rotation = cgmath::Matrix3::from_axis_angle(camera.up, cgmath::Deg(orbit));
            let relative_position = camera.eye - camera.target;
            camera.eye = camera.target + rotation * relative_position;
        }
    }
}

// We need this for Rust to store our data correctly for the shaders
#[repr(C)]
// This is so we can store this in a buffer
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    // We can't use cgmath with bytemuck directly so we'll have
    // to convert the Matrix4 into a 4x4 f32 array
    pub view_proj_matrix: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_proj_matrix: IDENTITY_MATRIX_4,
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj_matrix = camera.build_view_projection_matrix().into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{EuclideanSpace, MetricSpace};

    fn camera() -> Camera {
        Camera {
            eye: Point3::new(6.0, 0.0, 2.0),
            target: Point3::origin(),
            up: cgmath::Vector3::unit_z(),
            aspect: 1.5,
            fovy: 45.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }

    #[test]
    fn zoom_moves_eye_towards_target() {
        let mut camera = camera();
        let mut controller = CameraController::new(0.5, 2.0);
        let before = camera.eye.distance(camera.target);

        assert!(controller.process_key(VirtualKeyCode::W, true));
        controller.update_camera(&mut camera);
        assert!((camera.eye.distance(camera.target) - (before - 0.5)).abs() < 1e-5);

        controller.process_key(VirtualKeyCode::W, false);
        assert!(controller.process_key(VirtualKeyCode::Down, true));
        controller.update_camera(&mut camera);
        assert!((camera.eye.distance(camera.target) - before).abs() < 1e-5);
    }

    #[test]
    fn zoom_stops_before_reaching_target() {
        let mut camera = camera();
        let controller = CameraController {
            is_forward_pressed: true,
            ..CameraController::new(100.0, 2.0)
        };
        let before = camera.eye;
        controller.update_camera(&mut camera);
        assert_eq!(camera.eye, before);
    }

    #[test]
    fn orbit_keeps_distance_and_height() {
        let mut camera = camera();
        let mut controller = CameraController::new(0.5, 90.0);
        controller.process_key(VirtualKeyCode::A, true);
        controller.update_camera(&mut camera);

        assert!((camera.eye.z - 2.0).abs() < 1e-5);
        assert!((camera.eye.x).abs() < 1e-4);
        assert!((camera.eye.y - 6.0).abs() < 1e-4);
    }

    #[test]
    fn unrelated_keys_are_not_consumed() {
        let mut controller = CameraController::new(0.5, 2.0);
        assert!(!controller.process_key(VirtualKeyCode::Space, true));
        assert!(!controller.is_moving());
        controller.process_key(VirtualKeyCode::D, true);
        assert!(controller.is_moving());
    }

    #[test]
    fn resize_updates_aspect_and_ignores_zero() {
        let mut camera = camera();
        camera.resize(800, 400);
        assert_eq!(camera.aspect, 2.0);
        camera.resize(0, 400);
        assert_eq!(camera.aspect, 2.0);
    }

    #[test]
    fn target_projects_to_center_in_wgpu_depth_range() {
        let camera = camera();
        let clip = camera.build_view_projection_matrix() * cgmath::Vector4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}
