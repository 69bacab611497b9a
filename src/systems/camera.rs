use wgpu::util::DeviceExt;

use crate::{
    components::camera::{Camera, CameraComponent, CameraController, CameraUniform},
    config::SceneConfig,
    Uniform,
};

pub struct CameraSystem<'a> {
    device: &'a wgpu::Device,
}

impl<'a> CameraSystem<'a> {
    pub fn new(device: &'a wgpu::Device) -> Self {
        Self { device }
    }

    pub fn create_camera(
        &self,
        screen_width: u32,
        screen_height: u32,
        config: &SceneConfig,
    ) -> CameraComponent {
        let camera = Camera {
            eye: config.camera_eye.into(),
            target: (0.0, 0.0, 0.0).into(),
            // the sphere's north pole points up
            up: cgmath::Vector3::unit_z(),
            aspect: screen_width as f32 / screen_height.max(1) as f32,
            fovy: 45.0,
            znear: 0.1,
            zfar: 100.0,
        };

        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update_view_proj(&camera);

        let camera_buffer = CameraSystem::create_uniform_buffer(self.device, &camera_uniform);
        let camera_bind_group_layout =
            self.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    }],
                    label: Some("Camera Component Uniform Bind Group Layout"),
                });

        let camera_bind_group = CameraSystem::create_uniform_bind_group(
            self.device,
            &camera_buffer,
            &camera_bind_group_layout,
        );
        let camera_controller =
            CameraController::new(config.camera_zoom_speed, config.camera_orbit_speed);

        CameraComponent {
            camera,
            camera_uniform,
            camera_buffer,
            camera_bind_group,
            camera_bind_group_layout,
            camera_controller,
        }
    }
}

impl Uniform for CameraSystem<'_> {
    fn create_uniform_buffer<T: bytemuck::Pod>(device: &wgpu::Device, data: &T) -> wgpu::Buffer {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Component Uniform Buffer"),
            contents: bytemuck::bytes_of(data),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        })
    }

    fn create_uniform_bind_group(
        device: &wgpu::Device,
        buffer: &wgpu::Buffer,
        layout: &wgpu::BindGroupLayout,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("Camera Component Uniform Bind Group"),
        })
    }
}
