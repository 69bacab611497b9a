mod components;
pub mod config;
pub mod grid;
pub mod selection;
mod systems;
pub mod transform;

use anyhow::Context;
use bevy_ecs::world::World;
use components::{
    camera::CameraComponent,
    mesh::{LayerComponent, MeshComponent},
    render_pipelines::ScenePipelines,
};
use config::{Palette, SceneConfig, WINDOW_TITLE};
use grid::ProjectionGrid;
use selection::SelectionHandler;
use systems::{
    camera::CameraSystem,
    canvas::{SceneArtifact, SceneCanvas},
    mesh::MeshSystem,
    picking::PickingSystem,
    render_pipelines::SceneRenderPipelineSystem,
    scene::{to_f32, SceneSystem},
};
use winit::{
    dpi::{LogicalSize, PhysicalPosition},
    event::*,
    event_loop::{ControlFlow, EventLoop},
    window::{Window, WindowBuilder},
};

pub trait Uniform {
    // only allow (multiples of?) 16 bytes of buffer
    // data to be compliant with WebGL2.
    fn create_uniform_buffer<T: bytemuck::Pod>(device: &wgpu::Device, data: &T) -> wgpu::Buffer;

    fn create_uniform_bind_group(
        device: &wgpu::Device,
        buffer: &wgpu::Buffer,
        layout: &wgpu::BindGroupLayout,
    ) -> wgpu::BindGroup;
}

struct State {
    // renderer
    size: winit::dpi::PhysicalSize<u32>,
    surface: wgpu::Surface,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipelines: ScenePipelines,

    // scene
    world: World,
    camera_component: CameraComponent,
    selection_handler: SelectionHandler<SceneArtifact>,
    scene_config: SceneConfig,
    cursor: Option<PhysicalPosition<f64>>,

    // declared after the surface so it is dropped after it
    window: Window,
}

impl State {
    async fn new(window: Window, scene_config: SceneConfig) -> anyhow::Result<Self> {
        let size = window.inner_size();

        // The instance is a handle to our GPU
        // Backends::all => Vulkan + Metal + DX12 + Browser WebGPU
        let instance = State::create_instance();

        // # Safety
        // The surface needs to live as long as the window that created it.
        // State owns the window so this should be safe.
        let surface =
            unsafe { instance.create_surface(&window) }.context("creating window surface")?;
        let adapter = State::create_adapter(&instance, &surface).await?;
        tracing::info!(adapter = %adapter.get_info().name, "using GPU adapter");
        let (device, queue) = State::create_device_and_queue(&adapter).await?;

        let surface_caps = surface.get_capabilities(&adapter);
        // The palette is written for an sRGB surface; other formats come out darker.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("surface reports no texture formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let camera_component =
            CameraSystem::new(&device).create_camera(config.width, config.height, &scene_config);

        let shader =
            device.create_shader_module(wgpu::include_wgsl!("./shaders/scene_shader.wgsl"));
        let pipelines = SceneRenderPipelineSystem::new(&device).create_pipelines(
            &[&camera_component.camera_bind_group_layout],
            &shader,
            config.format,
        );

        let grid = ProjectionGrid::new(scene_config.grid_resolution, scene_config.grid_extent);
        tracing::info!(points = grid.len(), "projected plane grid onto the sphere");

        let mut world = World::new();
        let mesh_system = MeshSystem::new(&device);
        for (layer, geometry) in SceneSystem::static_layers(&grid, &scene_config) {
            world.spawn((mesh_system.upload(&geometry), layer));
        }

        let selection_handler =
            SelectionHandler::new(grid, scene_config.low_distortion_threshold);

        Ok(Self {
            size,
            surface,
            device,
            queue,
            config,
            pipelines,
            world,
            camera_component,
            selection_handler,
            scene_config,
            cursor: None,
            window,
        })
    }

    pub fn create_instance() -> wgpu::Instance {
        wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        })
    }

    pub async fn create_adapter(
        instance: &wgpu::Instance,
        surface: &wgpu::Surface,
    ) -> anyhow::Result<wgpu::Adapter> {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no GPU adapter can present to this window")
    }

    pub async fn create_device_and_queue(
        adapter: &wgpu::Adapter,
    ) -> anyhow::Result<(wgpu::Device, wgpu::Queue)> {
        adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    features: wgpu::Features::empty(),
                    limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    label: None,
                },
                None, // Trace path
            )
            .await
            .context("requesting GPU device")
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.camera_component
                .camera
                .resize(new_size.width, new_size.height);
            self.window.request_redraw();
        }
    }

    fn input(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some(*position);
                return true;
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                return true;
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                self.handle_left_click();
                return true;
            }
            _ => {}
        }

        let consumed = self
            .camera_component
            .camera_controller
            .process_key_events(event);
        if consumed {
            self.window.request_redraw();
        }
        consumed
    }

    fn handle_left_click(&mut self) {
        let Some(cursor) = self.cursor else {
            return;
        };

        let view_proj_matrix =
            cgmath::Matrix4::from(self.camera_component.camera_uniform.view_proj_matrix);
        let tolerance = self.scene_config.pick_tolerance * self.window.scale_factor() as f32;
        let sphere_points = self
            .selection_handler
            .grid()
            .sphere_points()
            .iter()
            .map(|&point| to_f32(point))
            .enumerate();

        let picked = PickingSystem::pick_nearest(
            sphere_points,
            view_proj_matrix,
            self.size.width as f32,
            self.size.height as f32,
            cgmath::Vector2::new(cursor.x as f32, cursor.y as f32),
            tolerance,
        );

        match picked {
            Some(index) => self.select(index),
            None => tracing::debug!(x = cursor.x, y = cursor.y, "click missed the sphere points"),
        }
    }

    fn select(&mut self, index: usize) {
        let mut canvas = SceneCanvas {
            world: &mut self.world,
            device: &self.device,
            window: &self.window,
            highlight_size: self.scene_config.highlight_marker_size,
        };
        let selection = self.selection_handler.on_select(index, &mut canvas);

        tracing::info!(
            index,
            u = selection.plane.x,
            v = selection.plane.y,
            factor = selection.distortion,
            "point selected"
        );
        println!("\n{selection}");
    }

    fn update(&mut self) {
        self.camera_component
            .camera_controller
            .update_camera(&mut self.camera_component.camera);
        self.camera_component
            .camera_uniform
            .update_view_proj(&self.camera_component.camera);
        self.queue.write_buffer(
            &self.camera_component.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera_component.camera_uniform]),
        );
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        // get the surface to provide a new SurfaceTexture that we will render to.
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // there is no depth buffer, so entities are drawn in layer order
        let mut query = self.world.query::<(&MeshComponent, &LayerComponent)>();
        let mut meshes: Vec<(&MeshComponent, &LayerComponent)> =
            query.iter(&self.world).collect();
        meshes.sort_by_key(|(_, layer)| **layer);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(Palette::BACKGROUND),
                    store: true,
                },
            })],
            depth_stencil_attachment: None,
        });

        render_pass.set_bind_group(0, &self.camera_component.camera_bind_group, &[]);

        for (mesh, _) in meshes {
            if mesh.num_indices == 0 {
                continue;
            }
            render_pass.set_pipeline(&self.pipelines.for_kind(mesh.kind).render_pipeline);
            render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..mesh.num_indices, 0, 0..1);
        }

        drop(render_pass);

        // submit will accept anything that implements IntoIter
        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_max_level(tracing::Level::INFO)
        .init();

    let scene_config = SceneConfig::default();
    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(WINDOW_TITLE)
        .with_inner_size(LogicalSize::new(
            scene_config.window_width,
            scene_config.window_height,
        ))
        .build(&event_loop)
        .context("creating window")?;

    let mut state = State::new(window, scene_config).await?;

    event_loop.run(move |event, _, control_flow| {
        // sleep until the next input; redraws are requested explicitly
        control_flow.set_wait();

        match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == state.window.id() => {
                if !state.input(event) {
                    match event {
                        WindowEvent::CloseRequested
                        | WindowEvent::KeyboardInput {
                            input:
                                KeyboardInput {
                                    state: ElementState::Pressed,
                                    virtual_keycode: Some(VirtualKeyCode::Escape),
                                    ..
                                },
                            ..
                        } => control_flow.set_exit(),
                        WindowEvent::Resized(physical_size) => {
                            state.resize(*physical_size);
                        }
                        WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                            // new_inner_size is &&mut so we have to dereference it twice
                            state.resize(**new_inner_size);
                        }
                        _ => {}
                    }
                }
            }
            Event::RedrawRequested(window_id) if window_id == state.window.id() => {
                state.update();
                match state.render() {
                    Ok(_) => {}
                    // Reconfigure the surface if lost
                    Err(wgpu::SurfaceError::Lost) => state.resize(state.size),
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        tracing::error!("GPU out of memory, exiting");
                        control_flow.set_exit();
                    }
                    // All other errors (Outdated, Timeout) should be resolved by the next frame
                    Err(e) => tracing::warn!(error = ?e, "skipping frame"),
                }
            }
            Event::MainEventsCleared => {
                // keep animating only while a camera key is held
                if state.camera_component.camera_controller.is_moving() {
                    state.window.request_redraw();
                }
            }
            _ => {}
        }
    });
}
