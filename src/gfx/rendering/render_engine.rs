//! WGPU-based rendering engine for the fixed scene
//!
//! Owns the surface, device, queue, depth buffer, pipelines and the
//! frame-global uniform buffer. Every frame it clears color and depth,
//! walks the scene's draw plan in fixed order — pushing each object's
//! material and composed transform before its draw — and presents.

use std::sync::Arc;
use wgpu::TextureFormat;

use crate::{
    error::Result,
    gfx::resources::{
        frame_bindings::{update_frame_ubo, FrameBindings, FrameUBO},
        texture_resource::TextureResource,
    },
    gfx::scene::scene::Scene,
};

use super::pipelines::Pipelines;

/// Core rendering engine managing GPU resources and draw calls.
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    pub pipelines: Pipelines,
    frame_ubo: FrameUBO,
    frame_bindings: FrameBindings,
}

impl RenderEngine {
    /// Creates a render engine for the given window.
    ///
    /// Initializes wgpu, configures the surface, creates the depth buffer,
    /// the frame-global bindings and both scene pipelines.
    ///
    /// # Panics
    /// Panics if no wgpu adapter or device is available.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> Result<RenderEngine> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window).unwrap();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to request adapter!");

        let (device, queue) = {
            adapter
                .request_device(&wgpu::DeviceDescriptor {
                    label: Some("WGPU Device"),
                    required_features: wgpu::Features::default(),
                    required_limits: wgpu::Limits::downlevel_defaults(),
                    memory_hints: wgpu::MemoryHints::default(),
                    trace: wgpu::Trace::Off,
                })
                .await
                .expect("Failed to request a device!")
        };

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .unwrap_or(surface_capabilities.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_capabilities.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let frame_ubo = FrameUBO::new(&device);
        let mut frame_bindings = FrameBindings::new(&device);
        frame_bindings.create_bind_group(&device, &frame_ubo);

        let pipelines = Pipelines::new(&device, format, frame_bindings.bind_group_layout())?;

        log::info!("render engine ready ({}x{}, {:?})", width, height, format);

        Ok(RenderEngine {
            surface,
            device: device.into(),
            queue: queue.into(),
            config,
            depth_texture,
            format,
            pipelines,
            frame_ubo,
            frame_bindings,
        })
    }

    /// Pushes the current camera and light state into the frame uniforms.
    ///
    /// Called once per frame before [`RenderEngine::render_frame`].
    pub fn update(&mut self, scene: &Scene) {
        update_frame_ubo(
            &mut self.frame_ubo,
            &self.queue,
            &scene.camera_manager.camera,
            &scene.lights,
        );
    }

    /// Renders one frame: exactly one draw per scene object, in the
    /// scene's fixed order.
    ///
    /// Every draw is preceded by a full material + transform push into
    /// that object's own uniform buffer, so uniform state never bleeds
    /// between draws.
    pub fn render_frame(&mut self, scene: &mut Scene) {
        let plan = scene.draw_plan();

        for command in &plan {
            scene.objects[command.object].push_uniforms(
                &self.queue,
                command.model,
                command.material,
            );
        }

        let surface_texture = self
            .surface
            .get_current_texture()
            .expect("Failed to get surface texture!");

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, self.frame_bindings.bind_group(), &[]);

            for command in &plan {
                let object = &scene.objects[command.object];
                let Some(object_bind_group) = object.bind_group() else {
                    log::warn!("skipping '{}' - no GPU resources", object.name);
                    continue;
                };

                match command.texture {
                    Some(slot) => {
                        render_pass.set_pipeline(&self.pipelines.textured);
                        render_pass.set_bind_group(2, scene.texture_bind_group(slot), &[]);
                    }
                    None => render_pass.set_pipeline(&self.pipelines.solid),
                }
                render_pass.set_bind_group(1, object_bind_group, &[]);

                let entry = scene.registry.entry(command.mesh);
                let gpu = entry.gpu().expect("mesh not uploaded");
                render_pass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
                match &gpu.index_buffer {
                    Some(index_buffer) => {
                        render_pass
                            .set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                        render_pass.draw_indexed(0..entry.draw_count(), 0, 0..1);
                    }
                    None => render_pass.draw(0..entry.draw_count(), 0..1),
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
    }

    /// Resizes the surface and recreates the depth buffer.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    /// Returns current surface dimensions.
    pub fn get_surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Returns reference to the wgpu device.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Returns reference to the wgpu command queue.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Returns the surface texture format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }
}
