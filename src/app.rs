//! Application shell: window creation and event dispatch
//!
//! One thread owns the window, the device and all mutable state; winit
//! delivers resume/resize/key/redraw events serially, so input handling and
//! rendering never overlap. The window closing tears everything down in one
//! pass — no device resource outlives another's release order.

use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowAttributes},
};

use crate::error::Result;
use crate::gfx::{
    camera::{camera_controller::CameraController, camera_utils::CameraManager, ViewCamera},
    rendering::render_engine::RenderEngine,
    scene::Scene,
};

/// Initial window size; the projection tracks resizes from here on.
const INITIAL_WIDTH: u32 = 800;
const INITIAL_HEIGHT: u32 = 600;

pub struct AlcoveApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    scene: Scene,
}

impl AlcoveApp {
    /// Assembles the scene host-side and prepares the event loop.
    ///
    /// Scene assembly loads the model files, so a missing asset fails here,
    /// before any window exists.
    pub fn new() -> Result<Self> {
        let event_loop = EventLoop::new().expect("Failed to create event loop");

        let camera = ViewCamera::new(INITIAL_WIDTH, INITIAL_HEIGHT);
        let controller = CameraController::default();
        let camera_manager = CameraManager::new(camera, controller);
        let scene = Scene::new(camera_manager)?;

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_engine: None,
                scene,
            },
        })
    }

    /// Run the application (consumes self and starts the event loop)
    pub fn run(mut self) {
        let event_loop = self.event_loop.take().expect("Event loop already consumed");
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop
            .run_app(&mut self.app_state)
            .expect("Failed to run event loop");
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Ok(window) = event_loop.create_window(
            WindowAttributes::default()
                .with_title("Alcove")
                .with_inner_size(winit::dpi::LogicalSize::new(INITIAL_WIDTH, INITIAL_HEIGHT)),
        ) {
            let window_handle = Arc::new(window);
            self.window = Some(window_handle.clone());

            let (width, height) = window_handle.inner_size().into();

            let window_clone = window_handle.clone();
            let renderer = pollster::block_on(async move {
                RenderEngine::new(window_clone, width, height).await
            })
            .unwrap_or_else(|error| {
                log::error!("failed to initialise renderer: {error}");
                std::process::exit(1);
            });

            self.scene
                .init_gpu_resources(renderer.device(), renderer.queue(), &renderer.pipelines)
                .unwrap_or_else(|error| {
                    log::error!("failed to load scene resources: {error}");
                    std::process::exit(1);
                });

            self.scene.resize(width, height);
            self.render_engine = Some(renderer);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: winit::event::WindowEvent,
    ) {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };

        let Some(window) = self.window.as_ref() else {
            return;
        };

        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                match &event.logical_key {
                    Key::Named(NamedKey::Escape) => event_loop.exit(),
                    Key::Character(text) => {
                        if let Some(key) = text.chars().next() {
                            if self.scene.process_key(key) {
                                window.request_redraw();
                            }
                        }
                    }
                    _ => (),
                }
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.scene.resize(width, height);
                render_engine.resize(width, height);
            }
            WindowEvent::CloseRequested => {
                log::info!("window closed, releasing device resources");
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                render_engine.update(&self.scene);
                render_engine.render_frame(&mut self.scene);
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
