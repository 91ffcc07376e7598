//! Kohonen Attempt
//!
//! A handful of particles pushing each other apart on the unit disk, drawn as
//! point sprites. Each redraw advances the field by one fixed step.

use anyhow::{Context, Result};
use particle_renderer::{Camera, GpuContext, ParticleRenderer};
use particle_simulation::{FieldParams, ParticleField, RenderTarget};
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

const PARTICLE_COUNT: usize = 15;
const SEED: u64 = 1;

const WINDOW_TITLE: &str = "Kohonen Attempt";
const WINDOW_WIDTH: u32 = 1280;
const WINDOW_HEIGHT: u32 = 720;
const ASPECT_RATIO: f32 = 16.0 / 9.0;

/// Acquire a frame first and only then advance the field into `target`, so a
/// frame that cannot be drawn does not consume a simulation step.
fn tick_frame<F, E>(
    acquire: impl FnOnce() -> Result<F, E>,
    field: &mut ParticleField,
    target: &mut dyn RenderTarget,
) -> Result<F, E> {
    let frame = acquire()?;
    field.step(target);
    Ok(frame)
}

/// Everything that lives between window creation and exit
struct GpuState {
    context: GpuContext,
    field: ParticleField,
    renderer: ParticleRenderer,
    camera: Camera,
}

impl GpuState {
    async fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();

        let context = GpuContext::new(window, size.width, size.height)
            .await
            .context("failed to initialize GPU")?;

        let field = ParticleField::new(FieldParams::new(SEED, PARTICLE_COUNT))
            .context("invalid particle field configuration")?;

        let renderer = ParticleRenderer::new(&context, field.particles());
        log::info!("✓ Renderer initialized");

        let camera = Camera::new(
            context.config.width,
            context.config.height,
            Some(ASPECT_RATIO),
        );

        Ok(Self {
            context,
            field,
            renderer,
            camera,
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if self.context.resize(new_size.width, new_size.height) {
            self.renderer.resize(&self.context);
            self.camera.resize(new_size.width, new_size.height);
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        // One frame tick: acquire, step, publish, draw
        let surface = &self.context.surface;
        let output = tick_frame(
            || surface.get_current_texture(),
            &mut self.field,
            &mut self.renderer,
        )?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer.render(&self.context, &view, &self.camera);
        output.present();

        Ok(())
    }
}

#[derive(Default)]
struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    // Startup failure, reported once the event loop returns
    error: Option<anyhow::Error>,
}

impl App {
    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
            .with_resizable(true);

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("failed to create window")?,
        );
        self.window = Some(window.clone());
        self.gpu_state = Some(pollster::block_on(GpuState::new(window))?);
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.start(event_loop) {
            log::error!("{:#}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),

            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }

            WindowEvent::RedrawRequested => {
                if let (Some(window), Some(gpu_state)) = (&self.window, &mut self.gpu_state) {
                    match gpu_state.render() {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            gpu_state.resize(window.inner_size())
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("GPU out of memory, exiting");
                            event_loop.exit();
                        }
                        Err(e) => log::warn!("Render error: {:?}", e),
                    }
                }
            }

            _ => {}
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu_state) = self.gpu_state.take() {
            log::info!("Stopped after {} frames", gpu_state.field.frame());
        }
        self.window = None;
    }
}

fn main() -> Result<()> {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!(
        "Starting particle field: {} particles, seed {}",
        PARTICLE_COUNT,
        SEED
    );

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::default();
    event_loop
        .run_app(&mut app)
        .context("event loop terminated abnormally")?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
