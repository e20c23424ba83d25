// =============================================================================
// HELLO TRIANGLE - a single triangle presented in lock-step with the display
// =============================================================================
//
// ARCHITECTURE OVERVIEW:
// ┌─────────────────────────────────────────────────────────────────┐
// │  winit window + event loop (this file)                          │
// │    └── Renderer                                                 │
// │          ├── VulkanDevice (instance, surface, GPU, queues)      │
// │          ├── Swapchain + image views                            │
// │          ├── Render pass, pipeline, framebuffers                │
// │          └── Command buffer + sync objects (one frame in flight)│
// └─────────────────────────────────────────────────────────────────┘
//
// FRAME FLOW (once per redraw):
// 1. Wait for the previous frame's fence
// 2. Acquire swapchain image
// 3. Record the command buffer
// 4. Submit to the graphics queue
// 5. Present on the present queue
//
// =============================================================================

use anyhow::{Context, Result};
use ash::vk;
use hello_triangle::backend::{DeviceRequirements, Renderer, RendererSettings, WindowTarget};
use hello_triangle::config::Config;
use hello_triangle::console::{self, Color};
use raw_window_handle::{HasRawDisplayHandle, HasRawWindowHandle};
use std::process::ExitCode;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

// =============================================================================
// ENTRY POINT
// =============================================================================

fn main() -> ExitCode {
    // Logging depends on the config, so a load failure is reported afterwards
    let (config, config_error) = match Config::load_from_path("config.toml") {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    init_logging(&config);
    if let Some(e) = config_error {
        log::warn!("Failed to load config.toml: {:#}. Using defaults.", e);
    }

    console::log_message("Hello Triangle", Color::BrightGreen, Color::Black, 0);
    log::info!(
        "Window: {}x{}, validation layers {}",
        config.window.width,
        config.window.height,
        if config.debug.validation_layers { "on" } else { "off" }
    );

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", console::paint(&format!("{:#}", e), Color::Red, Color::Black, 0));
            ExitCode::FAILURE
        }
    }
}

/// env_logger with the configured level; RUST_LOG still wins
fn init_logging(config: &Config) {
    env_logger::Builder::new()
        .filter_level(config.log_level())
        .parse_default_env()
        .format(console::format_record)
        .init();
}

fn run(config: Config) -> Result<()> {
    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app).context("Event loop failed")?;

    app.finish()
}

// =============================================================================
// APPLICATION STATE
// =============================================================================

/// Window plus renderer.
///
/// Field order matters for Drop: the renderer (and its surface) must go
/// before the window it presents to.
struct App {
    renderer: Option<Renderer>,
    window: Option<Window>,
    config: Config,
    /// First fatal error; stops the loop
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: Config) -> Self {
        Self {
            renderer: None,
            window: None,
            config,
            error: None,
        }
    }

    fn settings(&self) -> RendererSettings {
        RendererSettings {
            app_name: self.config.window.title.clone(),
            requirements: DeviceRequirements::default().with_validation(self.config.debug.validation_layers),
            vert_shader: self.config.graphics.vertex_shader.clone(),
            frag_shader: self.config.graphics.fragment_shader.clone(),
            clear_color: self.config.graphics.clear_color,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attributes = WindowAttributes::default()
            .with_title(&self.config.window.title)
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ))
            .with_resizable(false);

        let window = event_loop
            .create_window(window_attributes)
            .context("Failed to create window")?;

        let size = window.inner_size();
        let target = WindowTarget {
            display_handle: window.raw_display_handle(),
            window_handle: window.raw_window_handle(),
            drawable: vk::Extent2D {
                width: size.width,
                height: size.height,
            },
        };

        // Store the window first so it outlives a half-built renderer too
        self.window = Some(window);
        let renderer = Renderer::new(target, &self.settings()).context("Failed to initialize Vulkan")?;
        self.renderer = Some(renderer);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        if self.error.is_none() {
            self.error = Some(error);
        }
        event_loop.exit();
    }

    /// Tear down (after the device is idle) and report the outcome
    fn finish(mut self) -> Result<()> {
        if let Some(renderer) = self.renderer.take() {
            log::info!("Rendered {} frames", renderer.frame_count());
            drop(renderer);
        }
        self.window = None;

        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

// =============================================================================
// EVENT HANDLING
// =============================================================================

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.init(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, shutting down...");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                use winit::keyboard::{KeyCode, PhysicalKey};

                if event.state.is_pressed() && event.physical_key == PhysicalKey::Code(KeyCode::Escape) {
                    log::info!("ESC pressed, exiting...");
                    event_loop.exit();
                }
            }

            WindowEvent::RedrawRequested => {
                if event_loop.exiting() {
                    return;
                }
                if let Some(renderer) = self.renderer.as_mut() {
                    if let Err(e) = renderer.render_frame() {
                        self.fail(event_loop, anyhow::Error::new(e).context("Frame failed"));
                    }
                }
            }

            _ => {}
        }
    }

    /// Request a redraw each time the loop has drained its events
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
