//! Gyro4D - rotating tesseract viewer
//!
//! Projects a tesseract to the screen and rotates it in the XW and YZ planes,
//! driven either by device tilt or by dragging with the mouse.

use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{StartCause, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use gyro4d::config::AppConfig;
use gyro4d::input::{CursorTracker, InputAction, InputMapper};
use gyro4d::systems::{FrameSystem, WindowSystem};
use gyro4d_input::{InputMode, SensorSender};
use gyro4d_render::{LineStyle, SegmentRenderer, WgpuLineRenderer};

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    /// Geometry, projector and angle sources
    frames: FrameSystem,
    /// Feeds the orientation filter (tilt emulation on desktop)
    sensor: SensorSender,
    style: LineStyle,
    window: Option<WindowSystem>,
    renderer: Option<WgpuLineRenderer>,
    cursor: CursorTracker,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let (frames, sensor) = FrameSystem::from_config(&config);
        let style = config.to_line_style();

        log::info!(
            "Tesseract half size {}, viewer distances ({}, {}), starting in {} mode",
            config.tesseract.half_size,
            config.tesseract.viewer_distance_4d,
            config.tesseract.viewer_distance_3d,
            frames.mode()
        );

        Self {
            config,
            frames,
            sensor,
            style,
            window: None,
            renderer: None,
            cursor: CursorTracker::new(),
        }
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn handle_action(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::Exit => event_loop.exit(),
            InputAction::ToggleMode => {
                self.frames.router_mut().toggle_mode();
            }
            InputAction::ResetView => {
                self.frames.router_mut().reset_view();
                log::info!("View reset");
            }
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::GestureStart => {
                self.frames.router_mut().gesture_start();
            }
            InputAction::GestureEnd => {
                self.frames.router_mut().gesture_end();
            }
        }
        self.request_redraw();
    }

    fn cursor_moved(&mut self, x: f64, y: f64) {
        let delta = self.cursor.moved_to(x, y);
        match self.frames.mode() {
            InputMode::Drag => {
                if let Some((dx, dy)) = delta {
                    if self.frames.router_mut().gesture_move(dx, dy) {
                        self.request_redraw();
                    }
                }
            }
            InputMode::Sensor => {
                if !self.config.sensor.tilt_emulation {
                    return;
                }
                if let Some(window) = &self.window {
                    let (width, height) = window.size();
                    self.sensor.send_orientation(InputMapper::cursor_tilt(x, y, width, height));
                }
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(renderer)) = (&self.window, &mut self.renderer) else {
            return;
        };

        let frame = self.frames.update(Instant::now(), window.center());
        window.update_title(self.frames.mode(), self.frames.angles());

        if let Err(e) = renderer.draw(&frame.segments, &self.style) {
            log::error!("Rendering failed: {}", e);
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        match WgpuLineRenderer::new(
            window.window().clone(),
            self.config.window.vsync,
            self.config.rendering.background_color,
        ) {
            Ok(renderer) => self.renderer = Some(renderer),
            Err(e) => {
                log::error!("Failed to initialise renderer: {}", e);
                event_loop.exit();
                return;
            }
        }

        window.request_redraw();
        self.window = Some(window);
    }

    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause {
            self.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
                self.request_redraw();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(action) = InputMapper::map_keyboard(key, event.state) {
                        self.handle_action(action, event_loop);
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(action) = InputMapper::map_mouse_button(button, state) {
                    self.handle_action(action, event_loop);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(position.x, position.y);
            }

            WindowEvent::CursorLeft { .. } => {
                self.cursor.forget();
            }

            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        match self.frames.next_wake(Instant::now()) {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}

/// Load configuration, falling back to defaults when it is missing or unusable
///
/// Runs before the logger exists, so problems are returned for logging later.
fn load_config() -> (AppConfig, Vec<String>) {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            return (
                AppConfig::default(),
                vec![format!("Failed to load config: {}. Using defaults.", e)],
            )
        }
    };

    let issues = config.validate();
    if issues.is_empty() {
        return (config, Vec::new());
    }
    let mut messages: Vec<String> = issues.iter().map(|i| format!("Invalid config: {}", i)).collect();
    messages.push("Using default configuration".to_string());
    (AppConfig::default(), messages)
}

fn main() {
    let (config, problems) = load_config();

    // RUST_LOG still wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    for problem in &problems {
        log::warn!("{}", problem);
    }
    log::info!("Starting Gyro4D");

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);
    event_loop.run_app(&mut app).expect("Event loop error");
}
