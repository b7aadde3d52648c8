//! Windowed viewer: event loop, tick scheduling and input.
//!
//! | Input | Action |
//! |-------|--------|
//! | `Esc` | quit |
//! | `Space` | pause / resume the simulation |
//! | `F` | toggle drawing inactive slots |
//! | `R` | rebuild the emitter from its config |
//! | left drag | orbit camera |
//! | wheel | zoom |

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::config::DemoConfig;
use crate::emitter::Emitter;
use crate::error::AppError;
use crate::gpu::Renderer;
use crate::render::{DrawFilter, ParticleVertex};
use crate::time::FrameClock;

/// Ticks between window title refreshes.
const TITLE_REFRESH_TICKS: u64 = 30;

/// Open a window and run the emitter until it is closed.
pub fn run(config: DemoConfig) -> Result<(), AppError> {
    config.validate()?;
    let emitter = Emitter::from_config(&config.emitter)?;
    let clock = FrameClock::from_millis(config.tick_interval_ms)?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, emitter, clock);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct App {
    config: DemoConfig,
    emitter: Emitter,
    clock: FrameClock,
    filter: DrawFilter,
    vertices: Vec<ParticleVertex>,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    mouse_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
    last_title_tick: u64,
    error: Option<AppError>,
}

impl App {
    fn new(config: DemoConfig, emitter: Emitter, clock: FrameClock) -> Self {
        Self {
            clock,
            filter: config.draw_filter,
            vertices: Vec::with_capacity(emitter.num_particles()),
            config,
            emitter,
            window: None,
            renderer: None,
            mouse_pressed: false,
            last_mouse_pos: None,
            last_title_tick: 0,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        log::error!("{err}");
        self.error = Some(err);
        event_loop.exit();
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.width,
                self.config.height,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let renderer = pollster::block_on(Renderer::new(window.clone(), &self.config))?;

        self.window = Some(window);
        self.renderer = Some(renderer);
        Ok(())
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, code: KeyCode) {
        match code {
            KeyCode::Escape => event_loop.exit(),
            KeyCode::Space => {
                self.clock.toggle_pause();
                log::info!("paused: {}", self.clock.is_paused());
            }
            KeyCode::KeyF => {
                self.filter = self.filter.toggled();
                log::info!("draw filter: {:?}", self.filter);
            }
            KeyCode::KeyR => match Emitter::from_config(&self.config.emitter) {
                Ok(emitter) => self.emitter = emitter,
                Err(err) => log::error!("Failed to rebuild emitter: {err}"),
            },
            _ => return,
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn refresh_title(&self) {
        if let Some(window) = &self.window {
            window.set_title(&format!(
                "{} | {}/{} alive | tick {}",
                self.config.title,
                self.emitter.alive_count(),
                self.emitter.num_particles(),
                self.clock.ticks()
            ));
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(err) = self.init_window(event_loop) {
                self.fail(event_loop, err);
                return;
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.clock.next_deadline()));
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let ticks = self.clock.poll();
        for _ in 0..ticks {
            self.emitter.update(self.config.dt);
        }
        if self.clock.ticks() - self.last_title_tick >= TITLE_REFRESH_TICKS {
            self.last_title_tick = self.clock.ticks();
            self.refresh_title();
        }
        if ticks > 0 {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.clock.next_deadline()));
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                log::info!("Resize: {}x{}", physical_size.width, physical_size.height);
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.handle_key(event_loop, code);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.mouse_pressed = state == ElementState::Pressed;
                    if !self.mouse_pressed {
                        self.last_mouse_pos = None;
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.mouse_pressed {
                    if let Some((last_x, last_y)) = self.last_mouse_pos {
                        if let Some(renderer) = &mut self.renderer {
                            renderer
                                .camera
                                .orbit((position.x - last_x) as f32, (position.y - last_y) as f32);
                        }
                    }
                    self.last_mouse_pos = Some((position.x, position.y));
                    if let Some(window) = &self.window {
                        window.request_redraw();
                    }
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                };
                if let Some(renderer) = &mut self.renderer {
                    renderer.camera.zoom(scroll);
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => {
                let Some(renderer) = &mut self.renderer else {
                    return;
                };
                self.emitter.write_vertices(self.filter, &mut self.vertices);
                renderer.upload(&self.vertices);

                match renderer.render() {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        renderer.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
            _ => {}
        }
    }
}
