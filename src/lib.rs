// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

pub mod config;
pub mod error;
pub mod gauge;
pub mod geometry;
pub mod joystick;
pub mod raster;
pub mod scene;

// External crate imports
use pixels::{Pixels, SurfaceTexture};
use rusttype::Font;
use tracing::{debug, error, info, warn};

// Standard library imports
use std::path::Path;
use std::time::{Duration, Instant};

// Window management imports
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, MouseButton, Touch, TouchPhase, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

pub use config::{Color, GaugeConfig, JoystickConfig, PanelConfig};
pub use error::{PanelError, Result};
pub use gauge::{CurveTextGauge, Tick};
pub use geometry::{Point, Rect};
pub use joystick::{DragState, JoystickControl};
pub use scene::{DrawCommand, Scene};

use raster::Canvas;

// ============================================================================
// POINTER INPUT
// ============================================================================

/// Host pointer events in window-logical coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up,
}

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// Window hosting the gauge (left) and the joystick (right), side by side.
#[derive(Debug, Clone)]
pub struct Panel {
    config: PanelConfig,
    gauge: CurveTextGauge,
    joystick: JoystickControl,
}

impl Panel {
    pub fn new(config: PanelConfig) -> Self {
        let gauge = CurveTextGauge::new(config.gauge.clone());
        let joystick = JoystickControl::new(config.joystick.clone());
        Self {
            config,
            gauge,
            joystick,
        }
    }

    pub fn joystick(&self) -> &JoystickControl {
        &self.joystick
    }

    /// Window size in logical units.
    pub fn logical_size(&self) -> (f64, f64) {
        let gauge = self.config.gauge.size;
        let joystick = self.config.joystick.size;
        (gauge + joystick, gauge.max(joystick))
    }

    /// Where the joystick container sits in the window, as the host layout
    /// would report it.
    pub fn joystick_boundary(&self) -> Rect {
        let size = self.config.joystick.size;
        Rect::new(self.config.gauge.size, 0.0, size, size)
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down(point) => {
                let boundary = self.joystick_boundary();
                if boundary.circle_contains(point) {
                    self.joystick.pointer_down(boundary);
                }
            }
            PointerEvent::Move(point) => {
                if self.joystick.is_dragging() {
                    self.joystick.pointer_move(point);
                    let (dx, dy) = self.joystick.deflection();
                    debug!(dx, dy, "joystick deflection");
                }
            }
            PointerEvent::Up => self.joystick.pointer_up(),
        }
    }

    /// Advances per-frame animation. Returns whether more frames are needed.
    pub fn advance_frame(&mut self) -> bool {
        self.joystick.animate()
    }

    pub fn scene(&self) -> Scene {
        let mut scene = Scene::new();
        scene.add_command(DrawCommand::Clear(self.config.background_color));
        self.gauge.add_to_scene(&mut scene, Point::default());
        self.joystick
            .add_to_scene(&mut scene, self.joystick_boundary().top_left());
        scene
    }

    pub fn show(&mut self) -> Result<()> {
        let font = self.load_font()?;
        self.run_window(font)
    }

    fn load_font(&self) -> Result<Option<Font<'static>>> {
        match &self.config.font_data {
            Some(data) => {
                let font = Font::try_from_vec(data.clone()).ok_or(PanelError::FontParse)?;
                debug!(glyphs = font.glyph_count(), "font loaded");
                Ok(Some(font))
            }
            None => {
                warn!("no font configured; the gauge label will not be drawn");
                Ok(None)
            }
        }
    }

    fn run_window(&mut self, font: Option<Font<'static>>) -> Result<()> {
        let (logical_width, logical_height) = self.logical_size();
        let render_scale = self.config.render_scale.max(1.0);
        let buffer_width = (logical_width * render_scale).round() as u32;
        let buffer_height = (logical_height * render_scale).round() as u32;

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(logical_width, logical_height))
            .with_resizable(false)
            .build(&event_loop)?;

        let window = std::sync::Arc::new(window);
        let window_clone = window.clone();
        let mut scale_factor = window.scale_factor();

        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(buffer_width, buffer_height, surface_texture)?;
        info!(buffer_width, buffer_height, scale_factor, "window opened");

        let frame_duration = Duration::from_secs_f64(1.0 / self.config.max_framerate.max(1.0));
        let mut last_frame = Instant::now();
        let mut cursor = Point::default();

        event_loop.run(move |event, window_target| {
            window_target.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
                            error!(%err, "failed to resize surface");
                            window_target.exit();
                        }
                    }
                    WindowEvent::ScaleFactorChanged {
                        scale_factor: new_scale,
                        ..
                    } => {
                        scale_factor = new_scale;
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        let logical = position.to_logical::<f64>(scale_factor);
                        cursor = Point::new(logical.x, logical.y);
                        self.handle_pointer(PointerEvent::Move(cursor));
                    }
                    WindowEvent::MouseInput {
                        state,
                        button: MouseButton::Left,
                        ..
                    } => match state {
                        ElementState::Pressed => self.handle_pointer(PointerEvent::Down(cursor)),
                        ElementState::Released => self.handle_pointer(PointerEvent::Up),
                    },
                    WindowEvent::Touch(Touch {
                        phase, location, ..
                    }) => {
                        let logical = location.to_logical::<f64>(scale_factor);
                        cursor = Point::new(logical.x, logical.y);
                        let pointer = match phase {
                            TouchPhase::Started => PointerEvent::Down(cursor),
                            TouchPhase::Moved => PointerEvent::Move(cursor),
                            TouchPhase::Ended | TouchPhase::Cancelled => PointerEvent::Up,
                        };
                        self.handle_pointer(pointer);
                    }
                    WindowEvent::Focused(false) => {
                        self.handle_pointer(PointerEvent::Up);
                    }
                    WindowEvent::RedrawRequested => {
                        self.advance_frame();

                        let scene = self.scene();
                        let mut canvas = Canvas::new(
                            pixels.frame_mut(),
                            buffer_width as usize,
                            buffer_height as usize,
                            render_scale,
                        );
                        scene.render(&mut canvas, font.as_ref());

                        if let Err(err) = pixels.render() {
                            error!(%err, "failed to render frame");
                            window_target.exit();
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    if last_frame.elapsed() >= frame_duration {
                        window_clone.request_redraw();
                        last_frame = Instant::now();
                    }
                }
                _ => {}
            }
        })?;

        info!("window closed");
        Ok(())
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::new(PanelConfig::default())
    }
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

pub fn read_font_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| PanelError::FontRead {
        path: path.to_path_buf(),
        source,
    })
}
