//! Interactive window driving a [`ProductViewer`]
//!
//! Left click picks hotspots, left drag orbits, the wheel zooms, `Escape`
//! clears the callouts and `R` resets the camera.
//!
//! Frames are requested only while something moves: connectors growing, the
//! camera being dragged, or a reveal timer coming due.

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info, trace};
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, Event, MouseButton, MouseScrollDelta, StartCause, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    keyboard::{Key, NamedKey},
    window::{Window, WindowBuilder},
};

use showcase_annotations::PickOutcome;
use showcase_core::{Error, Result};

use crate::viewer::ProductViewer;

/// Pointer travel, in pixels, beyond which a press becomes a drag
const DRAG_THRESHOLD: f64 = 4.0;
const ORBIT_SPEED: f32 = 0.01;
const ZOOM_SPEED: f32 = 0.1;

/// Window and input state around a product viewer
pub struct InteractiveViewer {
    viewer: ProductViewer,
    title: String,
    cursor: Option<PhysicalPosition<f64>>,
    press_origin: Option<PhysicalPosition<f64>>,
    dragging: bool,
    last_frame: Option<instant::Instant>,
}

impl InteractiveViewer {
    pub fn new(viewer: ProductViewer) -> Self {
        Self {
            viewer,
            title: "Product Showcase".to_string(),
            cursor: None,
            press_origin: None,
            dragging: false,
            last_frame: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn viewer(&self) -> &ProductViewer {
        &self.viewer
    }

    /// Open the window and run until it is closed
    pub fn run(mut self) -> Result<()> {
        let event_loop = EventLoop::new()
            .map_err(|e| Error::Visualization(format!("Failed to create event loop: {}", e)))?;
        let viewport = self.viewer.viewport();
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(viewport.width, viewport.height))
                .build(&event_loop)
                .map_err(|e| Error::Visualization(format!("Failed to create window: {}", e)))?,
        );

        let size = window.inner_size();
        self.viewer.resize(size.width as f32, size.height as f32);
        info!("viewer window open at {}x{}", size.width, size.height);

        self.last_frame = Some(instant::Instant::now());

        event_loop
            .run(move |event, target| {
                match event {
                    Event::NewEvents(StartCause::ResumeTimeReached { .. }) => window.request_redraw(),
                    Event::WindowEvent { event, .. } => match event {
                        WindowEvent::CloseRequested => target.exit(),
                        WindowEvent::Resized(new_size) => {
                            self.viewer.resize(new_size.width as f32, new_size.height as f32);
                            window.request_redraw();
                        }
                        WindowEvent::MouseInput {
                            state,
                            button: MouseButton::Left,
                            ..
                        } => {
                            self.on_left_button(state);
                            window.request_redraw();
                        }
                        WindowEvent::CursorMoved { position, .. } => self.on_cursor_moved(position),
                        WindowEvent::MouseWheel { delta, .. } => {
                            let scroll = match delta {
                                MouseScrollDelta::LineDelta(_, y) => y,
                                MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                            };
                            self.viewer.camera_mut().zoom(scroll * ZOOM_SPEED);
                            window.request_redraw();
                        }
                        WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                            match &event.logical_key {
                                Key::Named(NamedKey::Escape) => {
                                    debug!("clearing annotations");
                                    self.viewer.clear();
                                }
                                Key::Character(c) if c.as_str().eq_ignore_ascii_case("r") => {
                                    self.viewer.reset_camera();
                                }
                                _ => {}
                            }
                            window.request_redraw();
                        }
                        WindowEvent::RedrawRequested => self.advance_clock(),
                        _ => {}
                    },
                    Event::AboutToWait => self.schedule_next_frame(target, &window),
                    _ => {}
                }
            })
            .map_err(|e| Error::Visualization(format!("Event loop error: {}", e)))?;

        Ok(())
    }

    /// Tick the viewer by the wall time since the previous frame
    fn advance_clock(&mut self) {
        let now = instant::Instant::now();
        let delta = self.last_frame.map_or(Duration::ZERO, |last| now.duration_since(last));
        self.last_frame = Some(now);

        self.viewer.tick(delta);
        trace!(
            "frame {:?}: {} lines, {} overlays",
            delta,
            self.viewer.scene().line_count(),
            self.viewer.overlays().len()
        );
    }

    fn schedule_next_frame(&self, target: &EventLoopWindowTarget<()>, window: &Window) {
        let wait = if self.dragging {
            Some(Duration::ZERO)
        } else {
            self.viewer.next_frame_in()
        };
        match wait {
            Some(wait) if wait.is_zero() => {
                target.set_control_flow(ControlFlow::Wait);
                window.request_redraw();
            }
            Some(wait) => target.set_control_flow(ControlFlow::WaitUntil(Instant::now() + wait)),
            None => target.set_control_flow(ControlFlow::Wait),
        }
    }

    fn on_left_button(&mut self, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.press_origin = self.cursor;
                self.dragging = false;
            }
            ElementState::Released => {
                let was_click = self.press_origin.take().is_some() && !self.dragging;
                self.dragging = false;
                if !was_click {
                    return;
                }
                if let Some(pos) = self.cursor {
                    // The clock only moves on frames; sync it before activating
                    self.advance_clock();
                    if let PickOutcome::Hit(id) = self.viewer.on_pointer_event(pos.x as f32, pos.y as f32) {
                        info!("activated {}", id);
                    }
                }
            }
        }
    }

    fn on_cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        if let (Some(origin), Some(last)) = (self.press_origin, self.cursor) {
            let travel = ((position.x - origin.x).powi(2) + (position.y - origin.y).powi(2)).sqrt();
            if travel > DRAG_THRESHOLD {
                self.dragging = true;
            }
            if self.dragging {
                let dx = (position.x - last.x) as f32;
                let dy = (position.y - last.y) as f32;
                self.viewer.camera_mut().orbit(dx * ORBIT_SPEED, dy * ORBIT_SPEED);
            }
        }
        self.cursor = Some(position);
    }
}
