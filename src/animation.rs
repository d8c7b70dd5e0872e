//! Running a backdrop in a desktop window.
//!
//! ```ignore
//! use plexus::prelude::*;
//!
//! fn main() -> Result<(), RunError> {
//!     Animation::new(Backdrop::Field(FieldConfig::circuit()))
//!         .with_title("Circuit")
//!         .with_window_size(1280, 720)
//!         .run()
//! }
//! ```
//!
//! Escape or closing the window stops the animation.

use std::sync::Arc;

use tracing::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::Backdrop;
use crate::driver::FrameDriver;
use crate::error::RunError;
use crate::gpu::GpuSurface;
use crate::input;
use crate::scene::Scene;
use crate::viewport::Viewport;

/// Builder for a windowed backdrop.
pub struct Animation {
    backdrop: Backdrop,
    title: String,
    window_size: (u32, u32),
}

impl Animation {
    pub fn new(backdrop: Backdrop) -> Self {
        Self {
            backdrop,
            title: "Plexus".to_string(),
            window_size: (1280, 720),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Initial window size in logical pixels.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    /// Open the window and animate until it is closed.
    ///
    /// # Errors
    ///
    /// Returns an error if the event loop, the window or the GPU surface
    /// cannot be created.
    pub fn run(self) -> Result<(), RunError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        info!(title = %self.title, "starting animation");
        let mut app = App {
            animation: self,
            window: None,
            driver: None,
            error: None,
        };
        event_loop.run_app(&mut app)?;

        match app.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

struct App {
    animation: Animation,
    window: Option<Arc<Window>>,
    driver: Option<FrameDriver<Box<dyn Scene>, GpuSurface>>,
    error: Option<RunError>,
}

impl App {
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), RunError> {
        let (width, height) = self.animation.window_size;
        let attrs = Window::default_attributes()
            .with_title(self.animation.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(width, height));
        let window = Arc::new(event_loop.create_window(attrs)?);

        let surface = pollster::block_on(GpuSurface::new(
            window.clone(),
            self.animation.backdrop.background(),
        ))?;

        let size = window.inner_size();
        let viewport = Viewport::new(size.width as f32, size.height as f32);
        let scene = self.animation.backdrop.build(viewport);

        self.driver = Some(FrameDriver::new(scene, Some(surface)));
        window.request_redraw();
        self.window = Some(window);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(driver) = &mut self.driver else {
            return;
        };
        if driver.frame().is_none() {
            event_loop.exit();
            return;
        }
        if let Some(surface) = driver.surface_mut() {
            match surface.present() {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    surface.reconfigure()
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    error!("gpu out of memory");
                    event_loop.exit();
                }
                Err(e) => warn!(error = ?e, "frame skipped"),
            }
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            warn!(error = %e, "could not open animation window");
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let WindowEvent::RedrawRequested = event {
            self.redraw(event_loop);
            return;
        }

        let Some(driver) = &mut self.driver else {
            return;
        };
        if let Some(host_event) = input::translate(&event) {
            driver.handle(host_event);
        }
        if !driver.is_running() {
            driver.stop();
            event_loop.exit();
        }
    }
}
