//! The frame driver: step, then render, once per display refresh.
//!
//! A [`FrameDriver`] owns a scene and the surface it draws on. The host calls
//! [`FrameDriver::frame`] from its refresh callback and forwards events with
//! [`FrameDriver::handle`]. Animation ends when any [`StopHandle`] is
//! triggered or [`FrameDriver::stop`] is called; the surface is then handed
//! back and no further frames run.
//!
//! ```ignore
//! let field = ParticleField::new(FieldConfig::ember(), viewport);
//! let mut driver = FrameDriver::new(field, Some(RasterSurface::new(800, 600, bg)));
//! let stop = driver.stop_handle();
//!
//! driver.run_for(60);
//! stop.stop();
//! assert!(driver.frame().is_none());
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use crate::input::HostEvent;
use crate::render::RenderStats;
use crate::scene::Scene;
use crate::surface::Surface;
use crate::time::FrameClock;
use crate::viewport::Viewport;

/// Cloneable cancellation flag for a [`FrameDriver`].
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the driver to stop before its next frame.
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Drives a [`Scene`] onto a [`Surface`].
pub struct FrameDriver<S: Scene, G: Surface> {
    scene: S,
    surface: Option<G>,
    stop: StopHandle,
    clock: FrameClock,
}

impl<S: Scene, G: Surface> FrameDriver<S, G> {
    /// Create a driver. Without a surface the driver is inert and every
    /// frame does nothing.
    pub fn new(scene: S, surface: Option<G>) -> Self {
        if surface.is_none() {
            debug!("no drawing surface, frame driver is inert");
        }
        Self {
            scene,
            surface,
            stop: StopHandle::new(),
            clock: FrameClock::new(),
        }
    }

    /// Run one frame: advance the scene, then draw it.
    ///
    /// Returns `None` without touching the scene when stopped or inert.
    pub fn frame(&mut self) -> Option<RenderStats> {
        if self.stop.is_stopped() {
            self.release();
            return None;
        }
        let surface = self.surface.as_mut()?;

        self.scene.step();
        let stats = self.scene.render(surface);

        if self.clock.tick() {
            debug!(
                fps = self.clock.fps(),
                frame = self.clock.frame(),
                circles = stats.circles,
                lines = stats.lines,
                "frame rate"
            );
        }
        Some(stats)
    }

    /// Forward a host event to the scene.
    pub fn handle(&mut self, event: HostEvent) {
        if !self.is_running() {
            return;
        }
        match event {
            HostEvent::Resized { width, height } => {
                self.scene.resize(Viewport::new(width, height));
            }
            HostEvent::PointerMoved(position) => self.scene.pointer_moved(position),
            HostEvent::PointerLeft => self.scene.pointer_left(),
            HostEvent::StopRequested => self.stop.stop(),
        }
    }

    /// Stop animating and hand back the surface.
    pub fn stop(&mut self) -> Option<G> {
        self.stop.stop();
        self.release()
    }

    fn release(&mut self) -> Option<G> {
        let surface = self.surface.take();
        if surface.is_some() {
            info!(frames = self.clock.frame(), "animation stopped");
        }
        surface
    }

    /// A handle that can stop this driver from elsewhere.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Whether frames will still be drawn.
    pub fn is_running(&self) -> bool {
        self.surface.is_some() && !self.stop.is_stopped()
    }

    /// Run up to `frames` frames back to back. Returns how many ran.
    pub fn run_for(&mut self, frames: u64) -> u64 {
        let mut ran = 0;
        while ran < frames && self.frame().is_some() {
            ran += 1;
        }
        ran
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.clock.frame()
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn surface(&self) -> Option<&G> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut G> {
        self.surface.as_mut()
    }
}
