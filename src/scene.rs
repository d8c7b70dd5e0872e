//! The interface the frame driver animates.

use glam::Vec2;

use crate::render::RenderStats;
use crate::surface::Surface;
use crate::viewport::Viewport;

/// Something that advances once per frame and can draw itself.
///
/// The driver always calls [`Scene::step`] before [`Scene::render`] within a
/// frame, so a rendered frame reflects fully advanced state.
pub trait Scene {
    /// Advance the simulation by one frame tick.
    fn step(&mut self);

    /// Clear `surface` and draw the current state.
    fn render(&self, surface: &mut dyn Surface) -> RenderStats;

    /// The drawing area changed size.
    fn resize(&mut self, viewport: Viewport);

    /// The pointer moved to `position` (viewport pixels).
    fn pointer_moved(&mut self, _position: Vec2) {}

    /// The pointer left the drawing area.
    fn pointer_left(&mut self) {}
}

impl<S: Scene + ?Sized> Scene for Box<S> {
    fn step(&mut self) {
        (**self).step()
    }

    fn render(&self, surface: &mut dyn Surface) -> RenderStats {
        (**self).render(surface)
    }

    fn resize(&mut self, viewport: Viewport) {
        (**self).resize(viewport)
    }

    fn pointer_moved(&mut self, position: Vec2) {
        (**self).pointer_moved(position)
    }

    fn pointer_left(&mut self) {
        (**self).pointer_left()
    }
}
