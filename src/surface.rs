//! The drawing capability scenes render into.
//!
//! A [`Surface`] only has to clear itself, fill circles and stroke lines.
//! Three implementations ship with the crate:
//!
//! - [`RecordingSurface`] - keeps the draw calls (tests, inspection)
//! - [`crate::raster::RasterSurface`] - CPU rasterizer with PNG export
//! - [`crate::gpu::GpuSurface`] - batched wgpu renderer for the window

use glam::Vec2;

use crate::visuals::Rgba;

/// Minimal 2D raster drawing target.
///
/// Coordinates are viewport pixels with the origin at the top-left.
pub trait Surface {
    /// Erase everything drawn so far. `width` and `height` are the current
    /// viewport extent.
    fn clear(&mut self, width: f32, height: f32);

    /// Fill a circle.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);

    /// Stroke a straight line segment.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn clear(&mut self, width: f32, height: f32) {
        (**self).clear(width, height)
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        (**self).fill_circle(center, radius, color)
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        (**self).stroke_line(from, to, width, color)
    }
}

/// A single recorded draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f32,
        height: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Rgba,
    },
}

/// Surface that records what was drawn since the last clear.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    clears: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw calls since the last clear, starting with the clear itself.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Total number of clears, i.e. frames started.
    pub fn clears(&self) -> usize {
        self.clears
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { width, height });
        self.clears += 1;
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }
}
