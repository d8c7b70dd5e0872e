//! Proximity rendering: particles as circles, close pairs as lines.

use glam::Vec2;

use crate::connections::{connections, ConnectionStyle};
use crate::particle::Particle;
use crate::surface::Surface;
use crate::viewport::Viewport;

/// What one frame put on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    pub circles: usize,
    pub lines: usize,
}

/// Draw one frame of a particle field.
///
/// Clears the surface, fills one circle per particle (radius = size, alpha =
/// opacity), then strokes one line per connected pair. The pair pass is
/// O(n²); see [`crate::connections`].
pub fn render(
    particles: &[Particle],
    viewport: Viewport,
    style: &ConnectionStyle,
    surface: &mut dyn Surface,
) -> RenderStats {
    render_displaced(particles, &[], viewport, style, surface)
}

/// [`render`], with circle `i` drawn at `position + offsets[i]`.
///
/// Missing offsets count as zero. Lines still join the undisplaced
/// positions.
pub fn render_displaced(
    particles: &[Particle],
    offsets: &[Vec2],
    viewport: Viewport,
    style: &ConnectionStyle,
    surface: &mut dyn Surface,
) -> RenderStats {
    surface.clear(viewport.width, viewport.height);

    for (i, particle) in particles.iter().enumerate() {
        let offset = offsets.get(i).copied().unwrap_or(Vec2::ZERO);
        surface.fill_circle(particle.position + offset, particle.size, particle.fill());
    }

    let mut lines = 0;
    for connection in connections(particles, style) {
        surface.stroke_line(
            connection.from,
            connection.to,
            connection.width,
            connection.color(style),
        );
        lines += 1;
    }

    RenderStats {
        circles: particles.len(),
        lines,
    }
}
