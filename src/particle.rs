//! The particle record.

use glam::Vec2;

use crate::visuals::Rgba;

/// A simulated point drifting across the viewport.
///
/// Particles have no identity beyond their index in the field. They are
/// created by [`crate::spawn::create`], moved once per frame by the stepper
/// and thrown away when the field is regenerated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position in viewport pixels, origin top-left.
    pub position: Vec2,
    /// Displacement per frame tick.
    pub velocity: Vec2,
    /// Radius of the drawn circle.
    pub size: f32,
    pub color: Rgba,
    /// Opacity applied on top of `color`.
    pub opacity: f32,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, size: f32, color: Rgba, opacity: f32) -> Self {
        Self {
            position,
            velocity,
            size,
            color,
            opacity,
        }
    }

    /// Color with the particle's opacity folded into alpha.
    #[inline]
    pub fn fill(&self) -> Rgba {
        self.color.with_alpha(self.color.a * self.opacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_uses_opacity() {
        let p = Particle::new(Vec2::ZERO, Vec2::ZERO, 2.0, Rgba::WHITE, 0.25);
        assert_eq!(p.fill().a, 0.25);
        assert_eq!(p.fill().r, 1.0);
    }
}
