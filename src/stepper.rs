//! Per-frame particle motion.
//!
//! Every frame each particle moves by exactly its velocity; there is no
//! delta time and no randomness after spawn. What happens at the viewport
//! edges is chosen by a [`BoundaryPolicy`]:
//!
//! | Policy | Edge behavior | Positions stay within |
//! |--------|---------------|-----------------------|
//! | [`BoundaryPolicy::Wrap`] | teleport to the opposite edge, offset by size | `[-size, dim + size]` |
//! | [`BoundaryPolicy::Reflect`] | clamp and send the velocity back inward | `[0, dim]` |

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::particle::Particle;
use crate::viewport::Viewport;

/// Edge behavior for particles leaving the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Toroidal space. A particle fully past one edge reappears just
    /// outside the opposite one, so it slides back into view.
    #[default]
    Wrap,

    /// Solid walls. Crossing an edge clamps the position onto it and
    /// reverses that velocity component.
    Reflect,
}

impl BoundaryPolicy {
    /// Advance one particle by one frame tick.
    pub fn advance(self, particle: &mut Particle, viewport: Viewport) {
        particle.position += particle.velocity;

        match self {
            BoundaryPolicy::Wrap => {
                let size = particle.size;
                let p = &mut particle.position;
                if p.x < -size {
                    p.x = viewport.width + size;
                } else if p.x > viewport.width + size {
                    p.x = -size;
                }
                if p.y < -size {
                    p.y = viewport.height + size;
                } else if p.y > viewport.height + size {
                    p.y = -size;
                }
            }
            BoundaryPolicy::Reflect => {
                let (p, v) = (&mut particle.position, &mut particle.velocity);
                // Velocity always points back inward after a wall hit.
                if p.x < 0.0 {
                    p.x = 0.0;
                    v.x = v.x.abs();
                } else if p.x > viewport.width {
                    p.x = viewport.width;
                    v.x = -v.x.abs();
                }
                if p.y < 0.0 {
                    p.y = 0.0;
                    v.y = v.y.abs();
                } else if p.y > viewport.height {
                    p.y = viewport.height;
                    v.y = -v.y.abs();
                }
            }
        }
    }

    /// Whether `particle` lies inside the box this policy guarantees.
    pub fn contains(self, particle: &Particle, viewport: Viewport) -> bool {
        let (min, max) = self.extent(particle.size, viewport);
        let p = particle.position;
        p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
    }

    /// The `(min, max)` corners positions are kept within.
    pub fn extent(self, size: f32, viewport: Viewport) -> (Vec2, Vec2) {
        match self {
            BoundaryPolicy::Wrap => (Vec2::splat(-size), viewport.size() + Vec2::splat(size)),
            BoundaryPolicy::Reflect => (Vec2::ZERO, viewport.size()),
        }
    }
}

/// Advance every particle by one frame tick.
pub fn advance_all(particles: &mut [Particle], viewport: Viewport, policy: BoundaryPolicy) {
    for particle in particles.iter_mut() {
        policy.advance(particle, viewport);
    }
}
