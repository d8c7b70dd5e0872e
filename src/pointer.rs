//! Cursor influence on particles.
//!
//! When the pointer moves, particles within [`PointerInfluence::radius`]
//! get a single velocity nudge along the line from the cursor. The nudge
//! is applied once per pointer event; there is no persistent force field.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::particle::Particle;

/// Direction of the nudge relative to the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerMode {
    /// Push particles away from the cursor.
    #[default]
    Repel,
    /// Pull particles toward the cursor.
    Attract,
}

/// Pointer nudge parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerInfluence {
    /// Particles strictly closer than this are affected.
    pub radius: f32,
    /// Velocity added per nudge, in pixels per frame.
    pub force: f32,
    #[serde(default)]
    pub mode: PointerMode,
    /// Cap on a nudged particle's speed.
    #[serde(default)]
    pub speed_limit: Option<f32>,
}

impl PointerInfluence {
    /// Nudge every particle near `cursor`. Returns how many were touched.
    pub fn apply(&self, particles: &mut [Particle], cursor: Vec2) -> usize {
        let sign = match self.mode {
            PointerMode::Repel => 1.0,
            PointerMode::Attract => -1.0,
        };

        let mut nudged = 0;
        for particle in particles.iter_mut() {
            let offset = particle.position - cursor;
            if offset.length() >= self.radius {
                continue;
            }

            let angle = offset.y.atan2(offset.x);
            particle.velocity += Vec2::from_angle(angle) * self.force * sign;
            if let Some(limit) = self.speed_limit {
                particle.velocity = particle.velocity.clamp_length_max(limit.max(0.0));
            }
            nudged += 1;
        }
        nudged
    }
}
