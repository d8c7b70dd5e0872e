//! The particle field: particles, viewport and config as one owned object.
//!
//! ```ignore
//! let mut field = ParticleField::new(FieldConfig::circuit(), Viewport::new(1280.0, 720.0));
//! let mut surface = RecordingSurface::new();
//!
//! field.step();
//! field.render(&mut surface);
//! field.resize(Viewport::new(600.0, 900.0)); // below 768px: 50 particles
//! ```

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::FieldConfig;
use crate::connections::{connections, Connection};
use crate::particle::Particle;
use crate::render::{render_displaced, RenderStats};
use crate::scene::Scene;
use crate::spawn;
use crate::stepper::advance_all;
use crate::surface::Surface;
use crate::viewport::{ResizePolicy, Viewport};

/// A drifting particle field with proximity connections.
pub struct ParticleField {
    config: FieldConfig,
    viewport: Viewport,
    particles: Vec<Particle>,
    /// Render-time parallax displacement per particle.
    offsets: Vec<Vec2>,
    rng: SmallRng,
}

impl ParticleField {
    /// Spawn the target count of particles for `viewport`.
    ///
    /// Uses `config.seed` when set, entropy otherwise.
    pub fn new(config: FieldConfig, viewport: Viewport) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let mut field = Self {
            config,
            viewport,
            particles: Vec::new(),
            offsets: Vec::new(),
            rng,
        };
        field.regenerate();
        field
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access for callers that place particles by hand.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Current parallax displacement of each particle, empty when none.
    pub fn offsets(&self) -> &[Vec2] {
        &self.offsets
    }

    /// Connections between the current particle positions.
    pub fn connections(&self) -> impl Iterator<Item = Connection> + '_ {
        connections(&self.particles, &self.config.connections)
    }

    /// Advance every particle by one frame tick.
    pub fn step(&mut self) {
        advance_all(&mut self.particles, self.viewport, self.config.boundary);
    }

    /// Draw the current state onto `surface`.
    pub fn render(&self, surface: &mut dyn Surface) -> RenderStats {
        render_displaced(
            &self.particles,
            &self.offsets,
            self.viewport,
            &self.config.connections,
            surface,
        )
    }

    /// Adopt new viewport dimensions according to the resize policy.
    pub fn resize(&mut self, viewport: Viewport) {
        let previous = self.viewport;
        self.viewport = viewport;

        if viewport.is_empty() {
            self.particles.clear();
            self.offsets.clear();
        } else if previous.is_empty() {
            // Nothing survived the empty viewport.
            self.regenerate();
        } else {
            self.apply_resize_policy(viewport);
        }

        debug!(
            from_width = previous.width,
            from_height = previous.height,
            width = viewport.width,
            height = viewport.height,
            particles = self.particles.len(),
            policy = ?self.config.resize,
            "field resized"
        );
    }

    fn apply_resize_policy(&mut self, viewport: Viewport) {
        match self.config.resize {
            ResizePolicy::Regenerate => self.regenerate(),
            ResizePolicy::Clamp => {
                for p in &mut self.particles {
                    p.position = viewport.clamp(p.position);
                }
            }
            ResizePolicy::Scatter => {
                for p in &mut self.particles {
                    if p.position.x > viewport.width {
                        p.position.x = self.rng.gen::<f32>() * viewport.width;
                    }
                    if p.position.y > viewport.height {
                        p.position.y = self.rng.gen::<f32>() * viewport.height;
                    }
                }
            }
        }
    }

    /// Apply the pointer nudge and parallax, if this field has them
    /// configured. Returns how many particles were nudged.
    pub fn pointer_moved(&mut self, position: Vec2) -> usize {
        self.update_parallax(position);
        match &self.config.pointer {
            Some(pointer) => pointer.apply(&mut self.particles, position),
            None => 0,
        }
    }

    /// Drop the parallax displacement.
    pub fn pointer_left(&mut self) {
        self.offsets.clear();
    }

    /// Displace each particle by `(pointer - center) / center * parallax`,
    /// scaled per axis by a fresh random factor. Positions are untouched.
    fn update_parallax(&mut self, pointer: Vec2) {
        let strength = self.config.parallax;
        if strength <= 0.0 || self.viewport.is_empty() {
            self.offsets.clear();
            return;
        }
        let center = self.viewport.size() * 0.5;
        let pull = (pointer - center) / center * strength;
        let rng = &mut self.rng;
        self.offsets = self
            .particles
            .iter()
            .map(|_| pull * Vec2::new(rng.gen::<f32>(), rng.gen::<f32>()))
            .collect();
    }

    /// Discard all particles and spawn the target count for the viewport.
    pub fn regenerate(&mut self) {
        let count = self.config.particle_count(self.viewport);
        self.particles = spawn::create(count, self.viewport, &self.config, &mut self.rng);
        self.offsets.clear();
    }
}

impl Scene for ParticleField {
    fn step(&mut self) {
        ParticleField::step(self)
    }

    fn render(&self, surface: &mut dyn Surface) -> RenderStats {
        ParticleField::render(self, surface)
    }

    fn resize(&mut self, viewport: Viewport) {
        ParticleField::resize(self, viewport)
    }

    fn pointer_moved(&mut self, position: Vec2) {
        ParticleField::pointer_moved(self, position);
    }

    fn pointer_left(&mut self) {
        ParticleField::pointer_left(self)
    }
}
