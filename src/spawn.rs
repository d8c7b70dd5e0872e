//! Particle creation.
//!
//! [`create`] fills a viewport with randomly placed particles. All
//! randomness comes from the RNG passed in, so a seeded [`SmallRng`] gives
//! the same field every run:
//!
//! ```ignore
//! let mut rng = SmallRng::seed_from_u64(42);
//! let particles = spawn::create(80, Viewport::new(1280.0, 720.0), &config, &mut rng);
//! ```
//!
//! [`SmallRng`]: rand::rngs::SmallRng

use glam::Vec2;
use rand::Rng;

use crate::config::FieldConfig;
use crate::particle::Particle;
use crate::viewport::Viewport;
use crate::visuals::Rgba;

/// Random helpers bound to one viewport and config.
pub struct SpawnContext<'a, R: Rng + ?Sized> {
    /// Area particles are placed in.
    pub viewport: Viewport,
    config: &'a FieldConfig,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> SpawnContext<'a, R> {
    pub fn new(viewport: Viewport, config: &'a FieldConfig, rng: &'a mut R) -> Self {
        Self {
            viewport,
            config,
            rng,
        }
    }

    /// Uniform point in `[0, width) x [0, height)`.
    pub fn random_position(&mut self) -> Vec2 {
        Vec2::new(
            self.rng.gen::<f32>() * self.viewport.width,
            self.rng.gen::<f32>() * self.viewport.height,
        )
    }

    /// Per-axis speed from the configured range with a random sign on each axis.
    pub fn random_velocity(&mut self) -> Vec2 {
        let x = self.signed_speed();
        let y = self.signed_speed();
        Vec2::new(x, y)
    }

    fn signed_speed(&mut self) -> f32 {
        let speed = self.config.speed.sample(&mut *self.rng);
        if self.rng.gen::<bool>() {
            -speed
        } else {
            speed
        }
    }

    pub fn random_size(&mut self) -> f32 {
        self.config.size.sample(&mut *self.rng)
    }

    pub fn random_opacity(&mut self) -> f32 {
        self.config.opacity.sample(&mut *self.rng)
    }

    /// Uniform pick from the palette, white if it is empty.
    pub fn random_color(&mut self) -> Rgba {
        let palette = &self.config.palette;
        if palette.is_empty() {
            return Rgba::WHITE;
        }
        palette[self.rng.gen_range(0..palette.len())]
    }

    /// A complete random particle.
    pub fn particle(&mut self) -> Particle {
        let position = self.random_position();
        let velocity = self.random_velocity();
        let size = self.random_size();
        let color = self.random_color();
        let opacity = self.random_opacity();
        Particle::new(position, velocity, size, color, opacity)
    }
}

/// Create `count` particles inside `viewport`.
pub fn create<R: Rng + ?Sized>(
    count: usize,
    viewport: Viewport,
    config: &FieldConfig,
    rng: &mut R,
) -> Vec<Particle> {
    let mut ctx = SpawnContext::new(viewport, config, rng);
    (0..count).map(|_| ctx.particle()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_create_count_and_bounds() {
        let config = FieldConfig::ember();
        let viewport = Viewport::new(320.0, 200.0);
        let mut rng = SmallRng::seed_from_u64(3);
        let ps = create(500, viewport, &config, &mut rng);

        assert_eq!(ps.len(), 500);
        for p in &ps {
            assert!(viewport.contains(p.position));
            assert!(config.speed.contains(p.velocity.x.abs()));
            assert!(config.speed.contains(p.velocity.y.abs()));
            assert!(config.size.contains(p.size));
            assert!(config.opacity.contains(p.opacity));
            assert!(config.palette.contains(&p.color));
        }
    }

    #[test]
    fn test_create_is_deterministic_for_seed() {
        let config = FieldConfig::circuit();
        let viewport = Viewport::new(800.0, 600.0);
        let a = create(50, viewport, &config, &mut SmallRng::seed_from_u64(11));
        let b = create(50, viewport, &config, &mut SmallRng::seed_from_u64(11));
        let c = create(50, viewport, &config, &mut SmallRng::seed_from_u64(12));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_velocity_signs_vary() {
        let config = FieldConfig::ember();
        let mut rng = SmallRng::seed_from_u64(5);
        let ps = create(200, Viewport::new(100.0, 100.0), &config, &mut rng);
        assert!(ps.iter().any(|p| p.velocity.x < 0.0));
        assert!(ps.iter().any(|p| p.velocity.x > 0.0));
        assert!(ps.iter().any(|p| p.velocity.y < 0.0));
        assert!(ps.iter().any(|p| p.velocity.y > 0.0));
    }

    #[test]
    fn test_mean_position_near_center() {
        let config = FieldConfig::ember();
        let viewport = Viewport::new(1000.0, 500.0);
        let mut rng = SmallRng::seed_from_u64(99);
        let ps = create(4000, viewport, &config, &mut rng);
        let mean = ps.iter().map(|p| p.position).sum::<Vec2>() / ps.len() as f32;
        assert!((mean.x - 500.0).abs() < 40.0);
        assert!((mean.y - 250.0).abs() < 20.0);
    }

    #[test]
    fn test_empty_palette_is_white() {
        let config = FieldConfig::ember().with_colors(Vec::new());
        let mut rng = SmallRng::seed_from_u64(0);
        let ps = create(5, Viewport::new(10.0, 10.0), &config, &mut rng);
        assert!(ps.iter().all(|p| p.color == Rgba::WHITE));
    }

    #[test]
    fn test_empty_viewport_places_at_origin() {
        let config = FieldConfig::ember();
        let mut rng = SmallRng::seed_from_u64(0);
        let ps = create(3, Viewport::new(0.0, 0.0), &config, &mut rng);
        assert!(ps.iter().all(|p| p.position == Vec2::ZERO));
    }
}
