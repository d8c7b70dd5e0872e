//! Connection lines between nearby particles.
//!
//! A connection is never stored. It is derived each frame for every
//! unordered pair of particles closer than [`ConnectionStyle::distance`],
//! drawn, and forgotten.
//!
//! # Complexity
//!
//! [`connections`] compares every pair, which is O(n²) per frame. At the
//! counts backdrops use (50 to a few hundred particles) that is a few tens
//! of thousands of distance checks and needs no spatial index. Fields in
//! the thousands would want a uniform grid with `distance`-sized cells.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::particle::Particle;
use crate::visuals::Rgba;

/// How connection lines look.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionStyle {
    /// Pairs closer than this are connected.
    pub distance: f32,
    /// Opacity of a line between coincident particles.
    pub opacity_scale: f32,
    /// Line width at zero distance.
    pub width_base: f32,
    /// Width added per unit of distance.
    pub width_per_unit: f32,
    /// Line color; alpha is replaced by the distance-based opacity.
    pub color: Rgba,
}

impl Default for ConnectionStyle {
    fn default() -> Self {
        Self {
            distance: 150.0,
            opacity_scale: 0.1,
            width_base: 0.5,
            width_per_unit: 0.0,
            color: Rgba::rgb8(250, 156, 30),
        }
    }
}

impl ConnectionStyle {
    /// Line opacity for two particles `distance` apart.
    ///
    /// Falls linearly from `opacity_scale` at zero to exactly zero at the
    /// threshold and stays zero beyond it.
    pub fn opacity(&self, distance: f32) -> f32 {
        if self.distance <= 0.0 || distance >= self.distance {
            return 0.0;
        }
        self.opacity_scale * (1.0 - distance / self.distance)
    }

    /// Line width for two particles `distance` apart.
    #[inline]
    pub fn width(&self, distance: f32) -> f32 {
        self.width_base + self.width_per_unit * distance
    }

    #[inline]
    pub fn connects(&self, distance: f32) -> bool {
        distance < self.distance
    }
}

/// One line to draw this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    /// Index of the first particle; always less than `b`.
    pub a: usize,
    pub b: usize,
    pub from: Vec2,
    pub to: Vec2,
    pub distance: f32,
    pub opacity: f32,
    pub width: f32,
}

impl Connection {
    /// The connection between particles `i` and `j`, if they are close enough.
    ///
    /// The result does not depend on argument order: the lower index is
    /// always `a` and its position is always `from`.
    pub fn between(
        i: usize,
        pi: &Particle,
        j: usize,
        pj: &Particle,
        style: &ConnectionStyle,
    ) -> Option<Connection> {
        if i == j {
            return None;
        }
        let ((a, pa), (b, pb)) = if i < j { ((i, pi), (j, pj)) } else { ((j, pj), (i, pi)) };

        let distance = pa.position.distance(pb.position);
        if !style.connects(distance) {
            return None;
        }

        Some(Connection {
            a,
            b,
            from: pa.position,
            to: pb.position,
            distance,
            opacity: style.opacity(distance),
            width: style.width(distance),
        })
    }

    /// Stroke color for this line.
    #[inline]
    pub fn color(&self, style: &ConnectionStyle) -> Rgba {
        style.color.with_alpha(self.opacity)
    }
}

/// Every connection among `particles`, ordered by `(a, b)`.
pub fn connections<'a>(
    particles: &'a [Particle],
    style: &'a ConnectionStyle,
) -> impl Iterator<Item = Connection> + 'a {
    particles.iter().enumerate().flat_map(move |(i, pi)| {
        particles[i + 1..]
            .iter()
            .enumerate()
            .filter_map(move |(k, pj)| Connection::between(i, pi, i + 1 + k, pj, style))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f32, y: f32) -> Particle {
        Particle::new(Vec2::new(x, y), Vec2::ZERO, 1.0, Rgba::WHITE, 1.0)
    }

    #[test]
    fn test_opacity_endpoints() {
        let style = ConnectionStyle::default();
        assert!((style.opacity(0.0) - 0.1).abs() < 1e-6);
        assert_eq!(style.opacity(150.0), 0.0);
        assert_eq!(style.opacity(400.0), 0.0);
    }

    #[test]
    fn test_opacity_monotonic() {
        let style = ConnectionStyle::default();
        let mut last = style.opacity(0.0);
        for step in 1..=150 {
            let o = style.opacity(step as f32);
            assert!(o <= last);
            last = o;
        }
    }

    #[test]
    fn test_zero_threshold_never_connects() {
        let style = ConnectionStyle {
            distance: 0.0,
            ..Default::default()
        };
        assert_eq!(style.opacity(0.0), 0.0);
        let ps = [at(0.0, 0.0), at(0.0, 0.0)];
        assert_eq!(connections(&ps, &style).count(), 0);
    }

    #[test]
    fn test_width_grows_with_distance() {
        let style = ConnectionStyle {
            width_base: 0.5,
            width_per_unit: 0.01,
            ..Default::default()
        };
        assert_eq!(style.width(0.0), 0.5);
        assert!((style.width(100.0) - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_between_is_symmetric() {
        let style = ConnectionStyle::default();
        let p = at(10.0, 10.0);
        let q = at(40.0, 50.0);
        let ab = Connection::between(3, &p, 7, &q, &style).unwrap();
        let ba = Connection::between(7, &q, 3, &p, &style).unwrap();
        assert_eq!(ab, ba);
        assert_eq!(ab.a, 3);
        assert_eq!(ab.from, p.position);
        assert!((ab.distance - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_between_self_is_none() {
        let style = ConnectionStyle::default();
        let p = at(0.0, 0.0);
        assert!(Connection::between(1, &p, 1, &p, &style).is_none());
    }

    #[test]
    fn test_connections_threshold_is_strict() {
        let style = ConnectionStyle {
            distance: 50.0,
            ..Default::default()
        };
        let ps = [at(0.0, 0.0), at(50.0, 0.0), at(0.0, 49.0), at(500.0, 500.0)];
        let found: Vec<(usize, usize)> = connections(&ps, &style).map(|c| (c.a, c.b)).collect();
        assert_eq!(found, vec![(0, 2)]);
    }

    #[test]
    fn test_connections_visit_each_pair_once() {
        let style = ConnectionStyle::default();
        let ps: Vec<Particle> = (0..6).map(|i| at(i as f32, 0.0)).collect();
        // All within range: 6 choose 2.
        assert_eq!(connections(&ps, &style).count(), 15);
    }
}
