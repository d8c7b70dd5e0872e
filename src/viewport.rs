//! Viewport dimensions and what happens to a field when they change.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The visible drawing area in pixels.
///
/// Negative and NaN dimensions are stored as zero, so an empty viewport
/// simply yields an empty field.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        let sane = |v: f32| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self {
            width: sane(width),
            height: sane(height),
        }
    }

    /// True when either dimension is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Width over height, or 1.0 for an empty viewport.
    pub fn aspect(&self) -> f32 {
        if self.is_empty() {
            1.0
        } else {
            self.width / self.height
        }
    }

    /// Whether `position` lies inside `[0, width] x [0, height]`.
    pub fn contains(&self, position: Vec2) -> bool {
        position.x >= 0.0 && position.x <= self.width && position.y >= 0.0 && position.y <= self.height
    }

    /// Clamp `position` into `[0, width] x [0, height]`.
    pub fn clamp(&self, position: Vec2) -> Vec2 {
        position.clamp(Vec2::ZERO, self.size())
    }
}

/// What a field does with its particles when the viewport is resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizePolicy {
    /// Throw the particles away and spawn the target count for the new size.
    ///
    /// Animation state is lost, but the count always tracks the breakpoint.
    #[default]
    Regenerate,

    /// Keep every particle and clamp its position into the new bounds.
    Clamp,

    /// Keep every particle; those left outside the new bounds are moved to
    /// a random position inside them.
    Scatter,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_dimensions_clamp_to_zero() {
        let v = Viewport::new(-10.0, f32::NAN);
        assert_eq!(v.width, 0.0);
        assert_eq!(v.height, 0.0);
        assert!(v.is_empty());
        assert_eq!(v.aspect(), 1.0);
    }

    #[test]
    fn test_clamp_and_contains() {
        let v = Viewport::new(200.0, 100.0);
        let p = v.clamp(Vec2::new(250.0, -5.0));
        assert_eq!(p, Vec2::new(200.0, 0.0));
        assert!(v.contains(p));
        assert!(!v.contains(Vec2::new(200.5, 50.0)));
    }

    #[test]
    fn test_resize_policy_serde() {
        let p: ResizePolicy = serde_json::from_str("\"scatter\"").unwrap();
        assert_eq!(p, ResizePolicy::Scatter);
    }
}
