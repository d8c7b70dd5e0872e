//! Field configuration and config files.
//!
//! Every constant that used to differ between copies of the backdrop
//! (counts, speeds, colors, thresholds, edge behavior) lives in one
//! [`FieldConfig`]. Configs can be built in code:
//!
//! ```ignore
//! let config = FieldConfig::circuit()
//!     .with_counts(120, 60)
//!     .with_connect_distance(120.0)
//!     .with_seed(7);
//! ```
//!
//! or loaded from JSON through [`Backdrop`]:
//!
//! ```json
//! {
//!     "scene": "field",
//!     "desktop_count": 100,
//!     "mobile_count": 50,
//!     "boundary": "reflect",
//!     "palette": ["#3b82f6", "#8b5cf6"],
//!     "connections": { "distance": 150.0, "opacity_scale": 0.4 }
//! }
//! ```
//!
//! Missing keys take the [`FieldConfig::ember`] defaults.

use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cloud::{CloudConfig, ShellCloud};
use crate::connections::ConnectionStyle;
use crate::error::ConfigError;
use crate::field::ParticleField;
use crate::pointer::{PointerInfluence, PointerMode};
use crate::scene::Scene;
use crate::stepper::BoundaryPolicy;
use crate::viewport::{ResizePolicy, Viewport};
use crate::visuals::{Palette, Rgba};

/// An inclusive `min..=max` range of floats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// A uniform sample. A degenerate span always yields `min`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        self.min + (self.max - self.min) * rng.gen::<f32>()
    }

    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    pub(crate) fn check(&self, name: &str) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ConfigError::Invalid(format!("{} must be finite", name)));
        }
        if self.min < 0.0 {
            return Err(ConfigError::Invalid(format!("{}.min must not be negative", name)));
        }
        if self.min > self.max {
            return Err(ConfigError::Invalid(format!(
                "{}.min ({}) is greater than {}.max ({})",
                name, self.min, name, self.max
            )));
        }
        Ok(())
    }
}

/// Everything that shapes a particle field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Particle count at or above the breakpoint.
    pub desktop_count: u32,
    /// Particle count below the breakpoint.
    pub mobile_count: u32,
    /// Viewport width under which `mobile_count` applies.
    pub mobile_breakpoint: f32,
    /// Circle radius range.
    pub size: Span,
    /// Per-axis speed magnitude range, in pixels per frame.
    pub speed: Span,
    pub opacity: Span,
    /// Colors particles are drawn from. Empty means white.
    pub palette: Vec<Rgba>,
    pub background: Rgba,
    pub boundary: BoundaryPolicy,
    pub resize: ResizePolicy,
    pub connections: ConnectionStyle,
    pub pointer: Option<PointerInfluence>,
    /// Peak render-time shift toward the pointer, in pixels. Zero disables.
    pub parallax: f32,
    /// Fixed seed for reproducible fields. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self::ember()
    }
}

impl FieldConfig {
    /// Warm drifting embers that wrap around the screen.
    pub fn ember() -> Self {
        Self {
            desktop_count: 80,
            mobile_count: 40,
            mobile_breakpoint: 768.0,
            size: Span::new(1.0, 4.0),
            speed: Span::new(0.2, 0.8),
            opacity: Span::new(0.2, 0.8),
            palette: Palette::Ember.colors(),
            background: Rgba::rgb8(0x0b, 0x0e, 0x1a),
            boundary: BoundaryPolicy::Wrap,
            resize: ResizePolicy::Scatter,
            connections: ConnectionStyle {
                distance: 150.0,
                opacity_scale: 0.1,
                width_base: 0.5,
                width_per_unit: 0.0,
                color: Rgba::rgb8(250, 156, 30),
            },
            pointer: None,
            parallax: 3.0,
            seed: None,
        }
    }

    /// A bouncing network that shies away from the cursor.
    pub fn circuit() -> Self {
        Self {
            desktop_count: 100,
            mobile_count: 50,
            mobile_breakpoint: 768.0,
            size: Span::new(1.0, 3.0),
            speed: Span::new(0.1, 0.5),
            opacity: Span::new(0.4, 0.9),
            palette: Palette::Circuit.colors(),
            background: Rgba::rgb8(0x0f, 0x17, 0x2a),
            boundary: BoundaryPolicy::Reflect,
            resize: ResizePolicy::Regenerate,
            connections: ConnectionStyle {
                distance: 150.0,
                opacity_scale: 0.5,
                width_base: 0.3,
                width_per_unit: 0.004,
                color: Rgba::rgb8(0x63, 0x66, 0xf1),
            },
            pointer: Some(PointerInfluence {
                radius: 120.0,
                force: 0.6,
                mode: PointerMode::Repel,
                speed_limit: Some(3.0),
            }),
            parallax: 0.0,
            seed: None,
        }
    }

    /// Target particle count for a viewport.
    pub fn particle_count(&self, viewport: Viewport) -> usize {
        if viewport.is_empty() {
            0
        } else if viewport.width < self.mobile_breakpoint {
            self.mobile_count as usize
        } else {
            self.desktop_count as usize
        }
    }

    /// Reject values the field cannot draw sensibly.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.size.check("size")?;
        self.speed.check("speed")?;
        self.opacity.check("opacity")?;
        if self.opacity.max > 1.0 {
            return Err(ConfigError::Invalid("opacity.max must not exceed 1.0".into()));
        }
        if !(self.mobile_breakpoint >= 0.0) {
            return Err(ConfigError::Invalid("mobile_breakpoint must not be negative".into()));
        }
        let c = &self.connections;
        if !(c.distance >= 0.0) || !(c.width_base >= 0.0) || !(c.opacity_scale >= 0.0) {
            return Err(ConfigError::Invalid(
                "connections.distance, width_base and opacity_scale must not be negative".into(),
            ));
        }
        if !(self.parallax >= 0.0) || !self.parallax.is_finite() {
            return Err(ConfigError::Invalid("parallax must be finite and not negative".into()));
        }
        if let Some(pointer) = &self.pointer {
            if !(pointer.radius >= 0.0) {
                return Err(ConfigError::Invalid("pointer.radius must not be negative".into()));
            }
        }
        Ok(())
    }

    // ========== Builder ==========

    pub fn with_counts(mut self, desktop: u32, mobile: u32) -> Self {
        self.desktop_count = desktop;
        self.mobile_count = mobile;
        self
    }

    pub fn with_breakpoint(mut self, width: f32) -> Self {
        self.mobile_breakpoint = width;
        self
    }

    pub fn with_size(mut self, min: f32, max: f32) -> Self {
        self.size = Span::new(min, max);
        self
    }

    pub fn with_speed(mut self, min: f32, max: f32) -> Self {
        self.speed = Span::new(min, max);
        self
    }

    pub fn with_opacity(mut self, min: f32, max: f32) -> Self {
        self.opacity = Span::new(min, max);
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette.colors();
        self
    }

    pub fn with_colors(mut self, colors: Vec<Rgba>) -> Self {
        self.palette = colors;
        self
    }

    pub fn with_background(mut self, color: Rgba) -> Self {
        self.background = color;
        self
    }

    pub fn with_boundary(mut self, policy: BoundaryPolicy) -> Self {
        self.boundary = policy;
        self
    }

    pub fn with_resize(mut self, policy: ResizePolicy) -> Self {
        self.resize = policy;
        self
    }

    pub fn with_connections(mut self, style: ConnectionStyle) -> Self {
        self.connections = style;
        self
    }

    pub fn with_connect_distance(mut self, distance: f32) -> Self {
        self.connections.distance = distance;
        self
    }

    pub fn with_pointer(mut self, pointer: Option<PointerInfluence>) -> Self {
        self.pointer = pointer;
        self
    }

    pub fn with_parallax(mut self, pixels: f32) -> Self {
        self.parallax = pixels;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Root of a config file: which scene to show, and its settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scene", rename_all = "snake_case")]
pub enum Backdrop {
    /// 2D drifting particles with connection lines.
    Field(FieldConfig),
    /// Rotating 3D shell of points.
    Cloud(CloudConfig),
}

impl Backdrop {
    /// A built-in preset by name: `ember`, `circuit` or `cloud`.
    pub fn preset(name: &str) -> Option<Backdrop> {
        match name {
            "ember" => Some(Backdrop::Field(FieldConfig::ember())),
            "circuit" => Some(Backdrop::Field(FieldConfig::circuit())),
            "cloud" => Some(Backdrop::Cloud(CloudConfig::default())),
            _ => None,
        }
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Backdrop, ConfigError> {
        let backdrop: Backdrop = serde_json::from_str(json)?;
        backdrop.validate()?;
        Ok(backdrop)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Backdrop, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Backdrop::Field(config) => config.validate(),
            Backdrop::Cloud(config) => config.validate(),
        }
    }

    /// Override the seed of whichever scene this is.
    pub fn with_seed(mut self, seed: u64) -> Self {
        match &mut self {
            Backdrop::Field(config) => config.seed = Some(seed),
            Backdrop::Cloud(config) => config.seed = Some(seed),
        }
        self
    }

    /// Color to clear the surface with.
    pub fn background(&self) -> Rgba {
        match self {
            Backdrop::Field(config) => config.background,
            Backdrop::Cloud(config) => config.background,
        }
    }

    /// Instantiate the scene for a viewport.
    pub fn build(&self, viewport: Viewport) -> Box<dyn Scene> {
        match self {
            Backdrop::Field(config) => Box::new(ParticleField::new(config.clone(), viewport)),
            Backdrop::Cloud(config) => Box::new(ShellCloud::new(config.clone(), viewport)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_particle_count_breakpoint() {
        let config = FieldConfig::circuit();
        assert_eq!(config.particle_count(Viewport::new(1024.0, 768.0)), 100);
        assert_eq!(config.particle_count(Viewport::new(768.0, 1024.0)), 100);
        assert_eq!(config.particle_count(Viewport::new(767.0, 1024.0)), 50);
        assert_eq!(config.particle_count(Viewport::new(0.0, 600.0)), 0);
        assert_eq!(config.particle_count(Viewport::new(-5.0, 600.0)), 0);
    }

    #[test]
    fn test_span_sample_degenerate() {
        let mut rng = SmallRng::seed_from_u64(1);
        let span = Span::new(0.5, 0.5);
        for _ in 0..10 {
            assert_eq!(span.sample(&mut rng), 0.5);
        }
    }

    #[test]
    fn test_presets_validate() {
        assert!(FieldConfig::ember().validate().is_ok());
        assert!(FieldConfig::circuit().validate().is_ok());
    }

    #[test]
    fn test_inverted_span_rejected() {
        let config = FieldConfig::ember().with_speed(2.0, 1.0);
        match config.validate() {
            Err(ConfigError::Invalid(msg)) => assert!(msg.contains("speed")),
            other => panic!("expected invalid config, got {:?}", other),
        }
    }

    #[test]
    fn test_backdrop_from_partial_json() {
        let json = r##"{
            "scene": "field",
            "desktop_count": 12,
            "boundary": "reflect",
            "palette": ["#ff0000"],
            "connections": { "distance": 40.0 }
        }"##;
        let backdrop = Backdrop::from_json(json).unwrap();
        let Backdrop::Field(config) = backdrop else {
            panic!("expected a field backdrop");
        };
        assert_eq!(config.desktop_count, 12);
        assert_eq!(config.mobile_count, FieldConfig::ember().mobile_count);
        assert_eq!(config.boundary, BoundaryPolicy::Reflect);
        assert_eq!(config.palette, vec![Rgba::rgb8(255, 0, 0)]);
        assert_eq!(config.connections.distance, 40.0);
        assert_eq!(config.connections.opacity_scale, 0.1);
    }

    #[test]
    fn test_backdrop_json_round_trip() {
        let backdrop = Backdrop::preset("circuit").unwrap().with_seed(9);
        let json = backdrop.to_json().unwrap();
        assert_eq!(Backdrop::from_json(&json).unwrap(), backdrop);
    }

    #[test]
    fn test_backdrop_rejects_bad_json() {
        assert!(matches!(
            Backdrop::from_json("{\"scene\": \"field\", \"desktop_count\": \"many\"}"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Backdrop::from_json("{\"scene\": \"field\", \"opacity\": {\"min\": 0.2, \"max\": 3.0}}"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_negative_parallax_rejected() {
        assert!(FieldConfig::ember().with_parallax(-1.0).validate().is_err());
        assert!(FieldConfig::ember().with_parallax(f32::INFINITY).validate().is_err());
        assert_eq!(FieldConfig::ember().parallax, 3.0);
    }

    #[test]
    fn test_unknown_preset() {
        assert!(Backdrop::preset("neon").is_none());
    }
}
