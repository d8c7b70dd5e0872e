//! # Plexus
//!
//! Drifting particle fields with proximity connections, for animated
//! backdrops.
//!
//! Particles wander across the viewport, and every pair closer than a
//! threshold is joined by a line that fades with distance. The same field
//! can be drawn into a window through wgpu, or into an image for snapshots
//! and tests.
//!
//! ## Quick Start
//!
//! ```ignore
//! use plexus::prelude::*;
//!
//! fn main() -> Result<(), RunError> {
//!     let config = FieldConfig::ember()
//!         .with_counts(120, 60)
//!         .with_connect_distance(140.0);
//!
//!     Animation::new(Backdrop::Field(config))
//!         .with_title("Embers")
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Fields
//!
//! A [`ParticleField`] owns its particles, the viewport they live in and the
//! [`FieldConfig`] that shaped them. Each frame it is stepped once and then
//! rendered:
//!
//! ```ignore
//! let mut field = ParticleField::new(FieldConfig::circuit(), Viewport::new(800.0, 600.0));
//! let mut surface = RasterSurface::new(800, 600, field.config().background);
//!
//! field.step();
//! field.render(&mut surface);
//! surface.save_png("frame.png")?;
//! ```
//!
//! ### Surfaces
//!
//! Rendering only needs three operations: clear, fill a circle, stroke a
//! line. Anything implementing [`Surface`] can be drawn on:
//! [`RasterSurface`] (CPU, `image`), [`GpuSurface`] (wgpu) and
//! [`RecordingSurface`] (keeps the draw calls, for tests).
//!
//! ### Driving
//!
//! A [`FrameDriver`] runs step-then-render per display refresh, forwards
//! resize and pointer events, and stops through a [`StopHandle`].
//!
//! ## Feature Overview
//!
//! | Concern | Options |
//! |---------|---------|
//! | Edges | [`BoundaryPolicy::Wrap`], [`BoundaryPolicy::Reflect`] |
//! | Resize | [`ResizePolicy::Regenerate`], [`ResizePolicy::Clamp`], [`ResizePolicy::Scatter`] |
//! | Pointer | [`PointerMode::Repel`], [`PointerMode::Attract`] |
//! | Scenes | [`ParticleField`], [`ShellCloud`] |
//! | Presets | [`FieldConfig::ember`], [`FieldConfig::circuit`], [`CloudConfig::default`] |

pub mod animation;
pub mod cloud;
pub mod config;
pub mod connections;
pub mod driver;
pub mod error;
pub mod field;
pub mod gpu;
pub mod input;
pub mod particle;
pub mod pointer;
pub mod raster;
pub mod render;
pub mod scene;
pub mod spawn;
pub mod stepper;
pub mod surface;
pub mod time;
pub mod viewport;
pub mod visuals;

pub use animation::Animation;
pub use cloud::{CloudConfig, ShellCloud};
pub use config::{Backdrop, FieldConfig, Span};
pub use connections::{connections, Connection, ConnectionStyle};
pub use driver::{FrameDriver, StopHandle};
pub use error::{ColorParseError, ConfigError, ExportError, GpuError, RunError};
pub use field::ParticleField;
pub use glam::{Vec2, Vec3};
pub use gpu::GpuSurface;
pub use input::HostEvent;
pub use particle::Particle;
pub use pointer::{PointerInfluence, PointerMode};
pub use raster::RasterSurface;
pub use render::{render, render_displaced, RenderStats};
pub use scene::Scene;
pub use spawn::SpawnContext;
pub use stepper::BoundaryPolicy;
pub use surface::{DrawCommand, RecordingSurface, Surface};
pub use time::FrameClock;
pub use viewport::{ResizePolicy, Viewport};
pub use visuals::{Palette, Rgba};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use plexus::prelude::*;
/// ```
pub mod prelude {
    pub use crate::animation::Animation;
    pub use crate::cloud::{CloudConfig, ShellCloud};
    pub use crate::config::{Backdrop, FieldConfig};
    pub use crate::connections::ConnectionStyle;
    pub use crate::driver::{FrameDriver, StopHandle};
    pub use crate::error::RunError;
    pub use crate::field::ParticleField;
    pub use crate::pointer::{PointerInfluence, PointerMode};
    pub use crate::raster::RasterSurface;
    pub use crate::scene::Scene;
    pub use crate::stepper::BoundaryPolicy;
    pub use crate::surface::Surface;
    pub use crate::viewport::{ResizePolicy, Viewport};
    pub use crate::visuals::{Palette, Rgba};
    pub use crate::{Vec2, Vec3};
}
