//! A slowly tumbling shell of points seen through a perspective camera.
//!
//! Points are scattered over spherical shells between `radius.min` and
//! `radius.max` around the origin. Each frame the whole cloud turns a little
//! about the x and y axes, and [`ShellCloud::render`] projects every point
//! to the viewport as a small circle whose size falls off with depth.
//!
//! The pointer tilts the cloud: its distance from the viewport center sets a
//! target tilt, and every step closes `tilt_easing` of the remaining gap.

use glam::{Mat4, Vec2, Vec3};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Span;
use crate::error::ConfigError;
use crate::render::RenderStats;
use crate::scene::Scene;
use crate::surface::Surface;
use crate::viewport::Viewport;
use crate::visuals::Rgba;

const NEAR: f32 = 0.1;
const FAR: f32 = 1000.0;

/// Settings for a [`ShellCloud`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    pub count: u32,
    /// Shell radius range, in world units.
    pub radius: Span,
    /// Point size in world units.
    pub point_size: f32,
    pub color: Rgba,
    pub opacity: f32,
    /// Rotation about x per frame, in radians.
    pub spin_x: f32,
    /// Rotation about y per frame, in radians.
    pub spin_y: f32,
    /// Vertical field of view.
    pub fov_degrees: f32,
    /// Camera distance from the origin along +z.
    pub camera_distance: f32,
    /// Target tilt per pixel of pointer offset from center, in radians.
    pub pointer_tilt: f32,
    /// Fraction of the remaining tilt closed each step.
    pub tilt_easing: f32,
    pub background: Rgba,
    pub seed: Option<u64>,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            count: 200,
            radius: Span::new(15.0, 35.0),
            point_size: 0.2,
            color: Rgba::WHITE,
            opacity: 0.8,
            spin_x: 0.0005,
            spin_y: 0.001,
            fov_degrees: 60.0,
            camera_distance: 20.0,
            pointer_tilt: 0.0001,
            tilt_easing: 0.05,
            background: Rgba::rgb8(10, 10, 20),
            seed: None,
        }
    }
}

impl CloudConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.radius.check("radius")?;
        if !(self.point_size >= 0.0) {
            return Err(ConfigError::Invalid("point_size must not be negative".into()));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(ConfigError::Invalid("opacity must be within 0.0..=1.0".into()));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid("fov_degrees must be within (0, 180)".into()));
        }
        if !(self.camera_distance > NEAR) {
            return Err(ConfigError::Invalid(format!(
                "camera_distance must be greater than {}",
                NEAR
            )));
        }
        if !self.spin_x.is_finite() || !self.spin_y.is_finite() {
            return Err(ConfigError::Invalid("spin must be finite".into()));
        }
        if !self.pointer_tilt.is_finite() {
            return Err(ConfigError::Invalid("pointer_tilt must be finite".into()));
        }
        if !(0.0..=1.0).contains(&self.tilt_easing) {
            return Err(ConfigError::Invalid("tilt_easing must be within 0.0..=1.0".into()));
        }
        Ok(())
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn with_radius(mut self, min: f32, max: f32) -> Self {
        self.radius = Span::new(min, max);
        self
    }

    pub fn with_spin(mut self, x: f32, y: f32) -> Self {
        self.spin_x = x;
        self.spin_y = y;
        self
    }

    pub fn with_pointer_tilt(mut self, radians_per_pixel: f32, easing: f32) -> Self {
        self.pointer_tilt = radians_per_pixel;
        self.tilt_easing = easing;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// The rotating point cloud scene.
pub struct ShellCloud {
    config: CloudConfig,
    viewport: Viewport,
    points: Vec<Vec3>,
    /// Accumulated rotation about x and y.
    rotation: Vec2,
    /// Pointer-driven tilt about x and y, eased toward `tilt_target`.
    tilt: Vec2,
    tilt_target: Vec2,
}

impl ShellCloud {
    pub fn new(config: CloudConfig, viewport: Viewport) -> Self {
        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let points = (0..config.count)
            .map(|_| shell_point(config.radius.sample(&mut rng), &mut rng))
            .collect();
        Self {
            config,
            viewport,
            points,
            rotation: Vec2::ZERO,
            tilt: Vec2::ZERO,
            tilt_target: Vec2::ZERO,
        }
    }

    pub fn config(&self) -> &CloudConfig {
        &self.config
    }

    /// Points in model space, before rotation.
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn rotation(&self) -> Vec2 {
        self.rotation
    }

    pub fn tilt(&self) -> Vec2 {
        self.tilt
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn model(&self) -> Mat4 {
        let angles = self.rotation + self.tilt;
        Mat4::from_rotation_x(angles.x) * Mat4::from_rotation_y(angles.y)
    }

    fn view_projection(&self) -> Mat4 {
        let proj = Mat4::perspective_rh(
            self.config.fov_degrees.to_radians(),
            self.viewport.aspect(),
            NEAR,
            FAR,
        );
        let eye = Vec3::new(0.0, 0.0, self.config.camera_distance);
        let view = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y);
        proj * view
    }

    /// Screen position and radius of a world-space point, or `None` if it is
    /// behind the camera or off screen.
    pub fn project(&self, world: Vec3) -> Option<(Vec2, f32)> {
        project_with(self.view_projection(), world, self.viewport, self.config.point_size)
    }
}

/// Uniform angles on a sphere of `radius`.
fn shell_point<R: Rng + ?Sized>(radius: f32, rng: &mut R) -> Vec3 {
    let theta = rng.gen::<f32>() * std::f32::consts::TAU;
    let phi = rng.gen::<f32>() * std::f32::consts::PI;
    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
    )
}

fn project_with(view_proj: Mat4, world: Vec3, viewport: Viewport, size: f32) -> Option<(Vec2, f32)> {
    if viewport.is_empty() {
        return None;
    }
    let clip = view_proj * world.extend(1.0);
    if clip.w <= NEAR {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    if ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 || ndc.z < 0.0 || ndc.z > 1.0 {
        return None;
    }
    let screen = Vec2::new(
        (ndc.x + 1.0) * 0.5 * viewport.width,
        (1.0 - ndc.y) * 0.5 * viewport.height,
    );
    // Attenuated point: diameter = size * (height / 2) / depth.
    let radius = size * viewport.height * 0.25 / clip.w;
    Some((screen, radius))
}

impl Scene for ShellCloud {
    fn step(&mut self) {
        self.rotation.x += self.config.spin_x;
        self.rotation.y += self.config.spin_y;
        self.tilt += (self.tilt_target - self.tilt) * self.config.tilt_easing;
    }

    fn render(&self, surface: &mut dyn Surface) -> RenderStats {
        surface.clear(self.viewport.width, self.viewport.height);

        let model = self.model();
        let view_proj = self.view_projection();
        let color = self.config.color.with_alpha(self.config.color.a * self.config.opacity);

        let mut circles = 0;
        for point in &self.points {
            let world = model.transform_point3(*point);
            if let Some((center, radius)) =
                project_with(view_proj, world, self.viewport, self.config.point_size)
            {
                surface.fill_circle(center, radius, color);
                circles += 1;
            }
        }

        RenderStats { circles, lines: 0 }
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        debug!(
            width = viewport.width,
            height = viewport.height,
            aspect = viewport.aspect(),
            "cloud camera resized"
        );
    }

    fn pointer_moved(&mut self, position: Vec2) {
        let offset = position - self.viewport.size() * 0.5;
        // Vertical motion tips the cloud about x, horizontal about y.
        self.tilt_target = Vec2::new(offset.y, offset.x) * self.config.pointer_tilt;
    }

    fn pointer_left(&mut self) {
        self.tilt_target = Vec2::ZERO;
    }
}
