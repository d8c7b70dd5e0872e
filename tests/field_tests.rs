//! Integration tests for the particle field, driven through the public API.

use glam::Vec2;
use plexus::{
    connections, Backdrop, BoundaryPolicy, Connection, ConnectionStyle, DrawCommand, FieldConfig,
    FrameDriver, HostEvent, Particle, ParticleField, RasterSurface, RecordingSurface,
    ResizePolicy, Rgba, Scene, Viewport,
};

fn small_field(seed: u64) -> ParticleField {
    let config = FieldConfig::ember()
        .with_counts(10, 10)
        .with_connect_distance(50.0)
        .with_seed(seed);
    ParticleField::new(config, Viewport::new(200.0, 200.0))
}

// ============================================================================
// End-to-end frame
// ============================================================================

#[test]
fn test_one_frame_draws_circles_and_close_pairs() {
    for seed in 0..20 {
        let mut driver = FrameDriver::new(small_field(seed), Some(RecordingSurface::new()));
        let stats = driver.frame().unwrap();

        let particles = driver.scene().particles();
        let mut expected = Vec::new();
        for i in 0..particles.len() {
            for j in (i + 1)..particles.len() {
                if particles[i].position.distance(particles[j].position) < 50.0 {
                    expected.push((particles[i].position, particles[j].position));
                }
            }
        }

        let surface = driver.surface().unwrap();
        assert_eq!(surface.circles().count(), 10);
        assert_eq!(stats.circles, 10);

        let drawn: Vec<(Vec2, Vec2)> = surface
            .lines()
            .map(|cmd| match cmd {
                DrawCommand::Line { from, to, .. } => (*from, *to),
                other => panic!("not a line: {:?}", other),
            })
            .collect();
        assert_eq!(drawn, expected, "seed {}", seed);
        assert_eq!(stats.lines, expected.len());
    }
}

#[test]
fn test_frame_paint_order() {
    let mut driver = FrameDriver::new(small_field(7), Some(RecordingSurface::new()));
    driver.frame();
    let commands = driver.surface().unwrap().commands();

    assert!(matches!(
        commands[0],
        DrawCommand::Clear { width, height } if width == 200.0 && height == 200.0
    ));
    let first_line = commands
        .iter()
        .position(|c| matches!(c, DrawCommand::Line { .. }))
        .unwrap_or(commands.len());
    assert!(commands[1..first_line]
        .iter()
        .all(|c| matches!(c, DrawCommand::Circle { .. })));
    assert!(commands[first_line..]
        .iter()
        .all(|c| matches!(c, DrawCommand::Line { .. })));
}

// ============================================================================
// Resize
// ============================================================================

#[test]
fn test_resize_across_breakpoint_regenerates() {
    let config = FieldConfig::circuit()
        .with_resize(ResizePolicy::Regenerate)
        .with_seed(5);
    let mut field = ParticleField::new(config, Viewport::new(1280.0, 800.0));
    assert_eq!(field.particles().len(), 100);

    field.resize(Viewport::new(767.0, 800.0));
    assert_eq!(field.particles().len(), 50);

    field.resize(Viewport::new(768.0, 800.0));
    assert_eq!(field.particles().len(), 100);

    field.resize(Viewport::new(-10.0, 800.0));
    assert!(field.particles().is_empty());
}

#[test]
fn test_clamp_policy_keeps_count() {
    let config = FieldConfig::circuit()
        .with_resize(ResizePolicy::Clamp)
        .with_seed(5);
    let mut field = ParticleField::new(config, Viewport::new(1280.0, 800.0));
    field.resize(Viewport::new(500.0, 400.0));
    assert_eq!(field.particles().len(), 100);
    assert!(field
        .particles()
        .iter()
        .all(|p| field.viewport().contains(p.position)));
}

#[test]
fn test_minimize_and_restore_every_policy() {
    for policy in [ResizePolicy::Regenerate, ResizePolicy::Clamp, ResizePolicy::Scatter] {
        let config = FieldConfig::ember().with_resize(policy).with_seed(17);
        let field = ParticleField::new(config, Viewport::new(1024.0, 768.0));
        let mut driver = FrameDriver::new(field, Some(RecordingSurface::new()));

        driver.handle(HostEvent::Resized {
            width: 0.0,
            height: 0.0,
        });
        let stats = driver.frame().unwrap();
        assert_eq!(driver.scene().particles().len(), 0, "{:?}", policy);
        assert_eq!(stats.circles, 0, "{:?}", policy);

        driver.handle(HostEvent::Resized {
            width: 1024.0,
            height: 768.0,
        });
        let particles = driver.scene().particles();
        assert_eq!(particles.len(), 80, "{:?}", policy);
        let at_origin = particles.iter().filter(|p| p.position == Vec2::ZERO).count();
        assert!(at_origin < 2, "{:?}: {} particles piled at the origin", policy, at_origin);
    }
}

// ============================================================================
// Pointer
// ============================================================================

#[test]
fn test_ember_parallax_follows_pointer() {
    let config = FieldConfig::ember().with_seed(4);
    let field = ParticleField::new(config, Viewport::new(800.0, 600.0));
    let mut driver = FrameDriver::new(field, Some(RecordingSurface::new()));

    // Top-left corner: pull is (-3, -3) at most.
    driver.handle(HostEvent::PointerMoved(Vec2::ZERO));
    driver.frame();

    let positions: Vec<Vec2> = driver.scene().particles().iter().map(|p| p.position).collect();
    let centers: Vec<Vec2> = driver
        .surface()
        .unwrap()
        .circles()
        .map(|cmd| match cmd {
            DrawCommand::Circle { center, .. } => *center,
            other => panic!("not a circle: {:?}", other),
        })
        .collect();
    assert_eq!(centers.len(), positions.len());
    for (center, position) in centers.iter().zip(&positions) {
        let shift = *center - *position;
        assert!(shift.x <= 1e-4 && shift.x >= -3.0 - 1e-4, "{:?}", shift);
        assert!(shift.y <= 1e-4 && shift.y >= -3.0 - 1e-4, "{:?}", shift);
    }
    assert!(centers.iter().zip(&positions).any(|(c, p)| c != p));
}

// ============================================================================
// Connection properties
// ============================================================================

#[test]
fn test_connection_symmetry() {
    let style = ConnectionStyle {
        width_per_unit: 0.01,
        ..ConnectionStyle::default()
    };
    let field = small_field(11);
    let ps = field.particles();
    for i in 0..ps.len() {
        for j in 0..ps.len() {
            let ij = Connection::between(i, &ps[i], j, &ps[j], &style);
            let ji = Connection::between(j, &ps[j], i, &ps[i], &style);
            assert_eq!(ij, ji);
        }
    }
}

#[test]
fn test_opacity_decreases_with_distance() {
    let style = ConnectionStyle::default();
    let mut last = style.opacity(0.0);
    let mut d = 0.0;
    while d < style.distance {
        let o = style.opacity(d);
        assert!(o <= last);
        last = o;
        d += 0.5;
    }
    assert_eq!(style.opacity(style.distance), 0.0);
}

#[test]
fn test_no_connection_at_threshold() {
    let style = ConnectionStyle::default();
    let a = Particle::new(Vec2::ZERO, Vec2::ZERO, 1.0, Rgba::WHITE, 1.0);
    let b = Particle::new(Vec2::new(150.0, 0.0), Vec2::ZERO, 1.0, Rgba::WHITE, 1.0);
    assert_eq!(connections(&[a, b], &style).count(), 0);
}

// ============================================================================
// Bounds
// ============================================================================

#[test]
fn test_particles_stay_in_bounds() {
    for boundary in [BoundaryPolicy::Wrap, BoundaryPolicy::Reflect] {
        let config = FieldConfig::ember()
            .with_boundary(boundary)
            .with_speed(0.5, 12.0)
            .with_seed(21);
        let mut field = ParticleField::new(config, Viewport::new(320.0, 240.0));
        let vp = field.viewport();
        for _ in 0..2000 {
            field.step();
            for p in field.particles() {
                assert!(boundary.contains(p, vp), "{:?} escaped: {:?}", boundary, p);
                assert!(p.position.x >= -p.size && p.position.x <= vp.width + p.size);
                assert!(p.position.y >= -p.size && p.position.y <= vp.height + p.size);
            }
        }
    }
}

// ============================================================================
// Config files and snapshots
// ============================================================================

#[test]
fn test_backdrop_json_builds_scene() {
    let json = r##"{
        "scene": "field",
        "desktop_count": 12,
        "mobile_count": 6,
        "palette": ["#ff0000"],
        "seed": 3
    }"##;
    let backdrop = Backdrop::from_json(json).unwrap();
    let mut scene = backdrop.build(Viewport::new(1024.0, 768.0));

    let mut surface = RecordingSurface::new();
    scene.step();
    let stats = scene.render(&mut surface);
    assert_eq!(stats.circles, 12);
}

#[test]
fn test_snapshot_renders_into_image() {
    let backdrop = Backdrop::preset("circuit").unwrap().with_seed(9);
    let scene = backdrop.build(Viewport::new(160.0, 120.0));
    let surface = RasterSurface::new(160, 120, backdrop.background());

    let mut driver = FrameDriver::new(scene, Some(surface));
    assert_eq!(driver.run_for(5), 5);
    let surface = driver.stop().unwrap();

    let bg = backdrop.background().to_rgba8();
    assert!(surface.image().pixels().any(|p| p.0 != bg));
}
