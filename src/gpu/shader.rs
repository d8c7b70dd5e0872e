//! WGSL for the instanced circle and line pipelines.
//!
//! Both pipelines draw one six-vertex quad per instance, sized a pixel past
//! the shape so the fragment stage can anti-alias the edge. Coverage math
//! matches [`RasterSurface`](crate::raster::RasterSurface).

/// Shared by both pipelines. Entry points: `vs_circle`/`fs_circle` and
/// `vs_line`/`fs_line`.
pub const SHADER: &str = r#"
struct Screen {
    size: vec2<f32>,
    _pad: vec2<f32>,
};

@group(0) @binding(0) var<uniform> screen: Screen;

fn quad_corner(index: u32) -> vec2<f32> {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(-1.0, 1.0),
        vec2<f32>(-1.0, 1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(1.0, 1.0)
    );
    return corners[index];
}

// Pixel coordinates (origin top-left, y down) to clip space.
fn to_clip(pixel: vec2<f32>) -> vec4<f32> {
    let ndc = pixel / screen.size * 2.0 - 1.0;
    return vec4<f32>(ndc.x, -ndc.y, 0.0, 1.0);
}

struct CircleOut {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) offset_px: vec2<f32>,
    @location(1) radius: f32,
    @location(2) color: vec4<f32>,
};

@vertex
fn vs_circle(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) center: vec2<f32>,
    @location(1) radius: f32,
    @location(2) color: vec4<f32>,
) -> CircleOut {
    let offset_px = quad_corner(vertex_index) * (radius + 1.0);

    var out: CircleOut;
    out.clip_position = to_clip(center + offset_px);
    out.offset_px = offset_px;
    out.radius = radius;
    out.color = color;
    return out;
}

@fragment
fn fs_circle(in: CircleOut) -> @location(0) vec4<f32> {
    let coverage = clamp(in.radius + 0.5 - length(in.offset_px), 0.0, 1.0);
    if coverage <= 0.0 {
        discard;
    }
    return vec4<f32>(in.color.rgb, in.color.a * coverage);
}

struct LineOut {
    @builtin(position) clip_position: vec4<f32>,
    // x along the segment from p0, y across it
    @location(0) segment_px: vec2<f32>,
    @location(1) seg_len: f32,
    @location(2) width: f32,
    @location(3) color: vec4<f32>,
};

@vertex
fn vs_line(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) p0: vec2<f32>,
    @location(1) p1: vec2<f32>,
    @location(2) color: vec4<f32>,
    @location(3) width: f32,
) -> LineOut {
    let delta = p1 - p0;
    let seg_len = length(delta);
    var dir = vec2<f32>(1.0, 0.0);
    if seg_len > 0.0001 {
        dir = delta / seg_len;
    }
    let normal = vec2<f32>(-dir.y, dir.x);

    let reach = width * 0.5 + 1.0;
    let corner = quad_corner(vertex_index);
    let along = mix(-reach, seg_len + reach, corner.x * 0.5 + 0.5);
    let across = corner.y * reach;

    var out: LineOut;
    out.clip_position = to_clip(p0 + dir * along + normal * across);
    out.segment_px = vec2<f32>(along, across);
    out.seg_len = seg_len;
    out.width = width;
    out.color = color;
    return out;
}

@fragment
fn fs_line(in: LineOut) -> @location(0) vec4<f32> {
    let nearest = clamp(in.segment_px.x, 0.0, in.seg_len);
    let d = length(vec2<f32>(in.segment_px.x - nearest, in.segment_px.y));
    let coverage = min(clamp(in.width * 0.5 + 0.5 - d, 0.0, 1.0), in.width);
    if coverage <= 0.0 {
        discard;
    }
    return vec4<f32>(in.color.rgb, in.color.a * coverage);
}
"#;
