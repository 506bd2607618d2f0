use std::f64::consts::TAU;

use kurbo::{Arc, BezPath, Point, Shape as _, Vec2};

/// Point count for a full turn at the reference sampling density.
pub const SAMPLES_FULL_TURN: usize = 200;

/// Sample a partial ring as a polyline in the z=0 plane, centered on the
/// origin. `sweep` is the fraction of the full turn to cover; the point
/// count scales with it so arc length per segment stays roughly constant.
///
/// Returns an empty vector for a degenerate sweep (a renderer cannot stroke
/// fewer than two points).
pub fn sample_ring(radius: f64, sweep: f64, samples_full_turn: usize) -> Vec<Point> {
    let sweep = sweep.clamp(0.0, 1.0);
    let scaled = ((samples_full_turn as f64) * sweep).ceil() as usize;
    if sweep <= 0.0 || scaled < 2 {
        return Vec::new();
    }

    let end = TAU * sweep;
    (0..scaled)
        .map(|k| {
            let theta = end * (k as f64) / ((scaled - 1) as f64);
            Point::new(radius * theta.cos(), radius * theta.sin())
        })
        .collect()
}

/// The same partial ring as a path, for renderers that prefer curves over
/// polylines.
pub fn ring_arc(center: Point, radius: f64, sweep: f64) -> BezPath {
    let sweep = sweep.clamp(0.0, 1.0);
    Arc {
        center,
        radii: Vec2::new(radius, radius),
        start_angle: 0.0,
        sweep_angle: TAU * sweep,
        x_rotation: 0.0,
    }
    .to_path(1e-3)
}
