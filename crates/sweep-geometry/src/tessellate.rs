//! Tessellation of curves into polylines for display and measurement.

use sweep_math::Point3;

use crate::curve::{Curve, Polyline};

/// Subdivision depth always reached, so S-shaped spans whose midpoint
/// happens to lie on the chord are still refined.
const MIN_DEPTH: u32 = 3;

/// Maximum recursion depth for adaptive subdivision.
const MAX_DEPTH: u32 = 12;

/// Convert a curve to a polyline using adaptive subdivision.
///
/// Segments are split while the curve's midpoint deviates from the chord
/// midpoint by more than `tolerance`.
pub fn curve_to_polyline(curve: &dyn Curve, tolerance: f64) -> Polyline {
    let (t_min, t_max) = curve.domain();
    let mut points = vec![curve.point_at(t_min)];
    subdivide_curve(curve, t_min, t_max, tolerance, &mut points, 0);
    Polyline::new(points)
}

fn subdivide_curve(
    curve: &dyn Curve,
    t0: f64,
    t1: f64,
    tolerance: f64,
    points: &mut Vec<Point3>,
    depth: u32,
) {
    let p1 = curve.point_at(t1);
    if depth >= MAX_DEPTH {
        points.push(p1);
        return;
    }

    let t_mid = (t0 + t1) * 0.5;
    let p0 = curve.point_at(t0);
    let p_mid = curve.point_at(t_mid);
    let deviation = (p_mid - (p0 + p1) * 0.5).length();

    if depth < MIN_DEPTH || deviation > tolerance {
        subdivide_curve(curve, t0, t_mid, tolerance, points, depth + 1);
        subdivide_curve(curve, t_mid, t1, tolerance, points, depth + 1);
    } else {
        points.push(p1);
    }
}
