//! Curve traits and implementations.

mod line;
mod nurbs;
mod polyline;

use sweep_core::Tolerance;
use sweep_math::{Frame, Point3, Vector3};

pub use line::Line;
pub use nurbs::NurbsCurve;
pub use polyline::Polyline;

/// Trait for parametric curves in 3D space.
pub trait Curve: Send + Sync {
    /// Evaluate the curve at parameter `t`.
    fn point_at(&self, t: f64) -> Point3;

    /// First derivative at parameter `t` (not normalized).
    fn tangent_at(&self, t: f64) -> Vector3;

    /// Second derivative at parameter `t`.
    fn second_derivative_at(&self, t: f64) -> Vector3;

    /// Return the parameter domain `(t_min, t_max)`.
    fn domain(&self) -> (f64, f64);

    /// Whether the curve is closed (start == end).
    fn is_closed(&self) -> bool {
        false
    }

    /// Moving frame at `t`: origin on the curve, x along the tangent,
    /// y along the principal normal.
    fn frame_at(&self, t: f64) -> Frame {
        principal_frame(self.point_at(t), self.tangent_at(t), self.second_derivative_at(t))
    }

    /// Curvature `|C' × C''| / |C'|³`, zero where the tangent vanishes.
    fn curvature_at(&self, t: f64) -> f64 {
        let d1 = self.tangent_at(t);
        let d2 = self.second_derivative_at(t);
        let speed = d1.length();
        if Tolerance::default().is_degenerate(speed) {
            return 0.0;
        }
        d1.cross(d2).length() / (speed * speed * speed)
    }
}

/// Frenet-style frame from the first two derivatives at a point.
///
/// Where the curve is locally straight the normal is undefined; a fixed
/// perpendicular of the tangent is used instead so the result is always a
/// valid frame.
pub fn principal_frame(point: Point3, d1: Vector3, d2: Vector3) -> Frame {
    let tol = Tolerance::default();

    let tangent = if !tol.is_degenerate(d1.length()) {
        d1.normalize()
    } else if !tol.is_degenerate(d2.length()) {
        // Cusp: the second derivative points along the limit tangent.
        d2.normalize()
    } else {
        log::debug!("zero tangent at {point:?}, using world X");
        Vector3::X
    };

    let binormal = tangent.cross(d2);
    let normal = if tol.is_degenerate(binormal.length()) {
        perpendicular(tangent)
    } else {
        binormal.cross(tangent).normalize()
    };

    Frame {
        point,
        xaxis: tangent,
        yaxis: normal,
    }
}

/// A unit vector perpendicular to unit vector `v`.
fn perpendicular(v: Vector3) -> Vector3 {
    let reference = if v.z.abs() < 0.9 { Vector3::Z } else { Vector3::X };
    reference.cross(v).normalize()
}
