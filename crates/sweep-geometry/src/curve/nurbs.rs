//! NURBS curve.

use serde::{Deserialize, Serialize};
use sweep_core::traits::Validate;
use sweep_core::{Result, SweepError, Tolerance};
use sweep_math::{Point3, Vector3};

use super::{Curve, Polyline};
use crate::nurbs::{self, deboor};
use crate::tessellate::curve_to_polyline;

/// Chord deviation used when measuring arc length.
const LENGTH_TOLERANCE: f64 = 1e-6;

/// A NURBS (Non-Uniform Rational B-Spline) curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NurbsCurve {
    pub degree: usize,
    pub knots: Vec<f64>,
    pub control_points: Vec<Point3>,
    pub weights: Vec<f64>,
}

impl NurbsCurve {
    /// Build a curve from its raw definition, rejecting inconsistent input.
    pub fn new(
        degree: usize,
        knots: Vec<f64>,
        control_points: Vec<Point3>,
        weights: Vec<f64>,
    ) -> Result<Self> {
        let curve = Self {
            degree,
            knots,
            control_points,
            weights,
        };
        curve.validate()?;
        Ok(curve)
    }

    /// Non-rational curve with the given points as control points.
    ///
    /// Uses a uniform clamped knot vector, so the curve starts at the first
    /// point and ends at the last. The degree is reduced to `points.len() - 1`
    /// when there are too few points for it.
    pub fn from_points(points: &[Point3], degree: usize) -> Result<Self> {
        if points.len() < 2 {
            return Err(SweepError::Geometry(format!(
                "a curve needs at least 2 points, got {}",
                points.len()
            )));
        }
        if degree == 0 {
            return Err(SweepError::Geometry("curve degree must be at least 1".into()));
        }
        let degree = degree.min(points.len() - 1);
        let knots = nurbs::uniform_clamped_knots(points.len(), degree);
        log::debug!(
            "NURBS curve from {} points, degree {}, knots {:?}",
            points.len(),
            degree,
            knots
        );
        Self::new(degree, knots, points.to_vec(), vec![1.0; points.len()])
    }

    /// Whether any weight differs from 1.
    pub fn is_rational(&self) -> bool {
        self.weights.iter().any(|&w| (w - 1.0).abs() > f64::EPSILON)
    }

    /// The control polygon through the control points.
    pub fn control_polygon(&self) -> Polyline {
        Polyline::new(self.control_points.clone())
    }

    /// Derivatives from order 0 up to `n` at `t` (clamped to the domain).
    pub fn derivatives_at(&self, t: f64, n: usize) -> Vec<Vector3> {
        deboor::nurbs_curve_derivs(
            self.degree,
            &self.knots,
            &self.control_points,
            &self.weights,
            self.clamp(t),
            n,
        )
    }

    /// Approximate arc length from a fine tessellation.
    pub fn length(&self) -> f64 {
        curve_to_polyline(self, LENGTH_TOLERANCE).length()
    }

    fn clamp(&self, t: f64) -> f64 {
        let (t0, t1) = self.domain();
        t.clamp(t0, t1)
    }
}

impl Validate for NurbsCurve {
    fn validate(&self) -> Result<()> {
        let n = self.control_points.len();
        let p = self.degree;
        if p == 0 {
            return Err(SweepError::Geometry("curve degree must be at least 1".into()));
        }
        if n <= p {
            return Err(SweepError::Geometry(format!(
                "degree {p} needs at least {} control points, got {n}",
                p + 1
            )));
        }
        if self.knots.len() != n + p + 1 {
            return Err(SweepError::Geometry(format!(
                "knot vector length must be n + p + 1 = {}, got {}",
                n + p + 1,
                self.knots.len()
            )));
        }
        if self.knots.windows(2).any(|w| w[1] < w[0]) {
            return Err(SweepError::Geometry("knot vector must be non-decreasing".into()));
        }
        if self.weights.len() != n {
            return Err(SweepError::Geometry(format!(
                "expected {n} weights, got {}",
                self.weights.len()
            )));
        }
        if self.weights.iter().any(|&w| !(w.is_finite() && w > 0.0)) {
            return Err(SweepError::Geometry("all weights must be positive".into()));
        }
        let (t0, t1) = self.domain();
        if t1 <= t0 {
            return Err(SweepError::Geometry(format!("empty parameter domain [{t0}, {t1}]")));
        }
        Ok(())
    }
}

impl Curve for NurbsCurve {
    fn point_at(&self, t: f64) -> Point3 {
        deboor::nurbs_curve_point(
            self.degree,
            &self.knots,
            &self.control_points,
            &self.weights,
            self.clamp(t),
        )
    }

    fn tangent_at(&self, t: f64) -> Vector3 {
        self.derivatives_at(t, 1)[1]
    }

    fn second_derivative_at(&self, t: f64) -> Vector3 {
        self.derivatives_at(t, 2)[2]
    }

    fn domain(&self) -> (f64, f64) {
        let p = self.degree;
        (self.knots[p], self.knots[self.knots.len() - p - 1])
    }

    fn is_closed(&self) -> bool {
        let (t0, t1) = self.domain();
        let gap = self.point_at(t0).distance(self.point_at(t1));
        Tolerance::default().is_zero(gap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use sweep_math::DVec3;

    fn example_points() -> Vec<Point3> {
        vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(3.0, 3.0, 0.0),
            DVec3::new(6.0, -6.0, 3.0),
            DVec3::new(9.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn test_from_points_cubic_domain() {
        let curve = NurbsCurve::from_points(&example_points(), 3).unwrap();
        assert_eq!(curve.degree, 3);
        assert_eq!(curve.domain(), (0.0, 1.0));
        assert!(!curve.is_rational());
        assert!(!curve.is_closed());
    }

    #[test]
    fn test_from_points_interpolates_ends() {
        let pts = example_points();
        let curve = NurbsCurve::from_points(&pts, 3).unwrap();
        assert!((curve.point_at(0.0) - pts[0]).length() < 1e-12);
        assert!((curve.point_at(1.0) - pts[3]).length() < 1e-12);
    }

    #[test]
    fn test_from_points_clamps_degree() {
        let curve = NurbsCurve::from_points(&example_points()[..2], 3).unwrap();
        assert_eq!(curve.degree, 1);
        let mid = curve.point_at(0.5);
        assert!((mid - DVec3::new(1.5, 1.5, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_from_points_longer_domain() {
        let mut pts = example_points();
        pts.push(DVec3::new(12.0, 2.0, 1.0));
        pts.push(DVec3::new(15.0, 0.0, 0.0));
        let curve = NurbsCurve::from_points(&pts, 3).unwrap();
        assert_eq!(curve.domain(), (0.0, 3.0));
    }

    #[test]
    fn test_from_points_rejects_single_point() {
        let result = NurbsCurve::from_points(&[DVec3::ZERO], 3);
        assert!(matches!(result, Err(SweepError::Geometry(_))));
    }

    #[test]
    fn test_validate_rejects_bad_definitions() {
        let pts = example_points();
        let knots = vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0];
        assert!(NurbsCurve::new(3, knots[..7].to_vec(), pts.clone(), vec![1.0; 4]).is_err());
        assert!(NurbsCurve::new(3, knots.clone(), pts.clone(), vec![1.0, -1.0, 1.0, 1.0]).is_err());
        assert!(NurbsCurve::new(3, vec![0.0; 8], pts.clone(), vec![1.0; 4]).is_err());
        assert!(NurbsCurve::new(3, knots, pts, vec![1.0; 4]).is_ok());
    }

    #[test]
    fn test_nurbs_circle() {
        // Unit circle as a NURBS curve (degree 2, 9 control points)
        let w = 1.0_f64 / 2.0_f64.sqrt();
        let curve = NurbsCurve::new(
            2,
            vec![0.0, 0.0, 0.0, 0.25, 0.25, 0.5, 0.5, 0.75, 0.75, 1.0, 1.0, 1.0],
            vec![
                DVec3::new(1.0, 0.0, 0.0),
                DVec3::new(1.0, 1.0, 0.0),
                DVec3::new(0.0, 1.0, 0.0),
                DVec3::new(-1.0, 1.0, 0.0),
                DVec3::new(-1.0, 0.0, 0.0),
                DVec3::new(-1.0, -1.0, 0.0),
                DVec3::new(0.0, -1.0, 0.0),
                DVec3::new(1.0, -1.0, 0.0),
                DVec3::new(1.0, 0.0, 0.0),
            ],
            vec![1.0, w, 1.0, w, 1.0, w, 1.0, w, 1.0],
        )
        .unwrap();

        assert!(curve.is_rational());
        assert!(curve.is_closed());
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            let p = curve.point_at(t);
            assert_abs_diff_eq!(p.truncate().length(), 1.0, epsilon = 1e-8);
            assert_abs_diff_eq!(curve.curvature_at(t), 1.0, epsilon = 1e-6);

            // The principal normal of a circle points at its centre.
            let frame = curve.frame_at(t);
            assert!((frame.yaxis + p).length() < 1e-6, "t={}: normal {:?}", t, frame.yaxis);
        }
        assert_abs_diff_eq!(curve.length(), 2.0 * std::f64::consts::PI, epsilon = 1e-3);
    }

    #[test]
    fn test_frame_origin_on_curve() {
        let curve = NurbsCurve::from_points(&example_points(), 3).unwrap();
        for i in 0..=50 {
            let t = i as f64 / 50.0;
            let frame = curve.frame_at(t);
            assert!((frame.point - curve.point_at(t)).length() < 1e-12);
            let tangent = curve.tangent_at(t).normalize();
            assert!((frame.xaxis - tangent).length() < 1e-12);
            assert!(frame.xaxis.dot(frame.yaxis).abs() < 1e-12);
        }
    }

    #[test]
    fn test_evaluation_clamps_to_domain() {
        let curve = NurbsCurve::from_points(&example_points(), 3).unwrap();
        assert_eq!(curve.point_at(-1.0), curve.point_at(0.0));
        assert_eq!(curve.point_at(2.0), curve.point_at(1.0));
    }
}
