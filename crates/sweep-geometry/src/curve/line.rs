//! Line segment curve.

use serde::{Deserialize, Serialize};
use sweep_math::{Point3, Vector3};

use super::Curve;

/// A line segment from `start` to `end`, parameterized over `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point3,
    pub end: Point3,
}

impl Line {
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    /// Segment starting at `start` and running along `direction` for its full length.
    pub fn from_point_and_vector(start: Point3, direction: Vector3) -> Self {
        Self::new(start, start + direction)
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    pub fn midpoint(&self) -> Point3 {
        (self.start + self.end) * 0.5
    }
}

impl Curve for Line {
    fn point_at(&self, t: f64) -> Point3 {
        self.start + t * (self.end - self.start)
    }

    fn tangent_at(&self, _t: f64) -> Vector3 {
        self.end - self.start
    }

    fn second_derivative_at(&self, _t: f64) -> Vector3 {
        Vector3::ZERO
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweep_math::DVec3;

    #[test]
    fn test_line_point_at() {
        let line = Line::new(DVec3::new(0.0, 0.0, 0.0), DVec3::new(2.0, 4.0, 6.0));
        let p = line.point_at(0.5);
        assert!((p - line.midpoint()).length() < 1e-10);
        assert!((p - DVec3::new(1.0, 2.0, 3.0)).length() < 1e-10);
    }

    #[test]
    fn test_line_frame_follows_direction() {
        let line = Line::from_point_and_vector(DVec3::new(1.0, 2.0, 3.0), DVec3::new(0.0, 0.0, 4.0));
        assert!((line.length() - 4.0).abs() < 1e-12);
        assert_eq!(line.curvature_at(0.3), 0.0);

        let frame = line.frame_at(0.25);
        assert!((frame.point - DVec3::new(1.0, 2.0, 4.0)).length() < 1e-12);
        assert!((frame.xaxis - DVec3::Z).length() < 1e-12);
        assert!(frame.xaxis.dot(frame.yaxis).abs() < 1e-12);
    }
}
