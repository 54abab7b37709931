//! Polylines: ordered point sequences drawn as connected segments.

use serde::{Deserialize, Serialize};
use sweep_math::{Aabb3, Bounded, Point3};

use super::Line;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<Point3>,
}

impl Polyline {
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    /// The segments between consecutive points.
    pub fn lines(&self) -> Vec<Line> {
        self.points
            .windows(2)
            .map(|w| Line::new(w[0], w[1]))
            .collect()
    }

    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }
}

impl Bounded for Polyline {
    fn bounds(&self) -> Option<Aabb3> {
        Aabb3::from_points(&self.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweep_math::dvec3;

    #[test]
    fn test_segments_and_length() {
        let pl = Polyline::new(vec![
            dvec3(0.0, 0.0, 0.0),
            dvec3(3.0, 4.0, 0.0),
            dvec3(3.0, 4.0, 2.0),
        ]);
        assert_eq!(pl.segment_count(), 2);
        assert_eq!(pl.lines().len(), 2);
        assert!((pl.length() - 7.0).abs() < 1e-12);
        assert_eq!(pl.bounds(), Some(Aabb3::new(dvec3(0.0, 0.0, 0.0), dvec3(3.0, 4.0, 2.0))));
    }

    #[test]
    fn test_empty_polyline() {
        let pl = Polyline::default();
        assert_eq!(pl.segment_count(), 0);
        assert_eq!(pl.length(), 0.0);
        assert!(pl.lines().is_empty());
        assert!(pl.bounds().is_none());
    }
}
