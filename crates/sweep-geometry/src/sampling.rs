//! Parameter sampling and moving-frame extraction.

use rayon::prelude::*;
use sweep_math::{Frame, Point3};

use crate::curve::Curve;

/// `count` evenly spaced values from `start` to `stop`, both included.
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            (0..count)
                .map(|i| if i == count - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// `count` parameters spread evenly over the curve's domain.
pub fn domain_parameters(curve: &dyn Curve, count: usize) -> Vec<f64> {
    let (t0, t1) = curve.domain();
    linspace(t0, t1, count)
}

/// Moving frames at `count` evenly spaced parameters, in increasing parameter order.
pub fn sample_frames(curve: &dyn Curve, count: usize) -> Vec<Frame> {
    let params = domain_parameters(curve, count);
    let frames: Vec<Frame> = params.par_iter().map(|&t| curve.frame_at(t)).collect();
    log::debug!("sampled {} frames over {:?}", frames.len(), curve.domain());
    frames
}

/// Curve points at `count` evenly spaced parameters.
pub fn sample_points(curve: &dyn Curve, count: usize) -> Vec<Point3> {
    domain_parameters(curve, count)
        .par_iter()
        .map(|&t| curve.point_at(t))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{Line, NurbsCurve};
    use sweep_math::dvec3;

    #[test]
    fn test_linspace_endpoints() {
        let v = linspace(0.0, 1.0, 5);
        assert_eq!(v, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_linspace_hits_stop_exactly() {
        let v = linspace(0.0, 0.3, 100);
        assert_eq!(v.len(), 100);
        assert_eq!(*v.last().unwrap(), 0.3);
        assert!(v.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_sample_frames_order_preserved() {
        let line = Line::new(dvec3(0.0, 0.0, 0.0), dvec3(10.0, 0.0, 0.0));
        let frames = sample_frames(&line, 11);
        assert_eq!(frames.len(), 11);
        for (i, f) in frames.iter().enumerate() {
            assert!((f.point.x - i as f64).abs() < 1e-12);
        }
    }

    #[test]
    fn test_sample_points_on_curve() {
        let curve = NurbsCurve::from_points(
            &[dvec3(0.0, 0.0, 0.0), dvec3(1.0, 2.0, 0.0), dvec3(2.0, 0.0, 1.0)],
            2,
        )
        .unwrap();
        let pts = sample_points(&curve, 7);
        let params = domain_parameters(&curve, 7);
        for (p, t) in pts.iter().zip(params) {
            assert_eq!(*p, curve.point_at(t));
        }
    }
}
