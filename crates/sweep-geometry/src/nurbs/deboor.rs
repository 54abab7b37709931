//! De Boor style evaluation of B-spline and NURBS curves and their derivatives.

use sweep_math::{DVec3, Point3, Vector3};

use super::knot::{basis_functions, ders_basis_functions, find_span};

/// Evaluate a B-spline curve point at parameter `t`.
pub fn curve_point(degree: usize, knots: &[f64], control_points: &[Point3], t: f64) -> Point3 {
    let n = control_points.len() - 1;
    let span = find_span(degree, knots, n, t);
    let basis = basis_functions(degree, knots, span, t);

    basis
        .iter()
        .zip(&control_points[span - degree..=span])
        .fold(DVec3::ZERO, |acc, (&b, &cp)| acc + b * cp)
}

/// Evaluate a rational B-spline (NURBS) curve point at parameter `t`.
pub fn nurbs_curve_point(
    degree: usize,
    knots: &[f64],
    control_points: &[Point3],
    weights: &[f64],
    t: f64,
) -> Point3 {
    let n = control_points.len() - 1;
    let span = find_span(degree, knots, n, t);
    let basis = basis_functions(degree, knots, span, t);

    let mut point = DVec3::ZERO;
    let mut w = 0.0;

    for (i, &b) in basis.iter().enumerate() {
        let idx = span - degree + i;
        let bw = b * weights[idx];
        point += bw * control_points[idx];
        w += bw;
    }

    if w.abs() < 1e-15 {
        point
    } else {
        point / w
    }
}

/// Derivatives of a B-spline curve at `t`, from order 0 (the point) up to `n`.
pub fn curve_derivs(
    degree: usize,
    knots: &[f64],
    control_points: &[Point3],
    t: f64,
    n: usize,
) -> Vec<Vector3> {
    let last = control_points.len() - 1;
    let span = find_span(degree, knots, last, t);
    let nders = ders_basis_functions(degree, knots, span, t, n);

    nders
        .iter()
        .map(|row| {
            row.iter()
                .zip(&control_points[span - degree..=span])
                .fold(DVec3::ZERO, |acc, (&d, &cp)| acc + d * cp)
        })
        .collect()
}

/// Derivatives of a NURBS curve at `t`, from order 0 (the point) up to `n`.
///
/// Differentiates the homogeneous curve `(w·P, w)` and divides the weight
/// function back out, term by term.
#[allow(clippy::needless_range_loop)]
pub fn nurbs_curve_derivs(
    degree: usize,
    knots: &[f64],
    control_points: &[Point3],
    weights: &[f64],
    t: f64,
    n: usize,
) -> Vec<Vector3> {
    let last = control_points.len() - 1;
    let span = find_span(degree, knots, last, t);
    let nders = ders_basis_functions(degree, knots, span, t, n);

    let mut aders = vec![DVec3::ZERO; n + 1];
    let mut wders = vec![0.0; n + 1];
    for k in 0..=n {
        for j in 0..=degree {
            let idx = span - degree + j;
            let nw = nders[k][j] * weights[idx];
            aders[k] += nw * control_points[idx];
            wders[k] += nw;
        }
    }

    if wders[0].abs() < 1e-15 {
        return aders;
    }

    let mut ck = vec![DVec3::ZERO; n + 1];
    for k in 0..=n {
        let mut v = aders[k];
        for i in 1..=k {
            v -= binomial(k, i) * wders[i] * ck[k - i];
        }
        ck[k] = v / wders[0];
    }

    ck
}

fn binomial(n: usize, k: usize) -> f64 {
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nurbs::uniform_clamped_knots;

    fn cubic_points() -> Vec<Point3> {
        vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(3.0, 3.0, 0.0),
            DVec3::new(6.0, -6.0, 3.0),
            DVec3::new(9.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn test_curve_point_linear() {
        let knots = vec![0.0, 0.0, 1.0, 2.0, 2.0];
        let cps = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
        ];

        let p = curve_point(1, &knots, &cps, 0.5);
        assert!((p - DVec3::new(0.5, 0.0, 0.0)).length() < 1e-10);

        let p = curve_point(1, &knots, &cps, 1.5);
        assert!((p - DVec3::new(1.0, 0.5, 0.0)).length() < 1e-10);
    }

    #[test]
    fn test_cubic_bezier_matches_bernstein_form() {
        let cps = cubic_points();
        let knots = uniform_clamped_knots(4, 3);
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let s = 1.0 - t;
            let expected = s * s * s * cps[0]
                + 3.0 * s * s * t * cps[1]
                + 3.0 * s * t * t * cps[2]
                + t * t * t * cps[3];
            assert!((curve_point(3, &knots, &cps, t) - expected).length() < 1e-10);
        }
    }

    #[test]
    fn test_unit_weights_match_non_rational() {
        let cps = cubic_points();
        let knots = uniform_clamped_knots(4, 3);
        let weights = vec![1.0; 4];
        for &t in &[0.0, 0.25, 0.6, 1.0] {
            let a = curve_derivs(3, &knots, &cps, t, 2);
            let b = nurbs_curve_derivs(3, &knots, &cps, &weights, t, 2);
            for (x, y) in a.iter().zip(&b) {
                assert!((*x - *y).length() < 1e-9);
            }
            assert!((nurbs_curve_point(3, &knots, &cps, &weights, t) - a[0]).length() < 1e-10);
        }
    }

    #[test]
    fn test_cubic_bezier_derivatives() {
        // C'(0) = 3 (P1 - P0), C''(0) = 6 (P0 - 2 P1 + P2)
        let cps = cubic_points();
        let knots = uniform_clamped_knots(4, 3);
        let d = curve_derivs(3, &knots, &cps, 0.0, 2);
        assert!((d[1] - 3.0 * (cps[1] - cps[0])).length() < 1e-9);
        assert!((d[2] - 6.0 * (cps[0] - 2.0 * cps[1] + cps[2])).length() < 1e-9);
    }

    #[test]
    fn test_rational_derivative_matches_finite_difference() {
        let w = 1.0_f64 / 2.0_f64.sqrt();
        let cps = vec![
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
        ];
        let knots = vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
        let weights = vec![1.0, w, 1.0];
        let h = 1e-6;
        for &t in &[0.2, 0.5, 0.8] {
            let d = nurbs_curve_derivs(2, &knots, &cps, &weights, t, 2);
            let lo = nurbs_curve_point(2, &knots, &cps, &weights, t - h);
            let hi = nurbs_curve_point(2, &knots, &cps, &weights, t + h);
            let fd = (hi - lo) / (2.0 * h);
            assert!((d[1] - fd).length() < 1e-6, "t={}", t);
            // A circular arc keeps unit radius everywhere.
            assert!((d[0].length() - 1.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_binomial() {
        assert_eq!(binomial(4, 0), 1.0);
        assert_eq!(binomial(4, 2), 6.0);
        assert_eq!(binomial(5, 5), 1.0);
    }
}
