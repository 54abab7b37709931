//! Knot vector utilities for B-spline/NURBS evaluation.

/// Find the knot span index for parameter `t` in the knot vector.
///
/// Returns the index `i` such that `knots[i] <= t < knots[i+1]`,
/// with special handling for the upper boundary.
///
/// # Arguments
/// * `degree` - Degree of the B-spline
/// * `knots` - The knot vector
/// * `n` - Number of control points minus 1
/// * `t` - Parameter value
pub fn find_span(degree: usize, knots: &[f64], n: usize, t: f64) -> usize {
    if t >= knots[n + 1] {
        return n;
    }
    if t <= knots[degree] {
        return degree;
    }

    let mut low = degree;
    let mut high = n + 1;
    let mut mid = (low + high) / 2;

    while t < knots[mid] || t >= knots[mid + 1] {
        if t < knots[mid] {
            high = mid;
        } else {
            low = mid;
        }
        mid = (low + high) / 2;
    }

    mid
}

/// Compute the non-vanishing basis functions at parameter `t`.
///
/// Returns a vector of `degree + 1` basis function values N_{span-degree,degree}(t)
/// through N_{span,degree}(t).
pub fn basis_functions(degree: usize, knots: &[f64], span: usize, t: f64) -> Vec<f64> {
    let mut n = vec![0.0; degree + 1];
    let mut left = vec![0.0; degree + 1];
    let mut right = vec![0.0; degree + 1];

    n[0] = 1.0;

    for j in 1..=degree {
        left[j] = t - knots[span + 1 - j];
        right[j] = knots[span + j] - t;
        let mut saved = 0.0;

        for r in 0..j {
            let temp = n[r] / (right[r + 1] + left[j - r]);
            n[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }

        n[j] = saved;
    }

    n
}

/// Compute the non-vanishing basis functions and their derivatives up to order `n`.
///
/// Row `k` of the result holds the `k`-th derivatives of N_{span-degree,degree}
/// through N_{span,degree} at `t`. Rows above `degree` are identically zero.
pub fn ders_basis_functions(
    degree: usize,
    knots: &[f64],
    span: usize,
    t: f64,
    n: usize,
) -> Vec<Vec<f64>> {
    let p = degree;
    let du = n.min(p);

    // ndu holds basis values in the upper triangle and knot differences in the lower.
    let mut ndu = vec![vec![0.0; p + 1]; p + 1];
    let mut left = vec![0.0; p + 1];
    let mut right = vec![0.0; p + 1];

    ndu[0][0] = 1.0;

    for j in 1..=p {
        left[j] = t - knots[span + 1 - j];
        right[j] = knots[span + j] - t;
        let mut saved = 0.0;

        for r in 0..j {
            ndu[j][r] = right[r + 1] + left[j - r];
            let temp = ndu[r][j - 1] / ndu[j][r];

            ndu[r][j] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        ndu[j][j] = saved;
    }

    let mut ders = vec![vec![0.0; p + 1]; n + 1];
    for j in 0..=p {
        ders[0][j] = ndu[j][p];
    }

    let mut a = vec![vec![0.0; p + 1]; 2];

    for r in 0..=p {
        let (mut s1, mut s2) = (0usize, 1usize);
        a[0][0] = 1.0;

        for k in 1..=du {
            let mut d = 0.0;
            let rk = r as isize - k as isize;
            let pk = p - k;

            if rk >= 0 {
                let rk = rk as usize;
                a[s2][0] = a[s1][0] / ndu[pk + 1][rk];
                d = a[s2][0] * ndu[rk][pk];
            }

            let j1 = if rk >= -1 { 1 } else { (-rk) as usize };
            let j2 = if r <= pk + 1 { k - 1 } else { p - r };

            for j in j1..=j2 {
                let idx = (rk + j as isize) as usize;
                a[s2][j] = (a[s1][j] - a[s1][j - 1]) / ndu[pk + 1][idx];
                d += a[s2][j] * ndu[idx][pk];
            }

            if r <= pk {
                a[s2][k] = -a[s1][k - 1] / ndu[pk + 1][r];
                d += a[s2][k] * ndu[r][pk];
            }

            ders[k][r] = d;
            std::mem::swap(&mut s1, &mut s2);
        }
    }

    // Multiply through by p! / (p - k)!
    let mut factor = p as f64;
    for k in 1..=du {
        for val in &mut ders[k] {
            *val *= factor;
        }
        factor *= (p - k) as f64;
    }

    ders
}

/// Uniform clamped knot vector for `count` control points of the given degree.
///
/// Interior knots take the integer values `1, 2, ...`, so the resulting
/// domain is `[0, count - degree]`.
pub fn uniform_clamped_knots(count: usize, degree: usize) -> Vec<f64> {
    debug_assert!(count > degree, "need at least degree + 1 control points");
    let span_count = count - degree;
    let mut knots = Vec::with_capacity(count + degree + 1);
    knots.extend(std::iter::repeat(0.0).take(degree + 1));
    knots.extend((1..span_count).map(|i| i as f64));
    knots.extend(std::iter::repeat(span_count as f64).take(degree + 1));
    knots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_span_uniform() {
        // Degree 2, 5 control points, uniform knot vector
        let knots = vec![0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 3.0, 3.0];
        let n = 4;
        let degree = 2;

        assert_eq!(find_span(degree, &knots, n, 0.0), 2);
        assert_eq!(find_span(degree, &knots, n, 0.5), 2);
        assert_eq!(find_span(degree, &knots, n, 1.0), 3);
        assert_eq!(find_span(degree, &knots, n, 2.5), 4);
        assert_eq!(find_span(degree, &knots, n, 3.0), 4);
    }

    #[test]
    fn test_basis_functions_partition_of_unity() {
        let knots = vec![0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 3.0, 3.0];
        let degree = 2;
        let n = 4;

        for &t in &[0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0] {
            let span = find_span(degree, &knots, n, t);
            let sum: f64 = basis_functions(degree, &knots, span, t).iter().sum();
            assert!(
                (sum - 1.0).abs() < 1e-12,
                "Partition of unity failed at t={}: sum={}",
                t,
                sum
            );
        }
    }

    #[test]
    fn test_ders_row_zero_matches_basis() {
        let knots = uniform_clamped_knots(6, 3);
        for i in 0..=12 {
            let t = 3.0 * i as f64 / 12.0;
            let span = find_span(3, &knots, 5, t);
            let basis = basis_functions(3, &knots, span, t);
            let ders = ders_basis_functions(3, &knots, span, t, 2);
            for (a, b) in basis.iter().zip(&ders[0]) {
                assert!((a - b).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_derivatives_sum_to_zero() {
        // Derivatives of a partition of unity sum to zero.
        let knots = uniform_clamped_knots(7, 3);
        for i in 0..=16 {
            let t = 4.0 * i as f64 / 16.0;
            let span = find_span(3, &knots, 6, t);
            let ders = ders_basis_functions(3, &knots, span, t, 3);
            for k in 1..=3 {
                let sum: f64 = ders[k].iter().sum();
                assert!(sum.abs() < 1e-9, "order {} sums to {} at t={}", k, sum, t);
            }
        }
    }

    #[test]
    fn test_first_derivative_matches_finite_difference() {
        let knots = uniform_clamped_knots(5, 2);
        let h = 1e-6;
        for &t in &[0.3, 1.2, 2.7] {
            let span = find_span(2, &knots, 4, t);
            let ders = ders_basis_functions(2, &knots, span, t, 1);
            let lo = basis_functions(2, &knots, span, t - h);
            let hi = basis_functions(2, &knots, span, t + h);
            for j in 0..=2 {
                let fd = (hi[j] - lo[j]) / (2.0 * h);
                assert!((ders[1][j] - fd).abs() < 1e-6, "t={} j={}", t, j);
            }
        }
    }

    #[test]
    fn test_orders_above_degree_are_zero() {
        let knots = uniform_clamped_knots(3, 1);
        let span = find_span(1, &knots, 2, 0.5);
        let ders = ders_basis_functions(1, &knots, span, 0.5, 3);
        assert_eq!(ders.len(), 4);
        assert!(ders[2].iter().chain(&ders[3]).all(|&v| v == 0.0));
    }

    #[test]
    fn test_uniform_clamped_knots() {
        assert_eq!(
            uniform_clamped_knots(4, 3),
            vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0]
        );
        assert_eq!(
            uniform_clamped_knots(6, 3),
            vec![0.0, 0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 3.0, 3.0, 3.0]
        );
    }
}
