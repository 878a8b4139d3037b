//! Quadratic least squares and polynomial evaluation
//!
//! The fit solves the 3x3 normal equations `(XᵀX)β = Xᵀy` directly. `x` is
//! centered on the midpoint of its range and scaled by the half-range first, so
//! `t` lies in `[-1, 1]` and the system stays well conditioned even when sizes
//! are large next to their spread (10000, 10010, 10020). The coefficients are
//! expanded back to raw `x` afterwards.

/// Relative pivot size below which the normal equations count as singular.
const PIVOT_EPSILON: f64 = 1e-12;

/// Fit `y = a·x² + b·x + c` by least squares.
///
/// # Returns
///
/// * `Some([a, b, c])` - Coefficients, highest degree first
/// * `None` - If the lengths differ or the points do not determine a quadratic
///   (fewer than 3 distinct `x`)
///
/// # Examples
///
/// ```
/// use benchlens::stats::{fit_quadratic, polyval};
///
/// let coeffs = fit_quadratic(&[10.0, 20.0, 30.0], &[5.0, 20.0, 45.0]).unwrap();
/// assert!((coeffs[0] - 0.05).abs() < 1e-9);
/// assert!((polyval(&coeffs, 40.0) - 80.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn fit_quadratic(xs: &[f64], ys: &[f64]) -> Option<[f64; 3]> {
    if xs.len() != ys.len() || xs.len() < 3 {
        return None;
    }

    let (lo, hi) = xs
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| (lo.min(x), hi.max(x)));
    let center = (lo + hi) / 2.0;
    let half_range = (hi - lo) / 2.0;
    if !(half_range > 0.0 && half_range.is_finite() && center.is_finite()) {
        return None;
    }

    // power_sums[k] = Σ tᵏ, k = 0..=4 ; moment_sums[k] = Σ tᵏ·y, k = 0..=2
    let mut power_sums = [0.0_f64; 5];
    let mut moment_sums = [0.0_f64; 3];
    for (&x, &y) in xs.iter().zip(ys) {
        let t = (x - center) / half_range;
        let mut tk = 1.0;
        for (k, sum) in power_sums.iter_mut().enumerate() {
            *sum += tk;
            if k < 3 {
                moment_sums[k] += tk * y;
            }
            tk *= t;
        }
    }

    // Unknowns ordered [C, B, A] to match the power index.
    let mut system = [
        [power_sums[0], power_sums[1], power_sums[2], moment_sums[0]],
        [power_sums[1], power_sums[2], power_sums[3], moment_sums[1]],
        [power_sums[2], power_sums[3], power_sums[4], moment_sums[2]],
    ];
    let [c_t, b_t, a_t] = solve3(&mut system)?;

    // y = A·t² + B·t + C with t = (x - m) / h
    let a = a_t / (half_range * half_range);
    let b = b_t / half_range - 2.0 * a * center;
    let c = (a * center).mul_add(center, b_t.mul_add(-center / half_range, c_t));
    Some([a, b, c])
}

/// Gaussian elimination with partial pivoting on an augmented 3x4 matrix.
fn solve3(m: &mut [[f64; 4]; 3]) -> Option<[f64; 3]> {
    let magnitude = m
        .iter()
        .flat_map(|row| row[..3].iter())
        .fold(0.0_f64, |acc, v| acc.max(v.abs()));

    for col in 0..3 {
        let pivot_row = (col..3).max_by(|&i, &j| m[i][col].abs().total_cmp(&m[j][col].abs()))?;
        if m[pivot_row][col].abs() <= PIVOT_EPSILON * magnitude {
            return None;
        }
        m.swap(col, pivot_row);

        for row in col + 1..3 {
            let factor = m[row][col] / m[col][col];
            for k in col..4 {
                m[row][k] -= factor * m[col][k];
            }
        }
    }

    let mut out = [0.0_f64; 3];
    for row in (0..3).rev() {
        let tail: f64 = (row + 1..3).map(|k| m[row][k] * out[k]).sum();
        out[row] = (m[row][3] - tail) / m[row][row];
    }
    Some(out)
}

/// Evaluate a polynomial with coefficients ordered highest degree first.
#[must_use]
pub fn polyval(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().fold(0.0, |acc, &c| acc.mul_add(x, c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_quadratic_recovered() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x * x - 3.0 * x + 7.0).collect();
        let [a, b, c] = fit_quadratic(&xs, &ys).unwrap();
        assert!((a - 2.0).abs() < 1e-9);
        assert!((b + 3.0).abs() < 1e-9);
        assert!((c - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_linear_data_has_zero_leading_coefficient() {
        let xs = [10.0, 20.0, 30.0, 40.0];
        let ys = [100.0, 200.0, 300.0, 400.0];
        let [a, b, _] = fit_quadratic(&xs, &ys).unwrap();
        assert!(a.abs() < 1e-9);
        assert!((b - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_large_sizes_with_small_spread() {
        for (base, step) in [(1000.0, 1.0), (10_000.0, 10.0), (100_000.0, 1.0)] {
            let xs = [base, base + step, base + 2.0 * step];
            let ys: Vec<f64> = xs.iter().map(|x| 0.05 * x * x).collect();
            let coeffs = fit_quadratic(&xs, &ys).unwrap();

            assert!((coeffs[0] - 0.05).abs() < 1e-6, "a = {} at base {base}", coeffs[0]);
            let next = base + 3.0 * step;
            let expected = 0.05 * next * next;
            let predicted = polyval(&coeffs, next);
            assert!(
                (predicted - expected).abs() <= 1e-6 * expected,
                "predicted {predicted}, expected {expected} at base {base}"
            );
        }
    }

    #[test]
    fn test_exact_quadratic_constant_term() {
        let coeffs = fit_quadratic(&[100.0, 200.0, 300.0], &[500.0, 2000.0, 4500.0]).unwrap();
        assert!((coeffs[0] - 0.05).abs() < 1e-12);
        assert!(coeffs[1].abs() < 1e-9);
        assert!(coeffs[2].abs() < 1e-7);
    }

    #[test]
    fn test_two_distinct_x_is_singular() {
        assert!(fit_quadratic(&[10.0, 10.0, 20.0], &[1.0, 2.0, 3.0]).is_none());
    }

    #[test]
    fn test_too_few_points() {
        assert!(fit_quadratic(&[1.0, 2.0], &[1.0, 2.0]).is_none());
        assert!(fit_quadratic(&[1.0, 2.0, 3.0], &[1.0, 2.0]).is_none());
    }

    #[test]
    fn test_polyval_horner_order() {
        // 0.05x² + 0x + 0 at 40
        assert!((polyval(&[0.05, 0.0, 0.0], 40.0) - 80.0).abs() < 1e-12);
        assert!((polyval(&[1.0, 2.0, 3.0], 2.0) - 11.0).abs() < 1e-12);
        assert!(polyval(&[], 5.0).abs() < f64::EPSILON);
    }
}
