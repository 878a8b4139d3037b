//! Quantiles via linear interpolation between order statistics

/// Copy and sort values ascending (NaN-safe total order).
#[must_use]
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

/// Quantile `q` (0.0..=1.0) of already sorted values.
///
/// Rank is `q * (n - 1)`; the result interpolates linearly between the two
/// neighbouring order statistics.
///
/// # Returns
///
/// * `Some(value)` - The interpolated quantile
/// * `None` - If `sorted` is empty or `q` is outside `[0, 1]`
///
/// # Examples
///
/// ```
/// use benchlens::stats::quantile_sorted;
///
/// let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// assert_eq!(quantile_sorted(&data, 0.5), Some(5.5));
/// assert_eq!(quantile_sorted(&data, 0.25), Some(3.25));
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }

    let rank = q * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;

    if lower == upper {
        return Some(sorted[lower]);
    }

    let fraction = rank - lower as f64;
    Some(sorted[lower] + fraction * (sorted[upper] - sorted[lower]))
}

/// Quantile of unsorted values. Sorts a copy.
#[must_use]
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    quantile_sorted(&sorted(values), q)
}

/// Median (the 0.5 quantile).
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantile_empty() {
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn test_quantile_single() {
        assert_eq!(quantile(&[42.0], 0.0), Some(42.0));
        assert_eq!(quantile(&[42.0], 0.99), Some(42.0));
    }

    #[test]
    fn test_quantile_out_of_range() {
        assert_eq!(quantile(&[1.0, 2.0], -0.1), None);
        assert_eq!(quantile(&[1.0, 2.0], 1.1), None);
    }

    #[test]
    fn test_quantile_unsorted_input() {
        let data = [5.0, 1.0, 3.0, 2.0, 4.0];
        assert_eq!(quantile(&data, 0.5), Some(3.0));
        assert_eq!(quantile(&data, 0.0), Some(1.0));
        assert_eq!(quantile(&data, 1.0), Some(5.0));
    }

    #[test]
    fn test_quantile_interpolates() {
        let data = [10.0, 11.0, 12.0, 13.0, 1000.0];
        let p75 = quantile(&data, 0.75).unwrap();
        assert!((p75 - 13.0).abs() < 1e-12);
        let p90 = quantile(&data, 0.90).unwrap();
        assert!((p90 - 605.2).abs() < 1e-9);
    }

    #[test]
    fn test_median_even() {
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }
}
