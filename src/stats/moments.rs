//! Mean, dispersion and shape moments

/// Arithmetic mean, `None` if empty.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator).
///
/// A single value has no spread: returns `Some(0.0)`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn sample_std(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    if values.len() < 2 {
        return Some(0.0);
    }
    let ss: f64 = values.iter().map(|&x| (x - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Population standard deviation (n denominator), as used for z-scores.
#[must_use]
pub fn population_std(values: &[f64]) -> Option<f64> {
    central_moment(values, 2).map(f64::sqrt)
}

#[allow(clippy::cast_precision_loss)]
fn central_moment(values: &[f64], order: i32) -> Option<f64> {
    let m = mean(values)?;
    Some(values.iter().map(|&x| (x - m).powi(order)).sum::<f64>() / values.len() as f64)
}

/// Biased sample skewness `m3 / m2^1.5`.
///
/// `None` for empty input or zero variance.
#[must_use]
pub fn skewness(values: &[f64]) -> Option<f64> {
    let m2 = central_moment(values, 2)?;
    if m2 <= 0.0 {
        return None;
    }
    let m3 = central_moment(values, 3)?;
    Some(m3 / m2.powf(1.5))
}

/// Biased excess (Fisher) kurtosis `m4 / m2^2 - 3`.
///
/// `None` for empty input or zero variance.
#[must_use]
pub fn kurtosis(values: &[f64]) -> Option<f64> {
    let m2 = central_moment(values, 2)?;
    if m2 <= 0.0 {
        return None;
    }
    let m4 = central_moment(values, 4)?;
    Some(m4 / (m2 * m2) - 3.0)
}
