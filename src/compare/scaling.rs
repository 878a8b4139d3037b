//! Size-scaling model for one scenario

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analyzer::Analyzer;
use crate::stats::{fit_quadratic, polyval};

/// Offset added to timeout rates before taking logs.
pub const LOG_RATE_EPSILON: f64 = 1e-6;

/// Coarse growth classification of mean solve time vs. size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalingOrder {
    /// Leading coefficient magnitude at or below the threshold
    Linear,
    /// Leading coefficient magnitude above the threshold
    Quadratic,
}

impl ScalingOrder {
    /// Classify a leading coefficient.
    #[must_use]
    pub fn classify(leading: f64, threshold: f64) -> Self {
        if leading.abs() > threshold {
            Self::Quadratic
        } else {
            Self::Linear
        }
    }
}

impl fmt::Display for ScalingOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Linear => "linear",
            Self::Quadratic => "quadratic",
        })
    }
}

/// Per-size series for one scenario plus an optional quadratic fit.
///
/// Series are ordered by ascending size and share one index. Time series hold
/// `None` for sizes with no SUCCESS runs. `poly_coeffs` and `scaling_order`
/// are present only when at least three distinct sizes have a mean time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingModel {
    /// Scenario label
    pub scenario: String,
    /// Problem sizes, ascending
    pub sizes: Vec<i64>,
    /// Mean SUCCESS time per size
    pub mean_times: Vec<Option<f64>>,
    /// Median SUCCESS time per size
    pub median_times: Vec<Option<f64>>,
    /// Max SUCCESS time per size
    pub max_times: Vec<Option<f64>>,
    /// Success rate per size
    pub success_rates: Vec<f64>,
    /// Timeout rate per size
    pub timeout_rates: Vec<f64>,
    /// Quadratic coefficients of mean time vs. size, highest degree first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poly_coeffs: Option<[f64; 3]>,
    /// Growth classification of the fit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaling_order: Option<ScalingOrder>,
}

impl ScalingModel {
    /// Build the model from analyzers that all belong to `scenario`.
    ///
    /// Analyzers are ordered by size here; input order does not matter.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_analyzers(scenario: &str, analyzers: &[&Analyzer], quadratic_threshold: f64) -> Self {
        let mut ordered = analyzers.to_vec();
        ordered.sort_by_key(|a| a.dataset().size());

        let mut model = Self {
            scenario: scenario.to_string(),
            sizes: Vec::with_capacity(ordered.len()),
            mean_times: Vec::with_capacity(ordered.len()),
            median_times: Vec::with_capacity(ordered.len()),
            max_times: Vec::with_capacity(ordered.len()),
            success_rates: Vec::with_capacity(ordered.len()),
            timeout_rates: Vec::with_capacity(ordered.len()),
            poly_coeffs: None,
            scaling_order: None,
        };

        for analyzer in ordered {
            let stats = analyzer.compute_stats();
            let size = analyzer.dataset().size();
            if stats.time.is_none() {
                warn!(scenario, size, "no successful runs; size excluded from fit");
            }
            model.sizes.push(size);
            model.mean_times.push(stats.time_mean());
            model.median_times.push(stats.time_median());
            model.max_times.push(stats.time_max());
            model.success_rates.push(stats.success_rate);
            model.timeout_rates.push(stats.timeout_rate);
        }

        let (xs, ys): (Vec<f64>, Vec<f64>) = model
            .sizes
            .iter()
            .zip(&model.mean_times)
            .filter_map(|(&size, mean)| mean.map(|m| (size as f64, m)))
            .unzip();
        let distinct: BTreeSet<i64> = model
            .sizes
            .iter()
            .zip(&model.mean_times)
            .filter(|(_, mean)| mean.is_some())
            .map(|(&size, _)| size)
            .collect();

        if distinct.len() >= 3 {
            if let Some(coeffs) = fit_quadratic(&xs, &ys) {
                let order = ScalingOrder::classify(coeffs[0], quadratic_threshold);
                info!(
                    scenario,
                    points = xs.len(),
                    a = coeffs[0],
                    b = coeffs[1],
                    c = coeffs[2],
                    order = %order,
                    "fitted scaling model"
                );
                model.poly_coeffs = Some(coeffs);
                model.scaling_order = Some(order);
            } else {
                warn!(scenario, "quadratic fit is singular; model left unfitted");
            }
        }

        model
    }

    /// True if quadratic coefficients are available.
    #[must_use]
    pub const fn is_fitted(&self) -> bool {
        self.poly_coeffs.is_some()
    }

    /// Number of per-size points in the series.
    #[must_use]
    pub fn data_points(&self) -> usize {
        self.sizes.len()
    }

    /// Mean time predicted by the fit, if fitted.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn predict_mean(&self, size: i64) -> Option<f64> {
        self.poly_coeffs.map(|c| polyval(&c, size as f64))
    }

    /// Two-point log-linear timeout-rate extrapolation.
    ///
    /// Takes the first and last sizes with a nonzero timeout rate and fits
    /// `rate = exp(slope·size + intercept)` through exactly those two points,
    /// capped at 1.0. With a single nonzero point (or both at one size) the
    /// last nonzero rate is returned; with none, 0.0.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn predict_timeout_rate(&self, size: i64) -> f64 {
        let nonzero: Vec<(f64, f64)> = self
            .sizes
            .iter()
            .zip(&self.timeout_rates)
            .filter(|(_, &rate)| rate > 0.0)
            .map(|(&s, &rate)| (s as f64, rate))
            .collect();

        let (Some(&(x0, r0)), Some(&(x1, r1))) = (nonzero.first(), nonzero.last()) else {
            return 0.0;
        };
        if nonzero.len() < 2 || x1 == x0 {
            return r1;
        }

        let (l0, l1) = ((r0 + LOG_RATE_EPSILON).ln(), (r1 + LOG_RATE_EPSILON).ln());
        let slope = (l1 - l0) / (x1 - x0);
        let intercept = slope.mul_add(-x0, l0);
        slope.mul_add(size as f64, intercept).exp().min(1.0)
    }
}
