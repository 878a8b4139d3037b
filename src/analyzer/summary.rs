//! Per-dataset statistics summary

use serde::{Deserialize, Serialize};

use crate::record::{Dataset, RunStatus};
use crate::stats;

/// Quantiles reported in every summary.
pub const QUANTILES: [f64; 6] = [0.25, 0.50, 0.75, 0.90, 0.95, 0.99];

/// Time-distribution metrics over SUCCESS records (milliseconds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeStats {
    /// Mean
    pub time_mean: f64,
    /// Median
    pub time_median: f64,
    /// Sample standard deviation
    pub time_std: f64,
    /// Minimum
    pub time_min: f64,
    /// Maximum
    pub time_max: f64,
    /// 25th percentile
    pub time_p25: f64,
    /// 50th percentile
    pub time_p50: f64,
    /// 75th percentile
    pub time_p75: f64,
    /// 90th percentile
    pub time_p90: f64,
    /// 95th percentile
    pub time_p95: f64,
    /// 99th percentile
    pub time_p99: f64,
    /// Interquartile range (p75 - p25)
    pub time_iqr: f64,
    /// Coefficient of variation (std / mean, 0 when mean <= 0)
    pub time_cv: f64,
    /// Biased sample skewness
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_skewness: Option<f64>,
    /// Biased excess kurtosis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_kurtosis: Option<f64>,
}

impl TimeStats {
    /// Compute time metrics; `None` when there are no values.
    #[must_use]
    pub fn from_times(times: &[f64]) -> Option<Self> {
        let sorted = stats::sorted(times);
        let mean = stats::mean(&sorted)?;
        let std = stats::sample_std(&sorted)?;

        let [p25, p50, p75, p90, p95, p99] = QUANTILES.map(|q| {
            // Non-empty and q within [0, 1]: always Some
            stats::quantile_sorted(&sorted, q).unwrap_or(f64::NAN)
        });

        let cv = if mean > 0.0 { std / mean } else { 0.0 };
        let (skewness, kurtosis) = shape_moments(&sorted);

        Some(Self {
            time_mean: mean,
            time_median: p50,
            time_std: std,
            time_min: sorted[0],
            time_max: sorted[sorted.len() - 1],
            time_p25: p25,
            time_p50: p50,
            time_p75: p75,
            time_p90: p90,
            time_p95: p95,
            time_p99: p99,
            time_iqr: p75 - p25,
            time_cv: cv,
            time_skewness: skewness,
            time_kurtosis: kurtosis,
        })
    }

    /// Quantiles in `QUANTILES` order.
    #[must_use]
    pub const fn quantiles(&self) -> [f64; 6] {
        [
            self.time_p25,
            self.time_p50,
            self.time_p75,
            self.time_p90,
            self.time_p95,
            self.time_p99,
        ]
    }
}

#[cfg(feature = "moments")]
fn shape_moments(times: &[f64]) -> (Option<f64>, Option<f64>) {
    (stats::skewness(times), stats::kurtosis(times))
}

#[cfg(not(feature = "moments"))]
fn shape_moments(_times: &[f64]) -> (Option<f64>, Option<f64>) {
    (None, None)
}

/// Flat summary of one dataset.
///
/// Time metrics cover SUCCESS records only and are absent when there are none;
/// status rates and counts cover every record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    /// Time-distribution metrics (flattened into the document)
    #[serde(flatten)]
    pub time: Option<TimeStats>,
    /// Fraction of SUCCESS runs
    pub success_rate: f64,
    /// Fraction of TIMEOUT runs
    pub timeout_rate: f64,
    /// Fraction of FAILED runs
    pub failed_rate: f64,
    /// Fraction of INFEASIBLE runs
    pub infeasible_rate: f64,
    /// Total number of runs
    pub total_runs: usize,
    /// SUCCESS count
    pub success_count: usize,
    /// TIMEOUT count
    pub timeout_count: usize,
    /// FAILED count
    pub failed_count: usize,
    /// INFEASIBLE count
    pub infeasible_count: usize,
}

impl StatsSummary {
    /// Compute the summary of a dataset.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let total = dataset.len();
        let [success, timeout, failed, infeasible] =
            RunStatus::KNOWN.map(|status| dataset.count_status(status));
        let rate = |count: usize| {
            if total == 0 {
                0.0
            } else {
                count as f64 / total as f64
            }
        };

        Self {
            time: TimeStats::from_times(&dataset.success_times()),
            success_rate: rate(success),
            timeout_rate: rate(timeout),
            failed_rate: rate(failed),
            infeasible_rate: rate(infeasible),
            total_runs: total,
            success_count: success,
            timeout_count: timeout,
            failed_count: failed,
            infeasible_count: infeasible,
        }
    }

    /// Mean SUCCESS time, if any run succeeded.
    #[must_use]
    pub fn time_mean(&self) -> Option<f64> {
        self.time.as_ref().map(|t| t.time_mean)
    }

    /// Median SUCCESS time, if any run succeeded.
    #[must_use]
    pub fn time_median(&self) -> Option<f64> {
        self.time.as_ref().map(|t| t.time_median)
    }

    /// Maximum SUCCESS time, if any run succeeded.
    #[must_use]
    pub fn time_max(&self) -> Option<f64> {
        self.time.as_ref().map(|t| t.time_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HomogeneityPolicy;
    use crate::record::RunRecord;

    fn dataset(rows: &[(f64, RunStatus)]) -> Dataset {
        let records = rows
            .iter()
            .enumerate()
            .map(|(i, &(t, s))| RunRecord::new(10, "random", i as i64 + 1, t, s))
            .collect();
        Dataset::new("test.csv", records, HomogeneityPolicy::Strict).unwrap()
    }

    #[test]
    fn test_time_stats_basic() {
        let t = TimeStats::from_times(&[10.0, 12.0, 11.0, 13.0, 1000.0]).unwrap();
        assert!((t.time_mean - 209.2).abs() < 1e-9);
        assert!((t.time_median - 12.0).abs() < 1e-12);
        assert!((t.time_min - 10.0).abs() < 1e-12);
        assert!((t.time_max - 1000.0).abs() < 1e-12);
        assert!((t.time_iqr - 2.0).abs() < 1e-12);
        assert!(t.time_cv > 1.0);
    }

    #[test]
    fn test_time_stats_empty() {
        assert!(TimeStats::from_times(&[]).is_none());
    }

    #[test]
    fn test_cv_zero_for_nonpositive_mean() {
        let t = TimeStats::from_times(&[0.0, 0.0]).unwrap();
        assert!(t.time_cv.abs() < f64::EPSILON);
    }

    #[test]
    fn test_rates_over_full_dataset() {
        let summary = StatsSummary::from_dataset(&dataset(&[
            (1.0, RunStatus::Success),
            (2.0, RunStatus::Success),
            (60_000.0, RunStatus::Timeout),
            (3.0, RunStatus::Failed),
            (4.0, RunStatus::Infeasible),
        ]));

        assert_eq!(summary.total_runs, 5);
        assert_eq!(summary.success_count, 2);
        assert!((summary.success_rate - 0.4).abs() < 1e-12);
        assert!((summary.timeout_rate - 0.2).abs() < 1e-12);
        let total = summary.success_rate
            + summary.timeout_rate
            + summary.failed_rate
            + summary.infeasible_rate;
        assert!((total - 1.0).abs() < 1e-12);
        // Timeout time must not leak into the time metrics
        assert!((summary.time_max().unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_unrecognized_status_counts_only_in_total() {
        let summary = StatsSummary::from_dataset(&dataset(&[
            (1.0, RunStatus::Success),
            (1.0, RunStatus::Unrecognized),
        ]));
        assert_eq!(summary.total_runs, 2);
        assert!((summary.success_rate - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_no_success_omits_time_fields() {
        let summary = StatsSummary::from_dataset(&dataset(&[(60_000.0, RunStatus::Timeout)]));
        assert!(summary.time.is_none());

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("time_mean").is_none());
        assert_eq!(json["timeout_count"], 1);
    }

    #[test]
    fn test_json_is_flat_and_round_trips() {
        let summary = StatsSummary::from_dataset(&dataset(&[
            (10.0, RunStatus::Success),
            (20.0, RunStatus::Success),
            (30.0, RunStatus::Timeout),
        ]));

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("time_p95").is_some());
        assert!(json.get("time").is_none());

        let back: StatsSummary = serde_json::from_value(json).unwrap();
        assert_eq!(back, summary);
    }
}
