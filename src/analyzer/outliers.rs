//! Outlier detection over SUCCESS solve times

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::record::{Dataset, RunRecord, RunStatus};
use crate::stats;
use crate::topk::{top_k_by_time, SortOrder};
use crate::{Error, Result};

/// Outlier detection method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlierMethod {
    /// Tukey fences: outside `[q1 - t·iqr, q3 + t·iqr]`
    Iqr,
    /// `|x - mean| / std > t` with population standard deviation
    ZScore,
}

impl OutlierMethod {
    /// Method name as accepted by `FromStr`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Iqr => "iqr",
            Self::ZScore => "zscore",
        }
    }
}

impl FromStr for OutlierMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "iqr" => Ok(Self::Iqr),
            "zscore" => Ok(Self::ZScore),
            other => Err(Error::InvalidArgument(format!(
                "Unknown outlier method: {other} (expected 'iqr' or 'zscore')"
            ))),
        }
    }
}

impl fmt::Display for OutlierMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Acceptance interval used to flag outliers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlierBounds {
    /// Values below are flagged
    pub lower: f64,
    /// Values above are flagged
    pub upper: f64,
}

/// SUCCESS records flagged by a detection method, slowest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierSet {
    method: OutlierMethod,
    threshold: f64,
    bounds: Option<OutlierBounds>,
    records: Vec<RunRecord>,
}

impl OutlierSet {
    /// Flag SUCCESS records of `dataset`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `threshold` is not finite
    pub fn detect(dataset: &Dataset, method: OutlierMethod, threshold: f64) -> Result<Self> {
        if !threshold.is_finite() {
            return Err(Error::InvalidArgument(format!(
                "Outlier threshold must be finite, got {threshold}"
            )));
        }

        let successful: Vec<&RunRecord> = dataset.filter_status(RunStatus::Success).collect();
        let times: Vec<f64> = successful.iter().map(|r| r.time_ms()).collect();

        let (bounds, flagged): (Option<OutlierBounds>, Vec<&RunRecord>) = match method {
            OutlierMethod::Iqr => iqr_fences(&times, threshold).map_or_else(
                || (None, Vec::new()),
                |b| {
                    let flagged = successful
                        .iter()
                        .copied()
                        .filter(|r| r.time_ms() < b.lower || r.time_ms() > b.upper)
                        .collect();
                    (Some(b), flagged)
                },
            ),
            OutlierMethod::ZScore => match (stats::mean(&times), stats::population_std(&times)) {
                (Some(mean), Some(std)) => {
                    let bounds = OutlierBounds {
                        lower: threshold.mul_add(-std, mean),
                        upper: threshold.mul_add(std, mean),
                    };
                    // Zero spread: every z-score is undefined, nothing is flagged
                    let flagged = if std > 0.0 {
                        successful
                            .iter()
                            .copied()
                            .filter(|r| ((r.time_ms() - mean) / std).abs() > threshold)
                            .collect()
                    } else {
                        Vec::new()
                    };
                    (Some(bounds), flagged)
                }
                _ => (None, Vec::new()),
            },
        };

        let count = flagged.len();
        Ok(Self {
            method,
            threshold,
            bounds,
            records: top_k_by_time(flagged, count, SortOrder::Descending),
        })
    }

    /// Detection method used.
    #[must_use]
    pub const fn method(&self) -> OutlierMethod {
        self.method
    }

    /// Threshold used.
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Acceptance interval, `None` when there were no SUCCESS records.
    #[must_use]
    pub const fn bounds(&self) -> Option<OutlierBounds> {
        self.bounds
    }

    /// Flagged records, slowest first.
    #[must_use]
    pub fn records(&self) -> &[RunRecord] {
        &self.records
    }

    /// Number of flagged records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if nothing was flagged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The `k` slowest flagged records.
    #[must_use]
    pub fn top(&self, k: usize) -> &[RunRecord] {
        &self.records[..k.min(self.records.len())]
    }

    /// Iteration numbers of flagged records, slowest first.
    #[must_use]
    pub fn iterations(&self) -> Vec<i64> {
        self.records.iter().map(RunRecord::iteration).collect()
    }

    fn times(&self) -> Vec<f64> {
        self.records.iter().map(RunRecord::time_ms).collect()
    }

    /// Mean time of flagged records.
    #[must_use]
    pub fn mean_time(&self) -> Option<f64> {
        stats::mean(&self.times())
    }

    /// Median time of flagged records.
    #[must_use]
    pub fn median_time(&self) -> Option<f64> {
        stats::median(&self.times())
    }

    /// Largest flagged time.
    #[must_use]
    pub fn max_time(&self) -> Option<f64> {
        self.records.first().map(RunRecord::time_ms)
    }
}

fn iqr_fences(times: &[f64], threshold: f64) -> Option<OutlierBounds> {
    let sorted = stats::sorted(times);
    let q1 = stats::quantile_sorted(&sorted, 0.25)?;
    let q3 = stats::quantile_sorted(&sorted, 0.75)?;
    let iqr = q3 - q1;
    Some(OutlierBounds {
        lower: threshold.mul_add(-iqr, q1),
        upper: threshold.mul_add(iqr, q3),
    })
}
