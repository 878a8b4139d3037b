//! Timeout pattern analysis

use serde::{Deserialize, Serialize};

use crate::record::{Dataset, RunRecord, RunStatus};
use crate::stats;

/// Spacing between consecutive timeouts, in iterations.
///
/// Small gaps mean timeouts cluster in time; large gaps mean they are spread out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeoutGaps {
    /// Mean gap
    pub timeout_gaps_mean: f64,
    /// Median gap
    pub timeout_gaps_median: f64,
    /// Smallest gap
    pub timeout_gaps_min: i64,
    /// Largest gap
    pub timeout_gaps_max: i64,
}

/// Where and how often a dataset timed out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeoutAnalysis {
    /// Iteration numbers of TIMEOUT runs, ascending
    pub timeout_iterations: Vec<i64>,
    /// Number of TIMEOUT runs
    pub timeout_count: usize,
    /// Earliest timed-out iteration
    pub first_timeout: Option<i64>,
    /// Gap statistics; present only with two or more timeouts
    #[serde(flatten)]
    pub gaps: Option<TimeoutGaps>,
}

impl TimeoutAnalysis {
    /// Analyze the TIMEOUT rows of a dataset.
    #[must_use]
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut iterations: Vec<i64> = dataset
            .filter_status(RunStatus::Timeout)
            .map(RunRecord::iteration)
            .collect();
        iterations.sort_unstable();

        Self {
            timeout_count: iterations.len(),
            first_timeout: iterations.first().copied(),
            gaps: gap_stats(&iterations),
            timeout_iterations: iterations,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn gap_stats(sorted_iterations: &[i64]) -> Option<TimeoutGaps> {
    let gaps: Vec<i64> = sorted_iterations.windows(2).map(|w| w[1] - w[0]).collect();
    let as_f64: Vec<f64> = gaps.iter().map(|&g| g as f64).collect();

    Some(TimeoutGaps {
        timeout_gaps_mean: stats::mean(&as_f64)?,
        timeout_gaps_median: stats::median(&as_f64)?,
        timeout_gaps_min: *gaps.iter().min()?,
        timeout_gaps_max: *gaps.iter().max()?,
    })
}
