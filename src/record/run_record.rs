//! Run Record - one timed solver trial

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Outcome of a single solver run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    /// Solver returned an optimal assignment.
    Success,
    /// Solver hit its time limit.
    Timeout,
    /// Solver crashed or returned an error.
    Failed,
    /// Problem instance had no feasible solution.
    Infeasible,
    /// Status string outside the four known labels.
    ///
    /// Counted in `total_runs` but in none of the status rates.
    Unrecognized,
}

impl RunStatus {
    /// The four labels a well-formed benchmark file uses.
    pub const KNOWN: [Self; 4] = [Self::Success, Self::Timeout, Self::Failed, Self::Infeasible];

    /// Canonical upper-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Timeout => "TIMEOUT",
            Self::Failed => "FAILED",
            Self::Infeasible => "INFEASIBLE",
            Self::Unrecognized => "UNRECOGNIZED",
        }
    }
}

impl FromStr for RunStatus {
    type Err = std::convert::Infallible;

    /// Exact label match after trimming; anything else is `Unrecognized`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "SUCCESS" => Self::Success,
            "TIMEOUT" => Self::Timeout,
            "FAILED" => Self::Failed,
            "INFEASIBLE" => Self::Infeasible,
            _ => Self::Unrecognized,
        })
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single benchmark trial, immutable once parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    size: i64,
    scenario: String,
    iteration: i64,
    time_ms: f64,
    status: RunStatus,
}

impl RunRecord {
    /// Create a run record.
    ///
    /// # Arguments
    ///
    /// * `size` - Problem size (N for an NxN instance)
    /// * `scenario` - Input-generation strategy label
    /// * `iteration` - Trial number within the run set
    /// * `time_ms` - Wall-clock solve time in milliseconds
    /// * `status` - Outcome of the trial
    #[must_use]
    pub fn new(
        size: i64,
        scenario: impl Into<String>,
        iteration: i64,
        time_ms: f64,
        status: RunStatus,
    ) -> Self {
        Self {
            size,
            scenario: scenario.into(),
            iteration,
            time_ms,
            status,
        }
    }

    /// Problem size.
    #[must_use]
    pub const fn size(&self) -> i64 {
        self.size
    }

    /// Scenario label.
    #[must_use]
    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    /// Trial number.
    #[must_use]
    pub const fn iteration(&self) -> i64 {
        self.iteration
    }

    /// Solve time in milliseconds.
    #[must_use]
    pub const fn time_ms(&self) -> f64 {
        self.time_ms
    }

    /// Outcome.
    #[must_use]
    pub const fn status(&self) -> RunStatus {
        self.status
    }

    /// True for `RunStatus::Success`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Success
    }
}
