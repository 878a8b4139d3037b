//! Single-dataset analysis
//!
//! An [`Analyzer`] owns one [`Dataset`] and computes everything about it on
//! demand: the flat [`StatsSummary`], timeout clustering, outliers and the
//! solve-time histogram. Nothing is cached and nothing is mutated after
//! construction, so analyzers can be shared freely across threads.
//!
//! ```rust
//! use benchlens::analyzer::{Analyzer, OutlierMethod};
//! use benchlens::config::HomogeneityPolicy;
//! use benchlens::record::{Dataset, RunRecord, RunStatus};
//!
//! let records = [10.0, 12.0, 11.0, 13.0, 1000.0]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, &t)| RunRecord::new(20, "random", i as i64, t, RunStatus::Success))
//!     .collect();
//! let dataset = Dataset::new("glpk_random_20.csv", records, HomogeneityPolicy::Strict)?;
//! let analyzer = Analyzer::new(dataset);
//!
//! let outliers = analyzer.detect_outliers(OutlierMethod::Iqr, 1.5)?;
//! assert_eq!(outliers.len(), 1);
//! # Ok::<(), benchlens::Error>(())
//! ```

mod outliers;
mod report;
mod summary;
mod timeouts;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tracing::debug;

pub use outliers::{OutlierBounds, OutlierMethod, OutlierSet};
pub use summary::{StatsSummary, TimeStats, QUANTILES};
pub use timeouts::{TimeoutAnalysis, TimeoutGaps};

use crate::config::AnalysisConfig;
use crate::record::{Dataset, RunRecord, RunStatus};
use crate::stats::Histogram;
use crate::topk::{top_k_by_time, SortOrder};
use crate::{storage, Error, Result};

/// Analyzer for one benchmark dataset
#[derive(Debug, Clone)]
pub struct Analyzer {
    dataset: Dataset,
    config: AnalysisConfig,
}

impl Analyzer {
    /// Create an analyzer with the default config
    #[must_use]
    pub fn new(dataset: Dataset) -> Self {
        Self::with_config(dataset, AnalysisConfig::default())
    }

    /// Create an analyzer with an explicit config
    #[must_use]
    pub const fn with_config(dataset: Dataset, config: AnalysisConfig) -> Self {
        Self { dataset, config }
    }

    /// Load a CSV or Parquet benchmark file and wrap it in an analyzer.
    ///
    /// # Errors
    ///
    /// Returns `Error::Schema` if a required column is missing, or a storage
    /// error if the file cannot be read
    pub fn load<P: AsRef<Path>>(path: P, config: AnalysisConfig) -> Result<Self> {
        let dataset = storage::load_path(path, &config)?;
        Ok(Self::with_config(dataset, config))
    }

    /// The analyzed dataset
    #[must_use]
    pub const fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// The active config
    #[must_use]
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Compute time-distribution metrics (SUCCESS only) and status rates (all rows).
    ///
    /// Input columns were validated when the dataset was built, so this cannot fail.
    #[must_use]
    pub fn compute_stats(&self) -> StatsSummary {
        let summary = StatsSummary::from_dataset(&self.dataset);
        debug!(
            source = self.dataset.source(),
            total_runs = summary.total_runs,
            success_rate = summary.success_rate,
            "computed stats"
        );
        summary
    }

    /// Timeout iterations, first timeout and inter-timeout gap statistics
    #[must_use]
    pub fn analyze_timeouts(&self) -> TimeoutAnalysis {
        TimeoutAnalysis::from_dataset(&self.dataset)
    }

    /// Flag outlying SUCCESS times, slowest first.
    ///
    /// Parse method names with `"iqr".parse::<OutlierMethod>()`; unknown names
    /// fail there with `Error::InvalidArgument`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `threshold` is not finite
    pub fn detect_outliers(&self, method: OutlierMethod, threshold: f64) -> Result<OutlierSet> {
        let set = OutlierSet::detect(&self.dataset, method, threshold)?;
        debug!(
            source = self.dataset.source(),
            method = %method,
            threshold,
            flagged = set.len(),
            "detected outliers"
        );
        Ok(set)
    }

    /// Outliers using the configured default method and threshold
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if the configured threshold is not finite
    pub fn outliers(&self) -> Result<OutlierSet> {
        self.detect_outliers(self.config.outlier_method, self.config.outlier_threshold)
    }

    /// Histogram of SUCCESS times with `bins` equal-width bins
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `bins` is zero
    pub fn get_time_distribution(&self, bins: usize) -> Result<Histogram> {
        if bins == 0 {
            return Err(Error::InvalidArgument(
                "Histogram needs at least one bin".to_string(),
            ));
        }
        Ok(Histogram::new(&self.dataset.success_times(), bins))
    }

    /// Histogram with the configured default bin count
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if the configured bin count is zero
    pub fn time_distribution(&self) -> Result<Histogram> {
        self.get_time_distribution(self.config.histogram_bins)
    }

    /// The `k` slowest SUCCESS runs
    #[must_use]
    pub fn slowest_runs(&self, k: usize) -> Vec<RunRecord> {
        top_k_by_time(
            self.dataset.filter_status(RunStatus::Success),
            k,
            SortOrder::Descending,
        )
    }

    /// TIMEOUT rows in input order
    #[must_use]
    pub fn timeout_records(&self) -> Vec<&RunRecord> {
        self.dataset.filter_status(RunStatus::Timeout).collect()
    }

    /// Write the stats summary as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` or `Error::Json` if the file cannot be written
    pub fn export_stats_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = BufWriter::new(File::create(path.as_ref())?);
        serde_json::to_writer_pretty(writer, &self.compute_stats())?;
        debug!(path = %path.as_ref().display(), "exported stats");
        Ok(())
    }

    /// Write the TIMEOUT rows as CSV with the input column layout
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` or `Error::Arrow` if the file cannot be written
    pub fn export_timeouts_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        storage::write_csv(path, self.dataset.filter_status(RunStatus::Timeout))
    }
}
