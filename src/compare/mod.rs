//! Cross-dataset comparison and scaling prediction
//!
//! A [`Comparer`] owns one [`Analyzer`] per input dataset, keyed by source
//! identity. It never reads records directly: every aggregate is built from
//! the analyzers' own summaries.
//!
//! ```text
//! Comparer ──< Analyzer (one per file) ── Dataset
//!    │
//!    ├── compare_all()           -> Vec<ComparisonRow>   (scenario, size) order
//!    ├── analyze_size_scaling()  -> ScalingModel         per scenario
//!    ├── predict_time()          -> Prediction           needs a fitted model
//!    └── get_size_comparison()   -> SizeComparison       per size
//! ```

mod scaling;

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub use scaling::{ScalingModel, ScalingOrder, LOG_RATE_EPSILON};

use crate::analyzer::{Analyzer, StatsSummary};
use crate::config::AnalysisConfig;
use crate::record::Dataset;
use crate::{storage, Error, Result};

/// One dataset's stats summary tagged with its identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    /// Source identity (file name)
    pub file: String,
    /// Representative problem size
    pub size: i64,
    /// Representative scenario
    pub scenario: String,
    /// Flattened stats summary
    #[serde(flatten)]
    pub stats: StatsSummary,
}

impl ComparisonRow {
    fn from_analyzer(analyzer: &Analyzer) -> Self {
        let dataset = analyzer.dataset();
        Self {
            file: dataset.source().to_string(),
            size: dataset.size(),
            scenario: dataset.scenario().to_string(),
            stats: analyzer.compute_stats(),
        }
    }
}

/// Predicted performance at an unobserved size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Requested size
    pub size: i64,
    /// Quadratic fit evaluated at `size`
    pub predicted_mean_time: f64,
    /// Two-point log-linear timeout-rate extrapolation
    pub predicted_timeout_rate: f64,
    /// Number of per-size points the model was built from
    pub data_points: usize,
    /// Growth classification of the underlying fit
    pub model: ScalingOrder,
}

/// All scenarios observed at one size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeComparison {
    /// Requested size
    pub size: i64,
    /// One row per matching dataset, ordered by source key
    pub scenarios: Vec<ComparisonRow>,
    /// Distinct scenario names, sorted
    pub scenario_names: BTreeSet<String>,
}

/// Comparer for multiple benchmark datasets
#[derive(Debug, Clone)]
pub struct Comparer {
    analyzers: BTreeMap<String, Analyzer>,
    config: AnalysisConfig,
}

impl Comparer {
    /// Create a comparer over in-memory datasets, keyed by `Dataset::source`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if two datasets share a source
    pub fn new(datasets: impl IntoIterator<Item = Dataset>) -> Result<Self> {
        Self::with_config(datasets, AnalysisConfig::default())
    }

    /// Create a comparer with an explicit config.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if two datasets share a source
    pub fn with_config(
        datasets: impl IntoIterator<Item = Dataset>,
        config: AnalysisConfig,
    ) -> Result<Self> {
        let keyed = datasets
            .into_iter()
            .map(|dataset| (dataset.source().to_string(), dataset));
        Self::from_keyed(keyed, config)
    }

    /// Load every file once and key it by its path.
    ///
    /// # Errors
    ///
    /// Returns the first load error (schema, storage, IO); no partial comparer
    /// is built. `Error::InvalidArgument` if a path is given twice.
    pub fn from_paths<P: AsRef<Path>>(
        paths: impl IntoIterator<Item = P>,
        config: AnalysisConfig,
    ) -> Result<Self> {
        let keyed = paths
            .into_iter()
            .map(|path| {
                let path = path.as_ref();
                storage::load_path(path, &config).map(|d| (path.display().to_string(), d))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_keyed(keyed, config)
    }

    fn from_keyed(
        keyed: impl IntoIterator<Item = (String, Dataset)>,
        config: AnalysisConfig,
    ) -> Result<Self> {
        let mut analyzers = BTreeMap::new();
        for (key, dataset) in keyed {
            match analyzers.entry(key) {
                Entry::Occupied(e) => {
                    return Err(Error::InvalidArgument(format!(
                        "Duplicate dataset source: {}",
                        e.key()
                    )));
                }
                Entry::Vacant(e) => {
                    e.insert(Analyzer::with_config(dataset, config.clone()));
                }
            }
        }

        info!(datasets = analyzers.len(), "comparer ready");
        Ok(Self { analyzers, config })
    }

    /// Number of datasets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.analyzers.len()
    }

    /// True if the comparer holds no datasets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }

    /// Analyzers keyed by source, in key order.
    pub fn analyzers(&self) -> impl Iterator<Item = (&str, &Analyzer)> {
        self.analyzers.iter().map(|(k, a)| (k.as_str(), a))
    }

    /// Distinct scenario labels.
    #[must_use]
    pub fn scenarios(&self) -> BTreeSet<&str> {
        self.analyzers.values().map(|a| a.dataset().scenario()).collect()
    }

    /// Stats rows for every dataset, ordered by (scenario, size).
    ///
    /// Exactly one row per owned dataset.
    #[must_use]
    pub fn compare_all(&self) -> Vec<ComparisonRow> {
        let mut rows = self.summarize_all();
        rows.sort_by(|a, b| (&a.scenario, a.size).cmp(&(&b.scenario, b.size)));
        rows
    }

    #[cfg(feature = "parallel")]
    fn summarize_all(&self) -> Vec<ComparisonRow> {
        use rayon::prelude::*;

        self.analyzers
            .par_iter()
            .map(|(_, analyzer)| ComparisonRow::from_analyzer(analyzer))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn summarize_all(&self) -> Vec<ComparisonRow> {
        self.analyzers
            .values()
            .map(ComparisonRow::from_analyzer)
            .collect()
    }

    /// Per-size series and quadratic fit for one scenario.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no dataset has this scenario
    pub fn analyze_size_scaling(&self, scenario: &str) -> Result<ScalingModel> {
        let matching: Vec<&Analyzer> = self
            .analyzers
            .values()
            .filter(|a| a.dataset().scenario() == scenario)
            .collect();

        if matching.is_empty() {
            return Err(Error::NotFound(format!("No datasets for scenario: {scenario}")));
        }

        debug!(scenario, datasets = matching.len(), "analyzing size scaling");
        Ok(ScalingModel::from_analyzers(
            scenario,
            &matching,
            self.config.quadratic_threshold,
        ))
    }

    /// Predict mean time and timeout rate for `size` in `scenario`.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the scenario is unknown, or
    /// `Error::InsufficientData` if fewer than 3 distinct sizes have data
    pub fn predict_time(&self, size: i64, scenario: &str) -> Result<Prediction> {
        let model = self.analyze_size_scaling(scenario)?;

        let (Some(predicted_mean_time), Some(order)) = (model.predict_mean(size), model.scaling_order)
        else {
            return Err(Error::InsufficientData(format!(
                "Need at least 3 distinct sizes with successful runs to predict '{scenario}', have {}",
                model.data_points()
            )));
        };

        let prediction = Prediction {
            size,
            predicted_mean_time,
            predicted_timeout_rate: model.predict_timeout_rate(size),
            data_points: model.data_points(),
            model: order,
        };
        info!(
            scenario,
            size,
            mean_ms = prediction.predicted_mean_time,
            timeout_rate = prediction.predicted_timeout_rate,
            "predicted performance"
        );
        Ok(prediction)
    }

    /// Stats for every scenario observed at `size`.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no dataset has this size
    pub fn get_size_comparison(&self, size: i64) -> Result<SizeComparison> {
        let scenarios: Vec<ComparisonRow> = self
            .analyzers
            .values()
            .filter(|a| a.dataset().size() == size)
            .map(ComparisonRow::from_analyzer)
            .collect();

        if scenarios.is_empty() {
            return Err(Error::NotFound(format!("No datasets for size: {size}")));
        }

        let scenario_names = scenarios.iter().map(|r| r.scenario.clone()).collect();
        Ok(SizeComparison {
            size,
            scenarios,
            scenario_names,
        })
    }
}

/// Stats rows for a list of datasets, ordered by size.
///
/// The single-pass counterpart of [`Comparer::compare_all`] for callers that
/// only need the table.
#[must_use]
pub fn compare_sizes(datasets: impl IntoIterator<Item = Dataset>) -> Vec<ComparisonRow> {
    let mut rows: Vec<ComparisonRow> = datasets
        .into_iter()
        .map(|d| ComparisonRow::from_analyzer(&Analyzer::new(d)))
        .collect();
    rows.sort_by_key(|r| r.size);
    rows
}
