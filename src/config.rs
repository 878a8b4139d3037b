//! Analysis configuration
//!
//! Supplies defaults for the convenience entry points (`Analyzer::outliers`,
//! `Analyzer::time_distribution`) and the policy knobs used while loading and
//! comparing datasets. Operations that take explicit arguments ignore it.

use serde::{Deserialize, Serialize};

use crate::analyzer::OutlierMethod;
use crate::Result;

/// How a dataset's identifying labels are derived from its rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HomogeneityPolicy {
    /// First row's size/scenario label the whole dataset; mismatches are logged only.
    #[default]
    Representative,
    /// Every row must share the first row's size/scenario, otherwise `Error::Schema`.
    Strict,
}

/// Tunables for analysis and comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Default outlier detection method
    pub outlier_method: OutlierMethod,
    /// Default outlier threshold (1.5 for IQR, 3 for z-score is customary)
    pub outlier_threshold: f64,
    /// Default histogram bin count
    pub histogram_bins: usize,
    /// Leading-coefficient magnitude above which scaling counts as quadratic
    pub quadratic_threshold: f64,
    /// Dataset label policy
    pub homogeneity: HomogeneityPolicy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            outlier_method: OutlierMethod::Iqr,
            outlier_threshold: 1.5,
            histogram_bins: 50,
            quadratic_threshold: 0.01,
            homogeneity: HomogeneityPolicy::Representative,
        }
    }
}

impl AnalysisConfig {
    /// Create a new config builder
    #[must_use]
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::Json` if the document is not a valid config
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Config builder
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    config: AnalysisConfig,
}

impl AnalysisConfigBuilder {
    /// Set default outlier method
    #[must_use]
    pub const fn outlier_method(mut self, method: OutlierMethod) -> Self {
        self.config.outlier_method = method;
        self
    }

    /// Set default outlier threshold
    #[must_use]
    pub const fn outlier_threshold(mut self, threshold: f64) -> Self {
        self.config.outlier_threshold = threshold;
        self
    }

    /// Set default histogram bin count
    #[must_use]
    pub const fn histogram_bins(mut self, bins: usize) -> Self {
        self.config.histogram_bins = bins;
        self
    }

    /// Set the quadratic classification threshold
    #[must_use]
    pub const fn quadratic_threshold(mut self, threshold: f64) -> Self {
        self.config.quadratic_threshold = threshold;
        self
    }

    /// Set the homogeneity policy
    #[must_use]
    pub const fn homogeneity(mut self, policy: HomogeneityPolicy) -> Self {
        self.config.homogeneity = policy;
        self
    }

    /// Build the config
    #[must_use]
    pub fn build(self) -> AnalysisConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_builder() {
        assert_eq!(AnalysisConfig::builder().build(), AnalysisConfig::default());
    }

    #[test]
    fn test_builder_chain() {
        let config = AnalysisConfig::builder()
            .outlier_method(OutlierMethod::ZScore)
            .outlier_threshold(3.0)
            .histogram_bins(20)
            .homogeneity(HomogeneityPolicy::Strict)
            .build();

        assert_eq!(config.outlier_method, OutlierMethod::ZScore);
        assert!((config.outlier_threshold - 3.0).abs() < f64::EPSILON);
        assert_eq!(config.histogram_bins, 20);
        assert_eq!(config.homogeneity, HomogeneityPolicy::Strict);
    }

    #[test]
    fn test_from_json_partial() {
        let config =
            AnalysisConfig::from_json_str(r#"{"outlier_method": "zscore", "homogeneity": "strict"}"#)
                .unwrap();
        assert_eq!(config.outlier_method, OutlierMethod::ZScore);
        assert_eq!(config.homogeneity, HomogeneityPolicy::Strict);
        assert_eq!(config.histogram_bins, 50);
    }

    #[test]
    fn test_from_json_rejects_unknown_method() {
        assert!(AnalysisConfig::from_json_str(r#"{"outlier_method": "mad"}"#).is_err());
    }
}
