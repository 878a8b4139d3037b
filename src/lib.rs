//! # benchlens: Solver Benchmark Statistics
//!
//! **Version**: 0.1.0
//!
//! benchlens turns raw solver benchmark runs (one CSV or Parquet file per
//! problem size and scenario) into descriptive statistics, timeout and
//! outlier diagnostics, solve-time histograms, and cross-size scaling
//! predictions.
//!
//! ## Layers
//!
//! - **storage**: Arrow/Parquet/CSV loading with schema validation up front
//! - **record**: typed run records grouped into a [`record::Dataset`]
//! - **analyzer**: everything about one dataset
//! - **compare**: tables, quadratic scaling fits and predictions across datasets
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use benchlens::analyzer::Analyzer;
//! use benchlens::compare::Comparer;
//! use benchlens::config::AnalysisConfig;
//!
//! let analyzer = Analyzer::load("data/glpk_random_30.csv", AnalysisConfig::default())?;
//! println!("{analyzer}");
//!
//! let comparer = Comparer::from_paths(
//!     ["data/glpk_random_10.csv", "data/glpk_random_20.csv", "data/glpk_random_30.csv"],
//!     AnalysisConfig::default(),
//! )?;
//! let prediction = comparer.predict_time(50, "random")?;
//! println!("{:.1} ms expected at 50x50", prediction.predicted_mean_time);
//! # Ok::<(), benchlens::Error>(())
//! ```
//!
//! The library logs through `tracing` and never installs a subscriber.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod analyzer;
pub mod compare;
pub mod config;
pub mod error;
pub mod record;
pub mod stats;
pub mod storage;
pub mod topk;

pub use analyzer::Analyzer;
pub use compare::Comparer;
pub use config::AnalysisConfig;
pub use error::{Error, Result};
