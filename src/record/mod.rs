//! Benchmark input records
//!
//! ## Schema Overview
//!
//! ```text
//! Dataset (one file, one size/scenario label) ──< RunRecord (N)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use benchlens::config::HomogeneityPolicy;
//! use benchlens::record::{Dataset, RunRecord, RunStatus};
//!
//! let records = vec![
//!     RunRecord::new(20, "random", 1, 14.2, RunStatus::Success),
//!     RunRecord::new(20, "random", 2, 60_000.0, RunStatus::Timeout),
//! ];
//! let dataset = Dataset::new("glpk_random_20.csv", records, HomogeneityPolicy::Strict)?;
//! assert_eq!(dataset.count_status(RunStatus::Timeout), 1);
//! # Ok::<(), benchlens::Error>(())
//! ```

mod dataset;
mod run_record;

pub use dataset::Dataset;
pub use run_record::{RunRecord, RunStatus};
