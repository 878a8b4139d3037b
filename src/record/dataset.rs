//! Dataset - the ordered run records of one benchmark file

use std::collections::BTreeMap;

use tracing::warn;

use super::{RunRecord, RunStatus};
use crate::config::HomogeneityPolicy;
use crate::{Error, Result};

/// Ordered, read-only sequence of run records sharing one (size, scenario) label.
///
/// The label is taken from the first record. Under
/// [`HomogeneityPolicy::Representative`] rows that disagree are kept and logged;
/// under [`HomogeneityPolicy::Strict`] construction fails instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    source: String,
    records: Vec<RunRecord>,
}

impl Dataset {
    /// Build a dataset from parsed records.
    ///
    /// # Arguments
    ///
    /// * `source` - Identity of the input (usually the file name)
    /// * `records` - Records in file order
    /// * `policy` - How to treat rows whose size/scenario differ from the first row
    ///
    /// # Errors
    ///
    /// Returns `Error::Schema` if `records` is empty, or if the policy is
    /// `Strict` and the rows carry more than one (size, scenario) label
    pub fn new(
        source: impl Into<String>,
        records: Vec<RunRecord>,
        policy: HomogeneityPolicy,
    ) -> Result<Self> {
        let source = source.into();
        let Some(first) = records.first() else {
            return Err(Error::Schema(format!("{source}: dataset contains no records")));
        };

        let mismatched = records
            .iter()
            .filter(|r| r.size() != first.size() || r.scenario() != first.scenario())
            .count();

        if mismatched > 0 {
            match policy {
                HomogeneityPolicy::Strict => {
                    return Err(Error::Schema(format!(
                        "{source}: {mismatched} rows differ from size={} scenario={}",
                        first.size(),
                        first.scenario()
                    )));
                }
                HomogeneityPolicy::Representative => {
                    warn!(
                        source = %source,
                        mismatched,
                        size = first.size(),
                        scenario = first.scenario(),
                        "dataset mixes labels; using first row as representative"
                    );
                }
            }
        }

        Ok(Self { source, records })
    }

    /// Source identity.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// All records in input order.
    #[must_use]
    pub fn records(&self) -> &[RunRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false: construction rejects empty inputs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Representative problem size (first record).
    #[must_use]
    pub fn size(&self) -> i64 {
        self.records[0].size()
    }

    /// Representative scenario (first record).
    #[must_use]
    pub fn scenario(&self) -> &str {
        self.records[0].scenario()
    }

    /// Records with the given status, in input order.
    pub fn filter_status(&self, status: RunStatus) -> impl Iterator<Item = &RunRecord> {
        self.records.iter().filter(move |r| r.status() == status)
    }

    /// Number of records with the given status.
    #[must_use]
    pub fn count_status(&self, status: RunStatus) -> usize {
        self.filter_status(status).count()
    }

    /// `time_ms` of every SUCCESS record, in input order.
    #[must_use]
    pub fn success_times(&self) -> Vec<f64> {
        self.filter_status(RunStatus::Success)
            .map(RunRecord::time_ms)
            .collect()
    }

    /// Records grouped by their own `size` field, ascending.
    #[must_use]
    pub fn group_by_size(&self) -> BTreeMap<i64, Vec<&RunRecord>> {
        let mut groups: BTreeMap<i64, Vec<&RunRecord>> = BTreeMap::new();
        for record in &self.records {
            groups.entry(record.size()).or_default().push(record);
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(size: i64, scenario: &str, status: RunStatus) -> RunRecord {
        RunRecord::new(size, scenario, 0, 1.0, status)
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let result = Dataset::new("empty.csv", vec![], HomogeneityPolicy::Representative);
        assert!(matches!(result, Err(Error::Schema(_))));
    }

    #[test]
    fn test_representative_label_from_first_row() {
        let dataset = Dataset::new(
            "mixed.csv",
            vec![
                record(10, "random", RunStatus::Success),
                record(20, "identical", RunStatus::Success),
            ],
            HomogeneityPolicy::Representative,
        )
        .unwrap();

        assert_eq!(dataset.size(), 10);
        assert_eq!(dataset.scenario(), "random");
        assert_eq!(dataset.group_by_size().len(), 2);
    }

    #[test]
    fn test_strict_policy_rejects_mixed_labels() {
        let result = Dataset::new(
            "mixed.csv",
            vec![
                record(10, "random", RunStatus::Success),
                record(10, "identical", RunStatus::Success),
            ],
            HomogeneityPolicy::Strict,
        );
        let err = result.unwrap_err();
        assert!(err.to_string().contains("1 rows differ"));
    }

    #[test]
    fn test_filter_and_count_status() {
        let dataset = Dataset::new(
            "d.csv",
            vec![
                record(10, "random", RunStatus::Success),
                record(10, "random", RunStatus::Timeout),
                record(10, "random", RunStatus::Success),
            ],
            HomogeneityPolicy::Strict,
        )
        .unwrap();

        assert_eq!(dataset.count_status(RunStatus::Success), 2);
        assert_eq!(dataset.count_status(RunStatus::Failed), 0);
        assert_eq!(dataset.success_times(), vec![1.0, 1.0]);
    }
}
