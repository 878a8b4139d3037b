//! Integration tests for CSV/Parquet loading
//!
//! Writes real files into a temp dir and loads them through the public
//! storage API and `Analyzer::load`.

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use benchlens::analyzer::Analyzer;
use benchlens::config::{AnalysisConfig, HomogeneityPolicy};
use benchlens::record::RunStatus;
use benchlens::storage::{load_csv, load_path};
use benchlens::Error;

const CSV_BODY: &str = "\
size,scenario,iteration,time_ms,status,solver
20,random,1,12.5,SUCCESS,glpk
20,random,2,60000,TIMEOUT,glpk
20,random,3,14.0,SUCCESS,glpk
20,random,4,0.8,INFEASIBLE,glpk
20,random,5,3.1,CRASHED,glpk
";

fn write_file(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    path
}

/// Create a test Parquet file with `rows` rows of size 40, scenario "opposite"
#[allow(clippy::cast_precision_loss)]
fn create_test_parquet<P: AsRef<Path>>(path: P, rows: i64) -> Result<(), Box<dyn std::error::Error>> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("size", DataType::Int64, false),
        Field::new("scenario", DataType::Utf8, false),
        Field::new("iteration", DataType::Int64, false),
        Field::new("time_ms", DataType::Float64, false),
        Field::new("status", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        Arc::clone(&schema),
        vec![
            Arc::new(Int64Array::from_iter_values((0..rows).map(|_| 40))),
            Arc::new(StringArray::from_iter_values((0..rows).map(|_| "opposite"))),
            Arc::new(Int64Array::from_iter_values(1..=rows)),
            Arc::new(Float64Array::from_iter_values((1..=rows).map(|i| i as f64 * 2.0))),
            Arc::new(StringArray::from_iter_values(
                (1..=rows).map(|i| if i % 10 == 0 { "TIMEOUT" } else { "SUCCESS" }),
            )),
        ],
    )?;

    let file = File::create(path)?;
    let props = WriterProperties::builder().build();
    let mut writer = ArrowWriter::try_new(file, schema, Some(props))?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

#[test]
fn test_load_csv_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "glpk_random_20.csv", CSV_BODY);

    let dataset = load_csv(&path, &AnalysisConfig::default()).unwrap();
    assert_eq!(dataset.source(), "glpk_random_20.csv");
    assert_eq!(dataset.len(), 5);
    assert_eq!(dataset.size(), 20);
    assert_eq!(dataset.scenario(), "random");
    assert_eq!(dataset.records()[4].status(), RunStatus::Unrecognized);

    let stats = Analyzer::new(dataset).compute_stats();
    assert_eq!(stats.total_runs, 5);
    assert_eq!(stats.success_count, 2);
    assert!((stats.success_rate - 0.4).abs() < 1e-12);
    assert!((stats.time_mean().unwrap() - 13.25).abs() < 1e-12);
}

#[test]
fn test_missing_status_column_is_schema_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "no_status.csv",
        "size,scenario,iteration,time_ms\n10,random,1,1.0\n",
    );

    let err = load_csv(&path, &AnalysisConfig::default()).unwrap_err();
    assert!(matches!(err, Error::Schema(_)));
    assert!(err.to_string().contains("status"));
}

#[test]
fn test_header_only_csv_is_schema_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "empty.csv",
        "size,scenario,iteration,time_ms,status\n",
    );
    assert!(matches!(
        load_csv(&path, &AnalysisConfig::default()),
        Err(Error::Schema(_))
    ));
}

#[test]
fn test_missing_file_is_storage_error() {
    let result = load_path("/nonexistent/benchlens/none.csv", &AnalysisConfig::default());
    assert!(matches!(result, Err(Error::Storage(_))));
}

#[test]
fn test_mixed_labels_follow_policy() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "mixed.csv",
        "size,scenario,iteration,time_ms,status\n10,random,1,1.0,SUCCESS\n20,random,2,2.0,SUCCESS\n",
    );

    let dataset = load_csv(&path, &AnalysisConfig::default()).unwrap();
    assert_eq!(dataset.size(), 10);

    let strict = AnalysisConfig::builder()
        .homogeneity(HomogeneityPolicy::Strict)
        .build();
    assert!(matches!(load_csv(&path, &strict), Err(Error::Schema(_))));
}

#[test]
fn test_load_parquet_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("highs_opposite_40.parquet");
    create_test_parquet(&path, 50).unwrap();

    let analyzer = Analyzer::load(&path, AnalysisConfig::default()).unwrap();
    let dataset = analyzer.dataset();
    assert_eq!(dataset.len(), 50);
    assert_eq!(dataset.size(), 40);
    assert_eq!(dataset.scenario(), "opposite");

    let timeouts = analyzer.analyze_timeouts();
    assert_eq!(timeouts.timeout_iterations, vec![10, 20, 30, 40, 50]);
    let gaps = timeouts.gaps.unwrap();
    assert_eq!(gaps.timeout_gaps_min, 10);
    assert_eq!(gaps.timeout_gaps_max, 10);
}

#[test]
fn test_export_timeouts_csv_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("highs_opposite_40.parquet");
    create_test_parquet(&path, 50).unwrap();
    let analyzer = Analyzer::load(&path, AnalysisConfig::default()).unwrap();

    let out = dir.path().join("timeouts_opposite_40.csv");
    analyzer.export_timeouts_csv(&out).unwrap();

    let header = std::fs::read_to_string(&out).unwrap();
    assert!(header.starts_with("size,scenario,iteration,time_ms,status\n"));

    let reloaded = load_csv(&out, &AnalysisConfig::default()).unwrap();
    assert_eq!(reloaded.len(), 5);
    assert_eq!(reloaded.size(), 40);
    assert_eq!(reloaded.scenario(), "opposite");
    assert!(reloaded.records().iter().all(|r| r.status() == RunStatus::Timeout));

    let iterations: Vec<i64> = reloaded.records().iter().map(|r| r.iteration()).collect();
    assert_eq!(iterations, vec![10, 20, 30, 40, 50]);
    assert!((reloaded.records()[0].time_ms() - 20.0).abs() < 1e-12);
}
