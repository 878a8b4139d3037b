//! Storage backend (Arrow/Parquet/CSV)
//!
//! Benchmark files are read once, completely, and converted from Arrow record
//! batches into typed [`RunRecord`]s. Schema validation happens here, before
//! any statistic is computed:
//!
//! - every required column must be present (all missing names are reported together)
//! - required columns must cast to their logical type without nulls
//! - extra columns are ignored

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::record::{Dataset, RunRecord, RunStatus};
use crate::{Error, Result};

/// Columns every benchmark file must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = ["size", "scenario", "iteration", "time_ms", "status"];

/// Check that `schema` carries every required column.
///
/// # Errors
///
/// Returns `Error::Schema` naming every missing column
pub fn validate_schema(schema: &Schema) -> Result<()> {
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|name| schema.column_with_name(name).is_none())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::Schema(format!(
            "Missing required columns: {}",
            missing.join(", ")
        )))
    }
}

/// Convert Arrow record batches into a dataset.
///
/// # Arguments
///
/// * `source` - Identity of the input (file name)
/// * `schema` - Schema of the batches (checked even when there are no batches)
/// * `batches` - Record batches in file order
/// * `config` - Supplies the homogeneity policy
///
/// # Errors
///
/// Returns `Error::Schema` if a required column is missing, null, or not
/// convertible, or if there are no rows
pub fn dataset_from_batches(
    source: impl Into<String>,
    schema: &Schema,
    batches: &[RecordBatch],
    config: &AnalysisConfig,
) -> Result<Dataset> {
    let source = source.into();
    validate_schema(schema)?;

    let mut records = Vec::with_capacity(batches.iter().map(RecordBatch::num_rows).sum());
    for batch in batches {
        append_batch(&mut records, batch)?;
    }

    debug!(source = %source, rows = records.len(), "loaded dataset");
    Dataset::new(source, records, config.homogeneity)
}

fn append_batch(records: &mut Vec<RunRecord>, batch: &RecordBatch) -> Result<()> {
    validate_schema(&batch.schema())?;

    let size = typed_column(batch, "size", &DataType::Int64)?;
    let scenario = typed_column(batch, "scenario", &DataType::Utf8)?;
    let iteration = typed_column(batch, "iteration", &DataType::Int64)?;
    let time_ms = typed_column(batch, "time_ms", &DataType::Float64)?;
    let status = typed_column(batch, "status", &DataType::Utf8)?;

    let size = downcast::<Int64Array>(&size, "size")?;
    let scenario = downcast::<StringArray>(&scenario, "scenario")?;
    let iteration = downcast::<Int64Array>(&iteration, "iteration")?;
    let time_ms = downcast::<Float64Array>(&time_ms, "time_ms")?;
    let status = downcast::<StringArray>(&status, "status")?;

    for row in 0..batch.num_rows() {
        let parsed: RunStatus = status
            .value(row)
            .parse()
            .unwrap_or(RunStatus::Unrecognized);
        records.push(RunRecord::new(
            size.value(row),
            scenario.value(row),
            iteration.value(row),
            time_ms.value(row),
            parsed,
        ));
    }
    Ok(())
}

/// Fetch a column by name and cast it; unconvertible values become nulls and are rejected.
fn typed_column(batch: &RecordBatch, name: &str, data_type: &DataType) -> Result<ArrayRef> {
    let column = batch
        .column_by_name(name)
        .ok_or_else(|| Error::Schema(format!("Missing required columns: {name}")))?;

    let casted = cast(column, data_type)?;
    if casted.null_count() > 0 {
        return Err(Error::Schema(format!(
            "Column '{name}' has {} null or non-{data_type} values",
            casted.null_count()
        )));
    }
    Ok(casted)
}

fn downcast<'a, T: 'static>(array: &'a ArrayRef, name: &str) -> Result<&'a T> {
    array
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| Error::Schema(format!("Column '{name}' has unexpected type")))
}

/// Load a benchmark CSV file (header row, schema inferred).
///
/// # Errors
/// Returns `Error::Schema` for missing/invalid columns, `Error::Storage` if the
/// file cannot be opened or parsed
pub fn load_csv<P: AsRef<Path>>(path: P, config: &AnalysisConfig) -> Result<Dataset> {
    use arrow::csv::reader::Format;
    use arrow::csv::ReaderBuilder;

    let path = path.as_ref();
    let mut file = File::open(path)
        .map_err(|e| Error::Storage(format!("Failed to open CSV file {}: {e}", path.display())))?;

    let format = Format::default().with_header(true);
    let (schema, _) = format
        .infer_schema(&mut file, None)
        .map_err(|e| Error::Storage(format!("Failed to infer CSV schema: {e}")))?;
    file.rewind()?;

    // Fail fast before reading any rows
    validate_schema(&schema)?;

    let schema = Arc::new(schema);
    let reader = ReaderBuilder::new(Arc::clone(&schema))
        .with_header(true)
        .build(file)
        .map_err(|e| Error::Storage(format!("Failed to create CSV reader: {e}")))?;

    let mut batches = Vec::new();
    for batch in reader {
        let batch =
            batch.map_err(|e| Error::Storage(format!("Failed to read CSV record batch: {e}")))?;
        batches.push(batch);
    }

    dataset_from_batches(source_name(path), &schema, &batches, config)
}

/// Load a benchmark Parquet file.
///
/// # Errors
/// Returns `Error::Schema` for missing/invalid columns, `Error::Storage` if the
/// file cannot be opened or parsed
pub fn load_parquet<P: AsRef<Path>>(path: P, config: &AnalysisConfig) -> Result<Dataset> {
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        Error::Storage(format!("Failed to open Parquet file {}: {e}", path.display()))
    })?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| Error::Storage(format!("Failed to parse Parquet file: {e}")))?;
    let schema = Arc::clone(builder.schema());
    validate_schema(&schema)?;

    let reader = builder
        .build()
        .map_err(|e| Error::Storage(format!("Failed to create Parquet reader: {e}")))?;

    let mut batches = Vec::new();
    for batch in reader {
        let batch =
            batch.map_err(|e| Error::Storage(format!("Failed to read record batch: {e}")))?;
        batches.push(batch);
    }

    dataset_from_batches(source_name(path), &schema, &batches, config)
}

/// Load by extension: `.parquet`/`.pq` as Parquet, anything else as CSV.
///
/// # Errors
/// See [`load_csv`] and [`load_parquet`]
pub fn load_path<P: AsRef<Path>>(path: P, config: &AnalysisConfig) -> Result<Dataset> {
    let path = path.as_ref();
    match path.extension().and_then(|e| e.to_str()) {
        Some("parquet" | "pq") => load_parquet(path, config),
        _ => load_csv(path, config),
    }
}

/// Arrow batch with the required columns, one row per record.
///
/// # Errors
///
/// Returns `Error::Arrow` if the batch cannot be assembled
pub fn records_to_batch<'a, I>(records: I) -> Result<RecordBatch>
where
    I: IntoIterator<Item = &'a RunRecord>,
{
    let records: Vec<&RunRecord> = records.into_iter().collect();
    let schema = Arc::new(Schema::new(vec![
        Field::new("size", DataType::Int64, false),
        Field::new("scenario", DataType::Utf8, false),
        Field::new("iteration", DataType::Int64, false),
        Field::new("time_ms", DataType::Float64, false),
        Field::new("status", DataType::Utf8, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from_iter_values(records.iter().map(|r| r.size()))),
        Arc::new(StringArray::from_iter_values(records.iter().map(|r| r.scenario()))),
        Arc::new(Int64Array::from_iter_values(records.iter().map(|r| r.iteration()))),
        Arc::new(Float64Array::from_iter_values(records.iter().map(|r| r.time_ms()))),
        Arc::new(StringArray::from_iter_values(records.iter().map(|r| r.status().as_str()))),
    ];
    Ok(RecordBatch::try_new(schema, columns)?)
}

/// Write records as a header-row CSV in the input column layout.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be created, `Error::Arrow` if
/// writing fails
pub fn write_csv<'a, P, I>(path: P, records: I) -> Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = &'a RunRecord>,
{
    use arrow::csv::WriterBuilder;

    let path = path.as_ref();
    let batch = records_to_batch(records)?;
    let file = BufWriter::new(File::create(path)?);
    let mut writer = WriterBuilder::new().with_header(true).build(file);
    writer.write(&batch)?;
    writer.into_inner().flush()?;
    debug!(path = %path.display(), rows = batch.num_rows(), "wrote CSV");
    Ok(())
}

fn source_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
