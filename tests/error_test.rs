//! Tests for error types

use benchlens::Error;

#[test]
fn test_schema_error() {
    let error = Error::Schema("Missing required columns: status".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Schema error"));
    assert!(error_str.contains("status"));
}

#[test]
fn test_invalid_argument_error() {
    let error = Error::InvalidArgument("Unknown outlier method: mad".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Invalid argument"));
    assert!(error_str.contains("mad"));
}

#[test]
fn test_not_found_error() {
    let error = Error::NotFound("No datasets for scenario: identical".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Not found"));
    assert!(error_str.contains("identical"));
}

#[test]
fn test_insufficient_data_error() {
    let error = Error::InsufficientData("have 2".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Insufficient data"));
    assert!(error_str.contains("more problem sizes"));
}

#[test]
fn test_storage_error() {
    let error = Error::Storage("file not found".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Storage error"));
    assert!(error_str.contains("file not found"));
}

#[test]
fn test_io_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.csv");
    let error: Error = io_error.into();
    let error_str = format!("{error}");
    assert!(error_str.contains("IO error"));
    assert!(error_str.contains("missing.csv"));
}

#[test]
fn test_json_error_conversion() {
    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: Error = json_error.into();
    assert!(format!("{error}").contains("JSON error"));
}

#[test]
fn test_error_debug_format() {
    let error = Error::NotFound("size 40".to_string());
    let debug_str = format!("{error:?}");
    assert!(debug_str.contains("NotFound"));
}
