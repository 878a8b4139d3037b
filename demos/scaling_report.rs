//! Scaling report: compare benchmark files across sizes and predict larger ones
//!
//! This demo:
//! - Writes synthetic benchmark CSVs for sizes 10..=40 into a temp dir
//!   (or uses the paths given on the command line)
//! - Prints the (scenario, size) comparison table
//! - Fits the quadratic scaling model and predicts size 60
//!
//! Run with: cargo run --example scaling_report [-- file1.csv file2.csv ...]
//! Set RUST_LOG=benchlens=debug for per-dataset logging.

use anyhow::Context;
use benchlens::compare::Comparer;
use benchlens::config::AnalysisConfig;
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("benchlens=info".parse()?),
        )
        .init();

    println!("=== benchlens Scaling Report ===\n");

    let dir = tempfile::tempdir()?;
    let mut paths: Vec<PathBuf> = std::env::args().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        paths = write_sample_files(dir.path())?;
        println!("No files given; generated {} sample files\n", paths.len());
    }

    let comparer = Comparer::from_paths(&paths, AnalysisConfig::default())
        .context("failed to load benchmark files")?;

    println!(
        "{:<12} {:>6} {:>12} {:>12} {:>9} {:>9}",
        "scenario", "size", "mean_ms", "p95_ms", "success", "timeout"
    );
    for row in comparer.compare_all() {
        let (mean, p95) = row
            .stats
            .time
            .as_ref()
            .map_or((f64::NAN, f64::NAN), |t| (t.time_mean, t.time_p95));
        println!(
            "{:<12} {:>6} {:>12.2} {:>12.2} {:>8.1}% {:>8.1}%",
            row.scenario,
            row.size,
            mean,
            p95,
            row.stats.success_rate * 100.0,
            row.stats.timeout_rate * 100.0
        );
    }
    println!();

    for scenario in comparer.scenarios() {
        let model = comparer.analyze_size_scaling(scenario)?;
        match (model.poly_coeffs, model.scaling_order) {
            (Some([a, b, c]), Some(order)) => {
                println!("{scenario}: {order} fit  t(n) = {a:.4}n² + {b:.4}n + {c:.4}");
                let prediction = comparer.predict_time(60, scenario)?;
                println!(
                    "  predicted at 60x60: {:.1} ms, timeout rate {:.1}% ({} sizes)",
                    prediction.predicted_mean_time,
                    prediction.predicted_timeout_rate * 100.0,
                    prediction.data_points
                );
            }
            _ => println!(
                "{scenario}: not enough sizes to fit ({} points)",
                model.data_points()
            ),
        }
    }

    Ok(())
}

/// Synthetic runs whose mean grows quadratically and whose timeouts grow with size
fn write_sample_files(dir: &std::path::Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for size in [10_i64, 20, 30, 40] {
        let mut body = String::from("size,scenario,iteration,time_ms,status\n");
        for i in 1..=50_i64 {
            #[allow(clippy::cast_precision_loss)]
            let time = 0.05 * (size * size) as f64 + (i % 7) as f64 * 0.1;
            let status = if i % 50 < size / 10 { "TIMEOUT" } else { "SUCCESS" };
            writeln!(body, "{size},random,{i},{time},{status}")?;
        }
        let path = dir.join(format!("sample_random_{size}.csv"));
        std::fs::write(&path, body)?;
        paths.push(path);
    }
    Ok(paths)
}
