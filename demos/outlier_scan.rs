//! Outlier scan: full single-file report plus IQR and z-score outliers
//!
//! Run with: cargo run --example outlier_scan [-- path/to/run.csv]
//! Without a path a synthetic dataset with a few stragglers is used.

use anyhow::Context;
use benchlens::analyzer::{Analyzer, OutlierMethod};
use benchlens::config::{AnalysisConfig, HomogeneityPolicy};
use benchlens::record::{Dataset, RunRecord, RunStatus};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let analyzer = match std::env::args().nth(1) {
        Some(path) => Analyzer::load(&path, AnalysisConfig::default())
            .with_context(|| format!("failed to load {path}"))?,
        None => Analyzer::new(sample_dataset()?),
    };

    println!("{analyzer}");

    for (method, threshold) in [(OutlierMethod::Iqr, 1.5), (OutlierMethod::ZScore, 3.0)] {
        let outliers = analyzer.detect_outliers(method, threshold)?;
        println!("\n{method} (threshold {threshold}): {} outliers", outliers.len());
        if let Some(bounds) = outliers.bounds() {
            println!("  accepted range: [{:.2}, {:.2}] ms", bounds.lower, bounds.upper);
        }
        for record in outliers.top(5) {
            println!(
                "  iteration {:>4}: {:>10.2} ms",
                record.iteration(),
                record.time_ms()
            );
        }
        if let (Some(mean), Some(max)) = (outliers.mean_time(), outliers.max_time()) {
            println!("  mean {mean:.2} ms, max {max:.2} ms");
        }
    }

    let histogram = analyzer.get_time_distribution(10)?;
    println!("\nSolve-time distribution:");
    let peak = histogram.counts.iter().copied().max().unwrap_or(0).max(1);
    for (i, &count) in histogram.counts.iter().enumerate() {
        let bar = "#".repeat(usize::try_from(count * 40 / peak)?);
        println!(
            "  [{:>9.2}, {:>9.2}) {:>5} {bar}",
            histogram.edges[i],
            histogram.edges[i + 1],
            count
        );
    }

    Ok(())
}

fn sample_dataset() -> anyhow::Result<Dataset> {
    let records = (1..=200_i64)
        .map(|i| {
            let (time, status) = match i {
                _ if i % 37 == 0 => (60_000.0, RunStatus::Timeout),
                _ if i % 53 == 0 => (950.0, RunStatus::Success),
                #[allow(clippy::cast_precision_loss)]
                _ => (40.0 + (i % 11) as f64 * 1.5, RunStatus::Success),
            };
            RunRecord::new(25, "realistic", i, time, status)
        })
        .collect();
    Ok(Dataset::new(
        "sample_realistic_25.csv",
        records,
        HomogeneityPolicy::Strict,
    )?)
}
