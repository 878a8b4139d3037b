//! Plain-text summary report

use std::fmt::{self, Write as _};

use super::{Analyzer, StatsSummary, TimeoutAnalysis};

impl Analyzer {
    /// Fixed-layout text report: labels, time statistics, percentiles,
    /// status breakdown and (when any run timed out) timeout analysis.
    #[must_use]
    pub fn summary_text(&self) -> String {
        let stats = self.compute_stats();
        let timeouts = (stats.timeout_count > 0).then(|| self.analyze_timeouts());
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = write_report(&mut out, self, &stats, timeouts.as_ref());
        out
    }
}

impl fmt::Display for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary_text())
    }
}

fn write_report(
    out: &mut String,
    analyzer: &Analyzer,
    stats: &StatsSummary,
    timeouts: Option<&TimeoutAnalysis>,
) -> fmt::Result {
    let dataset = analyzer.dataset();
    let size = dataset.size();

    writeln!(out, "=== Solver Benchmark Statistics ===")?;
    writeln!(out, "File: {}", dataset.source())?;
    writeln!(out, "Size: {size}x{size}")?;
    writeln!(out, "Scenario: {}", dataset.scenario())?;
    writeln!(out, "Total Runs: {}", stats.total_runs)?;
    writeln!(out)?;

    match &stats.time {
        Some(t) => {
            writeln!(out, "Time Statistics (ms):")?;
            writeln!(out, "  Mean:        {:>12.2}", t.time_mean)?;
            writeln!(out, "  Median:      {:>12.2}", t.time_median)?;
            writeln!(out, "  Std Dev:     {:>12.2}", t.time_std)?;
            writeln!(out, "  Min:         {:>12.2}", t.time_min)?;
            writeln!(out, "  Max:         {:>12.2}", t.time_max)?;
            writeln!(out, "  IQR:         {:>12.2}", t.time_iqr)?;
            writeln!(out, "  CV:          {:>12.4}", t.time_cv)?;
            writeln!(out)?;
            writeln!(out, "Percentiles (ms):")?;
            for (label, value) in ["P25", "P50", "P75", "P90", "P95", "P99"]
                .iter()
                .zip(t.quantiles())
            {
                writeln!(out, "  {label}:         {value:>12.2}")?;
            }
        }
        None => writeln!(out, "Time Statistics (ms): no successful runs")?,
    }
    writeln!(out)?;

    writeln!(out, "Status Breakdown:")?;
    for (label, count, rate) in [
        ("SUCCESS:   ", stats.success_count, stats.success_rate),
        ("TIMEOUT:   ", stats.timeout_count, stats.timeout_rate),
        ("FAILED:    ", stats.failed_count, stats.failed_rate),
        ("INFEASIBLE:", stats.infeasible_count, stats.infeasible_rate),
    ] {
        writeln!(out, "  {label}  {count:>6} ({:>6.2}%)", rate * 100.0)?;
    }

    if let Some(timeouts) = timeouts {
        writeln!(out)?;
        writeln!(out, "Timeout Analysis:")?;
        if let Some(first) = timeouts.first_timeout {
            writeln!(out, "  First timeout at iteration: {first}")?;
        }
        writeln!(out, "  Timeout count: {}", timeouts.timeout_count)?;
        if let Some(gaps) = &timeouts.gaps {
            writeln!(out, "  Mean gap between timeouts: {:.1}", gaps.timeout_gaps_mean)?;
            writeln!(out, "  Median gap: {:.1}", gaps.timeout_gaps_median)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::analyzer::Analyzer;
    use crate::config::HomogeneityPolicy;
    use crate::record::{Dataset, RunRecord, RunStatus};

    fn analyzer(statuses: &[RunStatus]) -> Analyzer {
        let records = statuses
            .iter()
            .zip(1..)
            .map(|(&s, i)| RunRecord::new(25, "opposite", i, 100.0 * i as f64, s))
            .collect();
        Analyzer::new(Dataset::new("glpk_opposite_25.csv", records, HomogeneityPolicy::Strict).unwrap())
    }

    #[test]
    fn test_report_header_and_breakdown() {
        let text = analyzer(&[RunStatus::Success, RunStatus::Success, RunStatus::Failed])
            .summary_text();
        assert!(text.contains("File: glpk_opposite_25.csv"));
        assert!(text.contains("Size: 25x25"));
        assert!(text.contains("Scenario: opposite"));
        assert!(text.contains("Total Runs: 3"));
        assert!(text.contains("P99:"));
        assert!(text.contains("66.67%"));
        assert!(!text.contains("Timeout Analysis"));
    }

    #[test]
    fn test_report_timeout_section() {
        let text = analyzer(&[
            RunStatus::Success,
            RunStatus::Timeout,
            RunStatus::Success,
            RunStatus::Timeout,
        ])
        .to_string();
        assert!(text.contains("First timeout at iteration: 2"));
        assert!(text.contains("Mean gap between timeouts: 2.0"));
    }

    #[test]
    fn test_report_without_successes() {
        let text = analyzer(&[RunStatus::Timeout]).summary_text();
        assert!(text.contains("no successful runs"));
        assert!(!text.contains("Mean gap"));
    }
}
