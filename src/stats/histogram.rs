//! Equal-width histograms

use serde::{Deserialize, Serialize};

/// Histogram over a set of values: `edges.len() == counts.len() + 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Bin edges, ascending
    pub edges: Vec<f64>,
    /// Number of values per bin
    pub counts: Vec<u64>,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width bins spanning `[min, max]`.
    ///
    /// Every bin is half-open except the last, which also takes `max`.
    /// A degenerate range (`min == max`) is widened to `[min - 0.5, max + 0.5]`;
    /// empty input bins over `[0, 1]` with all counts zero.
    ///
    /// `bins` must be non-zero; callers validate it.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    #[allow(clippy::cast_possible_truncation)]
    #[allow(clippy::cast_sign_loss)]
    pub fn new(values: &[f64], bins: usize) -> Self {
        debug_assert!(bins > 0);

        let (mut lo, mut hi) = values
            .iter()
            .fold(None, |acc: Option<(f64, f64)>, &x| match acc {
                None => Some((x, x)),
                Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
            })
            .unwrap_or((0.0, 1.0));

        if (hi - lo).abs() < f64::EPSILON {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins)
            .map(|i| if i == bins { hi } else { lo + width * i as f64 })
            .collect();

        let mut counts = vec![0_u64; bins];
        for &x in values {
            let idx = (((x - lo) / (hi - lo)) * bins as f64).floor() as usize;
            counts[idx.min(bins - 1)] += 1;
        }

        Self { edges, counts }
    }

    /// Total number of binned values.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}
