//! Numeric routines behind the analyzer and comparer
//!
//! Plain functions over `&[f64]`. Quantiles interpolate linearly between order
//! statistics; the quadratic fit solves the normal equations in closed form.

mod histogram;
mod moments;
mod quantile;
mod regression;

pub use histogram::Histogram;
pub use moments::{kurtosis, mean, population_std, sample_std, skewness};
pub use quantile::{median, quantile, quantile_sorted, sorted};
pub use regression::{fit_quadratic, polyval};
