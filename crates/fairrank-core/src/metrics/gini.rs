//! Gini coefficient of a value distribution.
//!
//! # Definition
//!
//! Mean absolute difference over all ordered pairs, `i == j` included:
//!
//! ```text
//! G = Σᵢ Σⱼ |xᵢ − xⱼ| / (2 · n² · mean(x))
//! ```
//!
//! # Computation
//!
//! The double sum is evaluated in O(n log n) from the ascending sort
//! `x₍₀₎ ≤ … ≤ x₍ₙ₋₁₎`:
//!
//! ```text
//! Σᵢ Σⱼ |xᵢ − xⱼ| = 2 · Σᵢ (2i − n + 1) · x₍ᵢ₎
//! ```
//!
//! Inputs are expected to be non-negative. Negative values are not rejected
//! and the result for them is unspecified.

use tracing::instrument;

use crate::error::{FairnessError, Result};

/// Gini coefficient of `values`: 0 for perfect equality, approaching 1 as a
/// single value holds everything.
///
/// # Errors
///
/// Returns [`FairnessError::DegenerateDistribution`] when `values` is empty
/// or its mean is zero.
#[instrument(skip(values), fields(len = values.len()))]
#[allow(clippy::cast_precision_loss)]
pub fn gini_coefficient(values: &[f64]) -> Result<f64> {
    let n = values.len();
    let degenerate = || FairnessError::DegenerateDistribution { len: n };

    if n == 0 {
        return Err(degenerate());
    }

    let n_f64 = n as f64;
    let mean = values.iter().sum::<f64>() / n_f64;
    if mean == 0.0 {
        return Err(degenerate());
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let weighted: f64 = sorted
        .iter()
        .enumerate()
        .map(|(i, x)| (2.0 * i as f64 - n_f64 + 1.0) * x)
        .sum();

    Ok(2.0 * weighted / (2.0 * n_f64 * n_f64 * mean))
}
