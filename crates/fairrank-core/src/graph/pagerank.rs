//! PageRank by power iteration.
//!
//! # Algorithm
//!
//! ```text
//! PR(v) = d * Σ PR(u) / out_degree(u)   for each u → v
//! ```
//!
//! followed by a uniform redistribution of the mass that leaked out of the
//! iteration (the `1 - d` teleport share plus whatever dangling nodes held):
//!
//! ```text
//! PR(v) += (1 - Σ PR) / N
//! ```
//!
//! so scores always sum to 1. `d` is the damping factor (default 0.85).
//! Iteration stops once the L1 norm of the rank delta drops below
//! `tolerance` (default 1e-4) or after `max_iter` rounds (default 100).
//!
//! In an undirected graph every edge carries rank both ways.

use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::graph::memory::Adjacency;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for PageRank computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRankConfig {
    /// Damping factor (probability of following a link vs teleporting).
    /// Default: 0.85.
    #[serde(default = "default_damping")]
    pub damping: f64,
    /// Convergence threshold: stop when L1 norm of rank delta < tolerance.
    /// Default: 1e-4.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Maximum number of iterations.
    /// Default: 100.
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            tolerance: default_tolerance(),
            max_iter: default_max_iter(),
        }
    }
}

const fn default_damping() -> f64 {
    0.85
}

const fn default_tolerance() -> f64 {
    1e-4
}

const fn default_max_iter() -> usize {
    100
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Result of a PageRank computation.
#[derive(Debug, Clone)]
pub struct PageRankResult {
    /// Scores by adjacency position.
    pub scores: Vec<f64>,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the algorithm converged within `max_iter`.
    pub converged: bool,
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

#[must_use]
#[instrument(skip(adjacency, config), fields(nodes = adjacency.len()))]
#[allow(clippy::cast_precision_loss)]
pub(crate) fn pagerank(adjacency: &Adjacency, config: &PageRankConfig) -> PageRankResult {
    let n = adjacency.len();

    if n == 0 {
        return PageRankResult {
            scores: Vec::new(),
            iterations: 0,
            converged: true,
        };
    }

    let n_f64 = n as f64;

    // Initialize ranks uniformly.
    let mut ranks = vec![1.0 / n_f64; n];
    let mut new_ranks = vec![0.0_f64; n];

    let mut iterations = 0;
    let mut converged = false;

    for _ in 0..config.max_iter {
        iterations += 1;

        for r in &mut new_ranks {
            *r = 0.0;
        }

        // Push damped rank along every edge. Dangling nodes push nothing;
        // their share comes back through the leak redistribution below.
        for (idx, targets) in adjacency.out.iter().enumerate() {
            if targets.is_empty() {
                continue;
            }
            let share = config.damping * ranks[idx] / targets.len() as f64;
            for &t in targets {
                new_ranks[t] += share;
            }
        }

        let kept: f64 = new_ranks.iter().sum();
        let leaked = (1.0 - kept) / n_f64;
        for r in &mut new_ranks {
            *r += leaked;
        }

        // Check convergence: L1 norm of delta.
        let delta: f64 = ranks
            .iter()
            .zip(new_ranks.iter())
            .map(|(old, new)| (old - new).abs())
            .sum();

        std::mem::swap(&mut ranks, &mut new_ranks);

        if delta < config.tolerance {
            converged = true;
            break;
        }
    }

    if !converged {
        warn!(
            iterations,
            tolerance = config.tolerance,
            "PageRank did not converge; returning last iterate"
        );
    }

    PageRankResult {
        scores: ranks,
        iterations,
        converged,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
