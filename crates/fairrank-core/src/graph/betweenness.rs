//! Betweenness centrality via Brandes' algorithm, with source sampling.
//!
//! # Overview
//!
//! Betweenness centrality measures how often a node lies on shortest paths
//! between other pairs of nodes. High-betweenness nodes are bridges between
//! otherwise weakly connected parts of the graph.
//!
//! # Algorithm
//!
//! Brandes (2001) for unweighted graphs:
//!
//! 1. For each source node `s`, run BFS to compute shortest-path counts
//!    and distances.
//! 2. Accumulate dependency scores in reverse BFS order (farthest nodes first).
//! 3. Sum the dependency scores across all source nodes.
//!
//! # Sampling
//!
//! With `sampling < 1.0` only `ceil(n * sampling)` source nodes are used,
//! chosen by shuffling the node positions with a `StdRng` seeded from
//! [`BetweennessConfig::seed`]. The same graph and seed always yield the same
//! scores.
//!
//! # Output
//!
//! Raw dependency sums, **not** normalized and not halved for undirected
//! graphs. Callers must not assume scores lie in `[0, 1]`.

use std::collections::VecDeque;

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::graph::memory::Adjacency;

/// Source sampling settings for betweenness centrality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BetweennessConfig {
    /// Fraction of nodes used as BFS sources. Default: 0.5.
    #[serde(default = "default_sampling")]
    pub sampling: f64,
    /// Seed for choosing the sampled sources. Default: 0.
    #[serde(default)]
    pub seed: u64,
}

impl Default for BetweennessConfig {
    fn default() -> Self {
        Self {
            sampling: default_sampling(),
            seed: 0,
        }
    }
}

const fn default_sampling() -> f64 {
    0.5
}

/// Positions used as BFS sources.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn sample_sources(n: usize, config: &BetweennessConfig) -> Vec<usize> {
    let mut sources: Vec<usize> = (0..n).collect();
    if config.sampling >= 1.0 || n == 0 {
        return sources;
    }

    let wanted = ((n as f64) * config.sampling.max(0.0)).ceil() as usize;
    let wanted = wanted.clamp(1, n);

    let mut rng = StdRng::seed_from_u64(config.seed);
    sources.shuffle(&mut rng);
    sources.truncate(wanted);
    sources.sort_unstable();
    sources
}

/// Compute betweenness centrality for every node.
///
/// # Returns
///
/// One raw score per adjacency position. Nodes that lie on no sampled
/// shortest path score 0.0.
#[must_use]
#[instrument(skip(adjacency, config), fields(nodes = adjacency.len()))]
pub(crate) fn betweenness_centrality(adjacency: &Adjacency, config: &BetweennessConfig) -> Vec<f64> {
    let n = adjacency.len();

    if n == 0 {
        return Vec::new();
    }

    let sources = sample_sources(n, config);
    debug!(sources = sources.len(), "betweenness sources sampled");

    // Node-indexed betweenness accumulator.
    let mut cb: Vec<f64> = vec![0.0; n];

    for &s in &sources {
        // Stack: nodes in order of discovery (farthest popped first).
        let mut stack: Vec<usize> = Vec::with_capacity(n);

        // predecessors[w] = nodes immediately preceding w on shortest paths
        // from s.
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];

        // sigma[t]: number of shortest paths from s to t.
        let mut sigma: Vec<f64> = vec![0.0; n];
        sigma[s] = 1.0;

        // dist[t]: distance from s to t (-1 = unvisited).
        let mut dist: Vec<i64> = vec![-1; n];
        dist[s] = 0;

        let mut queue: VecDeque<usize> = VecDeque::new();
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            stack.push(v);

            for &w in &adjacency.out[v] {
                // First visit to w?
                if dist[w] < 0 {
                    dist[w] = dist[v] + 1;
                    queue.push_back(w);
                }

                // Shortest path to w via v?
                if dist[w] == dist[v] + 1 {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        // Accumulate dependencies in reverse BFS order.
        let mut delta: Vec<f64> = vec![0.0; n];

        while let Some(w) = stack.pop() {
            for &v in &predecessors[w] {
                if sigma[w] > 0.0 {
                    delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
                }
            }

            if w != s {
                cb[w] += delta[w];
            }
        }
    }

    cb
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
