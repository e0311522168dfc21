//! Per-node score computation.
//!
//! # Overview
//!
//! [`compute_scores`] dispatches to one of the graph's ranking primitives and
//! returns a [`ScoreMap`]: an explicit sequence of `(node, score)` pairs plus
//! an O(1) lookup index. Ranking metrics walk the sequence, never a hash
//! map's iteration order.
//!
//! # Algorithms
//!
//! | Name           | Score                                             |
//! |----------------|---------------------------------------------------|
//! | `pagerank`     | graph PageRank, unchanged                         |
//! | `eccentricity` | `1 / ecc(node)` over out-edges; `0` when ecc is 0  |
//! | `centrality`   | raw betweenness from half the nodes as sources    |
//!
//! # Ordering
//!
//! Fresh maps are in graph enumeration order. [`ScoreMap::rank`] sorts by
//! score descending with a stable sort, so ties keep enumeration order.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{FairnessError, Result};
use crate::graph::GraphView;
use crate::model::NodeId;

/// Source fraction passed to the betweenness primitive.
pub const CENTRALITY_SAMPLING: f64 = 0.5;

/// Ranking algorithm used to score nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Pagerank,
    Eccentricity,
    Centrality,
}

impl Algorithm {
    /// Every supported algorithm.
    pub const ALL: [Self; 3] = [Self::Pagerank, Self::Eccentricity, Self::Centrality];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pagerank => "pagerank",
            Self::Eccentricity => "eccentricity",
            Self::Centrality => "centrality",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = FairnessError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pagerank" => Ok(Self::Pagerank),
            "eccentricity" => Ok(Self::Eccentricity),
            "centrality" => Ok(Self::Centrality),
            other => Err(FairnessError::InvalidAlgorithm(other.to_string())),
        }
    }
}

/// Iteration order of a [`ScoreMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreOrder {
    /// Order in which the producer enumerated the nodes.
    Enumeration,
    /// Score descending; ties keep enumeration order.
    Descending,
}

/// Ordered node → score mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreMap {
    entries: Vec<(NodeId, f64)>,
    position: HashMap<NodeId, usize>,
    order: ScoreOrder,
}

impl ScoreMap {
    /// Build a map in the given enumeration order. A later duplicate node
    /// overwrites the earlier score in place.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = (NodeId, f64)>) -> Self {
        let mut map = Self {
            entries: Vec::new(),
            position: HashMap::new(),
            order: ScoreOrder::Enumeration,
        };
        for (node, score) in entries {
            if let Some(&pos) = map.position.get(&node) {
                map.entries[pos].1 = score;
            } else {
                map.position.insert(node, map.entries.len());
                map.entries.push((node, score));
            }
        }
        map
    }

    /// Sort by score descending. Ties keep their current relative order.
    #[must_use]
    pub fn rank(mut self) -> Self {
        if self.order == ScoreOrder::Descending {
            return self;
        }
        self.entries.sort_by(|a, b| b.1.total_cmp(&a.1));
        self.position = self
            .entries
            .iter()
            .enumerate()
            .map(|(pos, (node, _))| (*node, pos))
            .collect();
        self.order = ScoreOrder::Descending;
        self
    }

    #[must_use]
    pub const fn order(&self) -> ScoreOrder {
        self.order
    }

    #[must_use]
    pub fn is_ranked(&self) -> bool {
        self.order == ScoreOrder::Descending
    }

    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<f64> {
        self.position.get(&node).map(|&pos| self.entries[pos].1)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in map order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.entries.iter().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[(NodeId, f64)] {
        &self.entries
    }

    /// Scores in map order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, score)| *score).collect()
    }
}

/// Score every node of `graph` with `algorithm`.
///
/// With `sorted_descending` the result is [ranked](ScoreMap::rank);
/// otherwise it follows the primitive's enumeration order. The graph is only
/// read.
///
/// # Errors
///
/// Propagates [`FairnessError::UnknownNode`] from the eccentricity
/// primitive, which only happens with an inconsistent [`GraphView`].
pub fn compute_scores<G: GraphView + ?Sized>(
    graph: &G,
    algorithm: Algorithm,
    sorted_descending: bool,
) -> Result<ScoreMap> {
    compute_scores_sampled(graph, algorithm, sorted_descending, CENTRALITY_SAMPLING)
}

/// [`compute_scores`] with an explicit betweenness source fraction.
///
/// `centrality_sampling` only affects [`Algorithm::Centrality`].
///
/// # Errors
///
/// Same as [`compute_scores`].
#[instrument(skip(graph), fields(nodes = graph.node_count()))]
pub fn compute_scores_sampled<G: GraphView + ?Sized>(
    graph: &G,
    algorithm: Algorithm,
    sorted_descending: bool,
    centrality_sampling: f64,
) -> Result<ScoreMap> {
    let scores = match algorithm {
        Algorithm::Pagerank => ScoreMap::from_entries(graph.pagerank()),
        Algorithm::Eccentricity => {
            let mut entries = Vec::with_capacity(graph.node_count());
            for node in graph.node_ids() {
                let ecc = graph.eccentricity(node, true)?;
                // Isolated or degenerate node: defined as 0, not a division.
                let score = if ecc == 0.0 { 0.0 } else { 1.0 / ecc };
                entries.push((node, score));
            }
            ScoreMap::from_entries(entries)
        }
        Algorithm::Centrality => {
            ScoreMap::from_entries(graph.betweenness_centrality(centrality_sampling))
        }
    };

    debug!(scored = scores.len(), "scores computed");

    Ok(if sorted_descending {
        scores.rank()
    } else {
        scores
    })
}
