//! Validation failures raised by score computation and the fairness metrics.
//!
//! Every variant is a deterministic user or configuration error. None of
//! them is transient, so callers should surface them rather than retry.

use crate::model::{ClassValue, NodeId};

/// Convenience alias for results carrying a [`FairnessError`].
pub type Result<T, E = FairnessError> = std::result::Result<T, E>;

/// Errors returned by [`crate::scores`] and [`crate::metrics`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FairnessError {
    /// The score algorithm name is not one of `pagerank`, `eccentricity`,
    /// `centrality`.
    #[error("invalid score algorithm `{0}`: expected pagerank, eccentricity or centrality")]
    InvalidAlgorithm(String),

    /// The top-k percentage lies outside `[0, 100]`.
    #[error("invalid value of parameter k ({0}): should be in range [0, 100]")]
    InvalidK(f64),

    /// Homophily was requested for a class with no members.
    #[error("no node has class {0}")]
    EmptyClass(ClassValue),

    /// The top-k window rounds to zero nodes.
    #[error("top-{k}% of {total} nodes rounds to an empty window")]
    EmptyTopK {
        /// Requested percentage.
        k: f64,
        /// Number of scored nodes.
        total: usize,
    },

    /// The Gini input has zero mean (empty or all zero).
    #[error("gini coefficient undefined: distribution of {len} values has zero mean")]
    DegenerateDistribution {
        /// Number of values supplied.
        len: usize,
    },

    /// A node reached by a metric has no entry in the attribute table.
    #[error("node {0} has no class attribute")]
    MissingAttribute(NodeId),

    /// A ranked (score-descending) sequence was required.
    #[error("scores must be sorted in descending order before ranking metrics")]
    NotRanked,

    /// The graph was queried for a node it does not contain.
    #[error("node {0} is not in the graph")]
    UnknownNode(NodeId),
}
