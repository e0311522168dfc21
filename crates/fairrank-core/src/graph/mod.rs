//! Graph capability interface and the in-memory implementation.
//!
//! # Overview
//!
//! The metrics never touch a concrete graph type. They consume the
//! [`GraphView`] trait, which exposes exactly the queries the analysis
//! needs: node enumeration, 1-hop neighbor lookup, node removal, and three
//! score-producing primitives. Any storage that can answer these queries can
//! be analysed.
//!
//! [`MemoryGraph`] is the bundled implementation: a petgraph `StableGraph`
//! (node indices survive removals) plus a [`NodeLabels`] table mapping the
//! external string labels of an edge-list file to dense [`NodeId`]s.
//!
//! ## Pipeline
//!
//! ```text
//! edge list file
//!        ↓  MemoryGraph::from_edge_list()
//! (MemoryGraph, NodeLabels)
//!        ↓  AttributeTable::eliminate_unknown()
//! MemoryGraph without unknown-class nodes
//!        ↓  GraphView::{pagerank, eccentricity, betweenness_centrality}
//! per-node scores
//! ```
//!
//! ## Directedness
//!
//! In a [`Directedness::Directed`] graph, neighbors and traversals follow
//! out-edges only. In an undirected graph every edge is walked both ways.

pub mod betweenness;
pub mod memory;
pub mod pagerank;
pub mod traversal;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::NodeId;

pub use memory::{LoadError, MemoryGraph, NodeLabels};

/// Whether edges are walked one way or both ways.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Directedness {
    Directed,
    Undirected,
}

impl Directedness {
    #[must_use]
    pub const fn from_flag(directed: bool) -> Self {
        if directed { Self::Directed } else { Self::Undirected }
    }

    #[must_use]
    pub const fn is_directed(self) -> bool {
        matches!(self, Self::Directed)
    }
}

/// Read-only query surface (plus node removal) the analysis needs from a
/// graph.
///
/// Implementations must enumerate nodes in a stable order: the score
/// ordering ties and the metrics' iteration order are defined by it.
pub trait GraphView {
    /// Number of nodes currently in the graph.
    fn node_count(&self) -> usize;

    /// All node ids, in stable enumeration order.
    fn node_ids(&self) -> Vec<NodeId>;

    /// Nodes at exactly `hops` steps from `node`, deduplicated, in ascending
    /// id order.
    ///
    /// For `hops == 1` this is the direct neighbor set, which contains
    /// `node` itself only when it has a self-loop.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FairnessError::UnknownNode`] if `node` is absent.
    fn nodes_at_hop(&self, node: NodeId, hops: usize) -> Result<Vec<NodeId>>;

    /// PageRank score of every node, in enumeration order.
    fn pagerank(&self) -> Vec<(NodeId, f64)>;

    /// Greatest finite shortest-path distance from `node` to any node it can
    /// reach. Follows out-edges only when `directed` is set; isolated nodes
    /// have eccentricity 0.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FairnessError::UnknownNode`] if `node` is absent.
    fn eccentricity(&self, node: NodeId, directed: bool) -> Result<f64>;

    /// Raw (unnormalized) betweenness centrality of every node, in
    /// enumeration order, accumulated from a `sampling` fraction of source
    /// nodes.
    fn betweenness_centrality(&self, sampling: f64) -> Vec<(NodeId, f64)>;

    /// Remove the given nodes and their edges. Ids not in the graph are
    /// ignored. Returns how many nodes were removed.
    fn remove_nodes(&mut self, nodes: &[NodeId]) -> usize;
}
