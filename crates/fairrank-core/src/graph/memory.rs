//! In-memory [`GraphView`] backed by a petgraph `StableGraph`.
//!
//! # Overview
//!
//! Nodes carry their [`NodeId`] as weight; a side map resolves ids back to
//! petgraph indices. `StableGraph` keeps the remaining indices valid when
//! nodes are removed, so the side map only loses the removed entries.
//!
//! ## Edge list format
//!
//! One edge per line, two whitespace-separated labels (`src dst`). Any
//! further tokens are ignored. Blank lines and lines starting with `#` are
//! skipped. Labels are interned into dense ids in first-seen order, and the
//! resulting [`NodeLabels`] table is returned alongside the graph.
//!
//! Duplicate edges collapse to one. In an undirected graph `a b` and `b a`
//! are the same edge.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;
use std::io::{self, BufRead};

use petgraph::{
    Direction,
    stable_graph::{NodeIndex, StableDiGraph},
};
use tracing::{debug, instrument};

use crate::error::{FairnessError, Result};
use crate::graph::betweenness::{self, BetweennessConfig};
use crate::graph::pagerank::{self, PageRankConfig};
use crate::graph::traversal;
use crate::graph::{Directedness, GraphView};
use crate::model::NodeId;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while reading edge lists or feature files.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Underlying reader failed.
    #[error("read error: {0}")]
    Io(#[from] io::Error),

    /// A line could not be interpreted.
    #[error("line {line}: {reason}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// NodeLabels
// ---------------------------------------------------------------------------

/// Bidirectional mapping between external node labels and [`NodeId`]s.
///
/// Ids are dense and assigned in interning order, so `NodeId(i)` is the
/// `i`-th distinct label seen. Removing nodes from a graph does not touch the
/// label table.
#[derive(Debug, Clone, Default)]
pub struct NodeLabels {
    labels: Vec<String>,
    by_label: HashMap<String, NodeId>,
}

impl NodeLabels {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id for `label`, assigning the next dense id if unseen.
    pub fn intern(&mut self, label: &str) -> NodeId {
        if let Some(&id) = self.by_label.get(label) {
            return id;
        }
        let id = NodeId(self.labels.len() as u64);
        self.labels.push(label.to_string());
        self.by_label.insert(label.to_string(), id);
        id
    }

    /// Id assigned to `label`, if any.
    #[must_use]
    pub fn id(&self, label: &str) -> Option<NodeId> {
        self.by_label.get(label).copied()
    }

    /// Label of `id`, if any.
    #[must_use]
    pub fn label(&self, id: NodeId) -> Option<&str> {
        usize::try_from(id.0)
            .ok()
            .and_then(|i| self.labels.get(i))
            .map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

// ---------------------------------------------------------------------------
// MemoryGraph
// ---------------------------------------------------------------------------

/// Petgraph-backed graph implementing [`GraphView`].
#[derive(Debug, Clone)]
pub struct MemoryGraph {
    graph: StableDiGraph<NodeId, ()>,
    index: HashMap<NodeId, NodeIndex>,
    directedness: Directedness,
    pagerank: PageRankConfig,
    betweenness_seed: u64,
}

impl MemoryGraph {
    /// Create an empty graph with default primitive settings.
    #[must_use]
    pub fn new(directedness: Directedness) -> Self {
        Self {
            graph: StableDiGraph::new(),
            index: HashMap::new(),
            directedness,
            pagerank: PageRankConfig::default(),
            betweenness_seed: BetweennessConfig::default().seed,
        }
    }

    /// Override the PageRank settings used by [`GraphView::pagerank`].
    #[must_use]
    pub fn with_pagerank_config(mut self, config: PageRankConfig) -> Self {
        self.pagerank = config;
        self
    }

    /// Override the seed used to sample betweenness source nodes.
    #[must_use]
    pub const fn with_betweenness_seed(mut self, seed: u64) -> Self {
        self.betweenness_seed = seed;
        self
    }

    /// Build a graph from an edge-list reader.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] if reading fails, or
    /// [`LoadError::Malformed`] for a non-comment line with fewer than two
    /// tokens.
    #[instrument(skip(reader))]
    pub fn from_edge_list<R: BufRead>(
        reader: R,
        directedness: Directedness,
    ) -> std::result::Result<(Self, NodeLabels), LoadError> {
        let mut graph = Self::new(directedness);
        let mut labels = NodeLabels::new();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let mut tokens = trimmed.split_whitespace();
            let (Some(src), Some(dst)) = (tokens.next(), tokens.next()) else {
                return Err(LoadError::Malformed {
                    line: i + 1,
                    reason: format!("expected `src dst`, got `{trimmed}`"),
                });
            };

            let a = labels.intern(src);
            let b = labels.intern(dst);
            graph.add_edge(a, b);
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "loaded edge list"
        );
        Ok((graph, labels))
    }

    #[must_use]
    pub const fn directedness(&self) -> Directedness {
        self.directedness
    }

    /// Number of stored edges (an undirected edge counts once).
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.index.contains_key(&node)
    }

    /// Add `node` if absent.
    pub fn add_node(&mut self, node: NodeId) {
        if !self.index.contains_key(&node) {
            let idx = self.graph.add_node(node);
            self.index.insert(node, idx);
        }
    }

    /// Add an edge, inserting missing endpoints. Duplicates are ignored.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) {
        self.add_node(a);
        self.add_node(b);
        let (ia, ib) = (self.index[&a], self.index[&b]);

        let exists = match self.directedness {
            Directedness::Directed => self.graph.contains_edge(ia, ib),
            Directedness::Undirected => self.graph.find_edge_undirected(ia, ib).is_some(),
        };
        if !exists {
            self.graph.add_edge(ia, ib, ());
        }
    }

    fn node_index(&self, node: NodeId) -> Result<NodeIndex> {
        self.index
            .get(&node)
            .copied()
            .ok_or(FairnessError::UnknownNode(node))
    }

    /// Deduplicated neighbor indices of `idx`, walking edges as `walk` says.
    pub(crate) fn neighbor_indices(&self, idx: NodeIndex, walk: Directedness) -> Vec<NodeIndex> {
        let mut out: Vec<NodeIndex> = match walk {
            Directedness::Directed => self
                .graph
                .neighbors_directed(idx, Direction::Outgoing)
                .collect(),
            Directedness::Undirected => self.graph.neighbors_undirected(idx).collect(),
        };
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Effective walk for a traversal: undirected graphs ignore the request.
    const fn walk(&self, directed: bool) -> Directedness {
        if directed && self.directedness.is_directed() {
            Directedness::Directed
        } else {
            Directedness::Undirected
        }
    }

    /// Dense snapshot of the adjacency for whole-graph algorithms.
    pub(crate) fn adjacency(&self) -> Adjacency {
        let indices: Vec<NodeIndex> = self.graph.node_indices().collect();
        let position: HashMap<NodeIndex, usize> = indices
            .iter()
            .enumerate()
            .map(|(pos, &idx)| (idx, pos))
            .collect();

        let out = indices
            .iter()
            .map(|&idx| {
                self.neighbor_indices(idx, self.directedness)
                    .into_iter()
                    .filter_map(|n| position.get(&n).copied())
                    .collect()
            })
            .collect();

        Adjacency {
            ids: indices.iter().map(|&idx| self.graph[idx]).collect(),
            out,
        }
    }
}

/// Position-indexed adjacency lists, in node enumeration order.
#[derive(Debug, Clone)]
pub(crate) struct Adjacency {
    /// `ids[p]` is the node at position `p`.
    pub ids: Vec<NodeId>,
    /// `out[p]` lists the distinct positions reachable in one step from `p`.
    pub out: Vec<Vec<usize>>,
}

impl Adjacency {
    pub(crate) fn len(&self) -> usize {
        self.ids.len()
    }

    pub(crate) fn zip_scores(&self, scores: Vec<f64>) -> Vec<(NodeId, f64)> {
        self.ids.iter().copied().zip(scores).collect()
    }
}

impl GraphView for MemoryGraph {
    fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    fn node_ids(&self) -> Vec<NodeId> {
        self.graph
            .node_indices()
            .map(|idx| self.graph[idx])
            .collect()
    }

    fn nodes_at_hop(&self, node: NodeId, hops: usize) -> Result<Vec<NodeId>> {
        let start = self.node_index(node)?;
        let found = if hops == 1 {
            self.neighbor_indices(start, self.directedness)
        } else {
            traversal::nodes_at_distance(self, start, hops, self.directedness)
        };

        let mut ids: Vec<NodeId> = found.into_iter().map(|idx| self.graph[idx]).collect();
        ids.sort_unstable();
        Ok(ids)
    }

    fn pagerank(&self) -> Vec<(NodeId, f64)> {
        let adjacency = self.adjacency();
        let result = pagerank::pagerank(&adjacency, &self.pagerank);
        adjacency.zip_scores(result.scores)
    }

    fn eccentricity(&self, node: NodeId, directed: bool) -> Result<f64> {
        let start = self.node_index(node)?;
        #[allow(clippy::cast_precision_loss)]
        let ecc = traversal::eccentricity(self, start, self.walk(directed)) as f64;
        Ok(ecc)
    }

    fn betweenness_centrality(&self, sampling: f64) -> Vec<(NodeId, f64)> {
        let adjacency = self.adjacency();
        let config = BetweennessConfig {
            sampling,
            seed: self.betweenness_seed,
        };
        let scores = betweenness::betweenness_centrality(&adjacency, &config);
        adjacency.zip_scores(scores)
    }

    fn remove_nodes(&mut self, nodes: &[NodeId]) -> usize {
        let mut removed = 0;
        for node in nodes {
            if let Some(idx) = self.index.remove(node) {
                self.graph.remove_node(idx);
                removed += 1;
            }
        }
        removed
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
