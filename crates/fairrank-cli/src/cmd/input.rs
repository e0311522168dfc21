//! Shared graph + features loading for the graph-consuming commands.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tracing::{info, warn};

use fairrank_core::config::AnalysisConfig;
use fairrank_core::{AttributeTable, Directedness, GraphView, MemoryGraph, NodeId, NodeLabels};

/// Input files shared by every command that reads a graph.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Edge list: one `src dst` pair per line, `#` comments allowed.
    #[arg(long, value_name = "FILE")]
    pub edges: PathBuf,

    /// Features file: node label followed by one-hot class columns.
    #[arg(long, value_name = "FILE")]
    pub features: PathBuf,

    /// Treat edges as directed (overrides `[graph] directed` in config).
    #[arg(long)]
    pub directed: bool,

    /// Keep nodes whose class is unknown instead of removing them.
    #[arg(long)]
    pub keep_unknown: bool,
}

/// A graph with its labels and classes, ready for scoring.
pub struct LoadedInput {
    pub graph: MemoryGraph,
    pub labels: NodeLabels,
    pub attributes: AttributeTable,
    /// Unknown-class nodes removed during loading.
    pub pruned: usize,
}

impl LoadedInput {
    /// External label for `node`, or its numeric id if it has none.
    pub fn label(&self, node: NodeId) -> String {
        self.labels
            .label(node)
            .map_or_else(|| node.to_string(), str::to_owned)
    }
}

impl InputArgs {
    /// Load the edge list and features, applying `config`.
    pub fn load(&self, config: &AnalysisConfig) -> anyhow::Result<LoadedInput> {
        let directedness = Directedness::from_flag(self.directed || config.graph.directed);

        let edges = open(&self.edges)?;
        let (graph, labels) = MemoryGraph::from_edge_list(edges, directedness)
            .with_context(|| format!("failed to load edge list {}", self.edges.display()))?;
        let mut graph = graph
            .with_pagerank_config(config.pagerank.clone())
            .with_betweenness_seed(config.betweenness.seed);

        let features = open(&self.features)?;
        let mut attributes = AttributeTable::from_features(features, &labels, &config.features)
            .with_context(|| format!("failed to load features {}", self.features.display()))?;

        // Graph nodes absent from the features file are unclassified.
        let unclassified = graph
            .node_ids()
            .into_iter()
            .filter(|node| attributes.get(*node).is_err())
            .count();
        if unclassified > 0 {
            warn!(unclassified, "graph nodes missing from the features file");
        }

        let pruned = if self.keep_unknown {
            0
        } else {
            attributes.eliminate_unknown(&mut graph)
        };

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            pruned,
            ?directedness,
            "input loaded"
        );

        Ok(LoadedInput {
            graph,
            labels,
            attributes,
            pruned,
        })
    }
}

fn open(path: &Path) -> anyhow::Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}
