//! In-class homophily.
//!
//! For every node of the target class, take the fraction of its 1-hop
//! neighbors that share the class; average those fractions over the class.
//!
//! # Isolated members
//!
//! A class member with no neighbors is counted in the denominator but adds
//! nothing to the numerator, so isolated members pull the average towards
//! zero as if they were fully heterophilic. This matches the reference
//! results this metric is compared against. It is a candidate for revision:
//! excluding isolated members entirely would be the other defensible choice.

use tracing::{debug, instrument};

use crate::attributes::AttributeTable;
use crate::error::{FairnessError, Result};
use crate::graph::GraphView;
use crate::model::ClassValue;

/// Average in-class homophily of `class`, in `[0, 1]`.
///
/// # Errors
///
/// - [`FairnessError::EmptyClass`] if no node has `class`.
/// - [`FairnessError::MissingAttribute`] if a node or one of a class member's
///   neighbors has no attribute.
#[instrument(skip(graph, attributes))]
#[allow(clippy::cast_precision_loss)]
pub fn in_class_homophily<G: GraphView + ?Sized>(
    graph: &G,
    attributes: &AttributeTable,
    class: ClassValue,
) -> Result<f64> {
    let mut class_nodes = 0_usize;
    let mut homophily_sum = 0.0_f64;

    for node in graph.node_ids() {
        if attributes.get(node)? != class {
            continue;
        }

        // Counted before the neighbor check: isolated members dilute.
        class_nodes += 1;

        let neighbors = graph.nodes_at_hop(node, 1)?;
        if neighbors.is_empty() {
            continue;
        }

        let mut same_class = 0_usize;
        for neighbor in &neighbors {
            if attributes.get(*neighbor)? == class {
                same_class += 1;
            }
        }

        homophily_sum += same_class as f64 / neighbors.len() as f64;
    }

    if class_nodes == 0 {
        return Err(FairnessError::EmptyClass(class));
    }

    debug!(class_nodes, "homophily averaged");
    Ok(homophily_sum / class_nodes as f64)
}
