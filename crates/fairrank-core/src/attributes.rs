//! Per-node class attributes.
//!
//! # Feature file format
//!
//! Whitespace-separated columns, one node per line. One column holds the
//! node label; a run of columns `class_start..=class_end` holds a one-hot
//! encoding of the class:
//!
//! ```text
//! alice 0 1 0      → class 2
//! bob   1 0 0      → class 1
//! carol 0 0 0      → unknown (-1)
//! ```
//!
//! The first column set to `1` wins. Lines naming a label the graph does not
//! contain are skipped: feature dumps commonly cover more nodes than the
//! edge list.

use std::collections::{BTreeMap, HashMap};
use std::io::BufRead;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::{FairnessError, Result};
use crate::graph::{GraphView, LoadError, NodeLabels};
use crate::model::{ClassValue, NodeId};

/// Where the label and the one-hot class columns sit in a feature line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureLayout {
    #[serde(default)]
    pub name_column: usize,
    #[serde(default = "default_class_start")]
    pub class_start: usize,
    #[serde(default = "default_class_end")]
    pub class_end: usize,
}

impl Default for FeatureLayout {
    fn default() -> Self {
        Self {
            name_column: 0,
            class_start: default_class_start(),
            class_end: default_class_end(),
        }
    }
}

const fn default_class_start() -> usize {
    1
}

const fn default_class_end() -> usize {
    3
}

/// Mapping from node to its class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeTable {
    classes: HashMap<NodeId, ClassValue>,
}

impl FromIterator<(NodeId, ClassValue)> for AttributeTable {
    fn from_iter<I: IntoIterator<Item = (NodeId, ClassValue)>>(iter: I) -> Self {
        Self {
            classes: iter.into_iter().collect(),
        }
    }
}

impl AttributeTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: NodeId, class: ClassValue) {
        self.classes.insert(node, class);
    }

    /// Class of `node`.
    ///
    /// # Errors
    ///
    /// Returns [`FairnessError::MissingAttribute`] if `node` has no entry.
    pub fn get(&self, node: NodeId) -> Result<ClassValue> {
        self.classes
            .get(&node)
            .copied()
            .ok_or(FairnessError::MissingAttribute(node))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Parse a one-hot feature file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] on read failure, or
    /// [`LoadError::Malformed`] when a line for a known label lacks the
    /// configured columns or a class column is not an integer.
    #[instrument(skip(reader, labels))]
    pub fn from_features<R: BufRead>(
        reader: R,
        labels: &NodeLabels,
        layout: &FeatureLayout,
    ) -> std::result::Result<Self, LoadError> {
        let mut table = Self::new();
        let mut skipped = 0_usize;

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let columns: Vec<&str> = line.split_whitespace().collect();
            if columns.is_empty() {
                continue;
            }

            let malformed = |reason: String| LoadError::Malformed { line: i + 1, reason };

            let name = columns.get(layout.name_column).ok_or_else(|| {
                malformed(format!("missing name column {}", layout.name_column))
            })?;

            let Some(node) = labels.id(name) else {
                skipped += 1;
                continue;
            };

            let one_hot = columns
                .get(layout.class_start..=layout.class_end)
                .ok_or_else(|| {
                    malformed(format!(
                        "expected class columns {}..={}, line has {} columns",
                        layout.class_start,
                        layout.class_end,
                        columns.len()
                    ))
                })?;

            let mut class = ClassValue::UNKNOWN;
            for (offset, raw) in one_hot.iter().enumerate() {
                let flag: i64 = raw
                    .parse()
                    .map_err(|_| malformed(format!("class column `{raw}` is not an integer")))?;
                if flag == 1 {
                    class = ClassValue(i32::try_from(offset + 1).unwrap_or(i32::MAX));
                    break;
                }
            }

            table.insert(node, class);
        }

        debug!(nodes = table.len(), skipped, "loaded feature table");
        Ok(table)
    }

    /// Nodes whose class is [`ClassValue::UNKNOWN`], in ascending id order.
    #[must_use]
    pub fn unknown_nodes(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self
            .classes
            .iter()
            .filter_map(|(&node, class)| class.is_unknown().then_some(node))
            .collect();
        nodes.sort_unstable();
        nodes
    }

    /// Remove unknown-class nodes from both this table and `graph`.
    ///
    /// Returns the number of nodes dropped from the table.
    pub fn eliminate_unknown<G: GraphView + ?Sized>(&mut self, graph: &mut G) -> usize {
        let unknown = self.unknown_nodes();
        if unknown.is_empty() {
            return 0;
        }

        for node in &unknown {
            self.classes.remove(node);
        }
        let removed_from_graph = graph.remove_nodes(&unknown);

        info!(
            removed = unknown.len(),
            removed_from_graph, "eliminated nodes with unknown class"
        );
        unknown.len()
    }

    /// Node count per class. Classes `1..=num_classes` are always present,
    /// with zero when unseen.
    #[must_use]
    pub fn class_counts(&self, num_classes: i32) -> BTreeMap<ClassValue, usize> {
        let mut counts: BTreeMap<ClassValue, usize> =
            (1..=num_classes).map(|c| (ClassValue(c), 0)).collect();
        for class in self.classes.values() {
            *counts.entry(*class).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Directedness, MemoryGraph};

    fn labels(names: &[&str]) -> NodeLabels {
        let mut labels = NodeLabels::new();
        for name in names {
            labels.intern(name);
        }
        labels
    }

    #[test]
    fn get_missing_node_fails() {
        let table: AttributeTable = [(NodeId(0), ClassValue(1))].into_iter().collect();
        assert_eq!(table.get(NodeId(0)), Ok(ClassValue(1)));
        assert_eq!(
            table.get(NodeId(5)),
            Err(FairnessError::MissingAttribute(NodeId(5)))
        );
    }

    #[test]
    fn one_hot_columns_decode_to_classes() {
        let labels = labels(&["alice", "bob", "carol", "dave"]);
        let text = "alice 0 1 0\nbob 1 0 0\ncarol 0 0 0\ndave 0 0 1\nstranger 1 0 0\n";
        let table = AttributeTable::from_features(text.as_bytes(), &labels, &FeatureLayout::default())
            .expect("valid features");

        assert_eq!(table.len(), 4);
        assert_eq!(table.get(NodeId(0)), Ok(ClassValue(2)));
        assert_eq!(table.get(NodeId(1)), Ok(ClassValue(1)));
        assert_eq!(table.get(NodeId(2)), Ok(ClassValue::UNKNOWN));
        assert_eq!(table.get(NodeId(3)), Ok(ClassValue(3)));
    }

    #[test]
    fn custom_layout_reads_shifted_columns() {
        let labels = labels(&["n1"]);
        let layout = FeatureLayout {
            name_column: 2,
            class_start: 3,
            class_end: 4,
        };
        let table = AttributeTable::from_features("x y n1 0 1\n".as_bytes(), &labels, &layout)
            .expect("valid features");
        assert_eq!(table.get(NodeId(0)), Ok(ClassValue(2)));
    }

    #[test]
    fn short_line_for_known_label_is_malformed() {
        let labels = labels(&["alice"]);
        let err = AttributeTable::from_features(
            "\nalice 1\n".as_bytes(),
            &labels,
            &FeatureLayout::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::Malformed { line: 2, .. }));
    }

    #[test]
    fn non_integer_flag_is_malformed() {
        let labels = labels(&["alice"]);
        let err = AttributeTable::from_features(
            "alice 0 yes 0\n".as_bytes(),
            &labels,
            &FeatureLayout::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::Malformed { line: 1, .. }));
    }

    #[test]
    fn eliminate_unknown_prunes_table_and_graph() {
        let (mut graph, labels) =
            MemoryGraph::from_edge_list("a b\nb c\nc d\n".as_bytes(), Directedness::Undirected)
                .expect("edges");
        let mut table: AttributeTable = [
            (labels.id("a").expect("a"), ClassValue(1)),
            (labels.id("b").expect("b"), ClassValue::UNKNOWN),
            (labels.id("c").expect("c"), ClassValue(2)),
            (labels.id("d").expect("d"), ClassValue::UNKNOWN),
        ]
        .into_iter()
        .collect();

        assert_eq!(table.eliminate_unknown(&mut graph), 2);
        assert_eq!(table.len(), 2);
        assert_eq!(graph.node_count(), 2);
        assert!(table.unknown_nodes().is_empty());
        assert_eq!(graph.edge_count(), 0);

        assert_eq!(table.eliminate_unknown(&mut graph), 0);
    }

    #[test]
    fn class_counts_include_unseen_classes() {
        let table: AttributeTable = [
            (NodeId(0), ClassValue(1)),
            (NodeId(1), ClassValue(1)),
            (NodeId(2), ClassValue(3)),
        ]
        .into_iter()
        .collect();

        let counts = table.class_counts(3);
        assert_eq!(counts[&ClassValue(1)], 2);
        assert_eq!(counts[&ClassValue(2)], 0);
        assert_eq!(counts[&ClassValue(3)], 1);
        assert_eq!(counts.len(), 3);
    }
}
