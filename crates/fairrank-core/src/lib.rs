#![forbid(unsafe_code)]
//! fairrank-core library.
//!
//! Computes per-node importance scores over a graph and measures how those
//! scores, and the graph's wiring, treat each class of nodes.
//!
//! # Pipeline
//!
//! ```text
//! edge list ──► MemoryGraph (GraphView) ─┐
//! features  ──► AttributeTable ──────────┤
//!                                        ├─► scores::compute_scores ─► ScoreMap
//!                                        │                               │
//!                                        └─► metrics::{homophily, top_k, gini}
//!                                                                        │
//!                                            record::save / load ◄───────┘
//! ```
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums per concern ([`FairnessError`],
//!   [`graph::LoadError`], [`record::RecordError`], [`config::ConfigError`]).
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod attributes;
pub mod config;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod model;
pub mod record;
pub mod scores;

pub use attributes::AttributeTable;
pub use error::{FairnessError, Result};
pub use graph::{Directedness, GraphView, MemoryGraph, NodeLabels};
pub use model::{ClassValue, NodeId};
pub use scores::{Algorithm, ScoreMap, ScoreOrder, compute_scores, compute_scores_sampled};
