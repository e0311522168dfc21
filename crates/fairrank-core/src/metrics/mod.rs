//! Fairness metrics over an attributed, scored graph.
//!
//! # Overview
//!
//! Three independent, pure functions. Each answers a different question:
//!
//! - **In-class homophily** (`homophily`): do members of a class connect
//!   mostly to each other?
//! - **Top-k class rate** (`top_k`): what share of the highest-scored k% of
//!   nodes belongs to a class?
//! - **Gini coefficient** (`gini`): how unequal is a score distribution?
//!
//! None of them mutates its inputs, and every validation failure is returned
//! as a [`crate::FairnessError`] with no partial result.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fairrank_core::metrics::{gini_coefficient, in_class_homophily, top_k_class_rate};
//! use fairrank_core::{Algorithm, ClassValue, compute_scores};
//!
//! let h = in_class_homophily(&graph, &attributes, ClassValue(1))?;
//! let ranked = compute_scores(&graph, Algorithm::Pagerank, true)?;
//! let rate = top_k_class_rate(10.0, ClassValue(1), &attributes, &ranked)?;
//! let g = gini_coefficient(&ranked.values())?;
//! ```

pub mod gini;
pub mod homophily;
pub mod top_k;

pub use gini::gini_coefficient;
pub use homophily::in_class_homophily;
pub use top_k::top_k_class_rate;
