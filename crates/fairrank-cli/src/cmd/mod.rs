//! Subcommand implementations.
//!
//! Each module exposes a clap `Args` struct and a `run_*` entry point taking
//! the parsed args, the loaded [`AnalysisConfig`](fairrank_core::config::AnalysisConfig)
//! and the resolved [`OutputMode`](crate::output::OutputMode).

pub mod classes;
pub mod gini;
pub mod homophily;
pub mod input;
pub mod scores;
pub mod top_k;
