//! `fairrank top-k`: share of a class among the highest-scored k% of nodes.

use std::io::Write;

use clap::Args;
use serde::Serialize;

use fairrank_core::config::AnalysisConfig;
use fairrank_core::metrics::top_k::{check_k, top_k_class_rate, top_k_window};
use fairrank_core::{Algorithm, ClassValue};

use super::input::InputArgs;
use super::scores::score;
use crate::output::{OutputMode, fail, pretty_kv, pretty_section, render_mode};

/// Arguments for `fairrank top-k`.
#[derive(Args, Debug)]
pub struct TopKArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Percentage of the ranking to inspect, in `[0, 100]`.
    #[arg(long, short, allow_negative_numbers = true)]
    pub k: f64,

    /// Class value to count.
    #[arg(long)]
    pub class: i32,

    /// Scoring algorithm used to rank nodes.
    #[arg(long, short, default_value = "pagerank")]
    pub algorithm: Algorithm,
}

/// Report payload for `fairrank top-k`.
#[derive(Debug, Serialize)]
pub struct TopKReport {
    algorithm: Algorithm,
    k: f64,
    class: ClassValue,
    window: usize,
    nodes: usize,
    rate: f64,
}

/// Execute `fairrank top-k`.
pub fn run_top_k(args: &TopKArgs, config: &AnalysisConfig, output: OutputMode) -> anyhow::Result<()> {
    // Fail on a bad k before paying for the load and the ranking.
    check_k(args.k).map_err(|err| fail(output, &err))?;

    let input = args.input.load(config)?;
    let class = ClassValue(args.class);

    let ranked = score(&input, args.algorithm, true, config, output)?;
    let rate = top_k_class_rate(args.k, class, &input.attributes, &ranked)
        .map_err(|err| fail(output, &err))?;

    let report = TopKReport {
        algorithm: args.algorithm,
        k: args.k,
        class,
        window: top_k_window(ranked.len(), args.k),
        nodes: ranked.len(),
        rate,
    };

    render_mode(
        output,
        &report,
        |r, w| writeln!(w, "{}\t{}\t{}\t{}", r.algorithm, r.k, r.class, r.rate),
        |r, w| {
            pretty_section(w, &format!("Top {}% by {}", r.k, r.algorithm))?;
            pretty_kv(w, "Class", r.class.to_string())?;
            pretty_kv(w, "Window", format!("{} of {} nodes", r.window, r.nodes))?;
            pretty_kv(w, "Rate", format!("{:.6}", r.rate))
        },
    )
}
