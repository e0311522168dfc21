//! `fairrank gini`: inequality of a score distribution.
//!
//! Scores come either from a saved record (`--record`) or are computed from
//! `--edges`/`--features` with `--algorithm`.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use fairrank_core::Algorithm;
use fairrank_core::config::AnalysisConfig;
use fairrank_core::metrics::gini_coefficient;
use fairrank_core::record::load_score_results;

use super::input::InputArgs;
use super::scores::score;
use crate::output::{OutputMode, fail, pretty_kv, pretty_section, render_mode};

/// Arguments for `fairrank gini`.
#[derive(Args, Debug)]
pub struct GiniArgs {
    /// Read scores from a saved score record instead of a graph.
    #[arg(long, value_name = "FILE", conflicts_with_all = ["edges", "features", "algorithm", "directed", "keep_unknown"])]
    pub record: Option<PathBuf>,

    /// Edge list (required without --record).
    #[arg(long, value_name = "FILE", required_unless_present = "record")]
    pub edges: Option<PathBuf>,

    /// Features file (required without --record).
    #[arg(long, value_name = "FILE", required_unless_present = "record")]
    pub features: Option<PathBuf>,

    /// Treat edges as directed.
    #[arg(long)]
    pub directed: bool,

    /// Keep nodes whose class is unknown instead of removing them.
    #[arg(long)]
    pub keep_unknown: bool,

    /// Scoring algorithm [default: pagerank].
    #[arg(long, short)]
    pub algorithm: Option<Algorithm>,
}

impl GiniArgs {
    fn input(&self) -> Option<InputArgs> {
        Some(InputArgs {
            edges: self.edges.clone()?,
            features: self.features.clone()?,
            directed: self.directed,
            keep_unknown: self.keep_unknown,
        })
    }
}

/// Where the score vector came from.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum Source {
    Record { path: PathBuf },
    Computed { algorithm: Algorithm },
}

/// Report payload for `fairrank gini`.
#[derive(Debug, Serialize)]
pub struct GiniReport {
    source: Source,
    values: usize,
    gini: f64,
}

/// Execute `fairrank gini`.
pub fn run_gini(args: &GiniArgs, config: &AnalysisConfig, output: OutputMode) -> anyhow::Result<()> {
    let (source, values) = if let Some(path) = &args.record {
        let loaded = load_score_results(path)
            .with_context(|| format!("failed to load score record {}", path.display()))?;
        (Source::Record { path: path.clone() }, loaded.scores)
    } else {
        let input = args
            .input()
            .context("--edges and --features are required without --record")?
            .load(config)?;
        let algorithm = args.algorithm.unwrap_or(Algorithm::Pagerank);
        let scores = score(&input, algorithm, false, config, output)?;
        (Source::Computed { algorithm }, scores.values())
    };

    let gini = gini_coefficient(&values).map_err(|err| fail(output, &err))?;

    let report = GiniReport {
        source,
        values: values.len(),
        gini,
    };

    render_mode(
        output,
        &report,
        |r, w| writeln!(w, "{}", r.gini),
        |r, w| {
            pretty_section(w, "Gini coefficient")?;
            match &r.source {
                Source::Record { path } => pretty_kv(w, "Record", path.display().to_string())?,
                Source::Computed { algorithm } => pretty_kv(w, "Algorithm", algorithm.as_str())?,
            }
            pretty_kv(w, "Values", r.values.to_string())?;
            pretty_kv(w, "Gini", format!("{:.6}", r.gini))
        },
    )
}
