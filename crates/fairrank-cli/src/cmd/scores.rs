//! `fairrank scores`: compute per-node scores and optionally save a record.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use fairrank_core::config::AnalysisConfig;
use fairrank_core::record::save_score_results;
use fairrank_core::{Algorithm, ClassValue, ScoreMap, compute_scores_sampled};

use super::input::{InputArgs, LoadedInput};
use crate::output::{OutputMode, fail, pretty_kv, pretty_section, render_mode};

/// Arguments for `fairrank scores`.
#[derive(Args, Debug)]
pub struct ScoresArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Scoring algorithm: pagerank, eccentricity or centrality.
    #[arg(long, short, default_value = "pagerank")]
    pub algorithm: Algorithm,

    /// Rank scores in descending order.
    #[arg(long)]
    pub sorted: bool,

    /// Write `{network}_{algorithm}_scores.txt` into this directory.
    #[arg(long, value_name = "DIR")]
    pub save_dir: Option<PathBuf>,

    /// Network name used in the saved file name.
    #[arg(long, default_value = "network")]
    pub network: String,
}

#[derive(Debug, Serialize)]
struct ScoreRow {
    node: String,
    score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    class: Option<ClassValue>,
}

/// Report payload for `fairrank scores`.
#[derive(Debug, Serialize)]
pub struct ScoresReport {
    algorithm: Algorithm,
    sorted: bool,
    nodes: usize,
    pruned: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    saved_to: Option<PathBuf>,
    scores: Vec<ScoreRow>,
}

/// Score `input` with the betweenness sampling from `config`.
pub fn score(
    input: &LoadedInput,
    algorithm: Algorithm,
    sorted: bool,
    config: &AnalysisConfig,
    output: OutputMode,
) -> anyhow::Result<ScoreMap> {
    compute_scores_sampled(&input.graph, algorithm, sorted, config.betweenness.sampling)
        .map_err(|err| fail(output, &err))
}

/// Execute `fairrank scores`.
pub fn run_scores(
    args: &ScoresArgs,
    config: &AnalysisConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let input = args.input.load(config)?;
    let scores = score(&input, args.algorithm, args.sorted, config, output)?;

    let saved_to = match &args.save_dir {
        Some(dir) => Some(
            save_score_results(
                dir,
                &args.network,
                args.algorithm,
                &scores,
                &input.attributes,
                Some(&input.labels),
            )
            .with_context(|| format!("failed to save scores into {}", dir.display()))?,
        ),
        None => None,
    };

    let rows = scores
        .iter()
        .map(|(node, score)| ScoreRow {
            node: input.label(node),
            score,
            class: input.attributes.get(node).ok(),
        })
        .collect();

    let report = ScoresReport {
        algorithm: args.algorithm,
        sorted: scores.is_ranked(),
        nodes: scores.len(),
        pruned: input.pruned,
        saved_to,
        scores: rows,
    };

    render_mode(output, &report, render_scores_text, render_scores_pretty)
}

fn render_scores_text(report: &ScoresReport, w: &mut dyn Write) -> std::io::Result<()> {
    for row in &report.scores {
        match row.class {
            Some(class) => writeln!(w, "{}\t{}\t{class}", row.node, row.score)?,
            None => writeln!(w, "{}\t{}\t-", row.node, row.score)?,
        }
    }
    Ok(())
}

fn render_scores_pretty(report: &ScoresReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("{} scores", report.algorithm))?;
    pretty_kv(w, "Nodes", report.nodes.to_string())?;
    pretty_kv(w, "Pruned", report.pruned.to_string())?;
    pretty_kv(w, "Order", if report.sorted { "descending" } else { "graph" })?;
    if let Some(path) = &report.saved_to {
        pretty_kv(w, "Saved", path.display().to_string())?;
    }
    writeln!(w)?;

    let width = report
        .scores
        .iter()
        .map(|row| row.node.len())
        .max()
        .unwrap_or(4)
        .max(4);
    writeln!(w, "{:<width$}  {:>14}  CLASS", "NODE", "SCORE")?;
    for row in &report.scores {
        let class = row.class.map_or_else(|| "-".to_string(), |c| c.to_string());
        writeln!(w, "{:<width$}  {:>14.6}  {class}", row.node, row.score)?;
    }
    Ok(())
}
