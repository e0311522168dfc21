//! `fairrank homophily`: in-class homophily of one class.

use std::io::Write;

use clap::Args;
use serde::Serialize;

use fairrank_core::config::AnalysisConfig;
use fairrank_core::metrics::in_class_homophily;
use fairrank_core::{ClassValue, Directedness};

use super::input::InputArgs;
use crate::output::{OutputMode, fail, pretty_kv, pretty_section, render_mode};

/// Arguments for `fairrank homophily`.
#[derive(Args, Debug)]
pub struct HomophilyArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Class value to measure.
    #[arg(long)]
    pub class: i32,
}

/// Report payload for `fairrank homophily`.
#[derive(Debug, Serialize)]
pub struct HomophilyReport {
    class: ClassValue,
    members: usize,
    directedness: Directedness,
    homophily: f64,
}

/// Execute `fairrank homophily`.
pub fn run_homophily(
    args: &HomophilyArgs,
    config: &AnalysisConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let input = args.input.load(config)?;
    let class = ClassValue(args.class);

    let homophily =
        in_class_homophily(&input.graph, &input.attributes, class).map_err(|err| fail(output, &err))?;
    let members = input
        .attributes
        .class_counts(0)
        .get(&class)
        .copied()
        .unwrap_or(0);

    let report = HomophilyReport {
        class,
        members,
        directedness: input.graph.directedness(),
        homophily,
    };

    render_mode(
        output,
        &report,
        |r, w| writeln!(w, "{}\t{}", r.class, r.homophily),
        |r, w| {
            pretty_section(w, &format!("Homophily of class {}", r.class))?;
            pretty_kv(w, "Members", r.members.to_string())?;
            pretty_kv(
                w,
                "Edges",
                if r.directedness.is_directed() { "directed" } else { "undirected" },
            )?;
            pretty_kv(w, "Homophily", format!("{:.6}", r.homophily))
        },
    )
}
