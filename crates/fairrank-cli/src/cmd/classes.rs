//! `fairrank classes`: node count per class.

use std::io::Write;

use clap::Args;
use serde::Serialize;

use fairrank_core::ClassValue;
use fairrank_core::config::AnalysisConfig;

use super::input::InputArgs;
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `fairrank classes`.
#[derive(Args, Debug)]
pub struct ClassesArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Always report classes `1..=N`, even when empty.
    #[arg(long, default_value_t = 3)]
    pub num_classes: i32,
}

#[derive(Debug, Serialize)]
struct ClassCount {
    class: ClassValue,
    nodes: usize,
}

/// Report payload for `fairrank classes`.
#[derive(Debug, Serialize)]
pub struct ClassesReport {
    total: usize,
    pruned: usize,
    classes: Vec<ClassCount>,
}

/// Execute `fairrank classes`.
pub fn run_classes(
    args: &ClassesArgs,
    config: &AnalysisConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let input = args.input.load(config)?;

    let classes: Vec<ClassCount> = input
        .attributes
        .class_counts(args.num_classes)
        .into_iter()
        .map(|(class, nodes)| ClassCount { class, nodes })
        .collect();

    let report = ClassesReport {
        total: input.attributes.len(),
        pruned: input.pruned,
        classes,
    };

    render_mode(
        output,
        &report,
        |r, w| {
            for c in &r.classes {
                writeln!(w, "{}\t{}", c.class, c.nodes)?;
            }
            Ok(())
        },
        |r, w| {
            pretty_section(w, "Classes")?;
            pretty_kv(w, "Nodes", r.total.to_string())?;
            pretty_kv(w, "Pruned", r.pruned.to_string())?;
            writeln!(w)?;
            for c in &r.classes {
                let label = if c.class.is_unknown() {
                    "unknown".to_string()
                } else {
                    format!("class {}", c.class)
                };
                pretty_kv(w, &label, c.nodes.to_string())?;
            }
            Ok(())
        },
    )
}
