#![forbid(unsafe_code)]

mod cmd;
mod output;

use std::env;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use fairrank_core::config::load_config;
use output::{OutputMode, resolve_output_mode};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "fairrank: fairness and homophily diagnostics for attributed graphs",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Analysis config file [default: ./fairrank.toml when present].
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Alias for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Scores",
        about = "Compute per-node scores",
        long_about = "Score every node with pagerank, eccentricity or sampled betweenness centrality.",
        after_help = "EXAMPLES:\n    # Ranked PageRank scores\n    fairrank scores --edges net.edges --features net.feat --sorted\n\n    # Save a score record\n    fairrank scores --edges net.edges --features net.feat -a centrality --save-dir out --network facebook"
    )]
    Scores(cmd::scores::ScoresArgs),

    #[command(
        next_help_heading = "Metrics",
        about = "In-class homophily of one class",
        after_help = "EXAMPLES:\n    fairrank homophily --edges net.edges --features net.feat --class 1"
    )]
    Homophily(cmd::homophily::HomophilyArgs),

    #[command(
        next_help_heading = "Metrics",
        about = "Share of a class among the top k% of nodes",
        after_help = "EXAMPLES:\n    fairrank top-k --edges net.edges --features net.feat --k 10 --class 2 -a eccentricity"
    )]
    TopK(cmd::top_k::TopKArgs),

    #[command(
        next_help_heading = "Metrics",
        about = "Gini coefficient of a score distribution",
        after_help = "EXAMPLES:\n    # From a saved record\n    fairrank gini --record out/facebook_pagerank_scores.txt\n\n    # Computed on the fly\n    fairrank gini --edges net.edges --features net.feat -a centrality"
    )]
    Gini(cmd::gini::GiniArgs),

    #[command(
        next_help_heading = "Metrics",
        about = "Node count per class",
        after_help = "EXAMPLES:\n    fairrank classes --edges net.edges --features net.feat --num-classes 3"
    )]
    Classes(cmd::classes::ClassesArgs),
}

impl Commands {
    const fn name(&self) -> &'static str {
        match self {
            Self::Scores(_) => "scores",
            Self::Homophily(_) => "homophily",
            Self::TopK(_) => "top-k",
            Self::Gini(_) => "gini",
            Self::Classes(_) => "classes",
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("FAIRRANK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "fairrank=debug,info"
        } else {
            "fairrank=info,warn"
        })
    });

    let format = env::var("FAIRRANK_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let working_dir = env::current_dir()?;
    let config = load_config(cli.config.as_deref(), &working_dir).context("failed to load config")?;
    debug!(?config, "config loaded");

    let output = resolve_output_mode(cli.format, cli.json);
    let name = cli.command.name();
    let started = Instant::now();

    let result = match &cli.command {
        Commands::Scores(args) => cmd::scores::run_scores(args, &config, output),
        Commands::Homophily(args) => cmd::homophily::run_homophily(args, &config, output),
        Commands::TopK(args) => cmd::top_k::run_top_k(args, &config, output),
        Commands::Gini(args) => cmd::gini::run_gini(args, &config, output),
        Commands::Classes(args) => cmd::classes::run_classes(args, &config, output),
    };

    info!(
        command = name,
        elapsed_ms = started.elapsed().as_millis(),
        ok = result.is_ok(),
        "command finished"
    );
    result
}
