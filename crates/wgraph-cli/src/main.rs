#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{Parser, Subcommand};
use output::OutputMode;
use std::env;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "wg: directed weighted graph engine",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Config file (defaults to $WGRAPH_CONFIG, then ./wgraph.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Show vertex and edge counts",
        after_help = "EXAMPLES:\n    wg info data/A0.json\n\n    # Emit machine-readable output\n    wg info data/A0.json --json"
    )]
    Info(cmd::info::InfoArgs),

    #[command(
        about = "Shortest path between two vertices",
        after_help = "EXAMPLES:\n    wg path data/A0.json 0 7"
    )]
    Path(cmd::path::PathArgs),

    #[command(
        about = "Strongly connected components",
        after_help = "EXAMPLES:\n    # Full decomposition\n    wg scc data/A0.json\n\n    # Component containing vertex 3\n    wg scc data/A0.json --node 3"
    )]
    Scc(cmd::scc::SccArgs),

    #[command(
        about = "Load a graph and save it in canonical form",
        after_help = "EXAMPLES:\n    wg normalize raw.json clean.json --pretty"
    )]
    Normalize(cmd::normalize::NormalizeArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("WGRAPH_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "wgraph=debug,info"
        } else {
            "wgraph=info,warn"
        })
    });

    let format = env::var("WGRAPH_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let cwd = env::current_dir()?;
    let config = wgraph_algo::config::resolve_config(cli.config.as_deref(), &cwd)?;
    debug!(?config, "config resolved");
    let output = output::resolve_output_mode(cli.format, cli.json);

    match cli.command {
        Commands::Info(ref args) => cmd::info::run_info(args, &config, output),
        Commands::Path(ref args) => cmd::path::run_path(args, &config, output),
        Commands::Scc(ref args) => cmd::scc::run_scc(args, &config, output),
        Commands::Normalize(ref args) => cmd::normalize::run_normalize(args, &config, output),
    }
}
