//! `wg normalize` — load a graph and write it back in canonical form.
//!
//! Vertices stored without a position gain a synthesized one (unless
//! `placement.synthesize = false`), and dropped duplicate or self-loop edges
//! disappear from the output.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use wgraph_algo::{EngineConfig, persist};

use crate::output::{CliError, OutputMode, render, render_error};

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Input graph file.
    pub input: PathBuf,
    /// Output graph file.
    pub output: PathBuf,
    /// Pretty-print the written JSON (overrides `save.pretty`).
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Serialize)]
struct NormalizeOutput {
    output: String,
    vertices: usize,
    edges: usize,
}

pub fn run_normalize(
    args: &NormalizeArgs,
    config: &EngineConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let graph = super::load_graph(&args.input, config, output)?;

    if let Err(err) = persist::save(&graph, &args.output, args.pretty || config.save.pretty) {
        render_error(output, &CliError::from(&err))?;
        return Err(anyhow::Error::new(err).context("failed to save graph"));
    }

    let payload = NormalizeOutput {
        output: args.output.display().to_string(),
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
    };
    render(output, &payload, |n, w| {
        writeln!(w, "wrote {} ({} vertices, {} edges)", n.output, n.vertices, n.edges)
    })
}
