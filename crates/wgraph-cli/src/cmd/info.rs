//! `wg info` — vertex/edge counts of a stored graph.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use wgraph_algo::EngineConfig;

use crate::output::{OutputMode, pretty_kv, pretty_section, render};

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Graph file in the JSON graph schema.
    pub file: PathBuf,
}

#[derive(Debug, Serialize)]
struct InfoOutput {
    vertices: usize,
    edges: usize,
    mod_count: u64,
}

pub fn run_info(args: &InfoArgs, config: &EngineConfig, output: OutputMode) -> anyhow::Result<()> {
    let graph = super::load_graph(&args.file, config, output)?;
    let payload = InfoOutput {
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
        mod_count: graph.mod_count(),
    };

    render(output, &payload, |info, w| {
        if output.is_pretty() {
            pretty_section(w, &args.file.display().to_string())?;
            pretty_kv(w, "vertices", info.vertices.to_string())?;
            pretty_kv(w, "edges", info.edges.to_string())?;
            pretty_kv(w, "mod count", info.mod_count.to_string())
        } else {
            writeln!(w, "vertices={} edges={} mc={}", info.vertices, info.edges, info.mod_count)
        }
    })
}
