//! `wg path` — shortest path between two vertices.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use wgraph_algo::{EngineConfig, shortest_path};
use wgraph_core::NodeId;

use crate::output::{OutputMode, pretty_kv, render};

#[derive(Args, Debug)]
pub struct PathArgs {
    /// Graph file in the JSON graph schema.
    pub file: PathBuf,
    /// Source vertex id.
    #[arg(allow_negative_numbers = true)]
    pub src: NodeId,
    /// Destination vertex id.
    #[arg(allow_negative_numbers = true)]
    pub dst: NodeId,
}

#[derive(Debug, Serialize)]
struct PathOutput {
    src: NodeId,
    dst: NodeId,
    reachable: bool,
    /// `null` when unreachable; JSON has no infinity.
    distance: Option<f64>,
    path: Vec<NodeId>,
}

pub fn run_path(args: &PathArgs, config: &EngineConfig, output: OutputMode) -> anyhow::Result<()> {
    let graph = super::load_graph(&args.file, config, output)?;
    let result = shortest_path(&graph, args.src, args.dst);

    let payload = PathOutput {
        src: args.src,
        dst: args.dst,
        reachable: result.is_reachable(),
        distance: result.is_reachable().then_some(result.distance),
        path: result.path,
    };

    render(output, &payload, |p, w| {
        let route = p
            .path
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" -> ");
        match (p.distance, output.is_pretty()) {
            (None, _) => writeln!(w, "unreachable: no path from {} to {}", p.src, p.dst),
            (Some(d), true) => {
                pretty_kv(w, "distance", d.to_string())?;
                pretty_kv(w, "path", route)
            }
            (Some(d), false) => writeln!(w, "{d}\t{route}"),
        }
    })
}
