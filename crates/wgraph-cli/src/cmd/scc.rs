//! `wg scc` — strongly connected components.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use wgraph_algo::{EngineConfig, connected_component, connected_components};
use wgraph_core::NodeId;

use crate::output::{CliError, OutputMode, pretty_section, render, render_error};

#[derive(Args, Debug)]
pub struct SccArgs {
    /// Graph file in the JSON graph schema.
    pub file: PathBuf,
    /// Only report the component containing this vertex.
    #[arg(long, allow_negative_numbers = true)]
    pub node: Option<NodeId>,
}

#[derive(Debug, Serialize)]
struct SccOutput {
    components: Vec<Vec<NodeId>>,
}

pub fn run_scc(args: &SccArgs, config: &EngineConfig, output: OutputMode) -> anyhow::Result<()> {
    let graph = super::load_graph(&args.file, config, output)?;

    let components: Vec<Vec<NodeId>> = match args.node {
        Some(id) => match connected_component(&graph, id) {
            Ok(component) => vec![component.into_iter().collect()],
            Err(err) => {
                render_error(output, &CliError::from(&err))?;
                anyhow::bail!(err);
            }
        },
        None => connected_components(&graph)
            .into_iter()
            .map(|c| c.into_iter().collect())
            .collect(),
    };

    let payload = SccOutput { components };

    render(output, &payload, |report, w| {
        if output.is_pretty() {
            pretty_section(w, &format!("{} component(s)", report.components.len()))?;
        }
        for component in &report.components {
            let ids: Vec<String> = component.iter().map(ToString::to_string).collect();
            writeln!(w, "{}", ids.join(" "))?;
        }
        Ok(())
    })
}
