pub mod info;
pub mod normalize;
pub mod path;
pub mod scc;

use std::path::Path;

use wgraph_algo::{EngineConfig, persist};
use wgraph_core::DiGraph;

use crate::output::{CliError, OutputMode, render_error};

/// Load the graph at `path`, reporting failures in the requested format.
pub fn load_graph(path: &Path, config: &EngineConfig, output: OutputMode) -> anyhow::Result<DiGraph> {
    match persist::load(path, &config.placement) {
        Ok(graph) => Ok(graph),
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            Err(anyhow::Error::new(err).context("failed to load graph"))
        }
    }
}
