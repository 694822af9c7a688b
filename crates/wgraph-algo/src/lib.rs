#![forbid(unsafe_code)]
//! wgraph-algo library.
//!
//! Stateless algorithms over a borrowed [`wgraph_core::DiGraph`] plus the
//! JSON persistence layer and the [`GraphAlgo`] façade that owns a graph.
//!
//! # Conventions
//!
//! - **Errors**: Graph operations return [`wgraph_core::GraphError`]; config
//!   loading uses `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`, `trace!`).

pub mod algo;
pub mod config;
pub mod persist;
pub mod scc;
pub mod shortest_path;

pub use algo::GraphAlgo;
pub use config::{EngineConfig, PlacementConfig, SaveConfig};
pub use scc::{Component, connected_component, connected_components};
pub use shortest_path::{ShortestPath, distances_from, shortest_path, shortest_path_dist};
