#![forbid(unsafe_code)]
//! wgraph-core library.
//!
//! The in-memory graph store: vertices with optional 3-D positions and
//! directed, weighted edges indexed in both directions.
//!
//! # Conventions
//!
//! - **Errors**: Mutations return `Result<(), GraphError>`; nothing panics on
//!   caller input.
//! - **Logging**: Use `tracing` macros (`debug!`, `trace!`).

pub mod error;
pub mod graph;
pub mod model;

pub use error::{ErrorCode, GraphError};
pub use graph::DiGraph;
pub use model::{Edge, Node, NodeId, ParsePositionError, Position};
