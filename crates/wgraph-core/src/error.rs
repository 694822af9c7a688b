use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::{NodeId, Position};

/// Errors raised by graph mutation, lookup and persistence.
///
/// Every variant is local and recoverable; callers that only care about the
/// boolean outcome can use `result.is_ok()`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("vertex {0} already exists")]
    DuplicateVertex(NodeId),

    #[error("edge {src} -> {dst} already exists")]
    DuplicateEdge { src: NodeId, dst: NodeId },

    #[error("vertex {0} not found")]
    VertexNotFound(NodeId),

    #[error("edge {src} -> {dst} not found")]
    EdgeNotFound { src: NodeId, dst: NodeId },

    #[error("self-loop on vertex {0} is not allowed")]
    SelfLoop(NodeId),

    #[error("edge {src} -> {dst} has invalid weight {weight}")]
    InvalidWeight { src: NodeId, dst: NodeId, weight: f64 },

    #[error("vertex {id} has non-finite position {pos}")]
    InvalidPosition { id: NodeId, pos: Position },

    #[error("I/O failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },
}

impl GraphError {
    /// Classify this error into its stable [`ErrorCode`].
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::DuplicateVertex(_) | Self::DuplicateEdge { .. } => ErrorCode::DuplicateEntity,
            Self::VertexNotFound(_) | Self::EdgeNotFound { .. } => ErrorCode::NotFound,
            Self::SelfLoop(_) | Self::InvalidWeight { .. } => ErrorCode::InvalidEdge,
            Self::InvalidPosition { .. } => ErrorCode::InvalidPosition,
            Self::Io { .. } => ErrorCode::IoFailure,
            Self::Parse { .. } => ErrorCode::ParseFailure,
        }
    }
}

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    DuplicateEntity,
    NotFound,
    InvalidEdge,
    InvalidPosition,
    IoFailure,
    ParseFailure,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::DuplicateEntity => "E2001",
            Self::NotFound => "E2002",
            Self::InvalidEdge => "E2003",
            Self::InvalidPosition => "E2004",
            Self::IoFailure => "E5001",
            Self::ParseFailure => "E5002",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::DuplicateEntity => "Vertex or edge already exists",
            Self::NotFound => "Vertex or edge not found",
            Self::InvalidEdge => "Invalid edge",
            Self::InvalidPosition => "Invalid vertex position",
            Self::IoFailure => "Graph file I/O failure",
            Self::ParseFailure => "Graph file parse error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::DuplicateEntity => None,
            Self::NotFound => Some("Check the vertex id exists before referencing it."),
            Self::InvalidEdge => {
                Some("Edges need two distinct vertices and a finite, non-negative weight.")
            }
            Self::InvalidPosition => Some("Every position coordinate must be a finite number."),
            Self::IoFailure => Some("Check the path exists and is readable/writable."),
            Self::ParseFailure => {
                Some("The file must contain `Nodes` and `Edges` arrays in the graph schema.")
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
