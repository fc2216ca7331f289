//! Graph-subsystem error type.

use thiserror::Error;

use rn_core::{ConnectionId, NodeId};

/// Errors produced by `rn-graph`.
///
/// Only structural misuse is an error (referencing nodes that don't exist,
/// degenerate connections).  "No path found" is an `Option::None` at the
/// planner boundary, not an error — callers are expected to handle it.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),

    #[error("connection {0} not found in graph")]
    ConnectionNotFound(ConnectionId),

    #[error("connection from node {0} to itself rejected")]
    ZeroLengthConnection(NodeId),
}

pub type GraphResult<T> = Result<T, GraphError>;
