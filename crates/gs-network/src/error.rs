//! Network-specific error types.

use gs_core::{GsError, LineId, NodeId};
use thiserror::Error;

/// Network construction, validation and snapshot errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// A line refers to a node that doesn't exist.
    #[error("Line {line} refers to non-existent node {node}")]
    MissingEndpoint { line: LineId, node: NodeId },

    /// Two nodes share the same id.
    #[error("Duplicate node id {0}")]
    DuplicateNode(NodeId),

    /// Two lines share the same id.
    #[error("Duplicate line id {0}")]
    DuplicateLine(LineId),

    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Line {0} not found")]
    LineNotFound(LineId),

    /// A node cannot be removed while lines still terminate on it.
    #[error("Node {node} still has {degree} incident line(s)")]
    NodeInUse { node: NodeId, degree: usize },

    #[error("Line {line} has negative limit {limit}")]
    NegativeLimit { line: LineId, limit: f64 },

    #[error("Non-finite {what} on {owner}: {value}")]
    NonFinite {
        owner: String,
        what: &'static str,
        value: f64,
    },

    /// A shadow node breaks one of the twin invariants.
    #[error("Invalid shadow node {node}: {reason}")]
    InvalidShadow { node: NodeId, reason: &'static str },

    /// A snapshot map key differs from the id stored in its record.
    #[error("Snapshot key {key} does not match record id {id}")]
    KeyMismatch { key: String, id: String },

    #[error("Snapshot error: {message}")]
    Snapshot { message: String },
}

pub type NetworkResult<T> = Result<T, NetworkError>;

impl From<serde_json::Error> for NetworkError {
    fn from(err: serde_json::Error) -> Self {
        NetworkError::Snapshot {
            message: err.to_string(),
        }
    }
}

impl From<NetworkError> for GsError {
    fn from(err: NetworkError) -> Self {
        GsError::Invariant {
            what: err.to_string(),
        }
    }
}
