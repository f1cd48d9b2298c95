//! Error types for switching operations.

use gs_core::error::GsError;
use gs_core::{LineId, NodeId};
use gs_network::NetworkError;
use thiserror::Error;

/// Errors raised by the topology mutator.
///
/// These all mean the request or the network is malformed. Opening a switch
/// that islands part of the grid is not an error here; the next solve
/// reports it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SwitchError {
    #[error("Invalid switch reference {input:?}: {reason}")]
    InvalidRef { input: String, reason: String },

    #[error("Line {0} not found")]
    LineNotFound(LineId),

    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    /// The shadow id derived for a node is taken by an unrelated node.
    #[error("Shadow id {node} is already used by a regular node")]
    ShadowIdCollision { node: NodeId },

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),
}

pub type SwitchResult<T> = Result<T, SwitchError>;

impl From<SwitchError> for GsError {
    fn from(e: SwitchError) -> Self {
        match e {
            SwitchError::Network(err) => err.into(),
            other => GsError::InvalidArg {
                what: other.to_string(),
            },
        }
    }
}
