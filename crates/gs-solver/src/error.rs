//! Error types for solver operations.

use gs_core::error::GsError;
use gs_network::NetworkError;
use thiserror::Error;

/// Errors that can occur during power-flow solving.
///
/// An islanded grid is not an error: it is reported through
/// [`Cost::Infeasible`](gs_network::Cost::Infeasible).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Problem setup error: {what}")]
    ProblemSetup { what: String },

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Numeric error: {what}")]
    Numeric { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<SolverError> for GsError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::ProblemSetup { what } => GsError::InvalidArg { what },
            SolverError::Network(err) => err.into(),
            SolverError::Numeric { what } => GsError::Invariant { what },
        }
    }
}
