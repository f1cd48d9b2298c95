//! Error types for the gs-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates
/// and gives the CLI a single error to report.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Solver error: {0}")]
    Solver(String),

    #[error("Switch error: {0}")]
    Switch(String),
}

/// Result type for gs-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<gs_network::NetworkError> for AppError {
    fn from(err: gs_network::NetworkError) -> Self {
        match err {
            gs_network::NetworkError::Snapshot { message } => AppError::Snapshot(message),
            other => AppError::Network(other.to_string()),
        }
    }
}

impl From<gs_solver::SolverError> for AppError {
    fn from(err: gs_solver::SolverError) -> Self {
        AppError::Solver(err.to_string())
    }
}

impl From<gs_switch::SwitchError> for AppError {
    fn from(err: gs_switch::SwitchError) -> Self {
        AppError::Switch(err.to_string())
    }
}
