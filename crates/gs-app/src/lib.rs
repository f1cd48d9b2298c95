//! Shared application service layer for gridswitch.
//!
//! This crate gives the CLI one place for the game-facing workflow:
//! loading and saving snapshots, solving, flipping switches with
//! auto-revert, and classifying and summarizing the result.

pub mod error;
pub mod query;
pub mod snapshot_service;
pub mod solve_service;
pub mod status;
pub mod switch_service;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use query::{NetworkSummary, summarize};
pub use snapshot_service::{load_config, load_network, parse_network, save_network};
pub use solve_service::evaluate;
pub use status::{GridStatus, SolvedCriteria, classify};
pub use switch_service::{
    ResetOutcome, SwitchOutcome, UNSOLVABLE_SWITCH, apply_switch, reset_and_solve,
};
