//! gs-core: stable foundation for gridswitch.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - ids (string identifiers for nodes and lines)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::GsError;
pub use ids::*;
pub use numeric::*;
