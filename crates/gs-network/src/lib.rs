//! gs-network: grid model for gridswitch.
//!
//! Provides:
//! - Core data structures (Node, Line, Network, Cost)
//! - Incremental network builder with validation
//! - Stable indexing for solver integration
//! - Island detection
//! - The JSON snapshot exchanged with the game frontend
//!
//! # Example
//!
//! ```
//! use gs_network::NetworkBuilder;
//!
//! let mut builder = NetworkBuilder::new();
//! builder.add_node("A", 5.0);
//! builder.add_node("B", -5.0);
//! builder.add_line("AB", "A", "B", 2.0);
//! let network = builder.build().unwrap();
//!
//! assert_eq!(network.nodes().len(), 2);
//! assert_eq!(network.lines().len(), 1);
//! ```

pub mod builder;
pub mod connectivity;
pub mod error;
pub mod indexing;
pub mod network;
pub mod snapshot;
pub mod validate;

// Re-exports for ergonomics
pub use builder::NetworkBuilder;
pub use connectivity::{is_connected, island_count, islands};
pub use error::{NetworkError, NetworkResult};
pub use indexing::IndexMap;
pub use network::{Cost, DEFAULT_LIMIT, Line, LineEnd, Network, Node, SHADOW_SUFFIX, shadow_id};
pub use snapshot::{NetworkSnapshot, from_json_str, to_json_string};
pub use validate::validate_network;
