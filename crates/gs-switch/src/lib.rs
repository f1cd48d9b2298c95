//! Topology mutator: open and close line-end switches.
//!
//! Each line has a switch at both ends. Opening one detaches that end from
//! its node by moving it onto a zero-injection shadow twin (id = base id +
//! [`gs_network::SHADOW_SUFFIX`]). Nothing here solves the network; callers
//! re-run the solver after a change.
//!
//! ```
//! use gs_network::{LineEnd, NetworkBuilder};
//! use gs_switch::{SwitchRef, Toggle, toggle_switch};
//!
//! let mut b = NetworkBuilder::new();
//! b.add_node("1", 1.0);
//! b.add_node("2", -1.0);
//! b.add_line("L1", "1", "2", 10.0);
//! let mut net = b.build().unwrap();
//!
//! let switch: SwitchRef = "L1_to".parse().unwrap();
//! assert_eq!(toggle_switch(&mut net, &switch).unwrap(), Toggle::Opened);
//! assert_eq!(net.line("L1").unwrap().endpoint(LineEnd::To).as_str(), "2b");
//! ```

pub mod error;
pub mod reset;
pub mod switch_ref;
pub mod toggle;

pub use error::{SwitchError, SwitchResult};
pub use reset::{open_switches, reset_switches};
pub use switch_ref::SwitchRef;
pub use toggle::{SwitchState, Toggle, switch_state, toggle_switch};
