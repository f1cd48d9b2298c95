//! DC power-flow solver for gridswitch networks.
//!
//! Every line is modelled with unit susceptance, so the nodal equations are
//! `L·θ = p` with `L` the graph Laplacian. One reference bus is pinned at
//! angle zero and the remaining system is solved exactly by LU. A grid that
//! falls apart into islands has no solution and is reported with an
//! infinite cost rather than an error.

pub mod config;
pub mod error;
pub mod linear;
pub mod problem;
pub mod solution;
pub mod solve;

pub use config::DcConfig;
pub use error::{SolverError, SolverResult};
pub use problem::DcProblem;
pub use solution::{Infeasibility, PowerFlowSolution, node_balance_mismatch, overload_cost};
pub use solve::{solve, solve_network};
