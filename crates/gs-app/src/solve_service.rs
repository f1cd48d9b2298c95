//! Solving a loaded network.

use gs_network::{Cost, Network};
use gs_solver::{DcConfig, PowerFlowSolution, solve_network};
use tracing::{info, warn};

use crate::error::AppResult;

/// Solve `network` in place and return the solution.
///
/// An empty network is not an error: it comes back with the infeasible
/// cost like any other unsolvable grid.
pub fn evaluate(network: &mut Network, config: &DcConfig) -> AppResult<PowerFlowSolution> {
    if network.nodes().is_empty() || network.lines().is_empty() {
        warn!("Empty network data");
    }

    let solution = solve_network(network, config)?;
    match solution.cost {
        Cost::Infeasible => warn!(reason = ?solution.infeasibility, "network is unsolvable"),
        Cost::Overload(cost) => info!(cost, "network solved"),
    }
    Ok(solution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gs_network::NetworkBuilder;

    #[test]
    fn evaluate_writes_back_flows() {
        let mut b = NetworkBuilder::new();
        b.add_node("1", 3.0);
        b.add_node("2", -3.0);
        b.add_line("L1", "1", "2", 1.0);
        let mut net = b.build().unwrap();

        let solution = evaluate(&mut net, &DcConfig::default()).unwrap();
        assert!(solution.is_feasible());
        assert_eq!(net.line("L1").unwrap().flow, 3.0);
        assert_eq!(net.cost, Some(Cost::Overload(2.0)));
    }

    #[test]
    fn empty_network_is_infeasible() {
        let mut net = Network::new();
        let solution = evaluate(&mut net, &DcConfig::default()).unwrap();
        assert_eq!(solution.cost, Cost::Infeasible);
    }
}
