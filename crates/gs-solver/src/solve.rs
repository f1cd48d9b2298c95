//! High-level solver interface.

use gs_network::{Cost, Network, island_count, validate_network};
use tracing::{debug, warn};

use crate::config::DcConfig;
use crate::error::SolverResult;
use crate::linear::solve_reduced;
use crate::problem::DcProblem;
use crate::solution::{Infeasibility, PowerFlowSolution, overload_cost};

/// Solve the DC power flow of `network` without modifying it.
///
/// This function:
/// 1. Validates the network (a dangling line end is an error)
/// 2. Reports empty and islanded grids as infeasible
/// 3. Assembles `B = A·Aᵀ`, drops the reference bus and solves `B_red·θ = p_red` by LU
/// 4. Computes flows `Aᵀ·θ` and the overload cost
///
/// Infeasible grids come back as `Ok` with [`Cost::Infeasible`] and zero
/// flows, never as an error.
pub fn solve(network: &Network, config: &DcConfig) -> SolverResult<PowerFlowSolution> {
    validate_network(network)?;

    if network.nodes().is_empty() || network.lines().is_empty() {
        warn!(
            nodes = network.nodes().len(),
            lines = network.lines().len(),
            "empty network cannot be solved"
        );
        return Ok(PowerFlowSolution::infeasible(network, Infeasibility::Empty));
    }

    let problem = DcProblem::new(network, config)?;

    let islands = island_count(network)?;
    if islands > 1 {
        warn!(islands, "network is split into islands");
        return Ok(PowerFlowSolution::infeasible(
            network,
            Infeasibility::Islanded { islands },
        ));
    }

    debug!(
        nodes = problem.node_count(),
        lines = problem.line_count(),
        reference = ?problem.index.reference(),
        "solving DC power flow"
    );

    let (b_red, p_red) = problem.reduced_system();
    let Some(theta_red) = solve_reduced(&b_red, &p_red, config.pivot_tol)? else {
        warn!("reduced Laplacian is singular");
        return Ok(PowerFlowSolution::infeasible(network, Infeasibility::Singular));
    };

    let theta = problem.expand_angles(&theta_red);
    let flow_vec = problem.flows(&theta);

    let angles = problem
        .index
        .node_ids()
        .iter()
        .cloned()
        .zip(theta.iter().copied())
        .collect();
    let flows: Vec<_> = problem
        .index
        .line_ids()
        .iter()
        .cloned()
        .zip(flow_vec.iter().copied())
        .collect();

    let mut cost = overload_cost(network, &flows);
    if cost <= config.cost_epsilon {
        cost = 0.0;
    }
    debug!(cost, "DC power flow solved");

    Ok(PowerFlowSolution {
        reference: problem.index.reference().cloned(),
        angles,
        flows,
        cost: Cost::Overload(cost),
        infeasibility: None,
    })
}

/// Solve `network` and write the flows and cost back onto it.
///
/// On an infeasible grid every flow is set to zero and the cost to
/// [`Cost::Infeasible`].
pub fn solve_network(network: &mut Network, config: &DcConfig) -> SolverResult<PowerFlowSolution> {
    let solution = solve(network, config)?;
    solution.apply_to(network);
    Ok(solution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gs_network::NetworkBuilder;

    #[test]
    fn two_bus_overload() {
        let mut b = NetworkBuilder::new();
        b.add_node("A", 5.0);
        b.add_node("B", -5.0);
        b.add_line("AB", "A", "B", 2.0);
        let mut net = b.build().unwrap();

        let solution = solve_network(&mut net, &DcConfig::default()).unwrap();
        assert!(solution.is_feasible());
        assert!((net.line("AB").unwrap().flow - 5.0).abs() < 1e-12);
        match net.cost {
            Some(Cost::Overload(c)) => assert!((c - 3.0).abs() < 1e-12),
            other => panic!("unexpected cost {other:?}"),
        }
    }

    #[test]
    fn empty_network_is_infeasible() {
        let mut net = Network::new();
        let solution = solve_network(&mut net, &DcConfig::default()).unwrap();
        assert_eq!(solution.infeasibility, Some(Infeasibility::Empty));
        assert_eq!(net.cost, Some(Cost::Infeasible));
    }

    #[test]
    fn nodes_without_lines_are_infeasible() {
        let mut b = NetworkBuilder::new();
        b.add_node("A", 0.0);
        let net = b.build().unwrap();
        let solution = solve(&net, &DcConfig::default()).unwrap();
        assert_eq!(solution.cost, Cost::Infeasible);
    }

    #[test]
    fn sub_epsilon_cost_snaps_to_zero() {
        let mut b = NetworkBuilder::new();
        b.add_node("A", 2.0);
        b.add_node("B", -2.0);
        b.add_line("AB", "A", "B", 2.0);
        let net = b.build().unwrap();
        let solution = solve(&net, &DcConfig::default()).unwrap();
        assert_eq!(solution.cost, Cost::Overload(0.0));
    }

    #[test]
    fn unknown_slack_is_error() {
        let mut b = NetworkBuilder::new();
        b.add_node("A", 1.0);
        b.add_node("B", -1.0);
        b.add_line("AB", "A", "B", 2.0);
        let net = b.build().unwrap();
        let config = DcConfig::default().with_slack("Z");
        assert!(solve(&net, &config).is_err());
    }
}
