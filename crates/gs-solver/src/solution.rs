//! Power-flow results.

use gs_core::{LineId, NodeId, Real, overload};
use gs_network::{Cost, Network};

/// Why a network could not be solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Infeasibility {
    /// No nodes or no lines.
    Empty,
    /// The grid is split into this many islands.
    Islanded { islands: usize },
    /// The reduced Laplacian was numerically singular.
    Singular,
}

/// Solution of a DC power flow.
#[derive(Clone, Debug, PartialEq)]
pub struct PowerFlowSolution {
    /// Reference bus (angle 0), `None` for an empty network
    pub reference: Option<NodeId>,
    /// Voltage angle per node, in solver index order
    pub angles: Vec<(NodeId, Real)>,
    /// Signed flow per line, positive from `from_node` to `to_node`
    pub flows: Vec<(LineId, Real)>,
    /// Sum of overloads, or infeasible
    pub cost: Cost,
    /// Set when `cost` is infeasible
    pub infeasibility: Option<Infeasibility>,
}

impl PowerFlowSolution {
    /// All-zero solution reported for a network that cannot be solved.
    pub(crate) fn infeasible(network: &Network, reason: Infeasibility) -> Self {
        Self {
            reference: None,
            angles: network.nodes().keys().map(|id| (id.clone(), 0.0)).collect(),
            flows: network.lines().keys().map(|id| (id.clone(), 0.0)).collect(),
            cost: Cost::Infeasible,
            infeasibility: Some(reason),
        }
    }

    pub fn is_feasible(&self) -> bool {
        self.infeasibility.is_none()
    }

    pub fn flow(&self, line: &str) -> Option<Real> {
        self.flows
            .iter()
            .find(|(id, _)| id.as_str() == line)
            .map(|(_, f)| *f)
    }

    pub fn angle(&self, node: &str) -> Option<Real> {
        self.angles
            .iter()
            .find(|(id, _)| id.as_str() == node)
            .map(|(_, a)| *a)
    }

    /// Lines whose flow in this solution exceeds their limit in `network`.
    pub fn overloaded_lines(&self, network: &Network) -> Vec<LineId> {
        self.flows
            .iter()
            .filter(|(id, flow)| {
                network
                    .line(id.as_str())
                    .is_some_and(|l| overload(*flow, l.limit) > 0.0)
            })
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Write flows and cost onto the network.
    pub fn apply_to(&self, network: &mut Network) {
        for (id, flow) in &self.flows {
            if let Some(line) = network.line_mut(id.as_str()) {
                line.flow = *flow;
            }
        }
        network.cost = Some(self.cost);
    }
}

/// `Σ max(0, |flow| − limit)` over the lines of `network`, using `flows`.
pub fn overload_cost(network: &Network, flows: &[(LineId, Real)]) -> Real {
    flows
        .iter()
        .filter_map(|(id, flow)| network.line(id.as_str()).map(|l| overload(*flow, l.limit)))
        .sum()
}

/// Largest nodal power mismatch `|injection − (outflow − inflow)|` over
/// every node except the reference bus, using the flows stored on `network`.
pub fn node_balance_mismatch(network: &Network, reference: Option<&NodeId>) -> Real {
    network
        .nodes()
        .values()
        .filter(|node| Some(&node.id) != reference)
        .map(|node| {
            let net_out: Real = network
                .lines_at(node.id.as_str())
                .map(|line| {
                    let mut f = 0.0;
                    if line.from_node == node.id {
                        f += line.flow;
                    }
                    if line.to_node == node.id {
                        f -= line.flow;
                    }
                    f
                })
                .sum();
            (node.injection - net_out).abs()
        })
        .fold(0.0, Real::max)
}
