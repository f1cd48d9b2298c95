//! Game-level classification of a solved network.

use gs_core::{LineId, Real};
use gs_network::{Network, is_connected};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;

/// When a network counts as solved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolvedCriteria {
    /// Treat a split topology as islanded even if a stored cost says otherwise.
    pub require_connectivity: bool,
    /// Costs at or below this count as zero.
    pub cost_epsilon: Real,
}

impl Default for SolvedCriteria {
    fn default() -> Self {
        Self {
            require_connectivity: true,
            cost_epsilon: 1e-9,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridStatus {
    /// No cost yet; the network has not been solved since its last change.
    Unsolved,
    /// Every line within its limit.
    Solved,
    /// Feasible, but these lines exceed their limits.
    Overloaded { cost: Real, lines: Vec<LineId> },
    /// The grid is split and has no solution.
    Islanded,
}

impl GridStatus {
    pub fn is_solved(&self) -> bool {
        matches!(self, GridStatus::Solved)
    }
}

/// Classify `network` from its stored cost and flows.
pub fn classify(network: &Network, criteria: &SolvedCriteria) -> AppResult<GridStatus> {
    let Some(cost) = network.cost else {
        return Ok(GridStatus::Unsolved);
    };

    if cost.is_infeasible() || (criteria.require_connectivity && !is_connected(network)?) {
        return Ok(GridStatus::Islanded);
    }

    if cost.is_zero(criteria.cost_epsilon) {
        return Ok(GridStatus::Solved);
    }

    let lines = network
        .lines()
        .values()
        .filter(|l| l.overload() > criteria.cost_epsilon)
        .map(|l| l.id.clone())
        .collect();
    Ok(GridStatus::Overloaded {
        cost: cost.value(),
        lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gs_network::{Cost, NetworkBuilder};

    fn pair(limit: Real) -> Network {
        let mut b = NetworkBuilder::new();
        b.add_node("1", 4.0);
        b.add_node("2", -4.0);
        b.add_line("L1", "1", "2", limit);
        b.build().unwrap()
    }

    #[test]
    fn unsolved_without_cost() {
        let status = classify(&pair(10.0), &SolvedCriteria::default()).unwrap();
        assert_eq!(status, GridStatus::Unsolved);
    }

    #[test]
    fn solved_within_limits() {
        let mut net = pair(10.0);
        net.line_mut("L1").unwrap().flow = 4.0;
        net.cost = Some(Cost::Overload(0.0));
        assert!(classify(&net, &SolvedCriteria::default()).unwrap().is_solved());
    }

    #[test]
    fn overloaded_lists_lines() {
        let mut net = pair(3.0);
        net.line_mut("L1").unwrap().flow = 4.0;
        net.cost = Some(Cost::Overload(1.0));
        assert_eq!(
            classify(&net, &SolvedCriteria::default()).unwrap(),
            GridStatus::Overloaded {
                cost: 1.0,
                lines: vec![LineId::from("L1")],
            }
        );
    }

    #[test]
    fn stale_cost_on_split_grid_is_islanded() {
        let mut b = NetworkBuilder::new();
        b.add_node("1", 1.0);
        b.add_node("2", -1.0);
        b.add_node("3", 0.0);
        b.add_line("L1", "1", "2", 10.0);
        let mut net = b.build().unwrap();
        net.cost = Some(Cost::Overload(0.0));

        let strict = classify(&net, &SolvedCriteria::default()).unwrap();
        assert_eq!(strict, GridStatus::Islanded);

        let lenient = SolvedCriteria {
            require_connectivity: false,
            ..SolvedCriteria::default()
        };
        assert!(classify(&net, &lenient).unwrap().is_solved());
    }

    #[test]
    fn infeasible_cost_is_islanded() {
        let mut net = pair(10.0);
        net.cost = Some(Cost::Infeasible);
        assert_eq!(
            classify(&net, &SolvedCriteria::default()).unwrap(),
            GridStatus::Islanded
        );
    }
}
