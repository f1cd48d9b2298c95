//! Player-facing switch actions: toggle or reset, then re-solve.

use gs_core::NodeId;
use gs_network::{Cost, Network};
use gs_solver::{DcConfig, solve_network};
use gs_switch::{SwitchRef, Toggle, reset_switches, toggle_switch};
use tracing::info;

use crate::error::AppResult;

/// Reason given when a switch is refused.
pub const UNSOLVABLE_SWITCH: &str = "Switching this line creates an unsolvable network";

/// Result of [`apply_switch`].
#[derive(Debug, Clone, PartialEq)]
pub enum SwitchOutcome {
    /// The switch was flipped and the network re-solved.
    Applied { toggle: Toggle, cost: Cost },
    /// Flipping the switch would leave the grid unsolvable; nothing changed.
    Reverted { reason: String },
}

impl SwitchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, SwitchOutcome::Applied { .. })
    }
}

/// Result of [`reset_and_solve`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResetOutcome {
    pub closed: Vec<SwitchRef>,
    pub cost: Cost,
}

/// Flip one switch and re-solve.
///
/// The change is tried on a copy. If the copy turns out infeasible the
/// original network is left exactly as it was and the outcome is
/// [`SwitchOutcome::Reverted`].
pub fn apply_switch(
    network: &mut Network,
    switch: &SwitchRef,
    config: &DcConfig,
) -> AppResult<SwitchOutcome> {
    let mut candidate = network.clone();
    let toggle = toggle_switch(&mut candidate, switch)?;
    let solution = solve_network(&mut candidate, config)?;

    if solution.cost.is_infeasible() {
        info!(switch = %switch, "switch reverted");
        return Ok(SwitchOutcome::Reverted {
            reason: UNSOLVABLE_SWITCH.to_string(),
        });
    }

    *network = candidate;
    info!(switch = %switch, ?toggle, cost = %solution.cost, "switch applied");
    Ok(SwitchOutcome::Applied {
        toggle,
        cost: solution.cost,
    })
}

/// Close every open switch of `node` (base or shadow id) and re-solve.
///
/// Unlike [`apply_switch`] this never reverts.
pub fn reset_and_solve(
    network: &mut Network,
    node: &NodeId,
    config: &DcConfig,
) -> AppResult<ResetOutcome> {
    let closed = reset_switches(network, node)?;
    let solution = solve_network(network, config)?;
    info!(node = %node, closed = closed.len(), cost = %solution.cost, "switches reset");
    Ok(ResetOutcome {
        closed,
        cost: solution.cost,
    })
}
