//! Query helpers for summarizing a network.

use gs_core::{LineId, Real};
use gs_network::{Cost, Network};
use gs_switch::open_switches;

/// Headline numbers for a network.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkSummary {
    pub node_count: usize,
    pub shadow_count: usize,
    pub line_count: usize,
    pub open_switch_count: usize,
    /// Sum of positive injections.
    pub production: Real,
    /// Sum of negative injections, as a positive number.
    pub consumption: Real,
    /// `production - consumption`; zero for a balanced grid.
    pub imbalance: Real,
    /// Most heavily loaded line and its `|flow| / limit`.
    pub worst_loading: Option<(LineId, Real)>,
    pub cost: Option<Cost>,
}

/// Summarize `network` from its current state.
pub fn summarize(network: &Network) -> NetworkSummary {
    let (production, consumption) = network.nodes().values().fold((0.0, 0.0), |(p, c), n| {
        if n.injection > 0.0 {
            (p + n.injection, c)
        } else {
            (p, c - n.injection)
        }
    });

    let worst_loading = network
        .lines()
        .values()
        .filter_map(|l| l.loading().map(|load| (l.id.clone(), load)))
        .max_by(|a, b| a.1.total_cmp(&b.1));

    NetworkSummary {
        node_count: network.nodes().len(),
        shadow_count: network.shadow_nodes().count(),
        line_count: network.lines().len(),
        open_switch_count: open_switches(network).len(),
        production,
        consumption,
        imbalance: production - consumption,
        worst_loading,
        cost: network.cost,
    }
}
