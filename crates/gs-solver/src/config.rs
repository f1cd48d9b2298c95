//! Solver configuration.

use gs_core::{NodeId, Real};
use serde::{Deserialize, Serialize};

/// DC power-flow configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DcConfig {
    /// Reference (slack) bus; `None` uses the first node in id order.
    pub slack: Option<NodeId>,
    /// Relative pivot size below which the reduced Laplacian counts as singular.
    pub pivot_tol: Real,
    /// Costs at or below this are treated as zero.
    pub cost_epsilon: Real,
}

impl Default for DcConfig {
    fn default() -> Self {
        Self {
            slack: None,
            pivot_tol: 1e-10,
            cost_epsilon: 1e-9,
        }
    }
}

impl DcConfig {
    /// Same configuration with a fixed reference bus.
    pub fn with_slack(mut self, slack: impl Into<NodeId>) -> Self {
        self.slack = Some(slack.into());
        self
    }
}
