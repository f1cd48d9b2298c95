//! Linear system assembly for DC power flow.

use gs_network::{IndexMap, Network};
use nalgebra::{DMatrix, DVector};

use crate::config::DcConfig;
use crate::error::SolverResult;

/// DC power-flow problem over a fixed node/line ordering.
///
/// Every line has unit susceptance, so the nodal matrix is the plain graph
/// Laplacian `B = A·Aᵀ`.
#[derive(Debug, Clone)]
pub struct DcProblem {
    /// Node and line numbering; node 0 is the reference bus.
    pub index: IndexMap,

    /// Net injection per node, in index order.
    pub injections: DVector<f64>,

    /// Node-line incidence matrix A (n×m): +1 at the from node, −1 at the to node.
    pub incidence: DMatrix<f64>,
}

impl DcProblem {
    /// Assemble the problem for `network`.
    ///
    /// Fails if a line references a node that doesn't exist.
    pub fn new(network: &Network, config: &DcConfig) -> SolverResult<Self> {
        let index = match &config.slack {
            Some(slack) => IndexMap::with_reference(network, slack)?,
            None => IndexMap::from_network(network),
        };

        let n = index.node_count();
        let m = index.line_count();

        let injections = DVector::from_iterator(
            n,
            index
                .node_ids()
                .iter()
                .map(|id| network.node(id.as_str()).map_or(0.0, |node| node.injection)),
        );

        // A self-loop gets +1 and −1 on the same entry and drops out
        let mut incidence = DMatrix::zeros(n, m);
        for (ell, (i, j)) in index.line_endpoints(network)?.into_iter().enumerate() {
            incidence[(i, ell)] += 1.0;
            incidence[(j, ell)] -= 1.0;
        }

        Ok(Self {
            index,
            injections,
            incidence,
        })
    }

    pub fn node_count(&self) -> usize {
        self.index.node_count()
    }

    pub fn line_count(&self) -> usize {
        self.index.line_count()
    }

    /// Graph Laplacian `B = A·Aᵀ` (n×n).
    pub fn laplacian(&self) -> DMatrix<f64> {
        &self.incidence * self.incidence.transpose()
    }

    /// `B` and `p` with the reference bus row/column removed.
    pub fn reduced_system(&self) -> (DMatrix<f64>, DVector<f64>) {
        let n = self.node_count();
        if n == 0 {
            return (DMatrix::zeros(0, 0), DVector::zeros(0));
        }
        let b = self.laplacian();
        let b_red = b.view((1, 1), (n - 1, n - 1)).into_owned();
        let p_red = self.injections.rows(1, n - 1).into_owned();
        (b_red, p_red)
    }

    /// Full angle vector with the reference angle fixed at zero.
    pub fn expand_angles(&self, theta_red: &DVector<f64>) -> DVector<f64> {
        let n = self.node_count();
        let mut theta = DVector::zeros(n);
        if n > 1 {
            theta.rows_mut(1, n - 1).copy_from(theta_red);
        }
        theta
    }

    /// Line flows `Aᵀ·θ`, i.e. `θ[from] − θ[to]` for each line.
    pub fn flows(&self, theta: &DVector<f64>) -> DVector<f64> {
        self.incidence.transpose() * theta
    }
}
