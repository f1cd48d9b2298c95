//! Dense LU solve of the reduced Laplacian system.

use nalgebra::{DMatrix, DVector};

use crate::error::{SolverError, SolverResult};

/// Solve `b_red · θ = p_red` exactly by LU with partial pivoting.
///
/// Returns `Ok(None)` when the matrix is singular: some pivot is smaller
/// than `pivot_tol` relative to the largest entry of `b_red`.
pub fn solve_reduced(
    b_red: &DMatrix<f64>,
    p_red: &DVector<f64>,
    pivot_tol: f64,
) -> SolverResult<Option<DVector<f64>>> {
    if !b_red.is_square() || b_red.nrows() != p_red.len() {
        return Err(SolverError::ProblemSetup {
            what: format!(
                "reduced system shape mismatch: {}x{} matrix, {} rhs",
                b_red.nrows(),
                b_red.ncols(),
                p_red.len()
            ),
        });
    }

    // Single-node grid: nothing to solve
    if b_red.is_empty() {
        return Ok(Some(DVector::zeros(0)));
    }

    let scale = b_red.amax();
    if scale == 0.0 {
        return Ok(None);
    }

    let lu = b_red.clone().lu();
    let min_pivot = lu.u().diagonal().amin();
    if min_pivot <= pivot_tol * scale {
        return Ok(None);
    }

    let theta = lu.solve(p_red).ok_or_else(|| SolverError::Numeric {
        what: "LU back-substitution failed".to_string(),
    })?;

    if theta.iter().any(|v| !v.is_finite()) {
        return Err(SolverError::Numeric {
            what: "non-finite voltage angle".to_string(),
        });
    }

    Ok(Some(theta))
}
