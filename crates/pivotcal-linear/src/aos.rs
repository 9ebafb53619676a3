//! Algebraic One Step (AOS) pivot calibration.
//!
//! For poses `(R_i, t_i)` captured while the tool tip rests on a fixed
//! point, the unknown tip offset `o` (tool frame) and pivot position `p`
//! (tracker frame) satisfy `R_i o + t_i = p` for every sample. Stacking all
//! N poses gives the `3N x 6` linear system
//!
//! ```text
//! [ R_0 | -I ]           [ -t_0 ]
//! [ R_1 | -I ] [ o ]     [ -t_1 ]
//! [   ...    ] [ p ]  =  [  ... ]
//! [ R_n | -I ]           [ -t_n ]
//! ```
//!
//! solved here in a single least-squares step via SVD. The reported
//! residual is the RMS spread of the per-pose tip predictions
//! `R_i o + t_i` about their own centroid, not the regression residual.

use log::debug;
use nalgebra::{DMatrix, DVector};
use pivotcal_core::{Mat3, Real, RigidPose, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum number of poses accepted by the solver.
pub const MIN_POSES: usize = 4;

/// Relative singular-value cutoff for the rank gate and the SVD solve.
const RANK_EPS: Real = 1e-9;

/// Errors that can occur during the least-squares pivot solve.
#[derive(Debug, Error)]
pub enum PivotSolveError {
    /// Not enough poses were provided.
    #[error("need at least {MIN_POSES} poses, got {0}")]
    NotEnoughPoses(usize),
    /// The stacked system is rank-deficient, e.g. all orientations nearly
    /// identical.
    #[error("pose set is rank-deficient; orientations lack diversity")]
    DegenerateGeometry,
    /// Linear solve (SVD) failed.
    #[error("svd failed in pivot solve")]
    SvdFailed,
}

/// Result of a pivot calibration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PivotSolution {
    /// Tool tip position expressed in the tool's marker frame.
    pub offset: Vec3,
    /// Pivot point position in the tracker frame.
    pub pivot: Vec3,
    /// RMS spread of per-pose tip predictions about their centroid.
    pub residual: Real,
}

/// Closed-form least-squares pivot solver (Algebraic One Step).
#[derive(Debug, Clone, Copy)]
pub struct AosPivotSolver;

impl AosPivotSolver {
    /// Solve for tip offset and pivot position over the whole pose set.
    ///
    /// Pure and deterministic; any numerical failure is surfaced as an
    /// error, never retried.
    pub fn solve(poses: &[RigidPose]) -> Result<PivotSolution, PivotSolveError> {
        let n = poses.len();
        if n < MIN_POSES {
            return Err(PivotSolveError::NotEnoughPoses(n));
        }

        let mut a = DMatrix::<Real>::zeros(3 * n, 6);
        let mut b = DVector::<Real>::zeros(3 * n);

        for (i, pose) in poses.iter().enumerate() {
            let row = 3 * i;
            a.view_mut((row, 0), (3, 3)).copy_from(pose.rotation());
            a.view_mut((row, 3), (3, 3))
                .copy_from(&(-Mat3::identity()));
            b.rows_mut(row, 3).copy_from(&(-pose.translation()));
        }

        let svd = a.svd(true, true);
        let sigma_max = svd.singular_values.max();
        let eps = RANK_EPS * sigma_max;
        let rank = svd.rank(eps);
        if rank < 6 {
            debug!("pivot system rank {rank} < 6, rejecting");
            return Err(PivotSolveError::DegenerateGeometry);
        }

        let x = svd.solve(&b, eps).map_err(|_| PivotSolveError::SvdFailed)?;

        let offset = Vec3::new(x[0], x[1], x[2]);
        let pivot = Vec3::new(x[3], x[4], x[5]);
        let residual = rms_spread(poses, &offset);
        debug!("pivot solve over {n} poses, residual {residual:.6}");

        Ok(PivotSolution {
            offset,
            pivot,
            residual,
        })
    }
}

/// RMS distance of the per-pose tip predictions from their centroid.
fn rms_spread(poses: &[RigidPose], offset: &Vec3) -> Real {
    let predictions: Vec<Vec3> = poses.iter().map(|p| p.transform_point(offset)).collect();
    let centroid = predictions.iter().fold(Vec3::zeros(), |acc, q| acc + q)
        / predictions.len() as Real;
    let ss: Real = predictions
        .iter()
        .map(|q| (q - centroid).norm_squared())
        .sum();
    (ss / predictions.len() as Real).sqrt()
}

/// Least-squares pivot calibration over a full pose set.
///
/// See [`AosPivotSolver::solve`].
pub fn solve_pivot(poses: &[RigidPose]) -> Result<PivotSolution, PivotSolveError> {
    AosPivotSolver::solve(poses)
}
