//! Robust pivot calibration via RANSAC.
//!
//! Wraps [`AosPivotSolver`] in the generic consensus engine: minimal
//! four-pose subsets propose candidate (offset, pivot) pairs, every
//! candidate is scored against the full pose set, and the winning consensus
//! set is refit in one final least-squares pass. The refit step is what
//! keeps the robust estimate at least as accurate as the plain solve on
//! clean data while shrugging off corrupted samples.
//!
//! Policy choices (fixed and documented here): trials draw the minimal
//! subset of [`MIN_POSES`] poses, and candidates with equal consensus counts
//! are ranked by their own subset residual.

use log::debug;
use pivotcal_core::{ransac_fit, Estimator, RansacConfig, RansacError, Real, RigidPose};
use serde::{Deserialize, Serialize};

use crate::{AosPivotSolver, PivotSolution, MIN_POSES};

/// Diagnostic report of a robust pivot calibration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RansacPivotReport {
    /// Refined solution from the final refit over the consensus set.
    pub solution: PivotSolution,
    /// Number of poses in the winning consensus set.
    pub inliers_used: usize,
    /// `inliers_used` / total poses.
    pub inlier_fraction: Real,
    /// RANSAC trials performed.
    pub iterations: usize,
}

/// Estimator adapter: AOS pivot solve over minimal four-pose subsets.
struct PivotEstimator;

impl Estimator for PivotEstimator {
    type Datum = RigidPose;
    type Model = PivotSolution;

    const MIN_SAMPLES: usize = MIN_POSES;

    fn fit(data: &[RigidPose], sample_indices: &[usize]) -> Option<PivotSolution> {
        let subset: Vec<RigidPose> = sample_indices.iter().map(|&i| data[i]).collect();
        AosPivotSolver::solve(&subset).ok()
    }

    fn residual(model: &PivotSolution, pose: &RigidPose) -> f64 {
        (pose.transform_point(&model.offset) - model.pivot).norm()
    }

    fn model_quality(model: &PivotSolution) -> f64 {
        model.residual
    }

    fn refit(data: &[RigidPose], inliers: &[usize]) -> Option<PivotSolution> {
        let subset: Vec<RigidPose> = inliers.iter().map(|&i| data[i]).collect();
        AosPivotSolver::solve(&subset).ok()
    }
}

/// RANSAC pivot calibrator.
#[derive(Debug, Clone, Copy)]
pub struct RansacPivotCalibrator;

impl RansacPivotCalibrator {
    /// Robust pivot calibration over `poses`.
    ///
    /// `config.inlier_threshold` is interpreted in the translation units of
    /// the poses (millimetres for typical tracker data). Passing a `seed`
    /// makes the run bit-reproducible; `None` seeds from OS entropy.
    pub fn calibrate(
        poses: &[RigidPose],
        config: &RansacConfig,
        seed: Option<u64>,
    ) -> Result<RansacPivotReport, RansacError> {
        let res = ransac_fit::<PivotEstimator>(poses, config, seed)?;
        debug!(
            "ransac pivot: {}/{} inliers after {} trials, residual {:.6}",
            res.inliers.len(),
            poses.len(),
            res.iterations,
            res.model.residual
        );
        Ok(RansacPivotReport {
            solution: res.model,
            inliers_used: res.inliers.len(),
            inlier_fraction: res.inlier_fraction,
            iterations: res.iterations,
        })
    }
}

/// Robust pivot calibration; see [`RansacPivotCalibrator::calibrate`].
pub fn solve_pivot_ransac(
    poses: &[RigidPose],
    config: &RansacConfig,
    seed: Option<u64>,
) -> Result<RansacPivotReport, RansacError> {
    RansacPivotCalibrator::calibrate(poses, config, seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solve_pivot;
    use approx::assert_relative_eq;
    use pivotcal_core::synthetic::{noise, pivot};
    use pivotcal_core::Vec3;

    fn config() -> RansacConfig {
        RansacConfig {
            num_iterations: 40,
            inlier_threshold: 1.0,
            min_consensus_fraction: 0.5,
        }
    }

    #[test]
    fn matches_plain_solve_on_clean_poses() {
        let offset_gt = Vec3::new(-14.48, 395.14, -7.56);
        let pivot_gt = Vec3::new(-805.28, -85.45, -2112.07);
        let poses = pivot::sweep_poses(&offset_gt, &pivot_gt, 60);

        let plain = solve_pivot(&poses).unwrap();
        let report = solve_pivot_ransac(&poses, &config(), Some(3)).unwrap();

        assert_eq!(report.inliers_used, poses.len());
        assert_relative_eq!(report.solution.offset, plain.offset, epsilon = 1e-9);
        assert_relative_eq!(report.solution.pivot, plain.pivot, epsilon = 1e-9);
    }

    #[test]
    fn too_few_poses_is_insufficient_data() {
        let offset_gt = Vec3::new(1.0, 2.0, 3.0);
        let pivot_gt = Vec3::new(4.0, 5.0, 6.0);
        let poses = pivot::sweep_poses(&offset_gt, &pivot_gt, 3);

        let err = solve_pivot_ransac(&poses, &config(), Some(3)).unwrap_err();
        assert!(matches!(
            err,
            RansacError::InsufficientData { got: 3, need: 4 }
        ));
    }

    #[test]
    fn unreachable_threshold_fails_consensus() {
        let offset_gt = Vec3::new(1.0, 2.0, 3.0);
        let pivot_gt = Vec3::new(-7.0, 4.0, 11.0);
        let clean = pivot::sweep_poses(&offset_gt, &pivot_gt, 40);
        let noisy = noise::perturb_translations(&clean, 0.2, 17);

        let cfg = RansacConfig {
            num_iterations: 20,
            inlier_threshold: 1e-9,
            min_consensus_fraction: 0.25,
        };
        let err = solve_pivot_ransac(&noisy, &cfg, Some(5)).unwrap_err();
        assert!(matches!(err, RansacError::ConsensusNotReached { .. }));
    }

    #[test]
    fn identical_seed_gives_identical_report() {
        let offset_gt = Vec3::new(3.0, -20.0, 160.0);
        let pivot_gt = Vec3::new(100.0, 50.0, -400.0);
        let clean = pivot::sweep_poses(&offset_gt, &pivot_gt, 80);
        let noisy = noise::perturb_translations(&clean, 0.05, 23);
        let data = noise::corrupt_poses(&noisy, &[4, 9, 31], 30.0, 29);

        let a = solve_pivot_ransac(&data, &config(), Some(777)).unwrap();
        let b = solve_pivot_ransac(&data, &config(), Some(777)).unwrap();
        assert_eq!(a, b);
    }
}
