//! End-to-end properties of the robust pivot calibration on synthetic
//! tracked-tool acquisitions: outlier rejection, noise degradation, and
//! reproducibility.

use pivotcal_core::synthetic::{noise, pivot};
use pivotcal_core::{RansacConfig, Real, Vec3};
use pivotcal_linear::{solve_pivot, solve_pivot_ransac};

const OFFSET_GT: [Real; 3] = [-14.48, 395.14, -7.56];
const PIVOT_GT: [Real; 3] = [-805.28, -85.45, -2112.07];

fn ground_truth() -> (Vec3, Vec3) {
    (Vec3::from(OFFSET_GT), Vec3::from(PIVOT_GT))
}

/// Contaminated acquisition: `n` lightly noisy poses with the first
/// `n_bad` of them knocked far off by gross translation outliers.
fn contaminated_poses(
    n: usize,
    n_bad: usize,
    sigma: Real,
    seed: u64,
) -> Vec<pivotcal_core::RigidPose> {
    let (offset_gt, pivot_gt) = ground_truth();
    let clean = pivot::random_poses(&offset_gt, &pivot_gt, n, seed);
    let noisy = noise::perturb_translations(&clean, sigma, seed.wrapping_add(1));
    let bad_indices: Vec<usize> = (0..n_bad).collect();
    noise::corrupt_poses(&noisy, &bad_indices, 50.0, seed.wrapping_add(2))
}

#[test]
fn ransac_beats_plain_least_squares_on_contaminated_data() {
    let (offset_gt, pivot_gt) = ground_truth();
    let n = 300;
    let n_bad = 40;
    let poses = contaminated_poses(n, n_bad, 0.05, 101);

    let plain = solve_pivot(&poses).unwrap();

    let config = RansacConfig {
        num_iterations: 50,
        inlier_threshold: 1.0,
        min_consensus_fraction: 0.5,
    };
    let report = solve_pivot_ransac(&poses, &config, Some(55)).unwrap();

    // The consensus set should be essentially the uncorrupted poses.
    assert!(report.inliers_used >= n - n_bad - 10);
    assert!(report.inliers_used <= n - n_bad + 5);

    let ransac_err = (report.solution.pivot - pivot_gt).norm();
    let plain_err = (plain.pivot - pivot_gt).norm();

    assert!(
        ransac_err < plain_err,
        "ransac pivot error {ransac_err:.4} not below plain {plain_err:.4}"
    );
    assert!(ransac_err < 0.5, "ransac pivot error too large: {ransac_err:.4}");
    assert!(
        (report.solution.offset - offset_gt).norm() < 0.5,
        "ransac offset error too large"
    );

    // Plain least squares also inflates the reported residual.
    assert!(
        plain.residual > 2.0 * report.solution.residual,
        "expected contaminated residual {:.4} to dwarf robust residual {:.4}",
        plain.residual,
        report.solution.residual
    );
}

#[test]
fn ransac_residual_stays_near_uncontaminated_level() {
    let (offset_gt, pivot_gt) = ground_truth();
    let n = 300;
    let sigma = 0.05;

    let clean = pivot::random_poses(&offset_gt, &pivot_gt, n, 41);
    let noisy = noise::perturb_translations(&clean, sigma, 42);
    let clean_solution = solve_pivot(&noisy).unwrap();

    let bad_indices: Vec<usize> = (0..30).collect();
    let poses = noise::corrupt_poses(&noisy, &bad_indices, 50.0, 43);

    let config = RansacConfig {
        num_iterations: 50,
        inlier_threshold: 1.0,
        min_consensus_fraction: 0.5,
    };
    let report = solve_pivot_ransac(&poses, &config, Some(44)).unwrap();

    assert!(
        report.solution.residual < 2.0 * clean_solution.residual,
        "robust residual {:.4} drifted from uncontaminated level {:.4}",
        report.solution.residual,
        clean_solution.residual
    );
}

#[test]
fn pivot_error_grows_monotonically_with_noise() {
    let (offset_gt, pivot_gt) = ground_truth();
    let sigmas: [Real; 4] = [0.0, 0.2, 0.8, 2.0];
    let trials = 5;

    let mut mean_errors = Vec::with_capacity(sigmas.len());
    for (level, &sigma) in sigmas.iter().enumerate() {
        let mut total = 0.0;
        for trial in 0..trials {
            let seed = 1000 + (level * trials + trial) as u64;
            let clean = pivot::random_poses(&offset_gt, &pivot_gt, 200, seed);
            let noisy = noise::perturb_translations(&clean, sigma, seed.wrapping_add(7));
            let sol = solve_pivot(&noisy).unwrap();
            total += (sol.pivot - pivot_gt).norm();
        }
        mean_errors.push(total / trials as Real);
    }

    // Statistical trend: each level may dip slightly below the previous one,
    // but the overall curve must rise.
    for pair in mean_errors.windows(2) {
        assert!(
            pair[1] >= 0.7 * pair[0],
            "error dropped sharply between noise levels: {mean_errors:?}"
        );
    }
    assert!(
        mean_errors[sigmas.len() - 1] > mean_errors[0],
        "no growth across noise range: {mean_errors:?}"
    );
}

#[test]
fn seeded_runs_are_bit_identical_end_to_end() {
    let poses = contaminated_poses(150, 20, 0.05, 7);
    let config = RansacConfig {
        num_iterations: 30,
        inlier_threshold: 1.0,
        min_consensus_fraction: 0.4,
    };

    let a = solve_pivot_ransac(&poses, &config, Some(2024)).unwrap();
    let b = solve_pivot_ransac(&poses, &config, Some(2024)).unwrap();

    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}
