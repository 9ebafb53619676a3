//! High-level entry crate for the `pivotcal-rs` toolbox.
//!
//! Pivot calibration estimates two quantities from tool poses recorded
//! while the tool tip is held on a stationary point:
//! - the **offset**: the tip position in the tool's own marker frame,
//! - the **pivot**: the stationary point's position in the tracker frame.
//!
//! Two complementary entry points:
//!
//! ## 1. Plain least squares
//!
//! [`solve_pivot`] runs the deterministic Algebraic One Step solve over the
//! full pose set. Use it when the acquisition is trusted.
//!
//! ## 2. Robust consensus search
//!
//! [`solve_pivot_ransac`] tolerates a bounded fraction of corrupted samples
//! (tracking dropouts, occlusion spikes, momentary tip movement) by fitting
//! candidates on random minimal subsets and refitting over the best
//! consensus set.
//!
//! ```no_run
//! use pivotcal::core::Mat4;
//! use pivotcal::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mats: Vec<Mat4> = /* tracked tool poses, one 4x4 matrix each */
//! # vec![];
//! let poses = poses_from_matrices(&mats)?;
//!
//! let solution = solve_pivot(&poses)?;
//! println!("tip offset: {:.2}", solution.offset);
//!
//! let config = RansacConfig {
//!     num_iterations: 10,
//!     inlier_threshold: 4.0,
//!     min_consensus_fraction: 0.25,
//! };
//! let report = solve_pivot_ransac(&poses, &config, Some(42))?;
//! println!(
//!     "pivot: {:.2} ({} of {} poses used)",
//!     report.solution.pivot,
//!     report.inliers_used,
//!     poses.len()
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Module organization
//!
//! - **[`core`]**: math types, pose validation, the RANSAC engine, and
//!   synthetic data helpers
//! - **[`linear`]**: the closed-form AOS solver and the robust calibrator
//! - **[`prelude`]**: re-exports of the common working set
//!
//! ## Stability
//!
//! The `pivotcal` crate is the public compatibility boundary. The lower
//! crates are intended for advanced usage and may evolve more quickly.

/// Math types, pose validation, RANSAC engine, and synthetic data helpers.
pub mod core {
    pub use pivotcal_core::*;
}

/// Closed-form AOS pivot solver and the robust RANSAC calibrator.
pub mod linear {
    pub use pivotcal_linear::*;
}

pub use pivotcal_linear::{solve_pivot, solve_pivot_ransac};

/// Convenient re-exports for common use cases.
///
/// Import with `use pivotcal::prelude::*;` to get started quickly.
pub mod prelude {
    pub use crate::core::{
        poses_from_matrices, PoseError, RansacConfig, RansacError, RigidPose, Vec3,
    };
    pub use crate::linear::{
        solve_pivot, solve_pivot_ransac, AosPivotSolver, PivotSolution, PivotSolveError,
        RansacPivotCalibrator, RansacPivotReport,
    };
}
