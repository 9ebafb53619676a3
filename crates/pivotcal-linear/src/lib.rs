//! Closed-form pivot calibration and its robust RANSAC wrapper.
//!
//! [`solve_pivot`] performs the deterministic Algebraic One Step (AOS)
//! least-squares solve; [`solve_pivot_ransac`] wraps it in a consensus
//! search that tolerates corrupted pose samples.

mod aos;
mod robust;

pub use aos::*;
pub use robust::*;
