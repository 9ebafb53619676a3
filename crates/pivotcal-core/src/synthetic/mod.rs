//! Deterministic synthetic data generation helpers.
//!
//! This module provides small, reusable building blocks for constructing
//! synthetic pivot-calibration problems used in tests and examples:
//! - stationary-pivot pose generators (a deterministic orientation sweep and
//!   a seeded random variant),
//! - seeded Gaussian noise and gross-outlier injection.
//!
//! The helpers are intentionally lightweight and deterministic (explicit
//! seeds; stable ordering). Nothing here touches process-global RNG state.
//!
//! # Example
//!
//! ```
//! use pivotcal_core::synthetic::{noise, pivot};
//! use pivotcal_core::Vec3;
//!
//! let offset = Vec3::new(-14.5, 395.1, -7.6);
//! let pivot_pt = Vec3::new(-805.3, -85.5, -2112.1);
//!
//! let clean = pivot::sweep_poses(&offset, &pivot_pt, 100);
//! let noisy = noise::perturb_translations(&clean, 0.05, 7);
//! assert_eq!(noisy.len(), clean.len());
//! ```

pub mod noise;
pub mod pivot;
