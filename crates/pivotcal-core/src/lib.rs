//! Core primitives for `pivotcal-rs`.
//!
//! This crate contains:
//! - linear algebra type aliases (`Real`, `Vec3`, `Mat3`, ...),
//! - the validated [`RigidPose`] sample type and its ingestion helpers,
//! - a generic RANSAC engine (`ransac_fit`, [`Estimator`]),
//! - deterministic synthetic data generation for tests and examples.
//!
//! Pose samples are tool-to-tracker transforms captured while the tool tip
//! rests on a fixed pivot point. Validation happens once, on ingestion;
//! everything downstream can assume proper rotations.

/// Linear algebra type aliases.
pub mod math;
/// Validated rigid pose samples.
pub mod pose;
/// Generic RANSAC engine and traits.
pub mod ransac;
/// Deterministic synthetic data helpers.
pub mod synthetic;

pub use math::*;
pub use pose::*;
pub use ransac::*;
