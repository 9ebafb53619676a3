//! Seeded noise and corruption helpers.
//!
//! A small Box–Muller Gaussian sampler keeps these helpers dependency-free
//! and bit-reproducible under a fixed seed. Input pose slices are never
//! mutated; perturbed copies are returned.

use crate::{Real, RigidPose, Vec3};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f64::consts::TAU;

/// Seeded Gaussian sampler (Box–Muller over a [`StdRng`]).
pub struct GaussianNoise {
    rng: StdRng,
    spare: Option<Real>,
}

impl GaussianNoise {
    /// Construct a sampler from a fixed seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            spare: None,
        }
    }

    /// Draw one sample from `N(0, sigma^2)`.
    pub fn sample(&mut self, sigma: Real) -> Real {
        if let Some(z) = self.spare.take() {
            return z * sigma;
        }
        let u1: Real = self.rng.random::<Real>().max(1e-300);
        let u2: Real = self.rng.random();
        let r = (-2.0 * u1.ln()).sqrt();
        let theta = TAU * u2;
        self.spare = Some(r * theta.sin());
        r * theta.cos() * sigma
    }

    /// Draw a 3-vector with i.i.d. `N(0, sigma^2)` components.
    pub fn sample_vec3(&mut self, sigma: Real) -> Vec3 {
        Vec3::new(self.sample(sigma), self.sample(sigma), self.sample(sigma))
    }
}

/// Copies of `poses` with i.i.d. Gaussian noise added to each translation.
pub fn perturb_translations(poses: &[RigidPose], sigma: Real, seed: u64) -> Vec<RigidPose> {
    let mut noise = GaussianNoise::from_seed(seed);
    poses
        .iter()
        .map(|pose| pose.translated_by(&noise.sample_vec3(sigma)))
        .collect()
}

/// Copies of `poses` with gross translation outliers injected at `indices`.
///
/// Each corrupted pose is shifted along a random direction by a length drawn
/// uniformly from `[magnitude, 2 * magnitude)`.
///
/// # Panics
///
/// Panics if an index is out of bounds.
pub fn corrupt_poses(
    poses: &[RigidPose],
    indices: &[usize],
    magnitude: Real,
    seed: u64,
) -> Vec<RigidPose> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = poses.to_vec();
    for &idx in indices {
        let raw = Vec3::new(
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
        );
        let dir = if raw.norm() < 1e-6 { Vec3::x() } else { raw.normalize() };
        let len: Real = rng.random_range(magnitude..(2.0 * magnitude));
        out[idx] = out[idx].translated_by(&(dir * len));
    }
    out
}
