//! Synthetic stationary-pivot pose generators.
//!
//! Every generated pose satisfies `R_i * offset + t_i = pivot` exactly: the
//! tool orientation varies while the tip stays at the pivot point, which is
//! the acquisition geometry of a pivot calibration.

use crate::{Iso3, Real, RigidPose, Vec3};
use nalgebra::{Translation3, UnitQuaternion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f64::consts::TAU;

/// Build the pose with orientation `q` whose tip lands exactly on `pivot`.
fn pose_at(q: UnitQuaternion<Real>, offset: &Vec3, pivot: &Vec3) -> RigidPose {
    let translation = pivot - q.to_rotation_matrix().matrix() * offset;
    RigidPose::from_isometry(&Iso3::from_parts(Translation3::from(translation), q))
}

/// Generate `n` poses sweeping the tool around the pivot on a widening cone.
///
/// Orientations combine a full azimuth revolution about +Z with a tilt ramp
/// about +X, which gives the rotational diversity the linear solve needs.
/// Ordering is deterministic and there is no randomness.
pub fn sweep_poses(offset: &Vec3, pivot: &Vec3, n: usize) -> Vec<RigidPose> {
    (0..n)
        .map(|i| {
            let s = i as Real / n.max(1) as Real;
            let azimuth = TAU * s;
            let tilt = 0.2 + 0.6 * s;
            let q = UnitQuaternion::from_scaled_axis(Vec3::z() * azimuth)
                * UnitQuaternion::from_scaled_axis(Vec3::x() * tilt);
            pose_at(q, offset, pivot)
        })
        .collect()
}

/// Generate `n` poses with seeded random orientations about the pivot.
///
/// Axis directions are drawn uniformly from the cube and normalized, angles
/// from `[0.1, 1.2)` rad so every sample carries usable rotation.
pub fn random_poses(offset: &Vec3, pivot: &Vec3, n: usize, seed: u64) -> Vec<RigidPose> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let raw = Vec3::new(
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
            );
            let axis = if raw.norm() < 1e-6 { Vec3::x() } else { raw.normalize() };
            let angle: Real = rng.random_range(0.1..1.2);
            let q = UnitQuaternion::from_scaled_axis(axis * angle);
            pose_at(q, offset, pivot)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vec3;
    use approx::assert_relative_eq;

    #[test]
    fn sweep_poses_keep_tip_on_pivot() {
        let offset = Vec3::new(-14.5, 395.1, -7.6);
        let pivot = Vec3::new(-805.3, -85.5, -2112.1);
        for pose in sweep_poses(&offset, &pivot, 25) {
            assert_relative_eq!(pose.transform_point(&offset), pivot, epsilon = 1e-9);
        }
    }

    #[test]
    fn random_poses_keep_tip_on_pivot_and_are_seeded() {
        let offset = Vec3::new(10.0, -3.0, 150.0);
        let pivot = Vec3::new(0.5, 2.0, -300.0);

        let a = random_poses(&offset, &pivot, 12, 99);
        let b = random_poses(&offset, &pivot, 12, 99);

        for (pa, pb) in a.iter().zip(&b) {
            assert_relative_eq!(pa.transform_point(&offset), pivot, epsilon = 1e-9);
            assert_eq!(pa.translation(), pb.translation());
            assert_eq!(pa.rotation(), pb.rotation());
        }
    }
}
