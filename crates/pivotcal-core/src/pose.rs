//! Tracked rigid-body pose samples and their validation.
//!
//! A [`RigidPose`] is one tool-to-tracker transform captured by a tracking
//! system. Poses are validated on ingestion: the rotation block must be
//! orthonormal with determinant +1 within [`ORTHONORMAL_TOL`], and 4×4
//! inputs must carry a `[0, 0, 0, 1]` bottom row. Downstream solvers can
//! therefore assume every pose is a proper rigid transform.

use crate::{Iso3, Mat3, Mat4, Real, Vec3};
use thiserror::Error;

/// Tolerance for the rotation checks: max entry of `|RᵀR − I|` and the
/// deviation of the homogeneous bottom row from `[0, 0, 0, 1]`.
pub const ORTHONORMAL_TOL: Real = 1e-6;

/// Errors raised when a supplied pose fails validation.
#[derive(Debug, Error)]
pub enum PoseError {
    /// Rotation block is not orthonormal within tolerance.
    #[error("rotation block is not orthonormal (max deviation {0:.3e})")]
    NotOrthonormal(Real),
    /// Rotation block is orthonormal but mirrored (determinant −1).
    #[error("rotation block is a reflection (det = {0:.6})")]
    ImproperRotation(Real),
    /// Bottom row of the homogeneous matrix is not `[0, 0, 0, 1]`.
    #[error("bottom row of homogeneous matrix is not [0, 0, 0, 1]")]
    BadHomogeneousRow,
    /// Matrix contains NaN or infinite entries.
    #[error("matrix contains non-finite entries")]
    NonFinite,
}

/// A [`PoseError`] tagged with the index of the offending sample.
#[derive(Debug, Error)]
#[error("pose {index}: {source}")]
pub struct BatchPoseError {
    /// Index of the pose that failed validation.
    pub index: usize,
    /// The underlying validation failure.
    #[source]
    pub source: PoseError,
}

/// One sampled tool-to-tracker transform.
///
/// Fields are private so that every constructed pose has passed the
/// rotation checks; use the accessors or [`RigidPose::transform_point`].
#[derive(Debug, Clone, Copy)]
pub struct RigidPose {
    rotation: Mat3,
    translation: Vec3,
}

impl RigidPose {
    /// Build a pose from a rotation matrix and a translation vector.
    pub fn from_parts(rotation: Mat3, translation: Vec3) -> Result<Self, PoseError> {
        validate_rotation(&rotation)?;
        if !translation.iter().all(|v| v.is_finite()) {
            return Err(PoseError::NonFinite);
        }
        Ok(Self {
            rotation,
            translation,
        })
    }

    /// Build a pose from a 4×4 homogeneous matrix.
    ///
    /// The top-left 3×3 block is the rotation, the top-right column the
    /// translation, and the bottom row must be `[0, 0, 0, 1]`.
    pub fn from_matrix(m: &Mat4) -> Result<Self, PoseError> {
        if !m.iter().all(|v| v.is_finite()) {
            return Err(PoseError::NonFinite);
        }
        let row_ok = m[(3, 0)].abs() <= ORTHONORMAL_TOL
            && m[(3, 1)].abs() <= ORTHONORMAL_TOL
            && m[(3, 2)].abs() <= ORTHONORMAL_TOL
            && (m[(3, 3)] - 1.0).abs() <= ORTHONORMAL_TOL;
        if !row_ok {
            return Err(PoseError::BadHomogeneousRow);
        }

        let rotation = m.fixed_view::<3, 3>(0, 0).into_owned();
        let translation = m.fixed_view::<3, 1>(0, 3).into_owned();
        Self::from_parts(rotation, translation)
    }

    /// Build a pose from an isometry. Infallible: an isometry's rotation is
    /// orthonormal by construction.
    pub fn from_isometry(iso: &Iso3) -> Self {
        Self {
            rotation: *iso.rotation.to_rotation_matrix().matrix(),
            translation: iso.translation.vector,
        }
    }

    /// Rotation block (tool frame → tracker frame).
    pub fn rotation(&self) -> &Mat3 {
        &self.rotation
    }

    /// Translation vector (tool origin in the tracker frame).
    pub fn translation(&self) -> &Vec3 {
        &self.translation
    }

    /// Map a point from the tool frame into the tracker frame: `R x + t`.
    ///
    /// With a candidate tip offset as `x`, this is the predicted pivot
    /// position for this sample.
    pub fn transform_point(&self, x: &Vec3) -> Vec3 {
        self.rotation * x + self.translation
    }

    /// Copy of this pose with the translation shifted by `delta`.
    ///
    /// The rotation block is untouched, so the result is still a valid pose.
    pub fn translated_by(&self, delta: &Vec3) -> Self {
        Self {
            rotation: self.rotation,
            translation: self.translation + delta,
        }
    }
}

/// Validate a batch of 4×4 homogeneous matrices into poses.
///
/// Stops at the first malformed sample and reports its index.
pub fn poses_from_matrices(mats: &[Mat4]) -> Result<Vec<RigidPose>, BatchPoseError> {
    mats.iter()
        .enumerate()
        .map(|(index, m)| {
            RigidPose::from_matrix(m).map_err(|source| BatchPoseError { index, source })
        })
        .collect()
}

fn validate_rotation(r: &Mat3) -> Result<(), PoseError> {
    if !r.iter().all(|v| v.is_finite()) {
        return Err(PoseError::NonFinite);
    }
    let deviation = (r.transpose() * r - Mat3::identity()).abs().max();
    if deviation > ORTHONORMAL_TOL {
        return Err(PoseError::NotOrthonormal(deviation));
    }
    let det = r.determinant();
    if det < 0.0 {
        return Err(PoseError::ImproperRotation(det));
    }
    Ok(())
}
