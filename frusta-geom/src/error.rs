//! Error types for the fallible constructors.
//!
//! Intersection and classification predicates never fail; only building a
//! volume from external data (point clouds, projection matrices) can.

use thiserror::Error;

/// Errors produced while deriving geometry from input data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeomError {
    #[error("cannot fit a bounding volume to an empty point set")]
    EmptyPointSet,

    #[error("point {index} is not finite")]
    NonFinitePoint { index: usize },

    #[error("projection matrix is not invertible")]
    SingularProjection,

    #[error("view matrix is not invertible")]
    SingularView,

    #[error("projection yields an invalid depth range (near {near}, far {far})")]
    InvalidDepthRange { near: f32, far: f32 },
}

/// Reject empty or non-finite point sets before fitting.
pub(crate) fn validate_points(points: &[glam::Vec3]) -> Result<(), GeomError> {
    if points.is_empty() {
        tracing::warn!("Refusing to fit a bounding volume to zero points");
        return Err(GeomError::EmptyPointSet);
    }
    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        tracing::warn!("Point {} is not finite", index);
        return Err(GeomError::NonFinitePoint { index });
    }
    Ok(())
}
