//! Classification vocabularies shared by the plane and volume tests.
//!
//! [`PlaneSide`] answers "which side of this plane", [`VolumeClassification`]
//! answers "how does this volume sit relative to a convex region".

use crate::plane::Plane;
use serde::{Deserialize, Serialize};

/// Position of a point (or point set) relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaneSide {
    /// On the positive side of the plane.
    Front,
    /// On the negative side of the plane.
    Back,
    /// Within the planar epsilon band.
    Coplanar,
    /// A point set with members on both sides.
    Clipped,
}

/// Tri-state result of volume vs. frustum / six-plane / single-plane tests.
///
/// Against a single plane, `Outside` means entirely on the positive side and
/// `Inside` entirely on the negative side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolumeClassification {
    Outside,
    Intersecting,
    Inside,
}

impl VolumeClassification {
    /// Anything that is not culled.
    pub fn is_visible(self) -> bool {
        self != VolumeClassification::Outside
    }
}

/// Face index used by [`crate::Frustum::planes`] and [`crate::Aabb::planes`].
///
/// For boxes, `Left`/`Right` are -X/+X, `Bottom`/`Top` are -Y/+Y and
/// `Near`/`Far` are -Z/+Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrustumPlane {
    Left,
    Right,
    Bottom,
    Top,
    Near,
    Far,
}

impl FrustumPlane {
    /// All faces in canonical order.
    pub const ALL: [FrustumPlane; 6] = [
        FrustumPlane::Left,
        FrustumPlane::Right,
        FrustumPlane::Bottom,
        FrustumPlane::Top,
        FrustumPlane::Near,
        FrustumPlane::Far,
    ];

    /// Position of this face in [`FrustumPlane::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Combine per-plane results for a convex region bounded by `planes`.
///
/// Exits on the first plane that reports `Outside`; the result is `Inside`
/// only if every plane does. An empty plane set classifies `Inside`.
pub(crate) fn classify_convex<F>(planes: &[Plane], mut classify: F) -> VolumeClassification
where
    F: FnMut(&Plane) -> VolumeClassification,
{
    let mut result = VolumeClassification::Inside;
    for plane in planes {
        match classify(plane) {
            VolumeClassification::Outside => return VolumeClassification::Outside,
            VolumeClassification::Intersecting => result = VolumeClassification::Intersecting,
            VolumeClassification::Inside => {}
        }
    }
    result
}

/// Classify a signed center distance `d` against a projected radius `r`.
pub(crate) fn classify_distance(d: f32, r: f32) -> VolumeClassification {
    if d > r {
        VolumeClassification::Outside
    } else if d <= -r {
        VolumeClassification::Inside
    } else {
        VolumeClassification::Intersecting
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility() {
        assert!(!VolumeClassification::Outside.is_visible());
        assert!(VolumeClassification::Intersecting.is_visible());
        assert!(VolumeClassification::Inside.is_visible());
    }

    #[test]
    fn test_classify_convex_early_exit() {
        let planes = [Plane::XY, Plane::XZ, Plane::YZ];
        let mut calls = 0;
        let result = classify_convex(&planes, |_| {
            calls += 1;
            VolumeClassification::Outside
        });
        assert_eq!(result, VolumeClassification::Outside);
        assert_eq!(calls, 1);

        let result = classify_convex(&planes, |p| {
            if *p == Plane::XZ {
                VolumeClassification::Intersecting
            } else {
                VolumeClassification::Inside
            }
        });
        assert_eq!(result, VolumeClassification::Intersecting);
        assert_eq!(classify_convex(&[], |_| VolumeClassification::Outside), VolumeClassification::Inside);
    }

    #[test]
    fn test_classify_distance_boundaries() {
        assert_eq!(classify_distance(1.5, 1.0), VolumeClassification::Outside);
        assert_eq!(classify_distance(1.0, 1.0), VolumeClassification::Intersecting);
        assert_eq!(classify_distance(-1.0, 1.0), VolumeClassification::Inside);
        assert_eq!(classify_distance(0.0, 0.0), VolumeClassification::Inside);
    }

    #[test]
    fn test_frustum_plane_order() {
        for (i, face) in FrustumPlane::ALL.iter().enumerate() {
            assert_eq!(face.index(), i);
        }
    }
}
