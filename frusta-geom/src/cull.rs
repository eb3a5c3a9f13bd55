//! Batch visibility classification.
//!
//! The frustum planes are derived once per call and every candidate runs the
//! six-plane test with early exit on the first rejecting plane.

use crate::aabb::Aabb;
use crate::classify::VolumeClassification;
use crate::frustum::Frustum;
use crate::obb::Obb;
use crate::plane::Plane;
use crate::sphere::Sphere;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A volume that can be classified against a convex set of planes.
pub trait Cullable {
    fn classify_planes(&self, planes: &[Plane]) -> VolumeClassification;
}

impl Cullable for Aabb {
    fn classify_planes(&self, planes: &[Plane]) -> VolumeClassification {
        Aabb::classify_planes(self, planes)
    }
}

impl Cullable for Obb {
    fn classify_planes(&self, planes: &[Plane]) -> VolumeClassification {
        Obb::classify_planes(self, planes)
    }
}

impl Cullable for Sphere {
    fn classify_planes(&self, planes: &[Plane]) -> VolumeClassification {
        Sphere::classify_planes(self, planes)
    }
}

impl Cullable for Frustum {
    fn classify_planes(&self, planes: &[Plane]) -> VolumeClassification {
        Frustum::classify_planes(self, planes)
    }
}

impl<T: Cullable + ?Sized> Cullable for &T {
    fn classify_planes(&self, planes: &[Plane]) -> VolumeClassification {
        (**self).classify_planes(planes)
    }
}

/// Indices of the candidates that survived culling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilitySet {
    /// Fully inside the frustum.
    pub inside: Vec<usize>,
    /// Crossing at least one frustum plane.
    pub intersecting: Vec<usize>,
    /// Number of candidates rejected.
    pub culled: usize,
}

impl VisibilitySet {
    /// All visible indices, fully inside ones first.
    pub fn visible(&self) -> impl Iterator<Item = usize> + '_ {
        self.inside.iter().chain(&self.intersecting).copied()
    }

    pub fn visible_count(&self) -> usize {
        self.inside.len() + self.intersecting.len()
    }

    /// Total number of candidates classified.
    pub fn total(&self) -> usize {
        self.visible_count() + self.culled
    }
}

impl Frustum {
    /// Classify every candidate against this frustum.
    #[tracing::instrument(skip_all, fields(count = candidates.len()))]
    pub fn cull<T: Cullable>(&self, candidates: &[T]) -> VisibilitySet {
        let planes = self.planes();
        let mut set = VisibilitySet::default();
        for (index, candidate) in candidates.iter().enumerate() {
            match candidate.classify_planes(&planes) {
                VolumeClassification::Inside => set.inside.push(index),
                VolumeClassification::Intersecting => set.intersecting.push(index),
                VolumeClassification::Outside => set.culled += 1,
            }
        }
        debug!(
            "Culled {} of {} candidates ({} inside, {} intersecting)",
            set.culled,
            candidates.len(),
            set.inside.len(),
            set.intersecting.len()
        );
        set
    }
}
