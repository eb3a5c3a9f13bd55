//! Bounding spheres.
//!
//! Stored as a single `Vec4` (xyz = center, w = radius) so sphere lists can be
//! uploaded to a culling shader without repacking.

use crate::aabb::Aabb;
use crate::classify::{VolumeClassification, classify_convex, classify_distance};
use crate::error::{GeomError, validate_points};
use crate::frustum::Frustum;
use crate::obb::Obb;
use crate::plane::Plane;
use crate::ray::Ray;
use crate::triangle::Triangle;
use bytemuck::{Pod, Zeroable};
use glam::{Quat, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A sphere. A radius of zero is treated as empty.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sphere {
    data: Vec4,
}

impl Sphere {
    /// Create a sphere. Negative radii are clamped to zero.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            data: center.extend(radius.max(0.0)),
        }
    }

    /// Approximate bounding sphere of a point cloud (Ritter's method).
    ///
    /// The result encloses every point but can be up to ~5% larger than the
    /// minimal sphere.
    #[tracing::instrument(skip_all, fields(count = points.len()))]
    pub fn from_points(points: &[Vec3]) -> Result<Self, GeomError> {
        validate_points(points)?;

        // Extreme points along each axis.
        let mut min = [points[0]; 3];
        let mut max = [points[0]; 3];
        for &p in points {
            for axis in 0..3 {
                if p[axis] < min[axis][axis] {
                    min[axis] = p;
                }
                if p[axis] > max[axis][axis] {
                    max[axis] = p;
                }
            }
        }

        // Seed from the most distant pair.
        let mut seed = 0;
        let mut seed_dist = 0.0;
        for axis in 0..3 {
            let dist = min[axis].distance_squared(max[axis]);
            if dist > seed_dist {
                seed_dist = dist;
                seed = axis;
            }
        }
        let mut center = (min[seed] + max[seed]) * 0.5;
        let mut radius = seed_dist.sqrt() * 0.5;

        // Grow to enclose stragglers.
        for &p in points {
            let dist = p.distance(center);
            if dist > radius {
                let grown = (radius + dist) * 0.5;
                center += (p - center) * ((grown - radius) / dist);
                radius = grown;
            }
        }

        let sphere = Self::new(center, radius);
        debug!(
            "Fitted sphere to {} points: center {:?}, radius {}",
            points.len(),
            center,
            radius
        );
        Ok(sphere)
    }

    pub fn center(&self) -> Vec3 {
        self.data.truncate()
    }

    pub fn radius(&self) -> f32 {
        self.data.w
    }

    pub fn set_center(&mut self, center: Vec3) {
        self.data = center.extend(self.data.w);
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.data.w = radius.max(0.0);
    }

    pub fn set(&mut self, center: Vec3, radius: f32) {
        *self = Self::new(center, radius);
    }

    pub fn is_empty(&self) -> bool {
        self.data.w <= 0.0
    }

    /// Packed `(center, radius)`.
    pub fn as_vec4(&self) -> Vec4 {
        self.data
    }

    /// Scale, rotate and translate the sphere.
    ///
    /// Non-uniform scales grow the radius by the largest scale factor.
    pub fn transformed(&self, scale: Vec3, rotation: Quat, translation: Vec3) -> Self {
        let center = rotation * (self.center() * scale) + translation;
        Self::new(center, self.radius() * scale.abs().max_element())
    }

    /// Inclusive point containment.
    pub fn contains_point(&self, p: Vec3) -> bool {
        p.distance_squared(self.center()) <= self.radius() * self.radius()
    }

    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        ray.intersect_sphere(self)
    }

    pub fn intersect_triangle(&self, triangle: &Triangle) -> bool {
        self.contains_point(triangle.closest_point(self.center()))
    }

    /// Touching spheres count as intersecting.
    pub fn intersect_sphere(&self, other: &Sphere) -> bool {
        let r = self.radius() + other.radius();
        self.center().distance_squared(other.center()) <= r * r
    }

    pub fn intersect_aabb(&self, aabb: &Aabb) -> bool {
        if aabb.is_reset() {
            return false;
        }
        let closest = self.center().clamp(aabb.min(), aabb.max());
        self.contains_point(closest)
    }

    pub fn intersect_obb(&self, obb: &Obb) -> bool {
        let local = obb.orientation().inverse() * (self.center() - obb.center());
        let closest = local.clamp(-obb.extents(), obb.extents());
        local.distance_squared(closest) <= self.radius() * self.radius()
    }

    /// Positive side is outside.
    pub fn classify_plane(&self, plane: &Plane) -> VolumeClassification {
        let r = self.radius() * plane.normal().length();
        classify_distance(plane.dot(self.center()), r)
    }

    /// Convex region test, exiting on the first plane the sphere is outside of.
    pub fn classify_planes(&self, planes: &[Plane]) -> VolumeClassification {
        classify_convex(planes, |plane| self.classify_plane(plane))
    }

    pub fn classify_frustum(&self, frustum: &Frustum) -> VolumeClassification {
        self.classify_planes(&frustum.planes())
    }
}

impl From<Vec4> for Sphere {
    fn from(data: Vec4) -> Self {
        Self::new(data.truncate(), data.w)
    }
}
