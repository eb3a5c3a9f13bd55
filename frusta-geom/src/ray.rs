//! Rays and ray intersection tests.
//!
//! Hit values are ray parameters `t` with `hit = origin + direction * t`.
//! For unit directions this is the world distance to the hit. Every test has
//! an unbounded form and a `_within` form that rejects hits beyond `length`.

use crate::aabb::Aabb;
use crate::obb::Obb;
use crate::plane::Plane;
use crate::sphere::Sphere;
use crate::tolerance::{Tolerance, is_invertible};
use glam::{Mat3, Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// A half-infinite ray.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    /// Create a ray. The direction is stored as given.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Replace origin and direction.
    pub fn set(&mut self, origin: Vec3, direction: Vec3) {
        self.origin = origin;
        self.direction = direction;
    }

    /// Move the ray start.
    pub fn set_origin(&mut self, origin: Vec3) {
        self.origin = origin;
    }

    /// Replace the direction. It is stored as given.
    pub fn set_direction(&mut self, direction: Vec3) {
        self.direction = direction;
    }

    /// Start point.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Direction as stored, not necessarily unit length.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Magnitude of the direction vector.
    pub fn length(&self) -> f32 {
        self.direction.length()
    }

    /// Rescale the direction to `length`, keeping its orientation.
    pub fn set_length(&mut self, length: f32) {
        self.direction = self.direction.normalize_or_zero() * length;
    }

    /// Make the direction unit length (zero stays zero).
    pub fn normalize(&mut self) {
        self.direction = self.direction.normalize_or_zero();
    }

    /// Copy with a unit direction.
    pub fn normalized(&self) -> Self {
        Self::new(self.origin, self.direction.normalize_or_zero())
    }

    /// `origin + direction * t`.
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Transform the ray by an affine matrix.
    pub fn transform(&mut self, m: &Mat4) {
        self.origin = m.transform_point3(self.origin);
        self.direction = m.transform_vector3(self.direction);
    }

    /// Move the ray into the coordinate system described by `m` (applies its
    /// inverse). Singular matrices leave the ray unchanged.
    pub fn detransform(&mut self, m: &Mat4) {
        if !is_invertible(&Mat3::from_mat4(*m)) {
            return;
        }
        self.transform(&m.inverse());
    }

    /// Two-sided Moller-Trumbore ray / triangle test.
    pub fn intersect_triangle(&self, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
        self.intersect_triangle_with(v0, v1, v2, &Tolerance::default())
    }

    /// [`Ray::intersect_triangle`] with an explicit parallel threshold.
    ///
    /// The parallel test is relative to the edge and direction lengths, so
    /// it does not depend on the size of the triangle.
    pub fn intersect_triangle_with(
        &self,
        v0: Vec3,
        v1: Vec3,
        v2: Vec3,
        tolerance: &Tolerance,
    ) -> Option<f32> {
        let e1 = v1 - v0;
        let e2 = v2 - v0;
        let p = self.direction.cross(e2);
        let det = e1.dot(p);
        let scale = e1.length() * e2.length() * self.direction.length();
        if tolerance.is_parallel(det, scale) {
            return None;
        }
        let inv_det = 1.0 / det;

        let s = self.origin - v0;
        let u = s.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(e1);
        let v = self.direction.dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = e2.dot(q) * inv_det;
        (t >= 0.0).then_some(t)
    }

    /// [`Ray::intersect_triangle`] rejecting hits beyond `length`.
    pub fn intersect_triangle_within(
        &self,
        v0: Vec3,
        v1: Vec3,
        v2: Vec3,
        length: f32,
    ) -> Option<f32> {
        self.intersect_triangle(v0, v1, v2).filter(|&t| t <= length)
    }

    /// Ray / sphere test. When the origin is inside, the exit point is returned.
    pub fn intersect_sphere(&self, sphere: &Sphere) -> Option<f32> {
        let a = self.direction.length_squared();
        if a == 0.0 {
            return None;
        }
        let m = self.origin - sphere.center();
        let r = sphere.radius();
        let b = m.dot(self.direction);
        let c = m.length_squared() - r * r;
        // Outside and pointing away.
        if c > 0.0 && b > 0.0 {
            return None;
        }
        let disc = b * b - a * c;
        if disc < 0.0 {
            return None;
        }
        let root = disc.sqrt();
        let t0 = (-b - root) / a;
        if t0 >= 0.0 {
            return Some(t0);
        }
        let t1 = (-b + root) / a;
        (t1 >= 0.0).then_some(t1)
    }

    /// [`Ray::intersect_sphere`] rejecting hits beyond `length`.
    pub fn intersect_sphere_within(&self, sphere: &Sphere, length: f32) -> Option<f32> {
        self.intersect_sphere(sphere).filter(|&t| t <= length)
    }

    /// Slab test against an axis-aligned box. An origin inside the box hits at 0.
    pub fn intersect_aabb(&self, aabb: &Aabb) -> Option<f32> {
        if aabb.is_reset() {
            return None;
        }
        slab(self.origin, self.direction, aabb.min(), aabb.max())
    }

    /// [`Ray::intersect_aabb`] rejecting hits beyond `length`.
    pub fn intersect_aabb_within(&self, aabb: &Aabb, length: f32) -> Option<f32> {
        self.intersect_aabb(aabb).filter(|&t| t <= length)
    }

    /// Slab test in the local frame of an oriented box.
    pub fn intersect_obb(&self, obb: &Obb) -> Option<f32> {
        let to_local = obb.orientation().inverse();
        let origin = to_local * (self.origin - obb.center());
        let direction = to_local * self.direction;
        let extents = obb.extents();
        slab(origin, direction, -extents, extents)
    }

    /// [`Ray::intersect_obb`] rejecting hits beyond `length`.
    pub fn intersect_obb_within(&self, obb: &Obb, length: f32) -> Option<f32> {
        self.intersect_obb(obb).filter(|&t| t <= length)
    }

    /// Ray / plane test returning the hit parameter and point.
    ///
    /// Fails when the ray is parallel to the plane or points away from it.
    pub fn intersect_plane(&self, plane: &Plane) -> Option<(f32, Vec3)> {
        self.intersect_plane_with(plane, &Tolerance::default())
    }

    /// [`Ray::intersect_plane`] with an explicit parallel threshold.
    pub fn intersect_plane_with(
        &self,
        plane: &Plane,
        tolerance: &Tolerance,
    ) -> Option<(f32, Vec3)> {
        let denom = plane.dot_normal(self.direction);
        let scale = plane.normal().length() * self.direction.length();
        if tolerance.is_parallel(denom, scale) {
            return None;
        }
        let t = -plane.dot(self.origin) / denom;
        (t >= 0.0).then(|| (t, self.point_at(t)))
    }

    /// [`Ray::intersect_plane`] rejecting hits beyond `length`.
    pub fn intersect_plane_within(&self, plane: &Plane, length: f32) -> Option<(f32, Vec3)> {
        self.intersect_plane(plane).filter(|&(t, _)| t <= length)
    }
}

/// Per-axis interval overlap between a ray and the box `[min, max]`.
fn slab(origin: Vec3, direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let tolerance = Tolerance::default();
    let scale = direction.length();
    let mut t_min = 0.0f32;
    let mut t_max = f32::INFINITY;
    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        if tolerance.is_parallel(d, scale) {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let mut t1 = (min[axis] - o) * inv;
        let mut t2 = (max[axis] - o) * inv;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }
        t_min = t_min.max(t1);
        t_max = t_max.min(t2);
        if t_min > t_max {
            return None;
        }
    }
    Some(t_min)
}
