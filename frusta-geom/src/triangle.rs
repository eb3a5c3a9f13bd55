//! Triangle primitive.

use crate::aabb::Aabb;
use crate::plane::Plane;
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use std::ops::{Mul, MulAssign};

/// A triangle with three vertices and an opaque user tag.
///
/// The tag is caller-defined and carried through transforms untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    vertices: [Vec3; 3],
    user_data: u32,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self {
            vertices: [v0, v1, v2],
            user_data: 0,
        }
    }

    /// Attach a user tag.
    pub fn with_user_data(mut self, user_data: u32) -> Self {
        self.user_data = user_data;
        self
    }

    /// Replace all three vertices, keeping the tag.
    pub fn set(&mut self, v0: Vec3, v1: Vec3, v2: Vec3) {
        self.vertices = [v0, v1, v2];
    }

    /// Replace vertex `index` (0..3).
    ///
    /// # Panics
    ///
    /// Panics if `index >= 3`.
    pub fn set_vertex(&mut self, index: usize, v: Vec3) {
        self.vertices[index] = v;
    }

    /// Vertex `index` (0..3).
    ///
    /// # Panics
    ///
    /// Panics if `index >= 3`.
    pub fn vertex(&self, index: usize) -> Vec3 {
        self.vertices[index]
    }

    /// Vertex positions in winding order.
    pub fn vertices(&self) -> [Vec3; 3] {
        self.vertices
    }

    /// The caller-defined tag.
    pub fn user_data(&self) -> u32 {
        self.user_data
    }

    /// Replace the tag.
    pub fn set_user_data(&mut self, user_data: u32) {
        self.user_data = user_data;
    }

    /// Compute the center (centroid) of the triangle.
    pub fn center(&self) -> Vec3 {
        let [v0, v1, v2] = self.vertices;
        (v0 + v1 + v2) / 3.0
    }

    /// Compute the normal of the triangle (not normalized).
    pub fn normal(&self) -> Vec3 {
        let [v0, v1, v2] = self.vertices;
        (v1 - v0).cross(v2 - v0)
    }

    /// Compute the normalized normal of the triangle.
    ///
    /// Degenerate (zero-area) triangles yield the zero vector.
    pub fn normal_vector(&self) -> Vec3 {
        self.normal().normalize_or_zero()
    }

    /// Compute the area of the triangle.
    pub fn area(&self) -> f32 {
        self.normal().length() * 0.5
    }

    /// Tight axis-aligned bounds.
    pub fn aabb(&self) -> Aabb {
        let [v0, v1, v2] = self.vertices;
        Aabb::from_min_max(v0.min(v1).min(v2), v0.max(v1).max(v2))
    }

    /// Supporting plane, facing along [`Triangle::normal`].
    pub fn plane(&self) -> Plane {
        let [v0, v1, v2] = self.vertices;
        Plane::from_points(v0, v1, v2)
    }

    /// Point on the triangle (interior or boundary) closest to `p`.
    pub fn closest_point(&self, p: Vec3) -> Vec3 {
        let [a, b, c] = self.vertices;
        let ab = b - a;
        let ac = c - a;

        let ap = p - a;
        let d1 = ab.dot(ap);
        let d2 = ac.dot(ap);
        if d1 <= 0.0 && d2 <= 0.0 {
            return a;
        }

        let bp = p - b;
        let d3 = ab.dot(bp);
        let d4 = ac.dot(bp);
        if d3 >= 0.0 && d4 <= d3 {
            return b;
        }

        let vc = d1 * d4 - d3 * d2;
        if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
            return a + ab * (d1 / (d1 - d3));
        }

        let cp = p - c;
        let d5 = ab.dot(cp);
        let d6 = ac.dot(cp);
        if d6 >= 0.0 && d5 <= d6 {
            return c;
        }

        let vb = d5 * d2 - d1 * d6;
        if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
            return a + ac * (d2 / (d2 - d6));
        }

        let va = d3 * d6 - d5 * d4;
        if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
            return b + (c - b) * ((d4 - d3) / ((d4 - d3) + (d5 - d6)));
        }

        // Inside the face region.
        let denom = va + vb + vc;
        if denom.abs() <= f32::EPSILON {
            return a;
        }
        let v = vb / denom;
        let w = vc / denom;
        a + ab * v + ac * w
    }

    /// Transform all vertices as points.
    pub fn transformed(&self, m: &Mat4) -> Self {
        Self {
            vertices: self.vertices.map(|v| m.transform_point3(v)),
            user_data: self.user_data,
        }
    }
}

impl Default for Triangle {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::X, Vec3::Y)
    }
}

impl Mul<Mat4> for Triangle {
    type Output = Triangle;

    fn mul(self, m: Mat4) -> Triangle {
        self.transformed(&m)
    }
}

impl MulAssign<Mat4> for Triangle {
    fn mul_assign(&mut self, m: Mat4) {
        *self = self.transformed(&m);
    }
}
