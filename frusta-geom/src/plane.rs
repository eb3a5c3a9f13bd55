//! Oriented planes (half-spaces).
//!
//! A plane is stored as the four coefficients of `a*x + b*y + c*z + d = 0`
//! packed in a single `Vec4`, which keeps it 16-byte aligned and lets plane
//! arrays be uploaded to the GPU as-is. The positive side of the plane is
//! "front" for point classification and "outside" for volume classification.

use crate::classify::PlaneSide;
use crate::line::Line;
use crate::tolerance::{Tolerance, is_invertible};
use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Quat, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// An oriented plane `(a, b, c, d)` with normal `(a, b, c)`.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Plane {
    coeffs: Vec4,
}

/// Result of [`Plane::clip`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineClip {
    /// The line does not cross the plane and lies on (or starts from) the front side.
    Front(Line),
    /// The line does not cross the plane and lies on the back side.
    Back(Line),
    /// The line crosses the plane and was cut at the intersection point.
    Split { front: Line, back: Line },
}

impl Plane {
    /// The plane z = 0, facing +Z.
    pub const XY: Plane = Plane::new(0.0, 0.0, 1.0, 0.0);
    /// The plane y = 0, facing +Y.
    pub const XZ: Plane = Plane::new(0.0, 1.0, 0.0, 0.0);
    /// The plane x = 0, facing +X.
    pub const YZ: Plane = Plane::new(1.0, 0.0, 0.0, 0.0);

    /// Create a plane from raw coefficients. The normal is not normalised.
    pub const fn new(a: f32, b: f32, c: f32, d: f32) -> Self {
        Self {
            coeffs: Vec4::new(a, b, c, d),
        }
    }

    /// Create a plane from packed coefficients.
    pub const fn from_vec4(coeffs: Vec4) -> Self {
        Self { coeffs }
    }

    /// Create a plane through `point` facing `normal`.
    ///
    /// The normal is normalised; a zero normal yields the zero plane.
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        let n = normal.normalize_or_zero();
        Self {
            coeffs: n.extend(-n.dot(point)),
        }
    }

    /// Create a plane through three points, facing `(p1 - p0) x (p2 - p0)`.
    ///
    /// Collinear points yield the zero plane.
    pub fn from_points(p0: Vec3, p1: Vec3, p2: Vec3) -> Self {
        Self::from_point_normal(p0, (p1 - p0).cross(p2 - p0))
    }

    /// Replace all four coefficients.
    pub fn set(&mut self, a: f32, b: f32, c: f32, d: f32) {
        self.coeffs = Vec4::new(a, b, c, d);
    }

    /// Reset to the plane through `point` facing `normal`.
    pub fn set_point_normal(&mut self, point: Vec3, normal: Vec3) {
        *self = Self::from_point_normal(point, normal);
    }

    /// Reset to the plane through three points.
    pub fn set_points(&mut self, p0: Vec3, p1: Vec3, p2: Vec3) {
        *self = Self::from_points(p0, p1, p2);
    }

    /// Set the `a` coefficient.
    pub fn set_a(&mut self, a: f32) {
        self.coeffs.x = a;
    }

    /// Set the `b` coefficient.
    pub fn set_b(&mut self, b: f32) {
        self.coeffs.y = b;
    }

    /// Set the `c` coefficient.
    pub fn set_c(&mut self, c: f32) {
        self.coeffs.z = c;
    }

    /// Set the `d` coefficient.
    pub fn set_d(&mut self, d: f32) {
        self.coeffs.w = d;
    }

    /// The `a` coefficient.
    pub fn a(&self) -> f32 {
        self.coeffs.x
    }

    /// The `b` coefficient.
    pub fn b(&self) -> f32 {
        self.coeffs.y
    }

    /// The `c` coefficient.
    pub fn c(&self) -> f32 {
        self.coeffs.z
    }

    /// The `d` coefficient.
    pub fn d(&self) -> f32 {
        self.coeffs.w
    }

    /// The normal `(a, b, c)`.
    pub fn normal(&self) -> Vec3 {
        self.coeffs.truncate()
    }

    /// All four coefficients.
    pub fn coeffs(&self) -> Vec4 {
        self.coeffs
    }

    /// Evaluate the plane equation at `point`: `n . p + d`.
    pub fn dot(&self, point: Vec3) -> f32 {
        self.normal().dot(point) + self.coeffs.w
    }

    /// Dot product of the normal with a direction (ignores `d`).
    pub fn dot_normal(&self, v: Vec3) -> f32 {
        self.normal().dot(v)
    }

    /// Signed distance from the plane, in units of `|normal|`.
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.dot(point)
    }

    /// Intersect the infinite line through `start` and `end` with the plane.
    ///
    /// Returns `None` when the line is parallel to the plane.
    pub fn intersect_line(&self, start: Vec3, end: Vec3) -> Option<Vec3> {
        self.intersect_line_with(start, end, &Tolerance::default())
    }

    /// [`Plane::intersect_line`] with an explicit parallel threshold.
    pub fn intersect_line_with(
        &self,
        start: Vec3,
        end: Vec3,
        tolerance: &Tolerance,
    ) -> Option<Vec3> {
        let dir = end - start;
        let normal = self.normal();
        let denom = normal.dot(dir);
        if tolerance.is_parallel(denom, normal.length() * dir.length()) {
            return None;
        }
        let t = -self.dot(start) / denom;
        Some(start + dir * t)
    }

    /// Return a copy with a unit normal. A zero normal is returned unchanged.
    pub fn normalized(&self) -> Self {
        let len = self.normal().length();
        if len <= f32::EPSILON {
            return *self;
        }
        Self {
            coeffs: self.coeffs / len,
        }
    }

    /// Normalise in place.
    pub fn normalize(&mut self) {
        *self = self.normalized();
    }

    /// True when the normal has unit length.
    pub fn is_unit(&self) -> bool {
        self.normal().is_normalized()
    }

    /// Rotate then translate the plane.
    pub fn transform(&mut self, rotation: Quat, translation: Vec3) {
        let normal = self.normal();
        let len_sq = normal.length_squared();
        if len_sq <= f32::EPSILON {
            return;
        }
        let on_plane = normal * (-self.coeffs.w / len_sq);
        let n = rotation * normal;
        let p = rotation * on_plane + translation;
        self.coeffs = n.extend(-n.dot(p));
    }

    /// Transform the plane by an affine matrix. The result has a unit normal.
    ///
    /// Singular matrices leave the plane unchanged.
    pub fn transform_mat4(&mut self, m: &Mat4) {
        let normal = self.normal();
        let len_sq = normal.length_squared();
        let linear = Mat3::from_mat4(*m);
        if len_sq <= f32::EPSILON || !is_invertible(&linear) {
            return;
        }
        let on_plane = normal * (-self.coeffs.w / len_sq);
        let n = (linear.inverse().transpose() * normal).normalize_or_zero();
        let p = m.transform_point3(on_plane);
        self.coeffs = n.extend(-n.dot(p));
    }

    /// Flip the plane so front and back swap.
    pub fn inverse(&mut self) {
        self.coeffs = -self.coeffs;
    }

    /// Flipped copy.
    pub fn inversed(&self) -> Self {
        Self {
            coeffs: -self.coeffs,
        }
    }

    /// Reflect a direction across the plane: `v - 2 (n . v) n`.
    pub fn reflect(&self, v: Vec3) -> Vec3 {
        let n = self.normal();
        v - 2.0 * n.dot(v) * n
    }

    /// Orthogonal projection of `point` onto the plane.
    pub fn project(&self, point: Vec3) -> Vec3 {
        let n = self.normal();
        let len_sq = n.length_squared();
        if len_sq <= f32::EPSILON {
            return point;
        }
        point - n * (self.dot(point) / len_sq)
    }

    /// Classify a point with the default tolerance.
    pub fn classify_point(&self, point: Vec3) -> PlaneSide {
        self.classify_point_with(point, &Tolerance::default())
    }

    /// Classify a point with an explicit coplanar band.
    pub fn classify_point_with(&self, point: Vec3, tolerance: &Tolerance) -> PlaneSide {
        let d = self.dot(point);
        if d > tolerance.planar {
            PlaneSide::Front
        } else if d < -tolerance.planar {
            PlaneSide::Back
        } else {
            PlaneSide::Coplanar
        }
    }

    /// Classify a polygon (or any point set).
    ///
    /// Coplanar vertices do not vote; an empty set is `Coplanar`.
    pub fn classify_points(&self, points: &[Vec3]) -> PlaneSide {
        self.classify_points_with(points, &Tolerance::default())
    }

    /// Classify a point set with an explicit coplanar band.
    pub fn classify_points_with(&self, points: &[Vec3], tolerance: &Tolerance) -> PlaneSide {
        let mut front = false;
        let mut back = false;
        for &p in points {
            match self.classify_point_with(p, tolerance) {
                PlaneSide::Front => front = true,
                PlaneSide::Back => back = true,
                _ => {}
            }
        }
        match (front, back) {
            (true, true) => PlaneSide::Clipped,
            (true, false) => PlaneSide::Front,
            (false, true) => PlaneSide::Back,
            (false, false) => PlaneSide::Coplanar,
        }
    }

    /// Split `line` at the plane.
    ///
    /// The line is cut only when its end points lie on opposite sides and the
    /// crossing is within `max_length` of the start point. Otherwise the whole
    /// line is reported on the side of its start point (the end point when
    /// the start is coplanar, front when both are).
    pub fn clip(&self, line: &Line, max_length: f32) -> LineClip {
        self.clip_with(line, max_length, &Tolerance::default())
    }

    /// [`Plane::clip`] with explicit tolerances.
    pub fn clip_with(&self, line: &Line, max_length: f32, tolerance: &Tolerance) -> LineClip {
        let start = line.start();
        let end = line.end();
        let start_side = self.classify_point_with(start, tolerance);
        let end_side = self.classify_point_with(end, tolerance);

        let whole = |side: PlaneSide| match side {
            PlaneSide::Back => LineClip::Back(*line),
            _ => LineClip::Front(*line),
        };

        match (start_side, end_side) {
            (PlaneSide::Front, PlaneSide::Back) | (PlaneSide::Back, PlaneSide::Front) => {
                match self.intersect_line_with(start, end, tolerance) {
                    Some(hit) if start.distance(hit) <= max_length => {
                        let near = Line::new(start, hit);
                        let far = Line::new(hit, end);
                        if start_side == PlaneSide::Front {
                            LineClip::Split {
                                front: near,
                                back: far,
                            }
                        } else {
                            LineClip::Split {
                                front: far,
                                back: near,
                            }
                        }
                    }
                    _ => whole(start_side),
                }
            }
            (PlaneSide::Coplanar, side) => whole(side),
            (side, _) => whole(side),
        }
    }
}

impl From<Vec4> for Plane {
    fn from(coeffs: Vec4) -> Self {
        Self::from_vec4(coeffs)
    }
}

impl From<Plane> for Vec4 {
    fn from(plane: Plane) -> Self {
        plane.coeffs
    }
}
