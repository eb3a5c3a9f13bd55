//! Axis-aligned bounding boxes.
//!
//! Boxes are stored as center + half-extents. A box whose extents are negative
//! on any axis is "reset" (empty); [`Aabb::EMPTY`] is the canonical empty box
//! and [`Aabb::extend`] grows it from nothing.

use crate::classify::{FrustumPlane, VolumeClassification, classify_convex, classify_distance};
use crate::error::{GeomError, validate_points};
use crate::frustum::Frustum;
use crate::line::Line;
use crate::obb::Obb;
use crate::plane::Plane;
use crate::ray::Ray;
use crate::sphere::Sphere;
use crate::triangle::Triangle;
use glam::{Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Unit-box corner directions, shared with [`Obb::corners`].
///
/// The first four corners form the +Z face, the last four the -Z face, both
/// wound counter-clockwise seen from +Z.
pub(crate) const CORNER_OFFSETS: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
];

/// Corner index pairs for the 12 box edges.
pub(crate) const EDGE_INDICES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// An axis-aligned box `[center - extents, center + extents]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    center: Vec3,
    extents: Vec3,
}

impl Aabb {
    /// The empty box. Extending it by a point yields a zero-size box at that point.
    pub const EMPTY: Aabb = Aabb {
        center: Vec3::ZERO,
        extents: Vec3::splat(-f32::MAX),
    };

    /// Create a box from center and half-extents. Negative extents are clamped to zero.
    pub fn new(center: Vec3, extents: Vec3) -> Self {
        Self {
            center,
            extents: extents.max(Vec3::ZERO),
        }
    }

    /// Create a box spanning `min..max` (corners may be given in any order).
    pub fn from_min_max(a: Vec3, b: Vec3) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Self {
            center: (min + max) * 0.5,
            extents: (max - min) * 0.5,
        }
    }

    /// Smallest axis-aligned box enclosing an oriented box.
    pub fn from_obb(obb: &Obb) -> Self {
        let rotation = Mat3::from_quat(obb.orientation()).abs();
        Self::new(obb.center(), rotation * obb.extents())
    }

    /// Tight bounds of a point cloud, computed in a single pass.
    #[tracing::instrument(skip_all, fields(count = points.len()))]
    pub fn from_points(points: &[Vec3]) -> Result<Self, GeomError> {
        validate_points(points)?;
        let (min, max) = points
            .iter()
            .fold((points[0], points[0]), |(min, max), &p| (min.min(p), max.max(p)));
        let aabb = Self::from_min_max(min, max);
        debug!(
            "Fitted AABB to {} points: center {:?}, extents {:?}",
            points.len(),
            aabb.center,
            aabb.extents
        );
        Ok(aabb)
    }

    pub fn reset(&mut self) {
        *self = Self::EMPTY;
    }

    /// True for empty boxes (any negative extent).
    pub fn is_reset(&self) -> bool {
        self.extents.cmplt(Vec3::ZERO).any()
    }

    pub fn set(&mut self, center: Vec3, extents: Vec3) {
        *self = Self::new(center, extents);
    }

    pub fn set_center(&mut self, center: Vec3) {
        self.center = center;
    }

    pub fn set_extents(&mut self, extents: Vec3) {
        self.extents = extents.max(Vec3::ZERO);
    }

    pub fn set_min_max(&mut self, min: Vec3, max: Vec3) {
        *self = Self::from_min_max(min, max);
    }

    /// Move the box by `offset`.
    pub fn translate(&mut self, offset: Vec3) {
        self.center += offset;
    }

    /// Grow the box to include `point`.
    pub fn extend(&mut self, point: Vec3) {
        if self.is_reset() {
            *self = Self::new(point, Vec3::ZERO);
        } else {
            *self = Self::from_min_max(self.min().min(point), self.max().max(point));
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn extents(&self) -> Vec3 {
        self.extents
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.extents
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.extents
    }

    pub fn volume(&self) -> f32 {
        if self.is_reset() {
            return 0.0;
        }
        8.0 * self.extents.x * self.extents.y * self.extents.z
    }

    /// Corner `index` (0..8) in [`CORNER_OFFSETS`] order.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 8`.
    pub fn corner(&self, index: usize) -> Vec3 {
        self.center + self.extents * CORNER_OFFSETS[index]
    }

    /// All eight corners in [`CORNER_OFFSETS`] order.
    pub fn corners(&self) -> [Vec3; 8] {
        CORNER_OFFSETS.map(|offset| self.center + self.extents * offset)
    }

    /// Unit direction from the center towards corner `index` of a cube.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 8`.
    pub fn vertex_normal(&self, index: usize) -> Vec3 {
        CORNER_OFFSETS[index].normalize()
    }

    /// Outward unit normal of a face.
    pub fn face_normal(&self, face: FrustumPlane) -> Vec3 {
        match face {
            FrustumPlane::Left => Vec3::NEG_X,
            FrustumPlane::Right => Vec3::X,
            FrustumPlane::Bottom => Vec3::NEG_Y,
            FrustumPlane::Top => Vec3::Y,
            FrustumPlane::Near => Vec3::NEG_Z,
            FrustumPlane::Far => Vec3::Z,
        }
    }

    /// Face plane with its normal pointing out of the box.
    pub fn plane(&self, face: FrustumPlane) -> Plane {
        let normal = self.face_normal(face);
        Plane::from_point_normal(self.center + normal * self.extents, normal)
    }

    /// All six face planes in [`FrustumPlane::ALL`] order.
    pub fn planes(&self) -> [Plane; 6] {
        FrustumPlane::ALL.map(|face| self.plane(face))
    }

    /// Edge `index` (0..12) as a segment between two corners.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 12`.
    pub fn edge(&self, index: usize) -> Line {
        let (a, b) = EDGE_INDICES[index];
        Line::new(self.corner(a), self.corner(b))
    }

    /// Bounds of the box after scaling, rotating and translating its corners.
    pub fn transformed(&self, scale: Vec3, rotation: Quat, translation: Vec3) -> Self {
        if self.is_reset() {
            return *self;
        }
        let corners = self.corners().map(|c| rotation * (c * scale) + translation);
        let (min, max) = corners
            .iter()
            .fold((corners[0], corners[0]), |(min, max), &c| (min.min(c), max.max(c)));
        Self::from_min_max(min, max)
    }

    /// Inclusive point containment.
    pub fn contains_point(&self, p: Vec3) -> bool {
        (p - self.center).abs().cmple(self.extents).all()
    }

    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        ray.intersect_aabb(self)
    }

    /// Separating-axis test over the 13 box / triangle axes.
    pub fn intersect_triangle(&self, triangle: &Triangle) -> bool {
        if self.is_reset() {
            return false;
        }
        triangle_box_overlap(triangle.vertices().map(|v| v - self.center), self.extents)
    }

    pub fn intersect_sphere(&self, sphere: &Sphere) -> bool {
        sphere.intersect_aabb(self)
    }

    /// Overlap test; touching boxes intersect.
    pub fn intersect_aabb(&self, other: &Aabb) -> bool {
        if self.is_reset() || other.is_reset() {
            return false;
        }
        (self.center - other.center)
            .abs()
            .cmple(self.extents + other.extents)
            .all()
    }

    pub fn intersect_obb(&self, obb: &Obb) -> bool {
        obb.intersect_aabb(self)
    }

    /// True when both the ray origin and the point `max_distance` along the
    /// ray lie inside the box.
    pub fn contains_ray(&self, ray: &Ray, max_distance: f32) -> bool {
        self.contains_point(ray.origin()) && self.contains_point(ray.point_at(max_distance))
    }

    /// Where `other` sits relative to this box.
    ///
    /// `Inside` when `other` is fully enclosed (a box encloses itself).
    pub fn classify_aabb(&self, other: &Aabb) -> VolumeClassification {
        if !self.intersect_aabb(other) {
            return VolumeClassification::Outside;
        }
        let enclosed = self.min().cmple(other.min()).all() && other.max().cmple(self.max()).all();
        if enclosed {
            VolumeClassification::Inside
        } else {
            VolumeClassification::Intersecting
        }
    }

    /// Positive side is outside. Empty boxes are always outside.
    pub fn classify_plane(&self, plane: &Plane) -> VolumeClassification {
        if self.is_reset() {
            return VolumeClassification::Outside;
        }
        let r = self.extents.dot(plane.normal().abs());
        classify_distance(plane.dot(self.center), r)
    }

    /// Convex region test, exiting on the first plane the box is outside of.
    pub fn classify_planes(&self, planes: &[Plane]) -> VolumeClassification {
        classify_convex(planes, |plane| self.classify_plane(plane))
    }

    pub fn classify_frustum(&self, frustum: &Frustum) -> VolumeClassification {
        self.classify_planes(&frustum.planes())
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Triangle / box overlap with the triangle already in box-local coordinates
/// (box centered at the origin, axis-aligned).
pub(crate) fn triangle_box_overlap(vertices: [Vec3; 3], extents: Vec3) -> bool {
    let [v0, v1, v2] = vertices;

    // Box face normals.
    if v0.min(v1).min(v2).cmpgt(extents).any() || v0.max(v1).max(v2).cmplt(-extents).any() {
        return false;
    }

    // Edge cross products.
    let edges = [v1 - v0, v2 - v1, v0 - v2];
    for edge in edges {
        for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
            let a = axis.cross(edge);
            if a.length_squared() <= f32::EPSILON {
                continue;
            }
            let (p0, p1, p2) = (v0.dot(a), v1.dot(a), v2.dot(a));
            let r = extents.dot(a.abs());
            if p0.min(p1).min(p2) > r || p0.max(p1).max(p2) < -r {
                return false;
            }
        }
    }

    // Triangle plane.
    let normal = edges[0].cross(edges[1]);
    normal.dot(v0).abs() <= extents.dot(normal.abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_fit_axis_points() {
        let points = [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(0.0, -2.0, 0.0),
            Vec3::new(0.0, 0.0, 3.0),
            Vec3::new(0.0, 0.0, -3.0),
        ];
        let aabb = Aabb::from_points(&points).unwrap();
        assert_eq!(aabb.center(), Vec3::ZERO);
        assert_eq!(aabb.extents(), Vec3::new(1.0, 2.0, 3.0));

        let mut reversed = points;
        reversed.reverse();
        assert_eq!(Aabb::from_points(&reversed).unwrap(), aabb);
    }

    #[test]
    fn test_fit_rejects_bad_input() {
        assert_eq!(Aabb::from_points(&[]), Err(GeomError::EmptyPointSet));
        assert_eq!(
            Aabb::from_points(&[Vec3::ZERO, Vec3::splat(f32::INFINITY)]),
            Err(GeomError::NonFinitePoint { index: 1 })
        );
    }

    #[test]
    fn test_negative_extents_are_clamped() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::new(1.0, -2.0, 3.0));
        assert_eq!(aabb.extents(), Vec3::new(1.0, 0.0, 3.0));
        assert!(!aabb.is_reset());
    }

    #[test]
    fn test_reset_and_extend() {
        let mut aabb = Aabb::new(Vec3::ONE, Vec3::ONE);
        aabb.reset();
        assert!(aabb.is_reset());
        assert_eq!(aabb.volume(), 0.0);
        assert!(!aabb.contains_point(Vec3::ZERO));

        aabb.extend(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(aabb, Aabb::new(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO));
        aabb.extend(Vec3::new(-1.0, 0.0, 3.0));
        assert_eq!(aabb.min(), Vec3::new(-1.0, 0.0, 3.0));
        assert_eq!(aabb.max(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(Aabb::default(), Aabb::EMPTY);
    }

    #[test]
    fn test_setters_and_translate() {
        let mut aabb = Aabb::EMPTY;
        aabb.set_min_max(Vec3::new(2.0, 2.0, 2.0), Vec3::ZERO);
        assert_eq!(aabb.center(), Vec3::ONE);
        assert_eq!(aabb.volume(), 8.0);
        aabb.translate(Vec3::X);
        assert_eq!(aabb.center(), Vec3::new(2.0, 1.0, 1.0));
        aabb.set_extents(Vec3::splat(-1.0));
        assert_eq!(aabb.extents(), Vec3::ZERO);
        aabb.set_center(Vec3::ZERO);
        aabb.set(Vec3::ONE, Vec3::splat(2.0));
        assert_eq!(aabb.max(), Vec3::splat(3.0));
    }

    #[test]
    fn test_corners_and_edges() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0));
        let corners = aabb.corners();
        assert_eq!(corners[0], Vec3::new(-1.0, -2.0, 3.0));
        assert_eq!(corners[6], Vec3::new(1.0, 2.0, -3.0));
        assert_eq!(aabb.corner(2), aabb.max());
        assert_eq!(aabb.corner(4), aabb.min());

        let mut total = 0.0;
        for i in 0..12 {
            total += aabb.edge(i).length();
        }
        assert!((total - 4.0 * (2.0 + 4.0 + 6.0)).abs() < EPS);
        assert!(aabb
            .vertex_normal(2)
            .abs_diff_eq(Vec3::ONE.normalize(), EPS));
    }

    #[test]
    #[should_panic]
    fn test_corner_out_of_range() {
        Aabb::new(Vec3::ZERO, Vec3::ONE).corner(8);
    }

    #[test]
    #[should_panic]
    fn test_edge_out_of_range() {
        Aabb::new(Vec3::ZERO, Vec3::ONE).edge(12);
    }

    #[test]
    fn test_inside_own_face_planes() {
        let aabb = Aabb::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.5, 1.0, 2.0));
        let planes = aabb.planes();
        assert_eq!(aabb.classify_planes(&planes), VolumeClassification::Inside);
        assert_eq!(aabb.classify_aabb(&aabb), VolumeClassification::Inside);

        let interior = Aabb::new(Vec3::new(1.25, 2.5, 1.5), Vec3::ZERO);
        assert_eq!(interior.classify_planes(&planes), VolumeClassification::Inside);

        for (face, plane) in FrustumPlane::ALL.iter().zip(planes) {
            assert!(plane.is_unit());
            assert_eq!(plane.normal(), aabb.face_normal(*face));
        }
    }

    #[test]
    fn test_classify_planes_outside_early() {
        let region = Aabb::new(Vec3::ZERO, Vec3::ONE).planes();
        let far = Aabb::new(Vec3::new(5.0, 0.0, 0.0), Vec3::ONE);
        let straddling = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::splat(0.5));
        assert_eq!(far.classify_planes(&region), VolumeClassification::Outside);
        assert_eq!(straddling.classify_planes(&region), VolumeClassification::Intersecting);
        assert_eq!(Aabb::EMPTY.classify_planes(&region), VolumeClassification::Outside);
    }

    #[test]
    fn test_classify_aabb() {
        let outer = Aabb::new(Vec3::ZERO, Vec3::splat(4.0));
        let inner = Aabb::new(Vec3::ONE, Vec3::ONE);
        let crossing = Aabb::new(Vec3::new(4.0, 0.0, 0.0), Vec3::ONE);
        let apart = Aabb::new(Vec3::new(10.0, 0.0, 0.0), Vec3::ONE);
        assert_eq!(outer.classify_aabb(&inner), VolumeClassification::Inside);
        assert_eq!(inner.classify_aabb(&outer), VolumeClassification::Intersecting);
        assert_eq!(outer.classify_aabb(&crossing), VolumeClassification::Intersecting);
        assert_eq!(outer.classify_aabb(&apart), VolumeClassification::Outside);
    }

    #[test]
    fn test_intersect_aabb_touching() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::new(Vec3::new(2.0, 0.0, 0.0), Vec3::ONE);
        let c = Aabb::new(Vec3::new(2.1, 0.0, 0.0), Vec3::ONE);
        assert!(a.intersect_aabb(&b));
        assert!(!a.intersect_aabb(&c));
        assert!(!a.intersect_aabb(&Aabb::EMPTY));
    }

    #[test]
    fn test_contains_point() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert!(aabb.contains_point(Vec3::new(0.5, -0.5, 0.9)));
        assert!(aabb.contains_point(Vec3::ONE));
        assert!(!aabb.contains_point(Vec3::new(1.01, 0.0, 0.0)));
    }

    #[test]
    fn test_contains_ray() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(aabb.contains_ray(&ray, 0.5));
        assert!(!aabb.contains_ray(&ray, 2.0));
    }

    #[test]
    fn test_triangle_sat() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let through = Triangle::new(
            Vec3::new(-3.0, -3.0, 0.0),
            Vec3::new(3.0, -3.0, 0.0),
            Vec3::new(0.0, 3.0, 0.0),
        );
        let above = through * glam::Mat4::from_translation(Vec3::new(0.0, 0.0, 1.5));
        // Clears the corner along the (1,1,1) diagonal.
        let corner = Triangle::new(
            Vec3::new(3.2, 0.0, 0.0),
            Vec3::new(0.0, 3.2, 0.0),
            Vec3::new(0.0, 0.0, 3.2),
        );
        let clipping_corner = Triangle::new(
            Vec3::new(2.5, 0.0, 0.0),
            Vec3::new(0.0, 2.5, 0.0),
            Vec3::new(0.0, 0.0, 2.5),
        );
        assert!(aabb.intersect_triangle(&through));
        assert!(!aabb.intersect_triangle(&above));
        assert!(!aabb.intersect_triangle(&corner));
        assert!(aabb.intersect_triangle(&clipping_corner));
        assert!(!Aabb::EMPTY.intersect_triangle(&through));
    }

    #[test]
    fn test_transformed_rotation() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::new(2.0, 1.0, 1.0));
        let rotated = aabb.transformed(
            Vec3::ONE,
            Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
            Vec3::new(0.0, 0.0, 5.0),
        );
        assert!(rotated.extents().abs_diff_eq(Vec3::new(1.0, 2.0, 1.0), EPS));
        assert!(rotated.center().abs_diff_eq(Vec3::new(0.0, 0.0, 5.0), EPS));

        let scaled = aabb.transformed(Vec3::splat(2.0), Quat::IDENTITY, Vec3::ZERO);
        assert!(scaled.extents().abs_diff_eq(Vec3::new(4.0, 2.0, 2.0), EPS));
    }

    #[test]
    fn test_from_obb() {
        let obb = Obb::new(
            Vec3::ONE,
            Vec3::new(1.0, 1.0, 1.0),
            Quat::from_rotation_z(std::f32::consts::FRAC_PI_4),
        );
        let aabb = Aabb::from_obb(&obb);
        assert_eq!(aabb.center(), Vec3::ONE);
        let diag = std::f32::consts::SQRT_2;
        assert!(aabb.extents().abs_diff_eq(Vec3::new(diag, diag, 1.0), 1e-4));
        for corner in obb.corners() {
            let offset = (corner - aabb.center()).abs();
            assert!(offset.cmple(aabb.extents() + 1e-4).all());
        }
    }
}
