//! View frusta.
//!
//! A frustum is stored in its own local frame, looking down +Z from `origin`,
//! as four edge slopes (x/z and y/z at unit depth) plus near and far depths.
//! The six bounding planes are derived on demand with outward normals, so a
//! point is inside when it lies on the negative side of every plane.
//!
//! Right-handed projections (camera looking down -Z) are expressed by turning
//! the local frame half a turn about Y. The local `Left`/`Right` planes are
//! then the camera's right/left.

use crate::aabb::{Aabb, CORNER_OFFSETS};
use crate::classify::{FrustumPlane, PlaneSide, VolumeClassification, classify_convex};
use crate::error::GeomError;
use crate::obb::Obb;
use crate::plane::Plane;
use crate::sphere::Sphere;
use crate::tolerance::{PLANAR_EPSILON, Tolerance};
use crate::triangle::Triangle;
use glam::{Mat4, Quat, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use tracing::{debug, warn};

/// A pyramidal frustum with apex at `origin`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frustum {
    origin: Vec3,
    orientation: Quat,
    right_slope: f32,
    left_slope: f32,
    top_slope: f32,
    bottom_slope: f32,
    near: f32,
    far: f32,
}

impl Default for Frustum {
    fn default() -> Self {
        Self::from_slopes(1.0, -1.0, 1.0, -1.0, 0.0, 1.0)
    }
}

impl Frustum {
    /// Create a frustum at the origin looking down +Z.
    ///
    /// `right`/`left` are x/z ratios and `top`/`bottom` y/z ratios of the
    /// side planes, so a symmetric 90 degree frustum is `(1, -1, 1, -1)`.
    pub fn from_slopes(right: f32, left: f32, top: f32, bottom: f32, near: f32, far: f32) -> Self {
        Self {
            origin: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            right_slope: right,
            left_slope: left,
            top_slope: top,
            bottom_slope: bottom,
            near,
            far,
        }
    }

    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_orientation(mut self, orientation: Quat) -> Self {
        self.set_orientation(orientation);
        self
    }

    /// Extract the frustum of a perspective projection matrix.
    ///
    /// Expects clip-space depth in `[0, 1]` as produced by
    /// [`Mat4::perspective_rh`] and [`Mat4::perspective_lh`]. Infinite or
    /// reversed depth ranges are rejected with [`GeomError::InvalidDepthRange`].
    #[tracing::instrument(skip_all)]
    pub fn from_projection(projection: &Mat4) -> Result<Self, GeomError> {
        let det = projection.determinant();
        if !det.is_finite() || det.abs() <= f32::EPSILON {
            warn!("Cannot extract a frustum from a singular projection");
            return Err(GeomError::SingularProjection);
        }
        let inverse = projection.inverse();
        let unproject = |ndc: Vec4| {
            let p = inverse * ndc;
            p.truncate() / p.w
        };

        let right = unproject(Vec4::new(1.0, 0.0, 1.0, 1.0));
        let left = unproject(Vec4::new(-1.0, 0.0, 1.0, 1.0));
        let top = unproject(Vec4::new(0.0, 1.0, 1.0, 1.0));
        let bottom = unproject(Vec4::new(0.0, -1.0, 1.0, 1.0));
        let near = unproject(Vec4::new(0.0, 0.0, 0.0, 1.0));
        let far = unproject(Vec4::new(0.0, 0.0, 1.0, 1.0));

        // Turn a -Z looking view half a turn about Y.
        let right_handed = near.z < 0.0 || far.z < 0.0;
        let (orientation, flip) = if right_handed {
            (Quat::from_rotation_y(PI), Vec3::new(-1.0, 1.0, -1.0))
        } else {
            (Quat::IDENTITY, Vec3::ONE)
        };
        let [right, left, top, bottom, near, far] =
            [right, left, top, bottom, near, far].map(|p| p * flip);

        let (near, far) = (near.z, far.z);
        if !(near.is_finite() && far.is_finite() && 0.0 <= near && near < far) {
            warn!("Projection yields depth range {}..{}", near, far);
            return Err(GeomError::InvalidDepthRange { near, far });
        }

        let xs = [right.x / right.z, left.x / left.z];
        let ys = [top.y / top.z, bottom.y / bottom.z];
        let frustum = Self {
            origin: Vec3::ZERO,
            orientation,
            right_slope: xs[0].max(xs[1]),
            left_slope: xs[0].min(xs[1]),
            top_slope: ys[0].max(ys[1]),
            bottom_slope: ys[0].min(ys[1]),
            near,
            far,
        };
        debug!(
            "Extracted frustum: slopes r={} l={} t={} b={}, depth {}..{}, right-handed={}",
            frustum.right_slope,
            frustum.left_slope,
            frustum.top_slope,
            frustum.bottom_slope,
            near,
            far,
            right_handed
        );
        Ok(frustum)
    }

    /// Projection frustum placed at the camera pose encoded by `view`.
    pub fn from_camera(view: &Mat4, projection: &Mat4) -> Result<Self, GeomError> {
        let det = view.determinant();
        if !det.is_finite() || det.abs() <= f32::EPSILON {
            warn!("Cannot place a frustum with a singular view matrix");
            return Err(GeomError::SingularView);
        }
        let frustum = Self::from_projection(projection)?;
        let (_, rotation, translation) = view.inverse().to_scale_rotation_translation();
        Ok(frustum
            .with_origin(translation)
            .with_orientation(rotation * frustum.orientation))
    }

    /// Apex position in world space.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Rotation from the local +Z-looking frame to world space.
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// x / z ratio of the right plane.
    pub fn right_slope(&self) -> f32 {
        self.right_slope
    }

    /// x / z ratio of the left plane.
    pub fn left_slope(&self) -> f32 {
        self.left_slope
    }

    /// y / z ratio of the top plane.
    pub fn top_slope(&self) -> f32 {
        self.top_slope
    }

    /// y / z ratio of the bottom plane.
    pub fn bottom_slope(&self) -> f32 {
        self.bottom_slope
    }

    /// Near plane distance along the view axis.
    pub fn near(&self) -> f32 {
        self.near
    }

    /// Far plane distance along the view axis.
    pub fn far(&self) -> f32 {
        self.far
    }

    /// Move the apex.
    pub fn set_origin(&mut self, origin: Vec3) {
        self.origin = origin;
    }

    /// Set the orientation. Zero quaternions reset it to the identity.
    pub fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = if orientation.length_squared() <= f32::EPSILON {
            Quat::IDENTITY
        } else {
            orientation.normalize()
        };
    }

    /// Set the right plane slope.
    pub fn set_right_slope(&mut self, slope: f32) {
        self.right_slope = slope;
    }

    /// Set the left plane slope.
    pub fn set_left_slope(&mut self, slope: f32) {
        self.left_slope = slope;
    }

    /// Set the top plane slope.
    pub fn set_top_slope(&mut self, slope: f32) {
        self.top_slope = slope;
    }

    /// Set the bottom plane slope.
    pub fn set_bottom_slope(&mut self, slope: f32) {
        self.bottom_slope = slope;
    }

    /// Set the near distance.
    pub fn set_near(&mut self, near: f32) {
        self.near = near;
    }

    /// Set the far distance.
    pub fn set_far(&mut self, far: f32) {
        self.far = far;
    }

    /// Rotate about the frustum origin.
    pub fn rotate(&mut self, rotation: Quat) {
        self.set_orientation(rotation * self.orientation);
    }

    /// Rotate about the frustum origin by `degrees` around `axis`.
    pub fn rotate_axis_angle(&mut self, axis: Vec3, degrees: f32) {
        let axis = axis.normalize_or_zero();
        if axis == Vec3::ZERO {
            return;
        }
        self.rotate(Quat::from_axis_angle(axis, degrees.to_radians()));
    }

    /// Scale, rotate and translate the frustum.
    ///
    /// The scale is applied along the frustum's own axes: x and y stretch the
    /// slopes, z stretches the depth range.
    pub fn transformed(&self, scale: Vec3, rotation: Quat, translation: Vec3) -> Self {
        let s = scale.abs();
        let (sx, sy) = if s.z > f32::EPSILON {
            (s.x / s.z, s.y / s.z)
        } else {
            (1.0, 1.0)
        };
        let mut frustum = Self {
            origin: rotation * (self.origin * scale) + translation,
            orientation: self.orientation,
            right_slope: self.right_slope * sx,
            left_slope: self.left_slope * sx,
            top_slope: self.top_slope * sy,
            bottom_slope: self.bottom_slope * sy,
            near: self.near * s.z,
            far: self.far * s.z,
        };
        frustum.rotate(rotation);
        frustum
    }

    /// Bounding planes in the frustum's local frame.
    fn local_planes(&self) -> [Plane; 6] {
        [
            Plane::new(-1.0, 0.0, self.left_slope, 0.0),
            Plane::new(1.0, 0.0, -self.right_slope, 0.0),
            Plane::new(0.0, -1.0, self.bottom_slope, 0.0),
            Plane::new(0.0, 1.0, -self.top_slope, 0.0),
            Plane::new(0.0, 0.0, -1.0, self.near),
            Plane::new(0.0, 0.0, 1.0, -self.far),
        ]
    }

    /// World-space planes in [`FrustumPlane::ALL`] order, unit normals facing out.
    pub fn planes(&self) -> [Plane; 6] {
        self.local_planes().map(|plane| {
            let mut plane = plane.normalized();
            plane.transform(self.orientation, self.origin);
            plane
        })
    }

    pub fn plane(&self, which: FrustumPlane) -> Plane {
        self.planes()[which.index()]
    }

    /// World-space corners, ordered like [`Aabb::corners`]: the four far
    /// corners first, then the four near corners.
    pub fn corners(&self) -> [Vec3; 8] {
        CORNER_OFFSETS.map(|offset| {
            let depth = if offset.z > 0.0 { self.far } else { self.near };
            let x = if offset.x > 0.0 { self.right_slope } else { self.left_slope };
            let y = if offset.y > 0.0 { self.top_slope } else { self.bottom_slope };
            self.origin + self.orientation * Vec3::new(x * depth, y * depth, depth)
        })
    }

    /// True unless the point is outside some plane by more than the planar epsilon.
    pub fn contains_point(&self, p: Vec3) -> bool {
        self.classify_point(p).is_visible()
    }

    /// [`Frustum::contains_point`] with an explicit coplanar band.
    pub fn contains_point_with(&self, p: Vec3, tolerance: &Tolerance) -> bool {
        self.classify_point_with(p, tolerance).is_visible()
    }

    /// `Inside`, `Intersecting` (on a face within the planar epsilon) or `Outside`.
    pub fn classify_point(&self, p: Vec3) -> VolumeClassification {
        self.classify_point_with(p, &Tolerance::default())
    }

    /// [`Frustum::classify_point`] with an explicit coplanar band.
    pub fn classify_point_with(&self, p: Vec3, tolerance: &Tolerance) -> VolumeClassification {
        let mut on_face = false;
        for plane in self.planes() {
            match plane.classify_point_with(p, tolerance) {
                PlaneSide::Front => return VolumeClassification::Outside,
                PlaneSide::Coplanar => on_face = true,
                _ => {}
            }
        }
        if on_face {
            VolumeClassification::Intersecting
        } else {
            VolumeClassification::Inside
        }
    }

    /// Conservative: triangles near the frustum's edges may report
    /// `Intersecting` only after the edge-axis tests.
    pub fn intersect_triangle(&self, triangle: &Triangle) -> VolumeClassification {
        let planes = self.planes();
        let vertices = triangle.vertices();

        let mut all_inside = true;
        for plane in &planes {
            let d = vertices.map(|v| plane.dot(v));
            if d.iter().all(|&d| d > PLANAR_EPSILON) {
                return VolumeClassification::Outside;
            }
            if d.iter().any(|&d| d > 0.0) {
                all_inside = false;
            }
        }
        if all_inside {
            return VolumeClassification::Inside;
        }

        // Triangle plane against the corners.
        let corners = self.corners();
        let tri_plane = triangle.plane();
        if tri_plane.normal() != Vec3::ZERO {
            let d = corners.map(|c| tri_plane.dot(c));
            if d.iter().all(|&d| d > PLANAR_EPSILON) || d.iter().all(|&d| d < -PLANAR_EPSILON) {
                return VolumeClassification::Outside;
            }
        }

        // Triangle edges crossed with the frustum edge directions.
        let frustum_edges = [
            corners[1] - corners[0],
            corners[3] - corners[0],
            corners[0] - corners[4],
            corners[1] - corners[5],
            corners[2] - corners[6],
            corners[3] - corners[7],
        ];
        let [v0, v1, v2] = vertices;
        for tri_edge in [v1 - v0, v2 - v1, v0 - v2] {
            for frustum_edge in frustum_edges {
                let axis = tri_edge.cross(frustum_edge);
                if axis.length_squared() <= f32::EPSILON {
                    continue;
                }
                let (tri_min, tri_max) = project(&vertices, axis);
                let (fr_min, fr_max) = project(&corners, axis);
                if tri_min > fr_max || tri_max < fr_min {
                    return VolumeClassification::Outside;
                }
            }
        }

        VolumeClassification::Intersecting
    }

    pub fn intersect_sphere(&self, sphere: &Sphere) -> VolumeClassification {
        sphere.classify_planes(&self.planes())
    }

    pub fn intersect_aabb(&self, aabb: &Aabb) -> VolumeClassification {
        aabb.classify_planes(&self.planes())
    }

    pub fn intersect_obb(&self, obb: &Obb) -> VolumeClassification {
        obb.classify_planes(&self.planes())
    }

    /// Where `other` sits relative to this frustum.
    pub fn intersect_frustum(&self, other: &Frustum) -> VolumeClassification {
        let other_corners = other.corners();
        let mut all_inside = true;
        for plane in self.planes() {
            let outside = other_corners
                .iter()
                .filter(|&&c| plane.dot(c) > PLANAR_EPSILON)
                .count();
            if outside == other_corners.len() {
                return VolumeClassification::Outside;
            }
            if outside > 0 {
                all_inside = false;
            }
        }
        if all_inside {
            return VolumeClassification::Inside;
        }

        let corners = self.corners();
        for plane in other.planes() {
            if corners.iter().all(|&c| plane.dot(c) > PLANAR_EPSILON) {
                return VolumeClassification::Outside;
            }
        }
        VolumeClassification::Intersecting
    }

    /// Classify the frustum's corners against a plane; positive side is outside.
    pub fn classify_plane(&self, plane: &Plane) -> VolumeClassification {
        let d = self.corners().map(|c| plane.dot(c));
        if d.iter().all(|&d| d > 0.0) {
            VolumeClassification::Outside
        } else if d.iter().all(|&d| d <= 0.0) {
            VolumeClassification::Inside
        } else {
            VolumeClassification::Intersecting
        }
    }

    pub fn classify_planes(&self, planes: &[Plane]) -> VolumeClassification {
        classify_convex(planes, |plane| self.classify_plane(plane))
    }
}

fn project(points: &[Vec3], axis: Vec3) -> (f32, f32) {
    points.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), p| {
        let d = p.dot(axis);
        (min.min(d), max.max(d))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-4;

    fn unit_frustum() -> Frustum {
        Frustum::from_slopes(1.0, -1.0, 1.0, -1.0, 1.0, 10.0)
    }

    #[test]
    fn test_perspective_rh() {
        let proj = Mat4::perspective_rh(FRAC_PI_2, 1.0, 1.0, 100.0);
        let frustum = Frustum::from_projection(&proj).unwrap();
        assert!((frustum.near() - 1.0).abs() < EPS);
        assert!((frustum.far() - 100.0).abs() < 0.05);
        assert!((frustum.right_slope() - 1.0).abs() < EPS);
        assert!((frustum.left_slope() + 1.0).abs() < EPS);

        assert_eq!(
            frustum.classify_point(Vec3::new(0.0, 0.0, -50.0)),
            VolumeClassification::Inside
        );
        assert_eq!(
            frustum.classify_point(Vec3::new(0.0, 0.0, 50.0)),
            VolumeClassification::Outside
        );
        assert!(frustum.contains_point(Vec3::new(10.0, -10.0, -50.0)));
        assert!(!frustum.contains_point(Vec3::new(60.0, 0.0, -50.0)));
    }

    #[test]
    fn test_perspective_lh_aspect() {
        let proj = Mat4::perspective_lh(FRAC_PI_2, 2.0, 0.5, 20.0);
        let frustum = Frustum::from_projection(&proj).unwrap();
        assert_eq!(frustum.orientation(), Quat::IDENTITY);
        assert!((frustum.right_slope() - 2.0).abs() < EPS);
        assert!((frustum.top_slope() - 1.0).abs() < EPS);
        assert!((frustum.near() - 0.5).abs() < EPS);
        assert!(frustum.contains_point(Vec3::new(15.0, 0.0, 10.0)));
        assert!(!frustum.contains_point(Vec3::new(0.0, 15.0, 10.0)));
    }

    #[test]
    fn test_projection_errors() {
        assert_eq!(
            Frustum::from_projection(&Mat4::ZERO),
            Err(GeomError::SingularProjection)
        );
        let infinite = Mat4::perspective_infinite_rh(FRAC_PI_2, 1.0, 1.0);
        assert!(matches!(
            Frustum::from_projection(&infinite),
            Err(GeomError::SingularProjection) | Err(GeomError::InvalidDepthRange { .. })
        ));
    }

    #[test]
    fn test_from_camera() {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y);
        let proj = Mat4::perspective_rh(FRAC_PI_2, 1.0, 0.1, 100.0);
        let frustum = Frustum::from_camera(&view, &proj).unwrap();
        assert!(frustum.origin().abs_diff_eq(Vec3::new(0.0, 0.0, 10.0), EPS));
        assert_eq!(frustum.classify_point(Vec3::ZERO), VolumeClassification::Inside);
        assert_eq!(
            frustum.classify_point(Vec3::new(0.0, 0.0, 20.0)),
            VolumeClassification::Outside
        );
        assert_eq!(
            Frustum::from_camera(&Mat4::ZERO, &proj),
            Err(GeomError::SingularView)
        );
    }

    #[test]
    fn test_planes_are_unit_and_face_out() {
        let frustum = unit_frustum().with_origin(Vec3::new(3.0, 0.0, 0.0));
        let center = frustum.origin() + Vec3::new(0.0, 0.0, 5.0);
        for plane in frustum.planes() {
            assert!(plane.is_unit());
            assert!(plane.dot(center) < 0.0);
        }
        assert!(frustum
            .plane(FrustumPlane::Far)
            .normal()
            .abs_diff_eq(Vec3::Z, EPS));
    }

    #[test]
    fn test_corners_on_planes() {
        let frustum = unit_frustum().with_orientation(Quat::from_rotation_x(0.3));
        let corners = frustum.corners();
        let far = frustum.plane(FrustumPlane::Far);
        let near = frustum.plane(FrustumPlane::Near);
        for c in &corners[..4] {
            assert!(far.dot(*c).abs() < EPS);
        }
        for c in &corners[4..] {
            assert!(near.dot(*c).abs() < EPS);
        }
        assert!(corners[2].abs_diff_eq(
            frustum.orientation() * Vec3::new(10.0, 10.0, 10.0),
            EPS
        ));
    }

    #[test]
    fn test_classify_point_on_face() {
        let frustum = unit_frustum();
        assert_eq!(
            frustum.classify_point(Vec3::new(0.0, 0.0, 1.0)),
            VolumeClassification::Intersecting
        );
        assert_eq!(
            frustum.classify_point(Vec3::new(0.0, 0.0, 0.5)),
            VolumeClassification::Outside
        );
    }

    #[test]
    fn test_classify_point_wide_band() {
        let frustum = unit_frustum();
        let p = Vec3::new(0.0, 0.0, 0.9);
        let wide = Tolerance::new().with_planar(0.5);
        assert!(!frustum.contains_point(p));
        assert!(frustum.contains_point_with(p, &wide));
        assert_eq!(
            frustum.classify_point_with(p, &wide),
            VolumeClassification::Intersecting
        );
        assert_eq!(
            frustum.classify_point_with(Vec3::new(0.0, 0.0, 5.0), &wide),
            VolumeClassification::Inside
        );
    }

    #[test]
    fn test_volumes() {
        let frustum = unit_frustum();
        let inside = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0);
        let straddling = Sphere::new(Vec3::new(5.0, 0.0, 5.0), 1.0);
        let behind = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0);
        assert_eq!(frustum.intersect_sphere(&inside), VolumeClassification::Inside);
        assert_eq!(frustum.intersect_sphere(&straddling), VolumeClassification::Intersecting);
        assert_eq!(frustum.intersect_sphere(&behind), VolumeClassification::Outside);

        let aabb = Aabb::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ONE);
        assert_eq!(frustum.intersect_aabb(&aabb), VolumeClassification::Inside);
        let far_box = Aabb::new(Vec3::new(0.0, 0.0, 50.0), Vec3::ONE);
        assert_eq!(frustum.intersect_aabb(&far_box), VolumeClassification::Outside);

        let obb = Obb::new(
            Vec3::new(0.0, 0.0, 9.5),
            Vec3::new(2.0, 0.1, 0.1),
            Quat::from_rotation_y(FRAC_PI_2),
        );
        assert_eq!(frustum.intersect_obb(&obb), VolumeClassification::Intersecting);
    }

    #[test]
    fn test_triangles() {
        let frustum = unit_frustum();
        let inside = Triangle::new(
            Vec3::new(-1.0, -1.0, 5.0),
            Vec3::new(1.0, -1.0, 5.0),
            Vec3::new(0.0, 1.0, 5.0),
        );
        assert_eq!(frustum.intersect_triangle(&inside), VolumeClassification::Inside);

        let covering = Triangle::new(
            Vec3::new(-20.0, -20.0, 5.0),
            Vec3::new(20.0, -20.0, 5.0),
            Vec3::new(0.0, 20.0, 5.0),
        );
        assert_eq!(
            frustum.intersect_triangle(&covering),
            VolumeClassification::Intersecting
        );

        let right = inside * Mat4::from_translation(Vec3::new(100.0, 0.0, 0.0));
        assert_eq!(frustum.intersect_triangle(&right), VolumeClassification::Outside);

        // Beyond the top-right edge; no single plane rejects it.
        let corner = Triangle::new(
            Vec3::new(6.5, 4.0, 5.0),
            Vec3::new(4.0, 6.5, 5.0),
            Vec3::new(7.0, 7.0, 5.0),
        );
        assert_eq!(frustum.intersect_triangle(&corner), VolumeClassification::Outside);
    }

    #[test]
    fn test_frustum_pairs() {
        let frustum = unit_frustum();
        let narrow = Frustum::from_slopes(0.5, -0.5, 0.5, -0.5, 2.0, 8.0);
        assert_eq!(frustum.intersect_frustum(&narrow), VolumeClassification::Inside);
        assert_eq!(frustum.intersect_frustum(&frustum), VolumeClassification::Inside);

        let away = unit_frustum().with_origin(Vec3::new(1000.0, 0.0, 0.0));
        assert_eq!(frustum.intersect_frustum(&away), VolumeClassification::Outside);

        let shifted = unit_frustum().with_origin(Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(
            frustum.intersect_frustum(&shifted),
            VolumeClassification::Intersecting
        );
    }

    #[test]
    fn test_classify_plane_by_corners() {
        let frustum = unit_frustum();
        let beyond = Plane::from_point_normal(Vec3::new(0.0, 0.0, 20.0), -Vec3::Z);
        assert_eq!(frustum.classify_plane(&beyond), VolumeClassification::Outside);
        assert_eq!(
            frustum.classify_plane(&beyond.inversed()),
            VolumeClassification::Inside
        );
        let slicing = Plane::from_point_normal(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert_eq!(frustum.classify_plane(&slicing), VolumeClassification::Intersecting);

        let region = Aabb::new(Vec3::new(0.0, 0.0, 5.0), Vec3::splat(20.0)).planes();
        assert_eq!(frustum.classify_planes(&region), VolumeClassification::Inside);
    }

    #[test]
    fn test_rotate_and_transform() {
        let mut frustum = unit_frustum();
        frustum.rotate_axis_angle(Vec3::Y, 90.0);
        // +Z now maps to +X.
        assert!(frustum.contains_point(Vec3::new(5.0, 0.0, 0.0)));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, 5.0)));

        let unchanged = frustum;
        frustum.rotate_axis_angle(Vec3::ZERO, 45.0);
        assert_eq!(frustum, unchanged);

        let moved = unit_frustum().transformed(
            Vec3::splat(2.0),
            Quat::IDENTITY,
            Vec3::new(0.0, 5.0, 0.0),
        );
        assert_eq!(moved.near(), 2.0);
        assert_eq!(moved.far(), 20.0);
        assert_eq!(moved.right_slope(), 1.0);
        assert!(moved.origin().abs_diff_eq(Vec3::new(0.0, 5.0, 0.0), EPS));
    }

    #[test]
    fn test_setters() {
        let mut frustum = Frustum::default();
        frustum.set_near(2.0);
        frustum.set_far(4.0);
        frustum.set_right_slope(0.5);
        frustum.set_left_slope(-0.25);
        frustum.set_top_slope(0.75);
        frustum.set_bottom_slope(-0.5);
        frustum.set_origin(Vec3::ONE);
        frustum.set_orientation(Quat::from_xyzw(0.0, 0.0, 0.0, 0.0));
        assert_eq!(frustum.orientation(), Quat::IDENTITY);
        assert_eq!(
            frustum,
            Frustum::from_slopes(0.5, -0.25, 0.75, -0.5, 2.0, 4.0).with_origin(Vec3::ONE)
        );
    }
}
