//! Oriented bounding boxes.

use crate::aabb::{Aabb, CORNER_OFFSETS, triangle_box_overlap};
use crate::classify::{VolumeClassification, classify_convex, classify_distance};
use crate::eigen::{covariance, symmetric_eigen};
use crate::error::{GeomError, validate_points};
use crate::frustum::Frustum;
use crate::plane::Plane;
use crate::ray::Ray;
use crate::sphere::Sphere;
use crate::tolerance::PARALLEL_EPSILON;
use crate::triangle::Triangle;
use glam::{Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A box with its own rotation: `center + orientation * (extents * [-1, 1]^3)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obb {
    center: Vec3,
    extents: Vec3,
    orientation: Quat,
}

impl Obb {
    /// Create a box. The orientation is normalised (a zero quaternion becomes
    /// the identity) and negative extents are clamped to zero.
    pub fn new(center: Vec3, extents: Vec3, orientation: Quat) -> Self {
        Self {
            center,
            extents: extents.max(Vec3::ZERO),
            orientation: unit_orientation(orientation),
        }
    }

    /// An unrotated box covering `aabb`.
    pub fn from_aabb(aabb: &Aabb) -> Self {
        Self::new(aabb.center(), aabb.extents(), Quat::IDENTITY)
    }

    /// Approximate oriented bounds of a point cloud.
    ///
    /// The box axes are the principal axes of the point covariance, which is
    /// fast and stable but not the minimal-volume box.
    #[tracing::instrument(skip_all, fields(count = points.len()))]
    pub fn from_points(points: &[Vec3]) -> Result<Self, GeomError> {
        validate_points(points)?;

        let (_, cov) = covariance(points);
        let (_, mut axes) = symmetric_eigen(cov);
        if axes.determinant() < 0.0 {
            axes.z_axis = axes.x_axis.cross(axes.y_axis);
        }
        let orientation = unit_orientation(Quat::from_mat3(&axes));

        let to_local = orientation.inverse();
        let first = to_local * points[0];
        let (min, max) = points.iter().fold((first, first), |(min, max), &p| {
            let local = to_local * p;
            (min.min(local), max.max(local))
        });

        let obb = Self::new(orientation * ((min + max) * 0.5), (max - min) * 0.5, orientation);
        debug!(
            "Fitted OBB to {} points: center {:?}, extents {:?}",
            points.len(),
            obb.center,
            obb.extents
        );
        Ok(obb)
    }

    /// Back to the unit box at the origin.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn extents(&self) -> Vec3 {
        self.extents
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn set_center(&mut self, center: Vec3) {
        self.center = center;
    }

    pub fn set_extents(&mut self, extents: Vec3) {
        self.extents = extents.max(Vec3::ZERO);
    }

    pub fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = unit_orientation(orientation);
    }

    pub fn set(&mut self, center: Vec3, extents: Vec3, orientation: Quat) {
        *self = Self::new(center, extents, orientation);
    }

    /// The box axes in world space.
    pub fn axes(&self) -> [Vec3; 3] {
        let m = Mat3::from_quat(self.orientation);
        [m.x_axis, m.y_axis, m.z_axis]
    }

    /// The eight corners, in the same order as [`Aabb::corners`].
    pub fn corners(&self) -> [Vec3; 8] {
        CORNER_OFFSETS.map(|offset| self.center + self.orientation * (self.extents * offset))
    }

    /// Scale, rotate and translate the box.
    ///
    /// The scale is applied along the box's own axes.
    pub fn transformed(&self, scale: Vec3, rotation: Quat, translation: Vec3) -> Self {
        Self::new(
            rotation * (self.center * scale) + translation,
            self.extents * scale.abs(),
            rotation * self.orientation,
        )
    }

    /// Inclusive point containment.
    pub fn contains_point(&self, p: Vec3) -> bool {
        self.to_local(p).abs().cmple(self.extents).all()
    }

    /// Separating-axis test over the 15 candidate axes.
    pub fn intersect_obb(&self, other: &Obb) -> bool {
        let a = self.axes();
        let b = other.axes();
        let ea = self.extents;
        let eb = other.extents;

        // `other` expressed in this box's frame; the epsilon keeps near-parallel
        // edge pairs from producing a null cross axis.
        let mut r = [[0.0f32; 3]; 3];
        let mut abs_r = [[0.0f32; 3]; 3];
        for i in 0..3 {
            for j in 0..3 {
                r[i][j] = a[i].dot(b[j]);
                abs_r[i][j] = r[i][j].abs() + PARALLEL_EPSILON;
            }
        }
        let d = other.center - self.center;
        let t = Vec3::new(d.dot(a[0]), d.dot(a[1]), d.dot(a[2]));

        for i in 0..3 {
            let ra = ea[i];
            let rb = eb[0] * abs_r[i][0] + eb[1] * abs_r[i][1] + eb[2] * abs_r[i][2];
            if t[i].abs() > ra + rb {
                return false;
            }
        }

        for j in 0..3 {
            let ra = ea[0] * abs_r[0][j] + ea[1] * abs_r[1][j] + ea[2] * abs_r[2][j];
            let rb = eb[j];
            let dist = t[0] * r[0][j] + t[1] * r[1][j] + t[2] * r[2][j];
            if dist.abs() > ra + rb {
                return false;
            }
        }

        for i in 0..3 {
            let (i1, i2) = ((i + 1) % 3, (i + 2) % 3);
            for j in 0..3 {
                let (j1, j2) = ((j + 1) % 3, (j + 2) % 3);
                let ra = ea[i1] * abs_r[i2][j] + ea[i2] * abs_r[i1][j];
                let rb = eb[j1] * abs_r[i][j2] + eb[j2] * abs_r[i][j1];
                let dist = t[i2] * r[i1][j] - t[i1] * r[i2][j];
                if dist.abs() > ra + rb {
                    return false;
                }
            }
        }

        true
    }

    pub fn intersect_aabb(&self, aabb: &Aabb) -> bool {
        if aabb.is_reset() {
            return false;
        }
        self.intersect_obb(&Obb::from_aabb(aabb))
    }

    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        ray.intersect_obb(self)
    }

    pub fn intersect_triangle(&self, triangle: &Triangle) -> bool {
        triangle_box_overlap(triangle.vertices().map(|v| self.to_local(v)), self.extents)
    }

    pub fn intersect_sphere(&self, sphere: &Sphere) -> bool {
        sphere.intersect_obb(self)
    }

    /// Positive side is outside.
    pub fn classify_plane(&self, plane: &Plane) -> VolumeClassification {
        let n = plane.normal();
        let [x, y, z] = self.axes();
        let r = self.extents.dot(Vec3::new(n.dot(x).abs(), n.dot(y).abs(), n.dot(z).abs()));
        classify_distance(plane.dot(self.center), r)
    }

    pub fn classify_planes(&self, planes: &[Plane]) -> VolumeClassification {
        classify_convex(planes, |plane| self.classify_plane(plane))
    }

    pub fn classify_frustum(&self, frustum: &Frustum) -> VolumeClassification {
        self.classify_planes(&frustum.planes())
    }

    fn to_local(&self, p: Vec3) -> Vec3 {
        self.orientation.inverse() * (p - self.center)
    }
}

impl Default for Obb {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            extents: Vec3::ONE,
            orientation: Quat::IDENTITY,
        }
    }
}

fn unit_orientation(q: Quat) -> Quat {
    if q.length_squared() <= f32::EPSILON || !q.is_finite() {
        Quat::IDENTITY
    } else {
        q.normalize()
    }
}
