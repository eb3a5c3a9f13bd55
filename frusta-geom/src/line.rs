//! Directed line segments.

use crate::plane::Plane;
use crate::tolerance::{PARALLEL_EPSILON, Tolerance};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A segment from `start` to `start + direction`.
///
/// The direction is not normalised; its magnitude is the segment length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    start: Vec3,
    direction: Vec3,
}

impl Line {
    /// Create a segment between two points.
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self {
            start,
            direction: end - start,
        }
    }

    /// Create a segment of `length` along `dir` (normalised first).
    pub fn from_direction(start: Vec3, dir: Vec3, length: f32) -> Self {
        Self {
            start,
            direction: dir.normalize_or_zero() * length,
        }
    }

    /// Move both end points.
    pub fn set(&mut self, start: Vec3, end: Vec3) {
        *self = Self::new(start, end);
    }

    /// Start point.
    pub fn start(&self) -> Vec3 {
        self.start
    }

    /// End point.
    pub fn end(&self) -> Vec3 {
        self.start + self.direction
    }

    /// The unnormalised direction `end - start`.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Segment length.
    pub fn length(&self) -> f32 {
        self.direction.length()
    }

    /// Squared segment length.
    pub fn length_squared(&self) -> f32 {
        self.direction.length_squared()
    }

    /// `start + direction * t`, not clamped to the segment.
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.start + self.direction * t
    }

    /// Parameter in `[0, 1]` of the segment point closest to `p`.
    pub fn closest_point(&self, p: Vec3) -> f32 {
        let len_sq = self.direction.length_squared();
        if len_sq == 0.0 {
            return 0.0;
        }
        ((p - self.start).dot(self.direction) / len_sq).clamp(0.0, 1.0)
    }

    /// The segment point closest to `p`.
    pub fn nearest_point(&self, p: Vec3) -> Vec3 {
        self.point_at(self.closest_point(p))
    }

    /// Minimal distance from `p` to the segment.
    pub fn distance(&self, p: Vec3) -> f32 {
        p.distance(self.nearest_point(p))
    }

    /// Closest points between this segment and `other`, as `(on_self, on_other)`.
    pub fn closest_points(&self, other: &Line) -> (Vec3, Vec3) {
        let (s, t) = self.closest_parameters(other);
        (self.point_at(s), other.point_at(t))
    }

    /// Closest points between two non-parallel segments.
    ///
    /// Returns `None` when the segments are parallel (or degenerate), in which
    /// case [`Line::closest_points`] still yields a valid pair.
    pub fn intersect(&self, other: &Line) -> Option<(Vec3, Vec3)> {
        self.intersect_with(other, &Tolerance::default())
    }

    /// [`Line::intersect`] with an explicit parallel threshold, compared
    /// against the squared sine of the angle between the segments.
    pub fn intersect_with(&self, other: &Line, tolerance: &Tolerance) -> Option<(Vec3, Vec3)> {
        let a = self.direction.length_squared();
        let e = other.direction.length_squared();
        let b = self.direction.dot(other.direction);
        let denom = a * e - b * b;
        if a == 0.0 || e == 0.0 || tolerance.is_parallel(denom, a * e) {
            return None;
        }
        Some(self.closest_points(other))
    }

    /// True when the end points lie on opposite sides of `plane` (or touch it).
    pub fn intersects_plane(&self, plane: &Plane) -> bool {
        plane.dot(self.start) * plane.dot(self.end()) <= 0.0
    }

    fn closest_parameters(&self, other: &Line) -> (f32, f32) {
        let d1 = self.direction;
        let d2 = other.direction;
        let r = self.start - other.start;
        let a = d1.length_squared();
        let e = d2.length_squared();
        let f = d2.dot(r);

        if a == 0.0 && e == 0.0 {
            return (0.0, 0.0);
        }
        if a == 0.0 {
            return (0.0, (f / e).clamp(0.0, 1.0));
        }

        let c = d1.dot(r);
        if e == 0.0 {
            return ((-c / a).clamp(0.0, 1.0), 0.0);
        }

        let b = d1.dot(d2);
        let denom = a * e - b * b;
        // Parallel segments: pick s = 0 and let t follow.
        let mut s = if denom > PARALLEL_EPSILON * a * e {
            ((b * f - c * e) / denom).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let mut t = (b * s + f) / e;
        if t < 0.0 {
            t = 0.0;
            s = (-c / a).clamp(0.0, 1.0);
        } else if t > 1.0 {
            t = 1.0;
            s = ((b - c) / a).clamp(0.0, 1.0);
        }
        (s, t)
    }
}
