//! Numeric tolerances used by classification and parallel checks.
//!
//! The planar band is an absolute distance. The parallel threshold is
//! relative: a denominator is compared against the product of the magnitudes
//! it was built from, so the same threshold holds at any model scale.

use glam::Mat3;
use serde::{Deserialize, Serialize};

/// Half-width of the band around a plane in which points count as coplanar.
pub const PLANAR_EPSILON: f32 = 1e-4;

/// Relative threshold below which a determinant or denominator is treated as zero.
pub const PARALLEL_EPSILON: f32 = 1e-6;

/// Tolerance configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// Coplanar band half-width, in plane distance units.
    pub planar: f32,
    /// Minimum size of a denominator, relative to its operands, to count as non-zero.
    pub parallel: f32,
}

impl Tolerance {
    /// Create the default tolerance.
    pub fn new() -> Self {
        Self {
            planar: PLANAR_EPSILON,
            parallel: PARALLEL_EPSILON,
        }
    }

    /// Set the coplanar band half-width.
    pub fn with_planar(mut self, planar: f32) -> Self {
        self.planar = planar.abs();
        self
    }

    /// Set the parallel threshold.
    pub fn with_parallel(mut self, parallel: f32) -> Self {
        self.parallel = parallel.abs();
        self
    }

    /// True when `value` is negligible next to `scale`, the product of the
    /// magnitudes it was computed from. A zero `scale` always counts.
    pub fn is_parallel(&self, value: f32, scale: f32) -> bool {
        value.abs() <= self.parallel * scale
    }
}

/// True when `m` has a usable inverse. The determinant is measured against
/// the column lengths, so uniformly tiny or huge scales still invert.
pub(crate) fn is_invertible(m: &Mat3) -> bool {
    let det = m.determinant();
    let scale = m.x_axis.length() * m.y_axis.length() * m.z_axis.length();
    det.is_finite() && det.abs() > PARALLEL_EPSILON * scale
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_constants() {
        let tol = Tolerance::default();
        assert_eq!(tol.planar, PLANAR_EPSILON);
        assert_eq!(tol.parallel, PARALLEL_EPSILON);
    }

    #[test]
    fn test_builder_takes_magnitude() {
        let tol = Tolerance::new().with_planar(-0.5).with_parallel(1e-3);
        assert_eq!(tol.planar, 0.5);
        assert_eq!(tol.parallel, 1e-3);
    }

    #[test]
    fn test_parallel_is_relative() {
        let tol = Tolerance::default();
        assert!(!tol.is_parallel(1e-7, 1e-6));
        assert!(tol.is_parallel(1e-7, 1.0));
        assert!(tol.is_parallel(0.0, 0.0));
    }

    #[test]
    fn test_invertible_at_small_scale() {
        assert!(is_invertible(&Mat3::from_diagonal(glam::Vec3::splat(0.005))));
        assert!(is_invertible(&Mat3::from_diagonal(glam::Vec3::splat(1e4))));
        assert!(!is_invertible(&Mat3::from_diagonal(glam::Vec3::new(1.0, 0.0, 1.0))));
        assert!(!is_invertible(&Mat3::ZERO));
        assert!(!is_invertible(&Mat3::from_diagonal(glam::Vec3::splat(f32::NAN))));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tol: Tolerance = serde_json::from_str(r#"{ "planar": 0.01 }"#).unwrap();
        assert_eq!(tol.planar, 0.01);
        assert_eq!(tol.parallel, PARALLEL_EPSILON);
    }
}
