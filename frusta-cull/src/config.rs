//! Driver configuration, loaded from JSON and overridden by command-line flags.

use crate::errors::CullError;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Camera pose and perspective projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub eye: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 30.0),
            target: Vec3::ZERO,
            fov_degrees: 60.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Largest accepted `grid.size`; the scene holds `size^3` volumes.
pub const MAX_GRID_SIZE: u32 = 128;

/// Grid of generated candidate volumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Cells per axis.
    pub size: u32,
    /// Distance between neighbouring cell centers.
    pub spacing: f32,
    /// Half-size of each generated volume.
    pub extent: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: 8,
            spacing: 4.0,
            extent: 0.75,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Full driver configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CullConfig {
    pub camera: CameraConfig,
    pub grid: GridConfig,
    pub logging: LoggingConfig,
}

impl CullConfig {
    /// Read a JSON config. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, CullError> {
        let text = std::fs::read_to_string(path)?;
        let config: CullConfig = serde_json::from_str(&text)?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn with_eye(mut self, eye: Vec3) -> Self {
        self.camera.eye = eye;
        self
    }

    pub fn with_target(mut self, target: Vec3) -> Self {
        self.camera.target = target;
        self
    }

    pub fn with_fov_degrees(mut self, fov: f32) -> Self {
        self.camera.fov_degrees = fov;
        self
    }

    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.camera.aspect = aspect;
        self
    }

    pub fn with_depth_range(mut self, near: f32, far: f32) -> Self {
        self.camera.near = near;
        self.camera.far = far;
        self
    }

    pub fn with_grid(mut self, size: u32, spacing: f32) -> Self {
        self.grid.size = size;
        self.grid.spacing = spacing;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }

    /// Reject values the projection or grid cannot be built from.
    pub fn validate(&self) -> Result<(), CullError> {
        let camera = &self.camera;
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(CullError::InvalidConfig(format!(
                "fov must be in (0, 180) degrees, got {}",
                camera.fov_degrees
            )));
        }
        if camera.aspect <= 0.0 {
            return Err(CullError::InvalidConfig(format!(
                "aspect must be positive, got {}",
                camera.aspect
            )));
        }
        if !(camera.near > 0.0 && camera.near < camera.far) {
            return Err(CullError::InvalidConfig(format!(
                "depth range must satisfy 0 < near < far, got {}..{}",
                camera.near, camera.far
            )));
        }
        if self.grid.size > MAX_GRID_SIZE {
            return Err(CullError::InvalidConfig(format!(
                "grid size must be at most {}, got {}",
                MAX_GRID_SIZE, self.grid.size
            )));
        }
        if camera.eye.distance_squared(camera.target) <= f32::EPSILON {
            return Err(CullError::InvalidConfig(
                "camera eye and target coincide".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "camera": { "fov_degrees": 90.0 }, "grid": { "size": 3 } }"#;
        let config: CullConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.camera.fov_degrees, 90.0);
        assert_eq!(config.camera.near, CameraConfig::default().near);
        assert_eq!(config.grid.size, 3);
        assert_eq!(config.grid.spacing, GridConfig::default().spacing);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_builders() {
        let config = CullConfig::default()
            .with_eye(Vec3::ONE)
            .with_target(Vec3::new(0.0, 1.0, 0.0))
            .with_fov_degrees(45.0)
            .with_aspect(1.0)
            .with_depth_range(1.0, 10.0)
            .with_grid(2, 1.5)
            .with_log_level("debug");
        assert_eq!(config.camera.eye, Vec3::ONE);
        assert_eq!(config.camera.far, 10.0);
        assert_eq!(config.grid.spacing, 1.5);
        assert_eq!(config.logging.level, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_camera() {
        assert!(CullConfig::default().with_fov_degrees(180.0).validate().is_err());
        assert!(CullConfig::default().with_aspect(0.0).validate().is_err());
        assert!(CullConfig::default().with_depth_range(5.0, 1.0).validate().is_err());
        assert!(CullConfig::default()
            .with_eye(Vec3::ZERO)
            .with_target(Vec3::ZERO)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_caps_grid_size() {
        let spacing = GridConfig::default().spacing;
        assert!(CullConfig::default()
            .with_grid(MAX_GRID_SIZE, spacing)
            .validate()
            .is_ok());
        let err = CullConfig::default()
            .with_grid(u32::MAX, spacing)
            .validate()
            .unwrap_err();
        assert!(matches!(err, CullError::InvalidConfig(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = CullConfig::load(Path::new("/nonexistent/frusta-cull.json")).unwrap_err();
        assert!(matches!(err, CullError::Io(_)));
    }
}
