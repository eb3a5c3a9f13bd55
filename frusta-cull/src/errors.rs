//! Error types for the culling driver.

use frusta_geom::GeomError;
use thiserror::Error;

/// Errors that can occur while setting up or running a culling pass.
#[derive(Debug, Error)]
pub enum CullError {
    #[error("Geometry error: {0}")]
    Geom(#[from] GeomError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
