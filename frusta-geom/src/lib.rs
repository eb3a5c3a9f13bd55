//! Frusta Geometry Crate
//!
//! Bounding volumes, planes, rays and the intersection / culling routines
//! between them. Everything is a small `Copy` value type built on glam; the
//! crate performs no allocation outside the batch culling helper and no I/O.
//!
//! ## Modules
//!
//! - [`plane`]: oriented half-spaces, point classification and line clipping
//! - [`line`] / [`ray`]: segments and rays with primitive intersection tests
//! - [`aabb`], [`obb`], [`sphere`]: bounding volumes and point-cloud fitting
//! - [`frustum`]: view frusta built from projection matrices
//! - [`cull`]: batch visibility classification against a frustum

pub mod aabb;
pub mod classify;
pub mod cull;
mod eigen;
pub mod error;
pub mod frustum;
pub mod line;
pub mod obb;
pub mod plane;
pub mod ray;
pub mod sphere;
pub mod tolerance;
pub mod triangle;

pub use aabb::Aabb;
pub use classify::{FrustumPlane, PlaneSide, VolumeClassification};
pub use cull::{Cullable, VisibilitySet};
pub use error::GeomError;
pub use frustum::Frustum;
pub use line::Line;
pub use obb::Obb;
pub use plane::{LineClip, Plane};
pub use ray::Ray;
pub use sphere::Sphere;
pub use tolerance::{PARALLEL_EPSILON, PLANAR_EPSILON, Tolerance};
pub use triangle::Triangle;
