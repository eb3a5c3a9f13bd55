//! Candidate generation and the culling pass.

use crate::config::GridConfig;
use frusta_geom::{Aabb, Frustum, Obb, Sphere, VisibilitySet};
use glam::{Quat, Vec3};
use serde::Serialize;
use tracing::info;

/// Generated candidates, one volume kind per grid cell in rotation.
#[derive(Debug, Default)]
pub struct Scene {
    pub aabbs: Vec<Aabb>,
    pub obbs: Vec<Obb>,
    pub spheres: Vec<Sphere>,
}

impl Scene {
    /// Fill a cube of `size^3` cells centered on the origin.
    ///
    /// `config` is expected to have passed [`crate::config::CullConfig::validate`].
    pub fn grid(config: &GridConfig) -> Self {
        let n = config.size as usize;
        let half = (config.size as f32 - 1.0) * 0.5;
        let mut scene = Scene::default();
        for i in 0..n * n * n {
            let cell = Vec3::new((i % n) as f32, ((i / n) % n) as f32, (i / (n * n)) as f32);
            let center = (cell - Vec3::splat(half)) * config.spacing;
            let extents = Vec3::splat(config.extent);
            match i % 3 {
                0 => scene.aabbs.push(Aabb::new(center, extents)),
                1 => scene.obbs.push(Obb::new(
                    center,
                    extents * Vec3::new(1.5, 1.0, 0.5),
                    Quat::from_rotation_y(i as f32 * 0.35),
                )),
                _ => scene.spheres.push(Sphere::new(center, config.extent)),
            }
        }
        scene
    }

    pub fn len(&self) -> usize {
        self.aabbs.len() + self.obbs.len() + self.spheres.len()
    }
}

/// Per-kind culling results.
#[derive(Debug, Serialize)]
pub struct CullReport {
    pub aabbs: VisibilitySet,
    pub obbs: VisibilitySet,
    pub spheres: VisibilitySet,
}

impl CullReport {
    pub fn visible(&self) -> usize {
        self.aabbs.visible_count() + self.obbs.visible_count() + self.spheres.visible_count()
    }

    pub fn culled(&self) -> usize {
        self.aabbs.culled + self.obbs.culled + self.spheres.culled
    }
}

/// Cull every candidate in `scene` against `frustum`.
#[tracing::instrument(skip_all, fields(candidates = scene.len()))]
pub fn cull_scene(frustum: &Frustum, scene: &Scene) -> CullReport {
    let report = CullReport {
        aabbs: frustum.cull(&scene.aabbs),
        obbs: frustum.cull(&scene.obbs),
        spheres: frustum.cull(&scene.spheres),
    };
    info!(
        "Visible {} / {} (aabb {}, obb {}, sphere {})",
        report.visible(),
        scene.len(),
        report.aabbs.visible_count(),
        report.obbs.visible_count(),
        report.spheres.visible_count()
    );
    report
}
