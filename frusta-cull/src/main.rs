//! Frusta Cull
//!
//! Builds a camera frustum from a perspective projection and a look-at pose,
//! generates a grid of bounding volumes and reports which of them survive
//! frustum culling.

mod config;
mod errors;
mod scene;

use clap::Parser;
use config::CullConfig;
use errors::CullError;
use frusta_geom::Frustum;
use glam::{Mat4, Vec3};
use scene::{Scene, cull_scene};
use std::path::PathBuf;
use tracing::info;

/// Frusta Cull - frustum culling over a generated grid of volumes
#[derive(Parser, Debug)]
#[command(name = "frusta-cull")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON config file; flags below override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Camera position as x,y,z
    #[arg(long, value_delimiter = ',', num_args = 3, allow_negative_numbers = true)]
    eye: Option<Vec<f32>>,

    /// Point the camera looks at as x,y,z
    #[arg(long, value_delimiter = ',', num_args = 3, allow_negative_numbers = true)]
    target: Option<Vec<f32>>,

    /// Vertical field of view in degrees
    #[arg(long)]
    fov: Option<f32>,

    /// Viewport aspect ratio (width / height)
    #[arg(long)]
    aspect: Option<f32>,

    /// Near plane distance
    #[arg(long)]
    near: Option<f32>,

    /// Far plane distance
    #[arg(long)]
    far: Option<f32>,

    /// Grid cells per axis
    #[arg(short, long)]
    grid: Option<u32>,

    /// Distance between grid cells
    #[arg(short, long)]
    spacing: Option<f32>,

    /// Log level used when RUST_LOG is unset
    #[arg(short, long)]
    log_level: Option<String>,

    /// Print the visibility report as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    /// Apply the flags that were given on top of `config`.
    fn apply(&self, mut config: CullConfig) -> CullConfig {
        if let Some(eye) = self.eye.as_deref().and_then(vec3) {
            config = config.with_eye(eye);
        }
        if let Some(target) = self.target.as_deref().and_then(vec3) {
            config = config.with_target(target);
        }
        if let Some(fov) = self.fov {
            config = config.with_fov_degrees(fov);
        }
        if let Some(aspect) = self.aspect {
            config = config.with_aspect(aspect);
        }
        let near = self.near.unwrap_or(config.camera.near);
        let far = self.far.unwrap_or(config.camera.far);
        config = config.with_depth_range(near, far);
        let size = self.grid.unwrap_or(config.grid.size);
        let spacing = self.spacing.unwrap_or(config.grid.spacing);
        config = config.with_grid(size, spacing);
        if let Some(level) = &self.log_level {
            config = config.with_log_level(level.clone());
        }
        config
    }
}

fn vec3(values: &[f32]) -> Option<Vec3> {
    match values {
        [x, y, z] => Some(Vec3::new(*x, *y, *z)),
        _ => None,
    }
}

fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<(), CullError> {
    let config = match &args.config {
        Some(path) => CullConfig::load(path)?,
        None => CullConfig::default(),
    };
    let config = args.apply(config);
    init_logging(&config.logging.level);
    config.validate()?;

    let camera = &config.camera;
    let view = Mat4::look_at_rh(camera.eye, camera.target, Vec3::Y);
    let projection = Mat4::perspective_rh(
        camera.fov_degrees.to_radians(),
        camera.aspect,
        camera.near,
        camera.far,
    );
    let frustum = Frustum::from_camera(&view, &projection)?;
    info!(
        "Camera at {:?} looking at {:?}, depth {}..{}",
        camera.eye,
        camera.target,
        frustum.near(),
        frustum.far()
    );

    let scene = Scene::grid(&config.grid);
    let report = cull_scene(&frustum, &scene);
    info!(
        "Culled {} of {} candidates",
        report.culled(),
        scene.len()
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("frusta-cull error: {}", e);
        std::process::exit(1);
    }
}
