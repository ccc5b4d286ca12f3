//! Glyphcast: software 3D renderer for the terminal
//!
//! Rasterizes a hierarchical scene of triangle meshes into a grayscale
//! raster and prints it as ASCII luminance art:
//! - Homogeneous vector, matrix and quaternion math
//! - Arena scene graph with per-node spin animation
//! - Bresenham lines, midpoint circles and scanline triangle fill
//! - Interactive crossterm loop plus headless frame capture

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod config;
mod rasterizer;
mod scene;
mod term;

use anyhow::Context;

use app::App;
use config::{load_settings, parse_args, USAGE};
use rasterizer::RenderSettings;
use scene::{load_scene, load_scene_from_str, SceneFile, DEMO_SCENE};

fn main() -> anyhow::Result<()> {
    let args = parse_args(std::env::args().skip(1))?;
    if args.help {
        println!("glyphcast {}", VERSION);
        println!("{}", USAGE);
        return Ok(());
    }

    let mut settings = match &args.config {
        Some(path) => load_settings(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => RenderSettings::default(),
    };
    args.apply_to(&mut settings);

    let scene_file: SceneFile = match &args.scene {
        Some(path) => {
            load_scene(path).with_context(|| format!("loading scene from {}", path.display()))?
        }
        None => load_scene_from_str(DEMO_SCENE).context("parsing built-in demo scene")?,
    };

    let mut app = App::new(settings, scene_file.build())?;
    match args.capture {
        Some(frames) => app.run_capture(frames, &args.out_dir(), args.png),
        None => app.run_interactive(),
    }
}
