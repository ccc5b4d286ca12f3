//! Runtime configuration
//!
//! Render settings load from a RON file and the command line overrides
//! them flag by flag.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;

use crate::rasterizer::{DrawStyle, RenderSettings};

pub const USAGE: &str = "\
glyphcast - software 3D renderer for the terminal

Usage: glyphcast [options]

Options:
  --width <cells>    raster width in character cells
  --height <cells>   raster height in character cells
  --fov <degrees>    vertical field of view
  --near <dist>      near plane distance
  --far <dist>       far plane distance
  --wireframe        draw triangle outlines instead of filled faces
  --scene <file>     RON scene file (default: built-in demo)
  --config <file>    RON render settings file
  --capture <n>      render n frames headless and exit
  --out <dir>        capture output directory (default: ./frames)
  --png              also write capture frames as PNG images
  --help             show this text

Keys: w/a/s/d move the scene rig, q or Esc quits.";

/// Error type for settings loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load render settings from a RON file
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<RenderSettings, ConfigError> {
    let contents = fs::read_to_string(path)?;
    Ok(load_settings_from_str(&contents)?)
}

/// Load render settings from a RON string; missing fields keep defaults
pub fn load_settings_from_str(s: &str) -> Result<RenderSettings, ron::error::SpannedError> {
    ron::from_str(s)
}

/// Command line flags before they are folded into the settings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub scene: Option<PathBuf>,
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub fov: Option<f32>,
    pub near: Option<f32>,
    pub far: Option<f32>,
    pub wireframe: bool,
    pub capture: Option<u32>,
    pub out: Option<PathBuf>,
    pub png: bool,
    pub help: bool,
}

impl CliArgs {
    /// Overlay the parsed flags onto loaded or default settings
    pub fn apply_to(&self, settings: &mut RenderSettings) {
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(fov) = self.fov {
            settings.fov = fov;
        }
        if let Some(near) = self.near {
            settings.near = near;
        }
        if let Some(far) = self.far {
            settings.far = far;
        }
        if self.wireframe {
            settings.style = DrawStyle::Wireframe;
        }
    }

    pub fn out_dir(&self) -> PathBuf {
        self.out.clone().unwrap_or_else(|| PathBuf::from("frames"))
    }
}

/// Parse command line arguments, excluding the program name
pub fn parse_args<I>(args: I) -> anyhow::Result<CliArgs>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = CliArgs::default();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => parsed.config = Some(PathBuf::from(flag_value(&mut iter, "--config")?)),
            "--scene" => parsed.scene = Some(PathBuf::from(flag_value(&mut iter, "--scene")?)),
            "--width" => parsed.width = Some(parse_value(&mut iter, "--width")?),
            "--height" => parsed.height = Some(parse_value(&mut iter, "--height")?),
            "--fov" => parsed.fov = Some(parse_value(&mut iter, "--fov")?),
            "--near" => parsed.near = Some(parse_value(&mut iter, "--near")?),
            "--far" => parsed.far = Some(parse_value(&mut iter, "--far")?),
            "--capture" => parsed.capture = Some(parse_value(&mut iter, "--capture")?),
            "--out" => parsed.out = Some(PathBuf::from(flag_value(&mut iter, "--out")?)),
            "--wireframe" => parsed.wireframe = true,
            "--png" => parsed.png = true,
            "--help" | "-h" => parsed.help = true,
            other => anyhow::bail!("unknown argument `{}` (try --help)", other),
        }
    }
    Ok(parsed)
}

fn flag_value<I>(iter: &mut I, flag: &str) -> anyhow::Result<String>
where
    I: Iterator<Item = String>,
{
    iter.next()
        .with_context(|| format!("{} needs a value", flag))
}

fn parse_value<I, T>(iter: &mut I, flag: &str) -> anyhow::Result<T>
where
    I: Iterator<Item = String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = flag_value(iter, flag)?;
    raw.parse()
        .map_err(|e| anyhow::anyhow!("invalid value `{}` for {}: {}", raw, flag, e))
}
