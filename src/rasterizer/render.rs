//! Scene-to-raster pipeline
//! Projects world-space triangles through a perspective matrix and
//! scan-converts them into the output texture

use super::math::{Mat4, Vec4};
use super::texture::{Color, Texture};
use crate::scene::SceneGraph;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How triangles are put on the raster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DrawStyle {
    #[default]
    Filled,
    Wireframe,
}

/// Raster dimensions and camera parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: usize,
    pub height: usize,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub style: DrawStyle,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 80,
            height: 40,
            fov: 90.0,
            near: 0.1,
            far: 100.0,
            style: DrawStyle::Filled,
        }
    }
}

impl RenderSettings {
    /// Reject settings that cannot produce a valid camera
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.width == 0 || self.height == 0 {
            return Err(SettingsError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        if !self.fov.is_finite() || self.fov <= 0.0 || self.fov >= 180.0 {
            return Err(SettingsError::InvalidFov(self.fov));
        }
        if !self.near.is_finite() || self.near <= 0.0 {
            return Err(SettingsError::InvalidNearPlane(self.near));
        }
        if !self.far.is_finite() || self.far <= self.near {
            return Err(SettingsError::InvalidFarPlane {
                near: self.near,
                far: self.far,
            });
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum SettingsError {
    ZeroDimension { width: usize, height: usize },
    InvalidFov(f32),
    InvalidNearPlane(f32),
    InvalidFarPlane { near: f32, far: f32 },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::ZeroDimension { width, height } => {
                write!(f, "raster dimensions must be non-zero, got {}x{}", width, height)
            }
            SettingsError::InvalidFov(fov) => {
                write!(f, "field of view must be inside (0, 180) degrees, got {}", fov)
            }
            SettingsError::InvalidNearPlane(near) => {
                write!(f, "near plane must be positive, got {}", near)
            }
            SettingsError::InvalidFarPlane { near, far } => {
                write!(f, "far plane must lie beyond the near plane, got near {} far {}", near, far)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

/// Perspective renderer over a fixed-size texture
///
/// The camera sits at the origin looking down -z. Construction builds the
/// projection and viewport matrices once; settings do not change afterwards.
pub struct Renderer {
    settings: RenderSettings,
    projection: Mat4,
    view: Mat4,
    output: Texture,
}

impl Renderer {
    /// Vertices whose projected w lands at or below this are dropped
    const NEAR_EPSILON: f32 = 1e-6;

    pub fn new(settings: RenderSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            projection: Self::projection_matrix(&settings),
            view: Self::view_matrix(&settings),
            output: Texture::new(settings.width, settings.height),
            settings,
        })
    }

    /// Perspective matrix from the camera parameters
    ///
    /// Aspect rides on the x axis so the fov stays the vertical one. Depth
    /// maps through far / (far - near) with the projected w picking up
    /// -far * near / (far - near) of z, which keeps w positive for
    /// everything in front of the camera.
    fn projection_matrix(settings: &RenderSettings) -> Mat4 {
        let fov_scale = 1.0 / (settings.fov.to_radians() / 2.0).tan();
        let aspect = settings.height as f32 / settings.width as f32;
        let depth = settings.far / (settings.far - settings.near);

        let mut m = Mat4::from_elements([0.0; 16]);
        m.set(0, 0, aspect * fov_scale);
        m.set(1, 1, fov_scale);
        m.set(2, 2, depth);
        m.set(2, 3, 1.0);
        m.set(3, 2, -settings.near * depth);
        m
    }

    /// Viewport matrix mapping NDC [-1, 1] onto [0, width] x [0, height]
    fn view_matrix(settings: &RenderSettings) -> Mat4 {
        let half_w = settings.width as f32 / 2.0;
        let half_h = settings.height as f32 / 2.0;

        let mut m = Mat4::IDENTITY;
        m.set(0, 0, half_w);
        m.set(0, 3, half_w);
        m.set(1, 1, half_h);
        m.set(1, 3, half_h);
        m
    }

    /// Project a world-space point into texture coordinates
    ///
    /// The perspective divide happens between the projection and viewport
    /// stages. Points at or behind the camera return None.
    fn world_to_texture(&self, point: Vec4) -> Option<Vec4> {
        let clip = self.projection * point;
        if clip.w <= Self::NEAR_EPSILON {
            return None;
        }
        let ndc = clip / clip.w;
        let screen = self.view * ndc;
        Some(screen / screen.w)
    }

    /// Rasterize every mesh in the graph into the output texture
    ///
    /// The output is cleared to black first, so a frame with nothing
    /// visible comes out fully dark. Triangles with any vertex at or
    /// behind the camera are dropped whole.
    pub fn render(&mut self, graph: &SceneGraph) {
        self.output.fill(Color::BLACK);
        for id in graph.iter() {
            let node = graph.node(id);
            let Some(mesh) = node.render_info.mesh.as_ref() else {
                continue;
            };
            let world = graph.world_matrix(id);
            for triangle in mesh.transform(&world).triangles() {
                let (Some(a), Some(b), Some(c)) = (
                    self.world_to_texture(triangle.v1.position),
                    self.world_to_texture(triangle.v2.position),
                    self.world_to_texture(triangle.v3.position),
                ) else {
                    continue;
                };
                let a = (a.x as i32, a.y as i32);
                let b = (b.x as i32, b.y as i32);
                let c = (c.x as i32, c.y as i32);
                match self.settings.style {
                    DrawStyle::Filled => self.output.fill_triangle(a, b, c, Color::WHITE),
                    DrawStyle::Wireframe => self.output.draw_triangle(a, b, c, Color::WHITE),
                }
            }
        }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn output(&self) -> &Texture {
        &self.output
    }
}
