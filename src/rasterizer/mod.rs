//! Software rasterizer
//!
//! Homogeneous math, triangle meshes, scan-conversion primitives and the
//! perspective pipeline that turns a scene into a grayscale texture, plus
//! the glyph encoder that turns the texture into terminal text.

mod draw;
mod glyph;
mod math;
mod mesh;
mod render;
mod texture;

pub use glyph::{luminance_to_ascii, AsciiEncoder, LUMINANCE_PALETTE};
pub use math::{Mat4, Quat, Vec4};
pub use mesh::{Mesh, MeshVertex, Triangle};
pub use render::{DrawStyle, RenderSettings, Renderer, SettingsError};
pub use texture::{Color, Texture};
