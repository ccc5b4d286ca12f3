//! Luminance-to-glyph encoding
//!
//! Turns a rendered framebuffer into terminal text: each cell's luminance
//! picks a character from an ordered darkest-to-brightest palette. The
//! output frame is plain printable ASCII; escape sequences are the
//! display's business, never embedded here.

use super::texture::Texture;

/// Default palette, darkest to brightest
pub const LUMINANCE_PALETTE: &str = " .:-=+*#%@";

/// Map a luminance in [0,1] to a glyph from the default palette
pub fn luminance_to_ascii(luminance: f32) -> char {
    let bytes = LUMINANCE_PALETTE.as_bytes();
    let index = (luminance * (bytes.len() - 1) as f32).floor() as i32;
    bytes[index.clamp(0, bytes.len() as i32 - 1) as usize] as char
}

/// Texture-to-text encoder with a configurable palette
#[derive(Debug, Clone)]
pub struct AsciiEncoder {
    palette: Vec<char>,
}

impl AsciiEncoder {
    pub fn new() -> Self {
        Self::with_palette(LUMINANCE_PALETTE)
    }

    /// Palette must be non-empty and ordered darkest to brightest
    pub fn with_palette(palette: &str) -> Self {
        assert!(!palette.is_empty(), "glyph palette must not be empty");
        Self {
            palette: palette.chars().collect(),
        }
    }

    /// Glyph for a luminance in [0,1]; out-of-range values clamp
    pub fn glyph(&self, luminance: f32) -> char {
        let k = self.palette.len();
        let index = (luminance * (k - 1) as f32).floor() as i32;
        self.palette[index.clamp(0, k as i32 - 1) as usize]
    }

    /// Render the texture as text, one line per pixel row
    pub fn encode(&self, texture: &Texture) -> String {
        let mut frame = String::with_capacity((texture.width() + 1) * texture.height());
        for y in 0..texture.height() as i32 {
            for x in 0..texture.width() as i32 {
                frame.push(self.glyph(texture.get(x, y).luminance()));
            }
            frame.push('\n');
        }
        frame
    }
}

impl Default for AsciiEncoder {
    fn default() -> Self {
        AsciiEncoder::new()
    }
}
