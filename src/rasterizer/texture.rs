//! Color cells and the framebuffer they live in
//!
//! The Texture is the render target: a flat, exclusively owned grid of RGBA
//! cells. Out-of-bounds writes are dropped silently since partially
//! offscreen geometry is normal, not an error.

use std::ops::{Add, Mul, Sub};

/// RGBA color, one byte per channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };

    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// From normalized floats; values outside [0,1] clamp
    pub fn from_float(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: (r * 255.0) as u8,
            g: (g * 255.0) as u8,
            b: (b * 255.0) as u8,
            a: (a * 255.0) as u8,
        }
    }

    /// Opaque grey of the given brightness in [0,1]
    pub fn greyscale(v: f32) -> Self {
        Color::from_float(v, v, v, 1.0)
    }

    /// Perceptual brightness in [0,1], BT.709 weights
    pub fn luminance(self) -> f32 {
        let r = self.r as f32 / 255.0;
        let g = self.g as f32 / 255.0;
        let b = self.b as f32 / 255.0;
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }

    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Add for Color {
    type Output = Color;
    fn add(self, other: Color) -> Color {
        Color::new(
            self.r.saturating_add(other.r),
            self.g.saturating_add(other.g),
            self.b.saturating_add(other.b),
            self.a.saturating_add(other.a),
        )
    }
}

impl Sub for Color {
    type Output = Color;
    fn sub(self, other: Color) -> Color {
        Color::new(
            self.r.saturating_sub(other.r),
            self.g.saturating_sub(other.g),
            self.b.saturating_sub(other.b),
            self.a.saturating_sub(other.a),
        )
    }
}

/// Per-channel modulation in normalized space
impl Mul for Color {
    type Output = Color;
    fn mul(self, other: Color) -> Color {
        Color::from_float(
            (self.r as f32 / 255.0) * (other.r as f32 / 255.0),
            (self.g as f32 / 255.0) * (other.g as f32 / 255.0),
            (self.b as f32 / 255.0) * (other.b as f32 / 255.0),
            (self.a as f32 / 255.0) * (other.a as f32 / 255.0),
        )
    }
}

impl Mul<f32> for Color {
    type Output = Color;
    fn mul(self, f: f32) -> Color {
        Color::from_float(
            (self.r as f32 / 255.0) * f,
            (self.g as f32 / 255.0) * f,
            (self.b as f32 / 255.0) * f,
            (self.a as f32 / 255.0) * f,
        )
    }
}

/// Owned pixel grid; cloning deep-copies the cells
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Texture {
    /// Black texture of the given size
    pub fn new(width: usize, height: usize) -> Self {
        Texture::with_color(width, height, Color::BLACK)
    }

    pub fn with_color(width: usize, height: usize, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    /// Cell color, black when out of bounds
    pub fn get(&self, x: i32, y: i32) -> Color {
        match self.index(x, y) {
            Some(i) => self.pixels[i],
            None => Color::BLACK,
        }
    }

    /// Write a cell; out-of-bounds writes are dropped
    pub fn set(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Overwrite every cell
    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Row-major RGBA8 bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for pixel in &self.pixels {
            bytes.extend_from_slice(&pixel.to_bytes());
        }
        bytes
    }

    /// Export the frame as a PNG file
    pub fn save_png<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), String> {
        let img = image::RgbaImage::from_raw(self.width as u32, self.height as u32, self.to_bytes())
            .ok_or_else(|| "framebuffer size does not match pixel data".to_string())?;
        img.save(path).map_err(|e| format!("failed to write PNG: {}", e))
    }
}
