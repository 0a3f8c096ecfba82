//! Floating-point image buffer and PNG output.

use std::path::Path;

use glint_math::{Color, Interval};
use thiserror::Error;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),
}

pub type OutputResult<T> = Result<T, OutputError>;

/// RGBA pixel, unclamped.
pub type Rgba = [f64; 4];

/// Row-major RGBA image. Values outside [0, 1] are kept until conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pixels: Vec<Rgba>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with opaque black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0.0, 0.0, 0.0, 1.0]; width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) outside {}x{} image",
            x,
            y,
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Rgba {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y) to an opaque colour.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.set_rgba(x, y, [color.x, color.y, color.z, 1.0]);
    }

    /// Set the pixel at (x, y) including alpha.
    pub fn set_rgba(&mut self, x: u32, y: u32, rgba: Rgba) {
        let i = self.index(x, y);
        self.pixels[i] = rgba;
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Convert to 8-bit RGBA bytes, clamping every channel to [0, 1].
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for pixel in &self.pixels {
            bytes.extend(pixel.iter().map(|&c| channel_to_u8(c)));
        }
        bytes
    }

    /// Encode the image as an 8-bit RGBA PNG.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> OutputResult<()> {
        image::save_buffer_with_format(
            path.as_ref(),
            &self.to_rgba8(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )?;
        Ok(())
    }
}

/// Clamp a channel to [0, 1] and scale to a byte, truncating.
///
/// NaN maps to 255 and infinities to the nearer end of the range.
#[inline]
pub fn channel_to_u8(c: f64) -> u8 {
    (255.0 * Interval::UNIT.clamp(c)) as u8
}
