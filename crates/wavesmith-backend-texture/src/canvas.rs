//! RGB pixel buffer.

use crate::color::Color;

/// A row-major 8-bit RGB image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    /// Create a canvas filled with a color.
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        let rgb = fill.to_rgb8();
        let pixels = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixels * 3);
        for _ in 0..pixels {
            data.extend_from_slice(&rgb);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGB bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| (y as usize * self.width as usize + x as usize) * 3)
    }

    /// Get a pixel. Returns `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        let i = self.index(x, y)?;
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    /// Set a pixel. Writes outside the canvas are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        if let Some(i) = self.index(x, y) {
            self.data[i..i + 3].copy_from_slice(&rgb);
        }
    }

    /// Draw a horizontal line across the full width.
    pub fn hline(&mut self, y: u32, rgb: [u8; 3]) {
        for x in 0..self.width {
            self.set_pixel(x, y, rgb);
        }
    }

    /// Draw a vertical segment between two rows, inclusive, in either order.
    pub fn vline(&mut self, x: u32, y0: u32, y1: u32, rgb: [u8; 3]) {
        let (top, bottom) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        for y in top..=bottom {
            self.set_pixel(x, y, rgb);
        }
    }
}
