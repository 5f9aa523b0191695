//! RGBA raster with the few drawing primitives charts need.

use crate::colormap::Color;
use crate::error::{RenderError, Result};
use crate::png;

/// Largest accepted edge length in pixels.
pub const MAX_DIMENSION: usize = 16_384;

/// Row-major RGBA pixel buffer.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Canvas {
    /// A canvas filled with `background`.
    pub fn new(width: usize, height: usize, background: Color) -> Result<Self> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        let pixels = background.to_array().repeat(width * height);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        let p = &self.pixels[i..i + 4];
        Some(Color::new(p[0], p[1], p[2], p[3]))
    }

    /// Set one pixel; coordinates outside the canvas are ignored.
    pub fn set_pixel(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let i = (y as usize * self.width + x as usize) * 4;
        self.pixels[i..i + 4].copy_from_slice(&color.to_array());
    }

    pub fn fill_rect(&mut self, x: i64, y: i64, w: i64, h: i64, color: Color) {
        for yy in y.max(0)..(y + h).min(self.height as i64) {
            for xx in x.max(0)..(x + w).min(self.width as i64) {
                self.set_pixel(xx, yy, color);
            }
        }
    }

    /// One-pixel rectangle outline.
    pub fn stroke_rect(&mut self, x: i64, y: i64, w: i64, h: i64, color: Color) {
        if w <= 0 || h <= 0 {
            return;
        }
        self.draw_line(x, y, x + w - 1, y, color);
        self.draw_line(x, y + h - 1, x + w - 1, y + h - 1, color);
        self.draw_line(x, y, x, y + h - 1, color);
        self.draw_line(x + w - 1, y, x + w - 1, y + h - 1, color);
    }

    /// Bresenham line between two points, both included.
    pub fn draw_line(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Color) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.set_pixel(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Filled disc centred on `(cx, cy)`.
    pub fn fill_disc(&mut self, cx: i64, cy: i64, radius: i64, color: Color) {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Encode as PNG with optional `tEXt` metadata.
    pub fn to_png(&self, text: &[(&str, &str)]) -> Result<Vec<u8>> {
        png::encode_auto(&self.pixels, self.width, self.height, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty() {
        assert!(Canvas::new(0, 10, Color::WHITE).is_err());
        assert!(Canvas::new(10, MAX_DIMENSION + 1, Color::WHITE).is_err());
    }

    #[test]
    fn test_draw_line_endpoints() {
        let mut canvas = Canvas::new(10, 10, Color::WHITE).unwrap();
        canvas.draw_line(1, 1, 8, 5, Color::BLACK);
        assert_eq!(canvas.pixel(1, 1), Some(Color::BLACK));
        assert_eq!(canvas.pixel(8, 5), Some(Color::BLACK));
        assert_eq!(canvas.pixel(0, 9), Some(Color::WHITE));
    }

    #[test]
    fn test_clipping() {
        let mut canvas = Canvas::new(4, 4, Color::WHITE).unwrap();
        canvas.fill_disc(0, 0, 3, Color::BLACK);
        canvas.fill_rect(-10, -10, 100, 1, Color::BLACK);
        assert_eq!(canvas.pixel(0, 0), Some(Color::BLACK));
        assert_eq!(canvas.pixel(4, 0), None);
    }
}
