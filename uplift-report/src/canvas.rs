//! RGB Canvas
//!
//! In-memory raster with clipped drawing primitives. Coordinates are signed so
//! callers can position shapes partially (or fully) off-canvas; anything outside
//! `[0, width) × [0, height)` is silently dropped.

use crate::font::{self, GLYPH_ADVANCE};
use serde::{Deserialize, Serialize};

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Pure white
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    /// Pure black
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// Construct a color from channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as `[r, g, b]`
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

/// Row-major grid of RGB pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Canvas {
    /// Create a canvas with every pixel set to `fill`
    pub fn new(width: u32, height: u32, fill: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the canvas has no pixels
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// All pixels, row-major
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Pixel rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Rgb]> {
        // chunks_exact panics on zero; an empty canvas has no rows anyway
        self.pixels.chunks_exact(self.width.max(1) as usize)
    }

    /// Color at (`x`, `y`), or `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        self.index(i64::from(x), i64::from(y)).map(|i| self.pixels[i])
    }

    /// Set one pixel; returns `false` when the point was clipped
    pub fn set_pixel(&mut self, x: i64, y: i64, color: Rgb) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.pixels[i] = color;
                true
            }
            None => false,
        }
    }

    /// Fill the `w`×`h` rectangle at (`x`, `y`), clipped to the canvas
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgb) {
        let x0 = i64::from(x).max(0);
        let y0 = i64::from(y).max(0);
        let x1 = (i64::from(x) + i64::from(w)).min(i64::from(self.width));
        let y1 = (i64::from(y) + i64::from(h)).min(i64::from(self.height));
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let stride = self.width as usize;
        for row in y0 as usize..y1 as usize {
            let start = row * stride;
            self.pixels[start + x0 as usize..start + x1 as usize].fill(color);
        }
    }

    /// Render `text` with its top-left corner at (`x`, `y`)
    ///
    /// Returns the cursor x position after the last character.
    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Rgb) -> i64 {
        let mut cursor = i64::from(x);
        let y = i64::from(y);
        for ch in font::normalize(text) {
            for (col, row) in font::glyph(ch).lit_cells() {
                self.set_pixel(cursor + i64::from(col), y + i64::from(row), color);
            }
            cursor += i64::from(GLYPH_ADVANCE);
        }
        cursor
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
}
