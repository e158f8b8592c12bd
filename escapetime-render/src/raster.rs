use escapetime_core::{IterationResult, RasterSize};

/// Per-pixel `IterationResult` data for a full frame, row-major.
///
/// This is the raw output of the scheduler before coloring. Keeping
/// iteration data separate from colored pixels enables palette switching
/// without re-computing iterations. Each render request produces a fresh
/// raster that the caller owns exclusively.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationRaster {
    pub width: u32,
    pub height: u32,
    pub max_iterations: u32,
    pub data: Vec<IterationResult>,
}

impl IterationRaster {
    pub fn new(size: RasterSize, max_iterations: u32) -> Self {
        Self {
            width: size.width,
            height: size.height,
            max_iterations,
            data: vec![IterationResult::Count(0); size.pixel_count()],
        }
    }

    /// The result at pixel `(x, y)`.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> IterationResult {
        self.data[(y * self.width + x) as usize]
    }
}

/// An RGBA pixel buffer representing a rendered image.
///
/// 4 bytes per pixel, row-major. Written once per render, then handed
/// off immutably to the display layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RenderBuffer {
    /// Create a new buffer filled with the transparent sentinel.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; width as usize * height as usize * 4],
        }
    }

    /// The RGBA bytes of pixel `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * self.width + x) * 4) as usize;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }
}
