use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::error::CoreError;

/// Raster dimensions in pixels, both guaranteed > 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RasterSize {
    pub width: u32,
    pub height: u32,
}

impl RasterSize {
    pub fn new(width: u32, height: u32) -> crate::Result<Self> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidRasterSize { width, height });
        }
        Ok(Self { width, height })
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// The visible rectangle of the complex plane.
///
/// `top` is the imaginary bound mapped to pixel row 0. The complex plane's
/// imaginary axis increases upward, so with `top > bottom` increasing
/// pixel y moves toward decreasing imaginary values — the usual screen
/// orientation. The mapping honors whatever bounds the caller supplies;
/// the core never mutates them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl ViewportRect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> crate::Result<Self> {
        let rect = Self {
            left,
            top,
            right,
            bottom,
        };
        if ![left, top, right, bottom].iter().all(|b| b.is_finite()) {
            return Err(CoreError::InvalidViewport {
                reason: format!("bounds must be finite, got {rect:?}"),
            });
        }
        if rect.width() == 0.0 || rect.height() == 0.0 {
            return Err(CoreError::InvalidViewport {
                reason: format!("spans must be nonzero, got {rect:?}"),
            });
        }
        Ok(rect)
    }

    /// Default view framing the full Mandelbrot set.
    ///
    /// The set fits in roughly `[-2.0, 0.47] × [-1.12, 1.12]`; this
    /// rectangle adds a margin for breathing room.
    pub fn default_mandelbrot() -> Self {
        Self {
            left: -2.55,
            top: 1.3,
            right: 1.05,
            bottom: -1.3,
        }
    }

    /// Default view for Julia sets, centred on the origin.
    ///
    /// Julia sets for typical parameters fit within `|z| < 2`.
    pub fn default_julia() -> Self {
        Self {
            left: -2.1,
            top: 2.1,
            right: 2.1,
            bottom: -2.1,
        }
    }

    /// Signed real span, `right - left`.
    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Signed imaginary span, `bottom - top`. Negative when the
    /// imaginary axis points up-screen (`top > bottom`).
    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Centre of the rectangle.
    pub fn center(&self) -> Complex {
        Complex::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Map a pixel coordinate to a point on the complex plane.
    ///
    /// Pixel `(0, 0)` maps to `(left, top)` exactly; pixel
    /// `(width, height)` would map to `(right, bottom)` exactly
    /// (the raster covers the half-open rectangle).
    #[inline]
    pub fn pixel_to_complex(&self, x: u32, y: u32, size: RasterSize) -> Complex {
        Complex::new(
            self.left + x as f64 * (self.width() / size.width as f64),
            self.top + y as f64 * (self.height() / size.height as f64),
        )
    }

    /// Scale both spans by `factor` about the centre. `factor < 1`
    /// zooms in, `factor > 1` zooms out. Caller-side navigation helper.
    pub fn zoomed(&self, factor: f64) -> Self {
        let center = self.center();
        let half_w = self.width() * factor / 2.0;
        let half_h = self.height() * factor / 2.0;
        Self {
            left: center.re - half_w,
            top: center.im - half_h,
            right: center.re + half_w,
            bottom: center.im + half_h,
        }
    }

    /// Widen one span about the centre so that `|width / height|`
    /// matches `ratio` (typically the raster's aspect ratio). Only ever
    /// grows a span, so the original region stays visible. Aspect
    /// correction is a caller operation; the mapping itself never
    /// adjusts bounds.
    pub fn with_aspect_ratio(&self, ratio: f64) -> Self {
        let current = (self.width() / self.height()).abs();
        let (w, h) = if current < ratio {
            (self.height().abs() * ratio * self.width().signum(), self.height())
        } else {
            (self.width(), self.width().abs() / ratio * self.height().signum())
        };
        let center = self.center();
        Self {
            left: center.re - w / 2.0,
            top: center.im - h / 2.0,
            right: center.re + w / 2.0,
            bottom: center.im + h / 2.0,
        }
    }
}
