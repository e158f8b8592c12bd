use std::str::FromStr;

use rayon::prelude::*;

use escapetime_core::IterationResult;

use crate::error::RenderError;
use crate::palette::{lerp_color, Palette, Rgba, TRANSPARENT};
use crate::raster::{IterationRaster, RenderBuffer};

/// Color-mapper family identifier, for selection by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapperKind {
    Threshold,
    Gradient,
}

impl FromStr for MapperKind {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "threshold" => Ok(Self::Threshold),
            "gradient" => Ok(Self::Gradient),
            _ => Err(RenderError::UnknownColorMapper(s.to_string())),
        }
    }
}

/// Converts iteration results into pixel colors.
///
/// `Threshold` paints in-set points a fixed color and everything else
/// the transparent sentinel. `Gradient` interpolates a palette along the
/// iteration range, which pairs naturally with smoothed results.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorMapper {
    Threshold { inside: Rgba },
    Gradient { palette: Palette },
}

impl ColorMapper {
    /// A threshold mapper with the given in-set color.
    pub fn threshold(inside: Rgba) -> Self {
        Self::Threshold { inside }
    }

    /// A gradient mapper over `palette`.
    ///
    /// Fails fast with [`RenderError::PaletteTooSmall`] when the palette
    /// cannot describe a gradient (fewer than 2 colors).
    pub fn gradient(palette: Palette) -> crate::Result<Self> {
        if palette.len() < 2 {
            return Err(RenderError::PaletteTooSmall { len: palette.len() });
        }
        Ok(Self::Gradient { palette })
    }

    /// Map one iteration result to a color.
    pub fn color(&self, result: IterationResult, max_iterations: u32) -> Rgba {
        match self {
            Self::Threshold { inside } => {
                if result.is_interior(max_iterations) {
                    *inside
                } else {
                    TRANSPARENT
                }
            }
            Self::Gradient { palette } => gradient_color(palette, result.value(), max_iterations),
        }
    }

    /// Colorize an entire iteration raster into an RGBA pixel buffer.
    pub fn colorize(&self, raster: &IterationRaster) -> RenderBuffer {
        let mut pixels = vec![0u8; raster.data.len() * 4];
        pixels
            .par_chunks_mut(4)
            .zip(raster.data.par_iter())
            .for_each(|(pixel, &result)| {
                pixel.copy_from_slice(&self.color(result, raster.max_iterations));
            });
        RenderBuffer {
            width: raster.width,
            height: raster.height,
            pixels,
        }
    }
}

/// Interpolate `palette` at `v ∈ [0, max_iterations]`.
///
/// The palette's `K` colors are evenly spaced stops along the iteration
/// range, `K − 1` segments of `max_iterations / (K − 1)` each: `v = 0`
/// yields the first color exactly and `v = max_iterations` the last.
fn gradient_color(palette: &Palette, v: f64, max_iterations: u32) -> Rgba {
    let colors = palette.colors();
    let k = colors.len();
    let v = v.clamp(0.0, max_iterations as f64);
    let segment_width = max_iterations as f64 / (k - 1) as f64;

    // Highest stop strictly below v; v = 0 sits on the first stop.
    let mut lower = 0;
    for i in 0..k {
        if (i as f64) * segment_width < v {
            lower = i;
        }
    }
    let higher = (lower + 1).min(k - 1);
    let overflow = v - lower as f64 * segment_width;
    lerp_color(colors[lower], colors[higher], overflow / segment_width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{grayscale, BLACK, WHITE};
    use escapetime_core::RasterSize;

    const MAX: u32 = 100;

    fn gradient_bw() -> ColorMapper {
        ColorMapper::gradient(grayscale()).unwrap()
    }

    #[test]
    fn mapper_kind_from_identifier() {
        assert_eq!("threshold".parse::<MapperKind>().unwrap(), MapperKind::Threshold);
        assert_eq!("Gradient".parse::<MapperKind>().unwrap(), MapperKind::Gradient);
        assert!(matches!(
            "histogram".parse::<MapperKind>(),
            Err(RenderError::UnknownColorMapper(_))
        ));
    }

    #[test]
    fn gradient_needs_two_colors() {
        let single = Palette::new("Single", vec![BLACK]).unwrap();
        assert!(matches!(
            ColorMapper::gradient(single),
            Err(RenderError::PaletteTooSmall { len: 1 })
        ));
    }

    #[test]
    fn threshold_paints_interior_only() {
        let mapper = ColorMapper::threshold(BLACK);
        assert_eq!(mapper.color(IterationResult::Count(MAX), MAX), BLACK);
        assert_eq!(mapper.color(IterationResult::Count(1), MAX), TRANSPARENT);
        assert_eq!(mapper.color(IterationResult::Count(MAX - 1), MAX), TRANSPARENT);
    }

    #[test]
    fn threshold_rounds_smooth_results_up() {
        let mapper = ColorMapper::threshold(WHITE);
        assert_eq!(mapper.color(IterationResult::Smooth(MAX as f64), MAX), WHITE);
        assert_eq!(
            mapper.color(IterationResult::Smooth(42.3), MAX),
            TRANSPARENT
        );
    }

    #[test]
    fn gradient_zero_is_first_color() {
        let c = gradient_bw().color(IterationResult::Smooth(0.0), MAX);
        assert_eq!(c, BLACK);
    }

    #[test]
    fn gradient_max_is_last_color() {
        let c = gradient_bw().color(IterationResult::Smooth(MAX as f64), MAX);
        assert_eq!(c, WHITE);
        let c = gradient_bw().color(IterationResult::Count(MAX), MAX);
        assert_eq!(c, WHITE);
    }

    #[test]
    fn gradient_midpoint_is_even_blend() {
        let c = gradient_bw().color(IterationResult::Smooth(MAX as f64 / 2.0), MAX);
        let expected = lerp_color(BLACK, WHITE, 0.5);
        assert_eq!(c, expected);
    }

    #[test]
    fn gradient_endpoints_with_larger_palette() {
        let palette = Palette::new("Three", vec![BLACK, [255, 0, 0, 255], WHITE]).unwrap();
        let mapper = ColorMapper::gradient(palette).unwrap();
        assert_eq!(mapper.color(IterationResult::Smooth(0.0), MAX), BLACK);
        assert_eq!(mapper.color(IterationResult::Smooth(MAX as f64), MAX), WHITE);
        // The middle stop is hit exactly halfway along the range.
        assert_eq!(
            mapper.color(IterationResult::Smooth(MAX as f64 / 2.0), MAX),
            [255, 0, 0, 255]
        );
    }

    #[test]
    fn gradient_is_monotone_on_grayscale() {
        let mapper = gradient_bw();
        let mut last = -1i32;
        for v in [0.0, 10.0, 25.0, 50.0, 75.0, 99.0, 100.0] {
            let c = mapper.color(IterationResult::Smooth(v), MAX);
            assert!(c[0] as i32 >= last, "brightness decreased at v={v}");
            last = c[0] as i32;
        }
    }

    #[test]
    fn colorize_produces_correct_size() {
        let size = RasterSize::new(64, 48).unwrap();
        let raster = IterationRaster::new(size, MAX);
        let buf = gradient_bw().colorize(&raster);
        assert_eq!(buf.width, 64);
        assert_eq!(buf.height, 48);
        assert_eq!(buf.pixels.len(), 64 * 48 * 4);
    }

    #[test]
    fn colorize_matches_per_pixel_mapping() {
        let size = RasterSize::new(8, 4).unwrap();
        let mut raster = IterationRaster::new(size, MAX);
        for (i, cell) in raster.data.iter_mut().enumerate() {
            *cell = IterationResult::Count((i as u32 % MAX) + 1);
        }
        let mapper = gradient_bw();
        let buf = mapper.colorize(&raster);
        for y in 0..4 {
            for x in 0..8 {
                assert_eq!(buf.pixel(x, y), mapper.color(raster.get(x, y), MAX));
            }
        }
    }
}
