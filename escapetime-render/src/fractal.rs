use std::str::FromStr;

use tracing::debug;

use escapetime_core::{Complex, EscapeParams, FractalFunction, RasterSize, ViewportRect};

use crate::error::RenderError;
use crate::mapper::{ColorMapper, MapperKind};
use crate::palette::{Palette, BLACK};
use crate::raster::{IterationRaster, RenderBuffer};
use crate::scheduler::{compute_raster, RenderCancel, Strategy};

/// Function family identifier, for selection by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    Mandelbrot,
    Julia,
}

impl FromStr for FunctionKind {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mandelbrot" => Ok(Self::Mandelbrot),
            "julia" => Ok(Self::Julia),
            _ => Err(RenderError::UnknownFunction(s.to_string())),
        }
    }
}

/// A fully configured fractal: function, iteration parameters, color
/// mapper, and scheduling strategy.
///
/// Construction validates everything up front — an instance either
/// exists and can render, or was never built. One instance persists
/// across renders; the caller may retune the Julia constant between
/// passes, and each pass snapshots the function state once at the start
/// (it borrows the function immutably for the whole pass).
#[derive(Debug, Clone)]
pub struct Fractal {
    function: FractalFunction,
    params: EscapeParams,
    mapper: ColorMapper,
    strategy: Strategy,
}

impl Fractal {
    pub fn new(
        function: FractalFunction,
        params: EscapeParams,
        mapper: ColorMapper,
        strategy: Strategy,
    ) -> Self {
        Self {
            function,
            params,
            mapper,
            strategy,
        }
    }

    /// Build a fractal from selection identifiers, e.g. as chosen in a
    /// UI dropdown: `("julia", c, "gradient", palette, "parallel", params)`.
    ///
    /// Unknown identifiers fail here, before any pixel computation. The
    /// threshold mapper paints in-set points black; `julia_constant` is
    /// ignored for functions that carry no constant.
    pub fn from_identifiers(
        function_id: &str,
        julia_constant: Complex,
        mapper_id: &str,
        palette: Palette,
        strategy_id: &str,
        params: EscapeParams,
    ) -> crate::Result<Self> {
        let function = match function_id.parse::<FunctionKind>()? {
            FunctionKind::Mandelbrot => FractalFunction::Mandelbrot,
            FunctionKind::Julia => FractalFunction::Julia { c: julia_constant },
        };
        let mapper = match mapper_id.parse::<MapperKind>()? {
            MapperKind::Threshold => ColorMapper::threshold(BLACK),
            MapperKind::Gradient => ColorMapper::gradient(palette)?,
        };
        let strategy = strategy_id.parse::<Strategy>()?;
        debug!(function_id, mapper_id, strategy_id, "fractal configured");
        Ok(Self::new(function, params, mapper, strategy))
    }

    pub fn function(&self) -> &FractalFunction {
        &self.function
    }

    pub fn params(&self) -> &EscapeParams {
        &self.params
    }

    pub fn mapper(&self) -> &ColorMapper {
        &self.mapper
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Retune the Julia constant between renders.
    ///
    /// Fails with [`RenderError::ConstantNotSupported`] when the
    /// selected function has no constant to tune.
    pub fn set_julia_constant(&mut self, c: Complex) -> crate::Result<()> {
        match &mut self.function {
            FractalFunction::Julia { c: constant } => {
                *constant = c;
                Ok(())
            }
            FractalFunction::Mandelbrot => Err(RenderError::ConstantNotSupported),
        }
    }

    /// Run the scheduling pass and return the pre-color iteration
    /// raster, e.g. for palette switching without recomputing.
    ///
    /// A cancelled pass yields [`RenderError::Cancelled`] rather than a
    /// partially written raster.
    pub fn compute(
        &self,
        size: RasterSize,
        viewport: &ViewportRect,
        cancel: &RenderCancel,
    ) -> crate::Result<IterationRaster> {
        let result = compute_raster(
            &self.function,
            &self.params,
            size,
            viewport,
            self.strategy,
            cancel,
        );
        if result.cancelled {
            return Err(RenderError::Cancelled);
        }
        Ok(result.raster)
    }

    /// Render a full frame: schedule iterations, then colorize.
    ///
    /// The returned buffer is written once and handed off; display and
    /// compositing belong to the caller.
    pub fn render(
        &self,
        size: RasterSize,
        viewport: &ViewportRect,
        cancel: &RenderCancel,
    ) -> crate::Result<RenderBuffer> {
        let raster = self.compute(size, viewport, cancel)?;
        Ok(self.mapper.colorize(&raster))
    }
}
