use serde::{Deserialize, Serialize};

use crate::complex::Complex;

/// The fractal recurrence variant: which `z₀` and `c` feed `z² + c`.
///
/// Julia's constant lives on the variant as plain data rather than in
/// shared mutable state, so a render pass that holds a `FractalFunction`
/// reads one consistent constant for every pixel. The caller swaps the
/// constant between renders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FractalFunction {
    /// `z₀ = 0`, `c` is the point on the complex plane.
    Mandelbrot,
    /// `z₀` is the point on the complex plane, `c` is a fixed constant.
    Julia { c: Complex },
}

impl FractalFunction {
    /// A visually interesting default Julia constant: `c = -0.7 + 0.27015i`.
    pub fn default_julia() -> Self {
        Self::Julia {
            c: Complex::new(-0.7, 0.27015),
        }
    }

    /// The shared recurrence step: `f(z, c) = z² + c`.
    #[inline]
    pub fn apply(z: Complex, c: Complex) -> Complex {
        z * z + c
    }

    /// `z₀` for the given point.
    #[inline]
    pub fn starting_value(&self, point: Complex) -> Complex {
        match self {
            Self::Mandelbrot => Complex::ZERO,
            Self::Julia { .. } => point,
        }
    }

    /// `c` for the given point.
    #[inline]
    pub fn constant(&self, point: Complex) -> Complex {
        match self {
            Self::Mandelbrot => point,
            Self::Julia { c } => *c,
        }
    }
}
