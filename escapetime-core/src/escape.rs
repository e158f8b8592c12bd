use crate::complex::Complex;
use crate::error::CoreError;
use crate::function::FractalFunction;

/// The escape-time classification of a single point.
///
/// Non-smooth mode yields the raw iteration count; smooth mode yields the
/// continuous (normalized) estimate that removes banding artifacts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IterationResult {
    /// Raw count in `[1, max_iterations]`; exactly `max_iterations`
    /// means the point never escaped ("in the set").
    Count(u32),

    /// Smoothed count in `[0, max_iterations]`.
    Smooth(f64),
}

impl IterationResult {
    /// The result as a float, whichever mode produced it.
    #[inline]
    pub fn value(self) -> f64 {
        match self {
            Self::Count(n) => n as f64,
            Self::Smooth(v) => v,
        }
    }

    /// Whether this result classifies the point as inside the set.
    #[inline]
    pub fn is_interior(self, max_iterations: u32) -> bool {
        self.value().ceil() as u32 == max_iterations
    }
}

/// Parameters controlling the escape-time iteration.
///
/// The cached `border_value_sq` field is recomputed on deserialization so
/// persisted view state always stays consistent.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct EscapeParams {
    /// Maximum number of iterations before declaring a point interior.
    pub max_iterations: u32,

    /// Escape threshold — once `|z|` reaches this, the orbit has diverged.
    /// Stored directly; the iteration loop compares against its square.
    pub border_value: f64,

    /// Produce `IterationResult::Smooth` instead of raw counts.
    pub smooth: bool,

    /// Cached `border_value * border_value` for the inner loop.
    #[serde(skip)]
    border_value_sq: f64,
}

/// Recomputes the cached square on load.
impl<'de> serde::Deserialize<'de> for EscapeParams {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            max_iterations: u32,
            border_value: f64,
            smooth: bool,
        }
        let raw = Raw::deserialize(deserializer)?;
        Ok(Self {
            max_iterations: raw.max_iterations,
            border_value: raw.border_value,
            smooth: raw.smooth,
            border_value_sq: raw.border_value * raw.border_value,
        })
    }
}

impl EscapeParams {
    pub const DEFAULT_MAX_ITERATIONS: u32 = 200;
    pub const DEFAULT_BORDER_VALUE: f64 = 2.0;

    pub fn new(max_iterations: u32, border_value: f64, smooth: bool) -> crate::Result<Self> {
        if max_iterations < 1 {
            return Err(CoreError::InvalidMaxIterations(max_iterations));
        }
        // A threshold at or below 1 makes every orbit escape degenerately.
        if border_value <= 1.0 || !border_value.is_finite() {
            return Err(CoreError::InvalidBorderValue(border_value));
        }
        Ok(Self {
            max_iterations,
            border_value,
            smooth,
            border_value_sq: border_value * border_value,
        })
    }

    /// Pre-computed squared threshold for the inner loop.
    #[inline]
    pub fn border_value_sq(&self) -> f64 {
        self.border_value_sq
    }

    /// Return a copy with the smooth flag changed.
    pub fn with_smooth(self, smooth: bool) -> Self {
        Self { smooth, ..self }
    }
}

impl Default for EscapeParams {
    fn default() -> Self {
        Self {
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            border_value: Self::DEFAULT_BORDER_VALUE,
            smooth: false,
            border_value_sq: Self::DEFAULT_BORDER_VALUE * Self::DEFAULT_BORDER_VALUE,
        }
    }
}

/// Iterate a single point until its orbit diverges or the bound is hit.
///
/// `iteration` counts the recurrence application in flight, starting at 1;
/// an orbit that diverges during application `n` yields `n`, and an orbit
/// that never diverges yields exactly `max_iterations`. Always terminates
/// within `max_iterations` loop passes.
///
/// The smoothed estimate is `max(0, n − log₂(max(1, log₂|z|)))`, clamped
/// at zero; with the standard threshold of 2, an orbit that never
/// diverges keeps `log₂|z| ≤ 1` and smooths to exactly `max_iterations`.
pub fn calculate(
    point: Complex,
    function: &FractalFunction,
    params: &EscapeParams,
) -> IterationResult {
    let border_sq = params.border_value_sq();
    let mut z = function.starting_value(point);
    let c = function.constant(point);

    let mut iteration: u32 = 1;
    while z.norm_sq() < border_sq && iteration < params.max_iterations {
        z = FractalFunction::apply(z, c);
        if z.norm_sq() >= border_sq {
            break;
        }
        iteration += 1;
    }

    if params.smooth {
        let nu = iteration as f64 - z.norm().log2().max(1.0).log2();
        IterationResult::Smooth(nu.max(0.0))
    } else {
        IterationResult::Count(iteration)
    }
}
