use thiserror::Error;

/// Errors originating from the core engine.
///
/// Every variant is raised at construction/validation time or by an
/// explicit arithmetic precondition violation — the iteration loop
/// itself cannot fail for validated inputs.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("division by zero")]
    DivideByZero,

    #[error("invalid max iterations: {0} (must be >= 1)")]
    InvalidMaxIterations(u32),

    #[error("invalid border value: {0} (must be > 1.0)")]
    InvalidBorderValue(f64),

    #[error("invalid raster size: {width}×{height} (both dimensions must be > 0)")]
    InvalidRasterSize { width: u32, height: u32 },

    #[error("invalid viewport: {reason}")]
    InvalidViewport { reason: String },
}
