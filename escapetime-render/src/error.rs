use thiserror::Error;

/// Errors originating from the rendering pipeline.
///
/// Configuration errors (`Unknown*`, palette arity) are raised at
/// construction time, before any pixel computation starts.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("palette must contain at least one color")]
    EmptyPalette,

    #[error("gradient palette needs at least 2 colors, got {len}")]
    PaletteTooSmall { len: usize },

    #[error("unknown function: {0:?}")]
    UnknownFunction(String),

    #[error("unknown color mapper: {0:?}")]
    UnknownColorMapper(String),

    #[error("unknown scheduler: {0:?}")]
    UnknownScheduler(String),

    #[error("the selected function has no tunable constant")]
    ConstantNotSupported,

    #[error("render cancelled")]
    Cancelled,

    #[error(transparent)]
    Core(#[from] escapetime_core::CoreError),
}
