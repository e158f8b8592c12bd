pub mod error;
pub mod fractal;
pub mod mapper;
pub mod palette;
pub mod raster;
pub mod scheduler;

pub use error::RenderError;
pub use fractal::{Fractal, FunctionKind};
pub use mapper::{ColorMapper, MapperKind};
pub use palette::{builtin_palettes, Palette, Rgba, BLACK, TRANSPARENT, WHITE};
pub use raster::{IterationRaster, RenderBuffer};
pub use scheduler::{compute_raster, RenderCancel, RenderResult, Strategy};

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
