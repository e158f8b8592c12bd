use std::str::FromStr;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use escapetime_core::{
    calculate, EscapeParams, FractalFunction, IterationResult, RasterSize, ViewportRect,
};

use crate::error::RenderError;
use crate::raster::IterationRaster;

/// How the pixel set is driven through the calculator.
///
/// `Serial` is the deterministic single-thread baseline; `Parallel`
/// partitions the raster into rows and dispatches them to rayon's
/// fixed-size worker pool (sized to available hardware parallelism).
/// Both produce identical output for identical inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    Serial,
    Parallel,
}

impl FromStr for Strategy {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "serial" => Ok(Self::Serial),
            "parallel" => Ok(Self::Parallel),
            _ => Err(RenderError::UnknownScheduler(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

/// Tracks the current render generation for cancellation and progress.
///
/// Incrementing the generation signals in-flight row units to stop
/// early. A render pass snapshots the generation when it starts and
/// compares against it before scheduling each row; since every pass owns
/// a fresh output raster, a stale pass can never write into a newer
/// request's buffer. The progress counters let a UI display a bar.
#[derive(Debug, Default)]
pub struct RenderCancel {
    generation: AtomicU64,
    progress_done: AtomicUsize,
    progress_total: AtomicUsize,
}

impl RenderCancel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the current render by advancing the generation.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Read the current generation.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Reset progress for a new pass with `total` work units.
    pub fn reset_progress(&self, total: usize) {
        self.progress_total.store(total, Ordering::Relaxed);
        self.progress_done.store(0, Ordering::Relaxed);
    }

    /// Increment completed work units by one.
    pub fn inc_progress(&self) {
        self.progress_done.fetch_add(1, Ordering::Relaxed);
    }

    /// Read the current progress as `(done, total)`.
    pub fn progress(&self) -> (usize, usize) {
        (
            self.progress_done.load(Ordering::Relaxed),
            self.progress_total.load(Ordering::Relaxed),
        )
    }
}

// ---------------------------------------------------------------------------
// Scheduling
// ---------------------------------------------------------------------------

/// The outcome of a scheduling pass.
///
/// Contains raw iteration data (no coloring) — the caller applies a
/// [`ColorMapper`](crate::ColorMapper) to produce displayable pixels.
/// A cancelled pass leaves unscheduled rows at their fill value and must
/// not be displayed.
#[derive(Debug)]
pub struct RenderResult {
    pub raster: IterationRaster,
    pub elapsed: Duration,
    pub cancelled: bool,
    pub rows_rendered: usize,
}

/// Fill one output row. Pure per-pixel work: map the coordinate, run the
/// escape-time loop, write the cell. Rows are the unit of scheduling, so
/// concurrent units never share a write target.
fn compute_row(
    y: u32,
    row: &mut [IterationResult],
    function: &FractalFunction,
    params: &EscapeParams,
    size: RasterSize,
    viewport: &ViewportRect,
) {
    for (x, cell) in row.iter_mut().enumerate() {
        let point = viewport.pixel_to_complex(x as u32, y, size);
        *cell = calculate(point, function, params);
    }
}

/// Drive the calculator over every pixel of the raster.
///
/// The serial strategy iterates rows in order on the calling thread; the
/// parallel strategy hands each row to rayon's worker pool and blocks
/// until the last row completes. Output is identical either way.
pub fn compute_raster(
    function: &FractalFunction,
    params: &EscapeParams,
    size: RasterSize,
    viewport: &ViewportRect,
    strategy: Strategy,
    cancel: &RenderCancel,
) -> RenderResult {
    let start = Instant::now();
    let gen = cancel.generation();
    let mut raster = IterationRaster::new(size, params.max_iterations);
    cancel.reset_progress(size.height as usize);

    debug!(
        width = size.width,
        height = size.height,
        ?strategy,
        smooth = params.smooth,
        "starting scheduling pass"
    );

    let rendered = AtomicUsize::new(0);
    let row_len = size.width as usize;
    match strategy {
        Strategy::Serial => {
            for (y, row) in raster.data.chunks_mut(row_len).enumerate() {
                if cancel.generation() != gen {
                    break;
                }
                compute_row(y as u32, row, function, params, size, viewport);
                rendered.fetch_add(1, Ordering::Relaxed);
                cancel.inc_progress();
            }
        }
        Strategy::Parallel => {
            raster
                .data
                .par_chunks_mut(row_len)
                .enumerate()
                .for_each(|(y, row)| {
                    if cancel.generation() != gen {
                        return;
                    }
                    compute_row(y as u32, row, function, params, size, viewport);
                    rendered.fetch_add(1, Ordering::Relaxed);
                    cancel.inc_progress();
                });
        }
    }

    let rows_rendered = rendered.load(Ordering::Relaxed);
    let cancelled = cancel.generation() != gen;
    let elapsed = start.elapsed();
    info!(
        elapsed_ms = elapsed.as_millis(),
        rows_rendered, cancelled, "scheduling pass complete"
    );

    RenderResult {
        raster,
        elapsed,
        cancelled,
        rows_rendered,
    }
}
