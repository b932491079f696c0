//! Depth-to-displacement mapping for the column copy chain
//!
//! Each canvas pixel at column `x` (past the seed region) copies the pixel at
//! `shift = trunc(x - pattern_width + depth / 255 * shift_factor)` in the same
//! row. Flat depth yields `x - pattern_width`, i.e. exact repetition with a
//! period of one pattern width; nearer depth shortens the period.

use crate::io::configuration::MAX_DEPTH;
use ndarray::{Array2, ArrayView2, Zip};

/// Shift for a single pixel
///
/// The conversion truncates toward zero, so a negative intermediate value
/// rounds up rather than down.
#[allow(clippy::suboptimal_flops)]
pub fn depth_shift(depth: u8, x: usize, pattern_width: usize, shift_factor: i32) -> isize {
    let proportion = f64::from(depth) / f64::from(MAX_DEPTH);
    // Round the depth term before adding the offset; a fused multiply-add
    // moves some negative offsets across an integer boundary
    let offset = x as f64 - pattern_width as f64;
    (offset + proportion * f64::from(shift_factor)) as isize
}

/// Column a pixel at `x` copies from, if that column is already resolved
///
/// Only columns strictly left of `x` are finalized when `x` is processed;
/// anything else leaves the pixel black.
pub fn resolve_source(shift: isize, x: usize) -> Option<usize> {
    usize::try_from(shift).ok().filter(|&source| source < x)
}

/// Per-pixel horizontal displacements for one depth map
#[derive(Debug, Clone)]
pub struct ShiftField {
    shifts: Array2<isize>,
    pattern_width: usize,
}

impl ShiftField {
    /// Compute the shift of every pixel of `depth_map`
    pub fn compute(depth_map: &ArrayView2<'_, u8>, pattern_width: usize, shift_factor: i32) -> Self {
        let shifts = Zip::indexed(depth_map)
            .map_collect(|(_, x), &depth| depth_shift(depth, x, pattern_width, shift_factor));
        Self {
            shifts,
            pattern_width,
        }
    }

    /// Raw shift at `(y, x)`
    pub fn get(&self, y: usize, x: usize) -> Option<isize> {
        self.shifts.get((y, x)).copied()
    }

    /// Source column for `(y, x)`, or `None` for seed pixels and pixels left black
    pub fn source_column(&self, y: usize, x: usize) -> Option<usize> {
        if x < self.pattern_width {
            return None;
        }
        self.get(y, x).and_then(|shift| resolve_source(shift, x))
    }

    /// Number of non-seed pixels whose shift does not resolve to an earlier column
    pub fn unresolved_count(&self) -> usize {
        self.shifts
            .indexed_iter()
            .filter(|&((y, x), _)| x >= self.pattern_width && self.source_column(y, x).is_none())
            .count()
    }

    /// All shifts as a `(height, width)` array
    pub const fn shifts(&self) -> &Array2<isize> {
        &self.shifts
    }

    /// Width of the seed region the field was computed for
    pub const fn pattern_width(&self) -> usize {
        self.pattern_width
    }
}
