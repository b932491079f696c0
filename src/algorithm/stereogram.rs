//! Autostereogram synthesis by sequential column reconstruction
//!
//! The leftmost `pattern_width` columns of the canvas are a verbatim copy of
//! the (vertically tiled) pattern. Every later column is copied from an
//! earlier column of the same row, chosen by the [`ShiftField`]. Because a
//! column may read from any finalized column to its left, columns form a
//! copy chain and must be resolved strictly left to right. Rows share no
//! state, so they are resolved in parallel.

use crate::algorithm::shift::{ShiftField, resolve_source};
use crate::io::configuration::{CHANNELS, DEFAULT_SHIFT_FACTOR};
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::grid::{Canvas, validate_depth_map, validate_pattern};
use crate::spatial::tiling::tile_rows;
use log::{debug, warn};
use ndarray::{Array3, ArrayView1, ArrayView2, ArrayView3, ArrayViewMut2, Axis, s};
use rayon::prelude::*;

/// Geometry parameters for stereogram generation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StereogramConfig {
    /// Horizontal displacement contributed by full (255) depth
    pub shift_factor: i32,
}

impl Default for StereogramConfig {
    fn default() -> Self {
        Self {
            shift_factor: DEFAULT_SHIFT_FACTOR,
        }
    }
}

impl StereogramConfig {
    /// Check that the shift factor is non-negative
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `shift_factor` is negative
    pub fn validate(&self) -> Result<()> {
        if self.shift_factor < 0 {
            return Err(invalid_parameter(
                "shift_factor",
                &self.shift_factor,
                &"must be non-negative",
            ));
        }
        Ok(())
    }
}

/// Builds autostereogram canvases from depth maps and patterns
#[derive(Clone, Copy, Debug, Default)]
pub struct AutostereogramEngine {
    config: StereogramConfig,
}

impl AutostereogramEngine {
    /// Create an engine with validated parameters
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the configuration is invalid
    pub fn new(config: StereogramConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Parameters this engine was built with
    pub const fn config(&self) -> StereogramConfig {
        self.config
    }

    /// Shift field the engine would use for `depth_map` with a pattern of `pattern_width`
    pub fn shift_field(&self, depth_map: &ArrayView2<'_, u8>, pattern_width: usize) -> ShiftField {
        ShiftField::compute(depth_map, pattern_width, self.config.shift_factor)
    }

    /// Generate a stereogram canvas
    ///
    /// The canvas has the depth map's height and width and the pattern's
    /// channel count. A pattern of a different height is tiled (or cropped)
    /// to the depth map height first. Inputs are not modified.
    ///
    /// # Errors
    ///
    /// Returns an error before any allocation if:
    /// - The depth map or pattern has an empty axis (`InvalidDimension`)
    /// - The pattern does not have three channels (`DimensionMismatch`)
    pub fn generate(
        &self,
        depth_map: &ArrayView2<'_, u8>,
        pattern: &ArrayView3<'_, u8>,
    ) -> Result<Canvas> {
        let canvas_extent = validate_depth_map(depth_map)?;
        let pattern_extent = validate_pattern(pattern)?;

        let tiled;
        let seed_pattern = if pattern_extent.height == canvas_extent.height {
            pattern.view()
        } else {
            tiled = tile_rows(pattern, canvas_extent.height)?;
            tiled.view()
        };

        let pattern_width = pattern_extent.width;
        let seed_width = pattern_width.min(canvas_extent.width);
        let field = self.shift_field(depth_map, pattern_width);

        debug!(
            "Generating {}x{} stereogram (pattern width {pattern_width}, shift factor {})",
            canvas_extent.height, canvas_extent.width, self.config.shift_factor
        );
        let unresolved = field.unresolved_count();
        if unresolved > 0 {
            warn!(
                "{unresolved} of {} pixel(s) shift outside the resolved region and stay black",
                canvas_extent.area()
            );
        }

        let mut canvas = Array3::zeros((canvas_extent.height, canvas_extent.width, CHANNELS));
        canvas
            .slice_mut(s![.., ..seed_width, ..])
            .assign(&seed_pattern.slice(s![.., ..seed_width, ..]));

        canvas
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .zip(field.shifts().axis_iter(Axis(0)))
            .for_each(|(mut row, shifts)| resolve_row(&mut row, &shifts, pattern_width));

        Ok(canvas)
    }
}

/// Generate a stereogram with the given shift factor
///
/// # Errors
///
/// Returns `InvalidParameter` for a negative shift factor, and the errors
/// of [`AutostereogramEngine::generate`] for invalid inputs
pub fn generate(
    depth_map: &ArrayView2<'_, u8>,
    pattern: &ArrayView3<'_, u8>,
    shift_factor: i32,
) -> Result<Canvas> {
    AutostereogramEngine::new(StereogramConfig { shift_factor })?.generate(depth_map, pattern)
}

// Columns must be visited in increasing order: each reads a column finalized earlier in this loop
fn resolve_row(row: &mut ArrayViewMut2<'_, u8>, shifts: &ArrayView1<'_, isize>, pattern_width: usize) {
    let width = row.len_of(Axis(0));
    for x in pattern_width..width {
        let Some(source) = shifts.get(x).and_then(|&shift| resolve_source(shift, x)) else {
            continue;
        };
        let (resolved, mut pending) = row.view_mut().split_at(Axis(0), x);
        pending.row_mut(0).assign(&resolved.row(source));
    }
}
