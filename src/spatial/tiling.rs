//! Periodic pattern extension to an exact canvas size
//!
//! The source pattern is replicated a whole number of times along each axis
//! and the result is cropped, so every output pixel at `(y, x)` equals the
//! source pixel at `(y mod height, x mod width)`. No blending at seams.

use crate::io::error::{Result, invalid_dimension};
use crate::spatial::grid::{Extent, Pattern};
use ndarray::{ArrayView3, Axis, concatenate, s};

/// Minimum whole repeat counts `(rows, cols)` covering `target` with `source`
///
/// `source` must have a positive height and width.
pub const fn repeat_counts(source: Extent, target: Extent) -> (usize, usize) {
    (
        target.height.div_ceil(source.height),
        target.width.div_ceil(source.width),
    )
}

/// Extend `pattern` to exactly `target_height` x `target_width` by repetition
///
/// Works for targets smaller than, equal to, or larger than the source in
/// either axis. The returned buffer is newly allocated; the channel count
/// of the source is preserved.
///
/// # Errors
///
/// Returns `InvalidDimension` if either target dimension is zero or the
/// source pattern has no pixels
pub fn tile(
    pattern: &ArrayView3<'_, u8>,
    target_height: usize,
    target_width: usize,
) -> Result<Pattern> {
    let (height, width, channels) = pattern.dim();
    if height == 0 || width == 0 || channels == 0 {
        return Err(invalid_dimension(
            "pattern",
            &format!("cannot tile a {height}x{width}x{channels} source"),
        ));
    }
    if target_height == 0 || target_width == 0 {
        return Err(invalid_dimension(
            "tile target",
            &format!("{target_height}x{target_width} has no pixels"),
        ));
    }

    let source = Extent { height, width };
    let target = Extent {
        height: target_height,
        width: target_width,
    };
    let (repeat_rows, repeat_cols) = repeat_counts(source, target);

    let strip = concatenate(Axis(1), &vec![pattern.view(); repeat_cols])
        .map_err(|e| invalid_dimension("tile target", &e))?;
    let block = concatenate(Axis(0), &vec![strip.view(); repeat_rows])
        .map_err(|e| invalid_dimension("tile target", &e))?;

    Ok(block
        .slice(s![..target_height, ..target_width, ..])
        .to_owned())
}

/// Extend `pattern` vertically to `target_height`, keeping its width
///
/// # Errors
///
/// Returns `InvalidDimension` under the same conditions as [`tile`]
pub fn tile_rows(pattern: &ArrayView3<'_, u8>, target_height: usize) -> Result<Pattern> {
    let width = pattern.dim().1;
    tile(pattern, target_height, width)
}
