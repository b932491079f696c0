//! Pixel grid aliases and the input validation shared by tiling and generation
//!
//! Depth maps are single-channel `(height, width)` arrays, while patterns and
//! canvases are `(height, width, channels)` arrays of 8-bit intensities.

use crate::io::configuration::{CHANNELS, MAX_DEPTH};
use crate::io::error::{Result, StereogramError, invalid_dimension};
use ndarray::{Array2, Array3, ArrayView2, ArrayView3};
use num_traits::Float;

/// Per-pixel depth proxy, 0 (far) to 255 (near)
pub type DepthMap = Array2<u8>;

/// Source texture repeated across the canvas
pub type Pattern = Array3<u8>;

/// Finished stereogram frame
pub type Canvas = Array3<u8>;

/// Height and width of a pixel grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    /// Number of rows
    pub height: usize,
    /// Number of columns
    pub width: usize,
}

impl Extent {
    /// Number of pixels covered by the extent
    pub const fn area(&self) -> usize {
        self.height * self.width
    }
}

/// Check that a depth map has a positive height and width
///
/// # Errors
///
/// Returns `InvalidDimension` if either axis is empty
pub fn validate_depth_map(depth_map: &ArrayView2<'_, u8>) -> Result<Extent> {
    let (height, width) = depth_map.dim();
    if height == 0 || width == 0 {
        return Err(invalid_dimension(
            "depth map",
            &format!("{height}x{width} has no pixels"),
        ));
    }
    Ok(Extent { height, width })
}

/// Check that a pattern has a positive extent and exactly [`CHANNELS`] channels
///
/// # Errors
///
/// Returns `InvalidDimension` if any axis is empty, or `DimensionMismatch`
/// if the channel count is positive but not [`CHANNELS`]
pub fn validate_pattern(pattern: &ArrayView3<'_, u8>) -> Result<Extent> {
    let (height, width, channels) = pattern.dim();
    if height == 0 || width == 0 || channels == 0 {
        return Err(invalid_dimension(
            "pattern",
            &format!("{height}x{width}x{channels} has no pixels"),
        ));
    }
    if channels != CHANNELS {
        return Err(StereogramError::DimensionMismatch {
            expected: CHANNELS,
            found: channels,
        });
    }
    Ok(Extent { height, width })
}

/// Quantize a normalized depth map (values in `[0, 1]`) to 8-bit depth
///
/// Values outside the unit range are clamped; NaN maps to zero depth.
pub fn depth_from_normalized<F: Float>(values: &ArrayView2<'_, F>) -> DepthMap {
    values.mapv(|value| {
        let unit = value.to_f64().unwrap_or(0.0);
        if unit.is_nan() {
            return 0;
        }
        (unit.clamp(0.0, 1.0) * f64::from(MAX_DEPTH)).round() as u8
    })
}

/// Replicate a single-channel intensity grid into `channels` identical channels
pub fn replicate_channels(gray: &ArrayView2<'_, u8>, channels: usize) -> Array3<u8> {
    let (height, width) = gray.dim();
    Array3::from_shape_fn((height, width, channels), |(y, x, _)| {
        gray.get((y, x)).copied().unwrap_or(0)
    })
}
