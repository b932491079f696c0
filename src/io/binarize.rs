//! Fixed-threshold binarization for images that stand in for depth maps

use crate::spatial::grid::DepthMap;
use ndarray::ArrayView2;

/// Map every sample above `threshold` to 255 and the rest to 0
pub fn binarize(gray: &ArrayView2<'_, u8>, threshold: u8) -> DepthMap {
    gray.mapv(|value| if value > threshold { u8::MAX } else { 0 })
}
