//! Random-dot pattern generation
//!
//! Noise is drawn at half the target resolution and upsampled bilinearly.
//! The lost high-frequency detail would not survive lossy video compression
//! anyway; the smoother pattern keeps the encoded depth readable.

use crate::io::configuration::CHANNELS;
use crate::io::error::{Result, invalid_dimension, invalid_parameter};
use crate::spatial::grid::{Pattern, replicate_channels};
use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces grayscale noise patterns from an injected random source
#[derive(Debug, Clone)]
pub struct PatternGenerator<R> {
    rng: R,
}

impl PatternGenerator<StdRng> {
    /// Generator with a fixed seed for reproducible output
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Generator seeded from operating system entropy
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> PatternGenerator<R> {
    /// Wrap an existing random source
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a `height` x `width` x 3 noise pattern
    ///
    /// Each call consumes fresh randomness, so consecutive patterns differ.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` if either dimension is zero or does not fit
    /// in an image axis
    pub fn generate(&mut self, height: usize, width: usize) -> Result<Pattern> {
        let (target_width, target_height) = image_extent(height, width)?;
        let half_width = (target_width / 2).max(1);
        let half_height = (target_height / 2).max(1);

        let noise = GrayImage::from_fn(half_width, half_height, |_, _| {
            Luma([self.rng.random::<u8>()])
        });
        let upsampled = imageops::resize(&noise, target_width, target_height, FilterType::Triangle);

        let gray = Array2::from_shape_fn((height, width), |(y, x)| {
            upsampled
                .get_pixel_checked(x as u32, y as u32)
                .map_or(0, |pixel| pixel.0[0])
        });
        Ok(replicate_channels(&gray.view(), CHANNELS))
    }
}

/// Width of the pattern tile when it should repeat `num_clips` times across `canvas_width`
///
/// # Errors
///
/// Returns `InvalidParameter` if `num_clips` is zero, or `InvalidDimension`
/// if the canvas is narrower than `num_clips`
pub fn pattern_width(canvas_width: usize, num_clips: usize) -> Result<usize> {
    if num_clips == 0 {
        return Err(invalid_parameter(
            "num_clips",
            &num_clips,
            &"must be at least 1",
        ));
    }
    let width = canvas_width / num_clips;
    if width == 0 {
        return Err(invalid_dimension(
            "pattern",
            &format!("canvas width {canvas_width} is too narrow for {num_clips} repeats"),
        ));
    }
    Ok(width)
}

fn image_extent(height: usize, width: usize) -> Result<(u32, u32)> {
    if height == 0 || width == 0 {
        return Err(invalid_dimension(
            "pattern",
            &format!("{height}x{width} has no pixels"),
        ));
    }
    let to_axis = |value: usize| {
        u32::try_from(value).map_err(|e| invalid_dimension("pattern", &e))
    };
    Ok((to_axis(width)?, to_axis(height)?))
}
