//! Conversion between image files and the ndarray grids used for generation

use crate::io::configuration::CHANNELS;
use crate::io::error::{Result, StereogramError, file_system, invalid_dimension};
use crate::spatial::grid::{Canvas, DepthMap, Pattern};
use image::{GrayImage, RgbImage};
use ndarray::{Array2, Array3, ArrayView2, ArrayView3};
use std::path::Path;

/// Load an image file as an 8-bit grayscale depth map
///
/// # Errors
///
/// Returns `ImageLoad` if the file cannot be opened or decoded
pub fn load_depth_map(path: &Path) -> Result<DepthMap> {
    let gray = image::open(path)
        .map_err(|e| StereogramError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })?
        .to_luma8();
    Ok(depth_map_from_gray(&gray))
}

/// Copy a grayscale image into a `(height, width)` array
pub fn depth_map_from_gray(gray: &GrayImage) -> DepthMap {
    let (width, height) = gray.dimensions();
    Array2::from_shape_fn((height as usize, width as usize), |(y, x)| {
        gray.get_pixel_checked(x as u32, y as u32)
            .map_or(0, |pixel| pixel.0[0])
    })
}

/// Load an image file as an RGB pattern
///
/// # Errors
///
/// Returns `ImageLoad` if the file cannot be opened or decoded
pub fn load_pattern(path: &Path) -> Result<Pattern> {
    let rgb = image::open(path)
        .map_err(|e| StereogramError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })?
        .to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(Array3::from_shape_fn(
        (height as usize, width as usize, CHANNELS),
        |(y, x, c)| {
            rgb.get_pixel_checked(x as u32, y as u32)
                .and_then(|pixel| pixel.0.get(c).copied())
                .unwrap_or(0)
        },
    ))
}

/// Pack a three-channel canvas into an RGB image
///
/// # Errors
///
/// Returns `InvalidDimension` if the canvas is not three-channel or too
/// large for an image axis
pub fn canvas_to_image(canvas: &ArrayView3<'_, u8>) -> Result<RgbImage> {
    let (height, width, channels) = canvas.dim();
    if channels != CHANNELS {
        return Err(invalid_dimension(
            "canvas",
            &format!("expected {CHANNELS} channels, found {channels}"),
        ));
    }
    let to_axis = |value: usize| u32::try_from(value).map_err(|e| invalid_dimension("canvas", &e));
    let raw: Vec<u8> = canvas.iter().copied().collect();
    RgbImage::from_raw(to_axis(width)?, to_axis(height)?, raw)
        .ok_or_else(|| invalid_dimension("canvas", &"pixel buffer does not match extent"))
}

/// Save a canvas as an image file, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The canvas cannot be converted to an RGB image
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_canvas(canvas: &Canvas, path: &Path) -> Result<()> {
    let img = canvas_to_image(&canvas.view())?;
    create_parent(path)?;
    img.save(path).map_err(|e| StereogramError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Pack a depth map into a grayscale image
///
/// # Errors
///
/// Returns `InvalidDimension` if the map is too large for an image axis
pub fn depth_map_to_image(depth_map: &ArrayView2<'_, u8>) -> Result<GrayImage> {
    let (height, width) = depth_map.dim();
    let to_axis =
        |value: usize| u32::try_from(value).map_err(|e| invalid_dimension("depth map", &e));
    let raw: Vec<u8> = depth_map.iter().copied().collect();
    GrayImage::from_raw(to_axis(width)?, to_axis(height)?, raw)
        .ok_or_else(|| invalid_dimension("depth map", &"pixel buffer does not match extent"))
}

/// Save a depth map as a grayscale image file, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the image
/// cannot be encoded or written
pub fn save_depth_map(depth_map: &DepthMap, path: &Path) -> Result<()> {
    let img = depth_map_to_image(&depth_map.view())?;
    create_parent(path)?;
    img.save(path).map_err(|e| StereogramError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| file_system(parent, "create directory", e))?;
    }
    Ok(())
}
