//! Spatial data structures and pattern tiling
//!
//! This module contains:
//! - Depth map, pattern, and canvas grid types with validation
//! - Periodic extension of patterns to arbitrary sizes

/// Grid aliases and input validation
pub mod grid;
/// Pattern tiling by modular repetition
pub mod tiling;

pub use grid::{Canvas, DepthMap, Extent, Pattern};
