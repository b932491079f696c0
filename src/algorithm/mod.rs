//! Stereogram generation algorithms

/// Random noise patterns upsampled from half resolution
pub mod noise;
/// Per-pixel horizontal shifts derived from depth
pub mod shift;
/// Sequential column reconstruction of the stereogram canvas
pub mod stereogram;
