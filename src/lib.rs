//! Single-image random-dot stereogram (autostereogram) synthesis
//!
//! A depth map and a small repeating pattern are combined into an image that
//! shows the depth when viewed with diverged or crossed eyes. Patterns are
//! random noise or user supplied textures, tiled to the canvas height.

#![deny(unsafe_code)]

/// Pattern generation, depth-to-shift mapping, and stereogram reconstruction
pub mod algorithm;
/// Input/output operations, configuration, and error handling
pub mod io;
/// Pixel grid types, validation, and pattern tiling
pub mod spatial;

pub use algorithm::noise::PatternGenerator;
pub use algorithm::stereogram::{AutostereogramEngine, StereogramConfig, generate};
pub use io::error::{Result, StereogramError};
pub use spatial::tiling::tile;
