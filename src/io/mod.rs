//! Input/output operations and error handling

/// Fixed-threshold binarization of grayscale inputs
pub mod binarize;
/// Command-line parsing and batch orchestration
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// Image file loading and saving
pub mod image;
/// Progress bars for long-running batches
pub mod progress;
/// External decoder/encoder invocation
pub mod video;
