//! Generation constants and runtime configuration defaults

/// Maximum horizontal displacement contributed by full depth
pub const DEFAULT_SHIFT_FACTOR: i32 = 20;

/// Number of times the pattern repeats across the canvas width
pub const DEFAULT_NUM_CLIPS: usize = 8;

/// Channel count of patterns and canvases
pub const CHANNELS: usize = 3;

/// Largest value a depth sample can take
pub const MAX_DEPTH: u8 = u8::MAX;

// Fixed-threshold binarization used when no real depth map is available
/// Gray levels strictly above this become white
pub const BINARIZE_THRESHOLD: u8 = 128;

// Encoder settings
/// Default constant rate factor passed to the video encoder
pub const DEFAULT_CRF: u8 = 25;
/// Highest CRF accepted by the x264 encoder
pub const MAX_CRF: u8 = 51;
/// Video codec used when re-encoding frames
pub const VIDEO_CODEC: &str = "libx264";
/// Frame rate used when the source rate cannot be probed
pub const FALLBACK_FRAME_RATE: f64 = 30.0;
/// Decoder/encoder executable
pub const FFMPEG_PROGRAM: &str = "ffmpeg";
/// Stream inspection executable
pub const FFPROBE_PROGRAM: &str = "ffprobe";

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_asg";
/// Suffix added to thresholded depth inputs
pub const BINARIZED_SUFFIX: &str = "_binarized";
/// Container extension for re-encoded video
pub const VIDEO_EXTENSION: &str = "avi";
/// Subdirectory holding frames decoded from the source video
pub const SOURCE_FRAMES_DIR: &str = "source";
