//! Command-line interface for converting depth map images and videos

use crate::algorithm::noise::{PatternGenerator, pattern_width};
use crate::algorithm::stereogram::{AutostereogramEngine, StereogramConfig};
use crate::io::binarize::binarize;
use crate::io::configuration::{
    BINARIZE_THRESHOLD, BINARIZED_SUFFIX, DEFAULT_CRF, DEFAULT_NUM_CLIPS, DEFAULT_SHIFT_FACTOR,
    OUTPUT_SUFFIX, SOURCE_FRAMES_DIR, VIDEO_CODEC, VIDEO_EXTENSION,
};
use crate::io::error::{
    Result, StereogramError, file_system, invalid_dimension, invalid_parameter,
};
use crate::io::image::{load_depth_map, load_pattern, save_canvas, save_depth_map};
use crate::io::progress::ProgressManager;
use crate::io::video::{
    EncoderSettings, encode_frames, extract_frames, numbered_frames, probe_frame_rate,
};
use crate::spatial::grid::{Canvas, DepthMap, Pattern};
use clap::{Args, Parser, Subcommand};
use image::ImageFormat;
use log::{info, warn};
use rayon::prelude::*;
use std::borrow::Cow;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "autostereo")]
#[command(
    author,
    version,
    about = "Generate random-dot autostereograms from depth maps"
)]
/// Command-line arguments for the stereogram tool
pub struct Cli {
    /// What to convert
    #[command(subcommand)]
    pub mode: Mode,

    /// Suppress progress output and informational logging
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Input kinds the tool can convert
#[derive(Subcommand)]
pub enum Mode {
    /// Convert a depth map image, or every PNG in a directory
    Image {
        /// Generation parameters
        #[command(flatten)]
        options: GenerationOptions,

        /// Process files even if output exists
        #[arg(short, long)]
        no_skip: bool,
    },
    /// Convert every frame of a depth video and re-encode the result
    Video {
        /// Generation parameters
        #[command(flatten)]
        options: GenerationOptions,

        /// Encoder quality factor (lower is better and larger)
        #[arg(long, default_value_t = DEFAULT_CRF)]
        crf: u8,

        /// Output frame rate (probed from the source when omitted)
        #[arg(long)]
        fps: Option<f64>,
    },
    /// Threshold an image, image directory, or video into a black-and-white depth input
    Binarize(BinarizeOptions),
}

/// Parameters for writing thresholded depth inputs
#[derive(Args, Clone, Debug)]
pub struct BinarizeOptions {
    /// Input image, image directory, or video file
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Directory for outputs (defaults to the input's directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Gray levels strictly above this become white
    #[arg(short, long, default_value_t = BINARIZE_THRESHOLD)]
    pub threshold: u8,

    /// Encoder quality factor for video targets
    #[arg(long, default_value_t = DEFAULT_CRF)]
    pub crf: u8,

    /// Output frame rate for video targets (probed when omitted)
    #[arg(long)]
    pub fps: Option<f64>,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl BinarizeOptions {
    /// Whether the target is converted frame by frame through the video tools
    ///
    /// Directories and files with a known image extension are treated as images.
    pub fn is_video(&self) -> bool {
        !self.target.is_dir() && ImageFormat::from_path(&self.target).is_err()
    }
}

/// Parameters shared by image and video conversion
#[derive(Args, Clone, Debug)]
pub struct GenerationOptions {
    /// Input image, image directory, or video file
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Directory for outputs (defaults to the input's directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of times the pattern repeats across the canvas width
    #[arg(short = 'c', long, default_value_t = DEFAULT_NUM_CLIPS)]
    pub num_clips: usize,

    /// Horizontal displacement produced by full depth
    #[arg(short, long, default_value_t = DEFAULT_SHIFT_FACTOR, allow_negative_numbers = true)]
    pub shift_factor: i32,

    /// Seed for reproducible noise patterns (frame `n` uses `seed + n`)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Threshold the input to black and white before using it as depth
    #[arg(short, long)]
    pub binarize: bool,

    /// Pattern image to repeat instead of generated noise
    #[arg(short, long)]
    pub pattern: Option<PathBuf>,
}

impl GenerationOptions {
    /// Engine configured from these options
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a negative shift factor
    pub fn engine(&self) -> Result<AutostereogramEngine> {
        AutostereogramEngine::new(StereogramConfig {
            shift_factor: self.shift_factor,
        })
    }

    /// Apply the optional binarization to a loaded depth map
    pub fn prepare_depth(&self, depth_map: DepthMap) -> DepthMap {
        if self.binarize {
            binarize(&depth_map.view(), BINARIZE_THRESHOLD)
        } else {
            depth_map
        }
    }
}

/// Where each frame's pattern comes from
#[derive(Debug, Clone)]
pub enum PatternSource {
    /// A fixed pattern loaded from an image file
    Image(Pattern),
    /// Fresh noise per frame, `canvas width / num_clips` wide
    Noise {
        /// Base seed; `None` draws from operating system entropy
        seed: Option<u64>,
        /// Pattern repeats across the canvas width
        num_clips: usize,
    },
}

impl PatternSource {
    /// Pattern source selected by the command-line options
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `num_clips` is zero, or `ImageLoad` if
    /// the pattern image cannot be read
    pub fn from_options(options: &GenerationOptions) -> Result<Self> {
        if let Some(path) = &options.pattern {
            return load_pattern(path).map(Self::Image);
        }
        if options.num_clips == 0 {
            return Err(invalid_parameter(
                "num_clips",
                &options.num_clips,
                &"must be at least 1",
            ));
        }
        Ok(Self::Noise {
            seed: options.seed,
            num_clips: options.num_clips,
        })
    }

    /// Pattern for frame `index` of a `height` x `width` canvas
    ///
    /// # Errors
    ///
    /// Returns an error if the canvas is too narrow for the requested
    /// number of repeats
    pub fn pattern_for(&self, index: usize, height: usize, width: usize) -> Result<Cow<'_, Pattern>> {
        match self {
            Self::Image(pattern) => Ok(Cow::Borrowed(pattern)),
            Self::Noise { seed, num_clips } => {
                let tile_width = pattern_width(width, *num_clips)?;
                let pattern = match seed {
                    Some(seed) => PatternGenerator::seeded(seed.wrapping_add(index as u64))
                        .generate(height, tile_width)?,
                    None => PatternGenerator::from_entropy().generate(height, tile_width)?,
                };
                Ok(Cow::Owned(pattern))
            }
        }
    }
}

/// Load, prepare, and convert one depth map file
///
/// # Errors
///
/// Returns an error if the file cannot be loaded, the pattern cannot be
/// produced, or generation rejects the inputs
pub fn render_file(
    engine: &AutostereogramEngine,
    options: &GenerationOptions,
    patterns: &PatternSource,
    index: usize,
    input_path: &Path,
) -> Result<Canvas> {
    let depth_map = options.prepare_depth(load_depth_map(input_path)?);
    let (height, width) = depth_map.dim();
    let pattern = patterns.pattern_for(index, height, width)?;
    engine.generate(&depth_map.view(), &pattern.view())
}

/// Orchestrates conversion of image batches and videos
pub struct FileProcessor {
    cli: Cli,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Log filter matching the requested verbosity
    pub const fn log_filter(cli: &Cli) -> &'static str {
        if cli.quiet { "warn" } else { "info" }
    }

    /// Process the target according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns the first error hit while validating options, reading inputs,
    /// generating, or writing outputs
    pub fn process(&self) -> Result<()> {
        match &self.cli.mode {
            Mode::Image { options, no_skip } => self.process_images(options, !no_skip),
            Mode::Video { options, crf, fps } => self.process_video(options, *crf, *fps),
            Mode::Binarize(options) if options.is_video() => self.binarize_video(options),
            Mode::Binarize(options) => self.binarize_images(options),
        }
    }

    fn progress(&self, total: usize, label: &str) -> ProgressManager {
        if self.cli.quiet {
            ProgressManager::hidden(total)
        } else {
            ProgressManager::new(total, label)
        }
    }

    fn process_images(&self, options: &GenerationOptions, skip_existing: bool) -> Result<()> {
        let engine = options.engine()?;
        let patterns = PatternSource::from_options(options)?;
        let output_dir = options.output.as_deref();
        let files = Self::collect_files(
            &options.target,
            &[OUTPUT_SUFFIX],
            skip_existing,
            |path| Self::output_path(path, output_dir),
        )?;

        self.convert_images(&files, "Images", |index, input_path| {
            let canvas = render_file(&engine, options, &patterns, index, input_path)?;
            save_canvas(&canvas, &Self::output_path(input_path, output_dir))
        })
    }

    fn process_video(&self, options: &GenerationOptions, crf: u8, fps: Option<f64>) -> Result<()> {
        let engine = options.engine()?;
        let patterns = PatternSource::from_options(options)?;
        let output_dir = Self::video_output_dir(&options.target, options.output.as_deref());
        let video_path = output_dir.join(format!(
            "{}{OUTPUT_SUFFIX}.{VIDEO_EXTENSION}",
            Self::stem(&options.target)
        ));

        self.convert_video(
            &options.target,
            &output_dir,
            (crf, fps),
            &video_path,
            |index, frame_path, output_path| {
                let canvas = render_file(&engine, options, &patterns, index, frame_path)?;
                save_canvas(&canvas, output_path)
            },
        )
    }

    fn binarize_images(&self, options: &BinarizeOptions) -> Result<()> {
        let output_dir = options.output.as_deref();
        let files = Self::collect_files(
            &options.target,
            &[OUTPUT_SUFFIX, BINARIZED_SUFFIX],
            !options.no_skip,
            |path| Self::binarized_path(path, output_dir),
        )?;

        self.convert_images(&files, "Binarize", |_, input_path| {
            let depth_map = binarize(&load_depth_map(input_path)?.view(), options.threshold);
            save_depth_map(&depth_map, &Self::binarized_path(input_path, output_dir))
        })
    }

    fn binarize_video(&self, options: &BinarizeOptions) -> Result<()> {
        let output_dir = Self::binarized_video_dir(&options.target, options.output.as_deref());
        let video_path = output_dir.join(format!(
            "{}{BINARIZED_SUFFIX}.{VIDEO_EXTENSION}",
            Self::stem(&options.target)
        ));

        self.convert_video(
            &options.target,
            &output_dir,
            (options.crf, options.fps),
            &video_path,
            |_, frame_path, output_path| {
                let depth_map = binarize(&load_depth_map(frame_path)?.view(), options.threshold);
                save_depth_map(&depth_map, output_path)
            },
        )
    }

    // Runs `convert(index, path)` over every file in parallel
    fn convert_images<F>(&self, files: &[(usize, PathBuf)], label: &str, convert: F) -> Result<()>
    where
        F: Fn(usize, &Path) -> Result<()> + Sync,
    {
        if files.is_empty() {
            info!("Nothing to process");
            return Ok(());
        }

        let start_time = Instant::now();
        let progress = self.progress(files.len(), label);
        files.par_iter().try_for_each(|(index, input_path)| {
            progress.start_item(input_path);
            convert(*index, input_path)?;
            progress.complete_item();
            Ok::<(), StereogramError>(())
        })?;
        progress.finish();

        info!(
            "Converted {} image(s) in {:.2?}",
            progress.completed(),
            start_time.elapsed()
        );
        Ok(())
    }

    // Decodes `video` into `output_dir/source`, writes `convert(index, frame, output)`
    // as `output_dir/<index>.png`, and encodes those frames into `video_path`
    fn convert_video<F>(
        &self,
        video: &Path,
        output_dir: &Path,
        (crf, fps): (u8, Option<f64>),
        video_path: &Path,
        convert: F,
    ) -> Result<()>
    where
        F: Fn(usize, &Path, &Path) -> Result<()> + Sync,
    {
        let settings = EncoderSettings {
            frame_rate: fps.unwrap_or_else(|| probe_frame_rate(video)),
            crf,
            codec: VIDEO_CODEC.to_string(),
        };
        settings.validate()?;

        let source_dir = output_dir.join(SOURCE_FRAMES_DIR);
        info!("Decoding frames of '{}'", video.display());
        extract_frames(video, &source_dir)?;

        let frames = numbered_frames(&source_dir)?;
        if frames.is_empty() {
            return Err(invalid_dimension(
                "video",
                &format!("no frames decoded from '{}'", video.display()),
            ));
        }

        let start_time = Instant::now();
        let progress = self.progress(frames.len(), "Frames");
        frames.par_iter().try_for_each(|(index, frame_path)| {
            convert(*index, frame_path, &output_dir.join(format!("{index}.png")))?;
            progress.complete_item();
            Ok::<(), StereogramError>(())
        })?;
        progress.finish();
        info!(
            "Converted {} frame(s) in {:.2?}",
            progress.completed(),
            start_time.elapsed()
        );

        info!(
            "Encoding {} at {} fps (crf {crf})",
            video_path.display(),
            settings.frame_rate
        );
        encode_frames(output_dir, &settings, video_path)
    }

    // Indices come from the full sorted candidate list so skipping files does
    // not change the seed any remaining file is rendered with
    fn collect_files(
        target: &Path,
        excluded_suffixes: &[&str],
        skip_existing: bool,
        output_for: impl Fn(&Path) -> PathBuf,
    ) -> Result<Vec<(usize, PathBuf)>> {
        let candidates = if target.is_file() {
            vec![target.to_path_buf()]
        } else if target.is_dir() {
            let mut files = Vec::new();
            let entries =
                std::fs::read_dir(target).map_err(|e| file_system(target, "read directory", e))?;
            for entry in entries {
                let path = entry
                    .map_err(|e| file_system(target, "read directory", e))?
                    .path();
                if path.extension().and_then(OsStr::to_str) == Some("png")
                    && !Self::has_suffix(&path, excluded_suffixes)
                {
                    files.push(path);
                }
            }
            files.sort();
            files
        } else {
            return Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be an image file or directory",
            ));
        };

        Ok(candidates
            .into_iter()
            .enumerate()
            .filter(|(_, path)| {
                let exists = output_for(path).exists();
                if skip_existing && exists {
                    warn!("Skipping: {} (output exists)", path.display());
                }
                !(skip_existing && exists)
            })
            .collect())
    }

    fn has_suffix(path: &Path, suffixes: &[&str]) -> bool {
        path.file_stem()
            .and_then(OsStr::to_str)
            .is_some_and(|stem| suffixes.iter().any(|suffix| stem.ends_with(suffix)))
    }

    fn stem(path: &Path) -> String {
        path.file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned()
    }

    fn beside(input_path: &Path, output_dir: Option<&Path>, name: &str) -> PathBuf {
        match output_dir.or_else(|| input_path.parent()) {
            Some(parent) => parent.join(name),
            None => PathBuf::from(name),
        }
    }

    /// Output image path for `input_path`: `<stem>_asg.png` in `output_dir` or beside the input
    pub fn output_path(input_path: &Path, output_dir: Option<&Path>) -> PathBuf {
        let name = format!("{}{OUTPUT_SUFFIX}.png", Self::stem(input_path));
        Self::beside(input_path, output_dir, &name)
    }

    /// Working directory for a video: `<stem>_asg_outputs` in `output_dir` or beside the input
    pub fn video_output_dir(input_path: &Path, output_dir: Option<&Path>) -> PathBuf {
        let name = format!("{}{OUTPUT_SUFFIX}_outputs", Self::stem(input_path));
        Self::beside(input_path, output_dir, &name)
    }

    /// Thresholded image path for `input_path`: `<stem>_binarized.png`
    pub fn binarized_path(input_path: &Path, output_dir: Option<&Path>) -> PathBuf {
        let name = format!("{}{BINARIZED_SUFFIX}.png", Self::stem(input_path));
        Self::beside(input_path, output_dir, &name)
    }

    /// Working directory for a thresholded video: `<stem>_binarized`
    pub fn binarized_video_dir(input_path: &Path, output_dir: Option<&Path>) -> PathBuf {
        let name = format!("{}{BINARIZED_SUFFIX}", Self::stem(input_path));
        Self::beside(input_path, output_dir, &name)
    }
}
