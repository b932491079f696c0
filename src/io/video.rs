//! Frame extraction and re-encoding through the external `ffmpeg` tools
//!
//! Frames are exchanged with the encoder as numbered PNG files (`0.png`,
//! `1.png`, ...) in a working directory.

use crate::io::configuration::{
    DEFAULT_CRF, FALLBACK_FRAME_RATE, FFMPEG_PROGRAM, FFPROBE_PROGRAM, MAX_CRF, VIDEO_CODEC,
};
use crate::io::error::{Result, StereogramError, file_system, invalid_parameter};
use log::{debug, warn};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

const FRAME_PATTERN: &str = "%d.png";

/// Parameters passed to the encoder when frames are stitched into a video
#[derive(Clone, Debug, PartialEq)]
pub struct EncoderSettings {
    /// Output frame rate in frames per second
    pub frame_rate: f64,
    /// Constant rate factor; lower is higher quality and larger output
    pub crf: u8,
    /// Encoder codec name
    pub codec: String,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            frame_rate: FALLBACK_FRAME_RATE,
            crf: DEFAULT_CRF,
            codec: VIDEO_CODEC.to_string(),
        }
    }
}

impl EncoderSettings {
    /// Check frame rate and quality bounds
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the frame rate is not a positive finite
    /// number or the CRF exceeds the encoder's range
    pub fn validate(&self) -> Result<()> {
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(invalid_parameter(
                "frame_rate",
                &self.frame_rate,
                &"must be a positive number",
            ));
        }
        if self.crf > MAX_CRF {
            return Err(invalid_parameter(
                "crf",
                &self.crf,
                &format!("must be at most {MAX_CRF}"),
            ));
        }
        Ok(())
    }
}

/// Command decoding every frame of `video` into `frames_dir`
pub fn extract_command(video: &Path, frames_dir: &Path) -> Command {
    let mut command = Command::new(FFMPEG_PROGRAM);
    command
        .args(["-y", "-loglevel", "error", "-i"])
        .arg(video)
        .args(["-start_number", "0"])
        .arg(frames_dir.join(FRAME_PATTERN));
    command
}

/// Command printing the frame rate of the first video stream
pub fn probe_command(video: &Path) -> Command {
    let mut command = Command::new(FFPROBE_PROGRAM);
    command
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=r_frame_rate",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(video);
    command
}

/// Command encoding numbered frames in `frames_dir` into `output`
pub fn encode_command(frames_dir: &Path, settings: &EncoderSettings, output: &Path) -> Command {
    let mut command = Command::new(FFMPEG_PROGRAM);
    command
        .args(["-y", "-loglevel", "error", "-r"])
        .arg(settings.frame_rate.to_string())
        .args(["-f", "image2", "-i"])
        .arg(frames_dir.join(FRAME_PATTERN))
        .args(["-vcodec", settings.codec.as_str(), "-crf"])
        .arg(settings.crf.to_string())
        .arg(output);
    command
}

/// Parse a frame rate printed as a rational (`30000/1001`) or decimal (`25`)
pub fn parse_frame_rate(text: &str) -> Option<f64> {
    let text = text.trim();
    let rate = match text.split_once('/') {
        Some((numerator, denominator)) => {
            let numerator: f64 = numerator.trim().parse().ok()?;
            let denominator: f64 = denominator.trim().parse().ok()?;
            numerator / denominator
        }
        None => text.parse().ok()?,
    };
    (rate.is_finite() && rate > 0.0).then_some(rate)
}

/// Decode `video` into numbered frames inside `frames_dir`
///
/// # Errors
///
/// Returns `FileSystem` if the directory cannot be created, or `Encoder`
/// if the decoder cannot be started or fails
pub fn extract_frames(video: &Path, frames_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(frames_dir)
        .map_err(|e| file_system(frames_dir, "create directory", e))?;
    run(extract_command(video, frames_dir))
}

/// Frame rate of `video`, or the fallback rate when it cannot be probed
pub fn probe_frame_rate(video: &Path) -> f64 {
    let probed = probe_command(video)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| {
            String::from_utf8_lossy(&output.stdout)
                .lines()
                .find_map(parse_frame_rate)
        });
    probed.unwrap_or_else(|| {
        warn!(
            "Could not probe frame rate of '{}', using {FALLBACK_FRAME_RATE} fps",
            video.display()
        );
        FALLBACK_FRAME_RATE
    })
}

/// Encode the numbered frames in `frames_dir` into `output`
///
/// # Errors
///
/// Returns `InvalidParameter` for invalid settings, or `Encoder` if the
/// encoder cannot be started or fails
pub fn encode_frames(frames_dir: &Path, settings: &EncoderSettings, output: &Path) -> Result<()> {
    settings.validate()?;
    run(encode_command(frames_dir, settings, output))
}

/// Numbered frame files in `dir`, ordered by frame number
///
/// Files whose stem is not a number or whose extension is not `png` are ignored.
///
/// # Errors
///
/// Returns `FileSystem` if the directory cannot be read
pub fn numbered_frames(dir: &Path) -> Result<Vec<(usize, PathBuf)>> {
    let entries = std::fs::read_dir(dir).map_err(|e| file_system(dir, "read directory", e))?;
    let mut frames = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| file_system(dir, "read directory", e))?.path();
        if path.extension().and_then(OsStr::to_str) != Some("png") {
            continue;
        }
        if let Some(index) = path
            .file_stem()
            .and_then(OsStr::to_str)
            .and_then(|stem| stem.parse::<usize>().ok())
        {
            frames.push((index, path));
        }
    }
    frames.sort_unstable_by_key(|(index, _)| *index);
    Ok(frames)
}

fn run(mut command: Command) -> Result<()> {
    let program = command.get_program().to_string_lossy().into_owned();
    debug!("Running {command:?}");
    let status = command.status().map_err(|e| StereogramError::Encoder {
        program: program.clone(),
        reason: e.to_string(),
    })?;
    if status.success() {
        Ok(())
    } else {
        Err(StereogramError::Encoder {
            program,
            reason: status.to_string(),
        })
    }
}
