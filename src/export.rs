//! Frame accumulation and looping-animation export.
//!
//! Every tick's frame is kept in memory, in capture order, until the run
//! stops. The whole sequence is then handed to an [`AnimationExporter`]
//! exactly once. There is no incremental flush: either the full sequence is
//! written or nothing is.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use bevy::log::{info, warn};
use image::buffer::ConvertBuffer;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbImage, RgbaImage};

use crate::canvas::RenderSurface;

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("no frames were captured")]
    NoFrames,

    #[error("frames were already exported")]
    AlreadyFlushed,

    #[error("the simulation is still running")]
    StillRunning,

    #[error("frame {index} is {got:?}, expected {expected:?}")]
    FrameSizeMismatch {
        index: usize,
        expected: (u32, u32),
        got: (u32, u32),
    },
}

/// Writes an ordered frame sequence as one looping animation.
pub trait AnimationExporter {
    /// Encode `frames` in order, played back at `frame_rate` frames per second.
    fn encode_looping_animation(
        &mut self,
        frames: &[RgbImage],
        frame_rate: u32,
    ) -> Result<(), ExportError>;

    /// Where the animation ends up, for log messages.
    fn destination(&self) -> String;
}

/// Outcome of a successful export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportSummary {
    pub frames: usize,
    pub frame_rate: u32,
    pub destination: String,
}

/// Append-only, in-order store of captured frames.
#[derive(Default, Debug)]
pub struct FrameAccumulator {
    frames: Vec<RgbImage>,
    flushed: bool,
}

impl FrameAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the surface's current pixels. Returns the frame count.
    ///
    /// Frames captured after the flush have nowhere to go and are dropped.
    pub fn capture<S: RenderSurface + ?Sized>(&mut self, surface: &S) -> usize {
        if self.flushed {
            warn!("Frame captured after export, dropping it");
            return self.frames.len();
        }
        self.frames.push(surface.snapshot());
        self.frames.len()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[RgbImage] {
        &self.frames
    }

    /// Export every captured frame. Only the first call does anything.
    ///
    /// The frames are released whether or not the export succeeds.
    pub fn flush<E: AnimationExporter + ?Sized>(
        &mut self,
        exporter: &mut E,
        frame_rate: u32,
    ) -> Result<ExportSummary, ExportError> {
        if self.flushed {
            return Err(ExportError::AlreadyFlushed);
        }
        self.flushed = true;

        let frames = std::mem::take(&mut self.frames);
        if frames.is_empty() {
            return Err(ExportError::NoFrames);
        }

        exporter.encode_looping_animation(&frames, frame_rate)?;

        let summary = ExportSummary {
            frames: frames.len(),
            frame_rate,
            destination: exporter.destination(),
        };
        info!(
            "GIF saved as {} ({} frames at {} fps)",
            summary.destination, summary.frames, summary.frame_rate
        );
        Ok(summary)
    }
}

/// GIF encoder over any writer. Loops forever.
pub struct GifExporter<W: Write> {
    writer: W,
    /// NeuQuant speed, 1 (best) to 30 (fastest).
    speed: i32,
}

impl<W: Write> GifExporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, speed: 10 }
    }

    pub fn with_speed(mut self, speed: i32) -> Self {
        self.speed = speed.clamp(1, 30);
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Every frame must match the first frame's size.
fn check_frame_sizes(frames: &[RgbImage]) -> Result<(), ExportError> {
    let Some(first) = frames.first() else {
        return Err(ExportError::NoFrames);
    };
    let expected = first.dimensions();
    for (index, frame) in frames.iter().enumerate() {
        if frame.dimensions() != expected {
            return Err(ExportError::FrameSizeMismatch {
                index,
                expected,
                got: frame.dimensions(),
            });
        }
    }
    Ok(())
}

impl<W: Write> AnimationExporter for GifExporter<W> {
    fn encode_looping_animation(
        &mut self,
        frames: &[RgbImage],
        frame_rate: u32,
    ) -> Result<(), ExportError> {
        check_frame_sizes(frames)?;

        let delay = Delay::from_numer_denom_ms(1000, frame_rate.max(1));
        {
            let mut encoder = GifEncoder::new_with_speed(&mut self.writer, self.speed);
            encoder.set_repeat(Repeat::Infinite)?;
            for frame in frames {
                // Canvas rows are already top-down, left-to-right, as GIF expects
                let rgba: RgbaImage = frame.convert();
                encoder.encode_frame(Frame::from_parts(rgba, 0, 0, delay))?;
            }
            // Dropping the encoder writes the GIF trailer
        }
        self.writer.flush()?;
        Ok(())
    }

    fn destination(&self) -> String {
        "GIF stream".to_string()
    }
}

/// GIF written to a file, created at export time.
#[derive(Clone, Debug)]
pub struct GifFileExporter {
    path: PathBuf,
}

impl GifFileExporter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AnimationExporter for GifFileExporter {
    fn encode_looping_animation(
        &mut self,
        frames: &[RgbImage],
        frame_rate: u32,
    ) -> Result<(), ExportError> {
        // Check before creating the file so a bad sequence leaves nothing behind
        check_frame_sizes(frames)?;
        let file = File::create(&self.path)?;
        GifExporter::new(BufWriter::new(file)).encode_looping_animation(frames, frame_rate)
    }

    fn destination(&self) -> String {
        self.path.display().to_string()
    }
}
