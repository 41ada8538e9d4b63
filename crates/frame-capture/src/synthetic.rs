//! Synthetic frame source
//!
//! Produces flat test frames with a bright subject square drifting across
//! the image. Stands in for a camera when no capture device is configured,
//! and drives the pipeline in tests and demos.

use tracing::debug;

use crate::frame::VideoFrame;
use crate::region::Region;
use crate::{CaptureError, FrameSource, SourceConfig};

/// Background luminance of generated frames.
const BACKGROUND: [u8; 3] = [24, 24, 24];
/// Subject square fill.
const SUBJECT: [u8; 3] = [200, 180, 160];

/// Frame source generating a moving synthetic subject.
pub struct SyntheticSource {
    width: u32,
    height: u32,
    /// Frames still to produce; `None` = unbounded.
    remaining: Option<u32>,
    sequence: u32,
    closed: bool,
}

impl SyntheticSource {
    /// Source producing `frames` frames, then reporting exhaustion.
    pub fn new(width: u32, height: u32, frames: u32) -> Self {
        Self {
            width,
            height,
            remaining: Some(frames),
            sequence: 0,
            closed: false,
        }
    }

    /// Source matching a capture configuration's dimensions.
    pub fn from_config(config: &SourceConfig, frames: u32) -> Self {
        Self::new(config.width, config.height, frames)
    }

    /// Unbounded source (stops only when the pipeline quits).
    pub fn unbounded(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            remaining: None,
            sequence: 0,
            closed: false,
        }
    }

    /// Where the subject square sits on frame `sequence`.
    pub fn subject_at(&self, sequence: u32) -> Region {
        let side = (self.height / 4).max(1);
        let span = self.width.saturating_sub(side).max(1);
        let x = (sequence * 7) % span;
        let y = self.height / 3;
        Region::new(x as i32, y as i32, side, side)
    }
}

impl FrameSource for SyntheticSource {
    fn next_frame(&mut self) -> Result<Option<VideoFrame>, CaptureError> {
        if self.closed {
            return Err(CaptureError::NotInitialized);
        }
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return Err(CaptureError::Exhausted);
            }
            *remaining -= 1;
        }

        let mut frame = VideoFrame::filled(self.width, self.height, BACKGROUND);
        frame.sequence = self.sequence;
        frame.timestamp_ns = self.sequence as u64 * 33_000_000;

        let subject = self.subject_at(self.sequence);
        for y in subject.y..subject.bottom() {
            for x in subject.x..subject.right() {
                frame.put_pixel(x as u32, y as u32, SUBJECT);
            }
        }

        debug!(sequence = self.sequence, "synthetic frame produced");
        self.sequence += 1;
        Ok(Some(frame))
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
