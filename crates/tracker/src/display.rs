//! Display sink interface

use frame_capture::VideoFrame;

use crate::TrackerError;

/// Consumer of annotated frames, and the carrier of the quit signal.
pub trait DisplaySink {
    /// Present one annotated frame.
    fn present(&mut self, frame: &VideoFrame) -> Result<(), TrackerError>;

    /// Poll for the quit signal. Checked once per iteration; this is the
    /// loop's only cancellation point.
    fn poll_quit(&mut self) -> bool;

    /// Release display resources.
    fn close(&mut self) {}
}

/// Headless display that counts frames and quits after an optional frame limit.
pub struct NullDisplay {
    presented: u64,
    quit_after: Option<u64>,
}

impl NullDisplay {
    /// Display that never requests quit.
    pub fn new() -> Self {
        Self { presented: 0, quit_after: None }
    }

    /// Display that requests quit once `frames` frames were presented.
    pub fn quit_after(frames: u64) -> Self {
        Self { presented: 0, quit_after: Some(frames) }
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl Default for NullDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySink for NullDisplay {
    fn present(&mut self, _frame: &VideoFrame) -> Result<(), TrackerError> {
        self.presented += 1;
        Ok(())
    }

    fn poll_quit(&mut self) -> bool {
        match self.quit_after {
            Some(limit) => self.presented >= limit,
            None => false,
        }
    }
}
