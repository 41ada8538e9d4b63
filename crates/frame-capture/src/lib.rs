//! Frame Capture Library for Visual Tracking
//!
//! Provides the video-side foundation of the tracking pipeline:
//! - RGB frame buffers with pixel access
//! - Axis-aligned detection regions with clipping
//! - A narrow frame-source abstraction (camera, file, synthetic)

pub mod frame;
pub mod region;
pub mod synthetic;

pub use frame::VideoFrame;
pub use region::Region;
pub use synthetic::SyntheticSource;

use thiserror::Error;

/// Capture error types
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Failed to open source: {0}")]
    Open(String),

    #[error("Invalid format: {0}")]
    Format(String),

    #[error("Streaming error: {0}")]
    Stream(String),

    #[error("Source exhausted")]
    Exhausted,

    #[error("Source not initialized")]
    NotInitialized,
}

/// A producer of video frames.
///
/// `next_frame` returning `Ok(None)` means "no frame available this tick" -
/// a transient condition the caller may simply skip. Permanent loss of the
/// source is reported as [`CaptureError::Exhausted`].
pub trait FrameSource {
    /// Acquire the next frame, if one is available.
    fn next_frame(&mut self) -> Result<Option<VideoFrame>, CaptureError>;

    /// Width and height of frames this source produces.
    fn dimensions(&self) -> (u32, u32);

    /// Release the underlying device or stream.
    fn close(&mut self) {}
}

/// Source configuration
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Device path (e.g., "/dev/video0")
    pub device: String,
    /// Capture width
    pub width: u32,
    /// Capture height
    pub height: u32,
    /// Target FPS
    pub fps: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            device: "/dev/video0".to_string(),
            width: 640,
            height: 480,
            fps: 30,
        }
    }
}
