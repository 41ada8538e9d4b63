//! Visual Tracking Pipeline
//!
//! Per-frame orchestration of the tracking loop:
//! - Frame acquisition from a [`frame_capture::FrameSource`]
//! - Face-like region detection behind a narrow [`Detector`] interface
//! - Diagnostic annotation via the `overlay` crate
//! - Centering commands via the `steering` crate
//! - Presentation and cooperative quit through a [`DisplaySink`]
//!
//! The pipeline is a synchronous two-state machine (Running/Stopped); each
//! frame is processed end to end by one iteration and discarded.

pub mod config;
pub mod detector;
pub mod display;
pub mod pipeline;

pub use config::{DetectorParams, TrackerConfig};
pub use detector::{Detector, StubDetector};
pub use display::{DisplaySink, NullDisplay};
pub use pipeline::{Pipeline, PipelineReport, PipelineState, StopReason};

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Tracker error types
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Capture error: {0}")]
    Capture(#[from] frame_capture::CaptureError),

    #[error("Detection failed: {0}")]
    Detector(String),

    #[error("Display failed: {0}")]
    Display(String),
}

/// Initialize structured logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}
