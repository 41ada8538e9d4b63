//! Centering Control
//!
//! Maps a detection's position relative to the frame center into bounded
//! actuator commands:
//! - Per-axis dead zones with half-open band classification
//! - Four-channel percentage commands, recomputed from scratch every frame
//! - A non-blocking dispatch link that preserves command order
//!
//! The controller is a pure function of the current detection center; there
//! is no PID integration and no velocity smoothing.

pub mod command;
pub mod controller;
pub mod link;
pub mod zone;

pub use command::ActuatorCommand;
pub use controller::{offset_from_center, CenteringController};
pub use link::{CommandLink, CommandSink, LogSink};
pub use zone::{ControlZone, ZoneBand};

use thiserror::Error;

/// Steering error types
#[derive(Error, Debug)]
pub enum SteeringError {
    #[error("Invalid control zone: {0}")]
    InvalidZone(String),

    #[error("Dispatch failed: {0}")]
    Dispatch(String),

    #[error("Command link closed")]
    LinkClosed,
}
