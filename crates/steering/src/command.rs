//! Bounded actuator commands

use serde::{Deserialize, Serialize};

/// Command magnitudes are percentages in [-100, 100].
pub const MAX_MAGNITUDE: i8 = 100;

/// Per-axis motion command for one frame.
///
/// Stateless: a new command fully replaces the previous one at the sink.
/// `Default` is the all-zero hold command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActuatorCommand {
    /// Forward/backward velocity, percent.
    pub forward_back: i8,
    /// Lateral velocity, percent.
    pub left_right: i8,
    /// Vertical velocity, percent.
    pub up_down: i8,
    /// Rotation rate, percent.
    pub yaw: i8,
}

impl ActuatorCommand {
    /// Build a command, clamping each channel to [-100, 100].
    pub fn new(forward_back: i16, left_right: i16, up_down: i16, yaw: i16) -> Self {
        let clamp = |v: i16| v.clamp(-(MAX_MAGNITUDE as i16), MAX_MAGNITUDE as i16) as i8;
        Self {
            forward_back: clamp(forward_back),
            left_right: clamp(left_right),
            up_down: clamp(up_down),
            yaw: clamp(yaw),
        }
    }

    /// True when every channel is zero.
    pub fn is_hold(&self) -> bool {
        *self == Self::default()
    }
}
