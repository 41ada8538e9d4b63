//! Centering controller

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::command::ActuatorCommand;
use crate::zone::{ControlZone, ZoneBand};
use crate::SteeringError;

/// Default corrective magnitude, percent.
pub const DEFAULT_GAIN: i8 = 50;

/// Pixel offset of a point from the frame center (floor division).
pub fn offset_from_center(point: (i32, i32), frame_dims: (u32, u32)) -> (i32, i32) {
    (
        point.0 - (frame_dims.0 / 2) as i32,
        point.1 - (frame_dims.1 / 2) as i32,
    )
}

/// Maps a detection center into a corrective command.
///
/// Each axis is evaluated independently against its zone: below the dead
/// zone emits a positive magnitude, at or above its upper bound a negative
/// one, inside it zero. The horizontal axis drives `left_right`, the
/// vertical axis `up_down`; `forward_back` and `yaw` are never commanded
/// from vision. Pure function of the current center - no history, no
/// smoothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CenteringController {
    horizontal: ControlZone,
    vertical: ControlZone,
    gain: i8,
}

impl CenteringController {
    pub fn new(horizontal: ControlZone, vertical: ControlZone, gain: i8) -> Self {
        Self { horizontal, vertical, gain }
    }

    /// Controller with zones centered on a frame of the given dimensions.
    pub fn for_frame(dims: (u32, u32), dead_half_width: u32, gain: i8) -> Result<Self, SteeringError> {
        Ok(Self::new(
            ControlZone::centered(dims.0, dead_half_width)?,
            ControlZone::centered(dims.1, dead_half_width)?,
            gain,
        ))
    }

    fn correction(&self, band: ZoneBand) -> i16 {
        match band {
            ZoneBand::Below => self.gain as i16,
            ZoneBand::Inside => 0,
            ZoneBand::Above => -(self.gain as i16),
        }
    }

    /// Compute the command for a detection centered at `center`.
    pub fn command_for(&self, center: (i32, i32)) -> ActuatorCommand {
        let left_right = self.correction(self.horizontal.classify(center.0));
        let up_down = self.correction(self.vertical.classify(center.1));
        let command = ActuatorCommand::new(0, left_right, up_down, 0);
        trace!(?center, ?command, "centering command");
        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> CenteringController {
        // 640x480 frame, dead zones 20 px either side of center
        CenteringController::for_frame((640, 480), 20, 50).unwrap()
    }

    #[test]
    fn test_centered_detection_holds() {
        let cmd = controller().command_for((320, 240));
        assert!(cmd.is_hold());
    }

    #[test]
    fn test_left_of_dead_zone_corrects_positive() {
        // Detection center (160, 150): 160 < 300 on the horizontal axis
        let cmd = controller().command_for((160, 150));
        assert_eq!(cmd.left_right, 50);
        // 150 < 220 vertically as well
        assert_eq!(cmd.up_down, 50);
        assert_eq!(cmd.forward_back, 0);
        assert_eq!(cmd.yaw, 0);
    }

    #[test]
    fn test_right_of_dead_zone_corrects_negative() {
        let cmd = controller().command_for((500, 240));
        assert_eq!(cmd.left_right, -50);
        assert_eq!(cmd.up_down, 0);
    }

    #[test]
    fn test_axes_are_independent() {
        let cmd = controller().command_for((500, 400));
        assert_eq!(cmd.left_right, -50);
        assert_eq!(cmd.up_down, -50);
    }

    #[test]
    fn test_boundary_values() {
        let c = controller();
        // Horizontal dead zone is [300, 340)
        assert_eq!(c.command_for((299, 240)).left_right, 50);
        assert_eq!(c.command_for((300, 240)).left_right, 0);
        assert_eq!(c.command_for((339, 240)).left_right, 0);
        assert_eq!(c.command_for((340, 240)).left_right, -50);
    }

    #[test]
    fn test_offset_from_center() {
        assert_eq!(offset_from_center((160, 150), (640, 480)), (-160, -90));
        assert_eq!(offset_from_center((320, 240), (640, 480)), (0, 0));
    }

    #[test]
    fn test_gain_above_range_is_clamped() {
        let c = CenteringController::for_frame((640, 480), 20, 127).unwrap();
        let cmd = c.command_for((0, 240));
        assert_eq!(cmd.left_right, 100);
    }
}
