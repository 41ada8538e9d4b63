//! Detection backend interface

use frame_capture::{Region, VideoFrame};
use tracing::warn;

use crate::config::DetectorParams;
use crate::TrackerError;

/// Face-like region detector.
///
/// The detection model is an external collaborator: the pipeline only
/// consumes its axis-aligned boxes and never inspects the model itself.
/// Implementations report regions fresh each frame with no identity
/// carried across frames.
pub trait Detector {
    fn detect(
        &mut self,
        frame: &VideoFrame,
        params: &DetectorParams,
    ) -> Result<Vec<Region>, TrackerError>;
}

/// Stub detector reporting one region at fixed frame-proportional
/// coordinates. Wired in when no detection model is configured.
pub struct StubDetector;

impl StubDetector {
    pub fn new() -> Self {
        warn!("No detection model configured. Using stub detector.");
        Self
    }
}

impl Default for StubDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for StubDetector {
    fn detect(
        &mut self,
        frame: &VideoFrame,
        _params: &DetectorParams,
    ) -> Result<Vec<Region>, TrackerError> {
        Ok(vec![Region::new(
            (frame.width as f32 * 0.3) as i32,
            (frame.height as f32 * 0.2) as i32,
            (frame.width as f32 * 0.4) as u32,
            (frame.height as f32 * 0.5) as u32,
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_detection_is_proportional() {
        let frame = VideoFrame::filled(640, 480, [0, 0, 0]);
        let mut detector = StubDetector::new();
        let regions = detector.detect(&frame, &DetectorParams::default()).unwrap();
        assert_eq!(regions, vec![Region::new(192, 96, 256, 240)]);
    }
}
