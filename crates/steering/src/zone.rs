//! Per-axis control zones

use serde::{Deserialize, Serialize};

use crate::SteeringError;

/// Which band of a control zone a coordinate falls in.
///
/// Bands are half-open and non-overlapping: `v < dead_low` is `Below`,
/// `dead_low <= v < dead_high` is `Inside`, `v >= dead_high` is `Above`.
/// Every value maps to exactly one band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneBand {
    /// Below the dead zone: positive correction.
    Below,
    /// Inside the dead zone: hold.
    Inside,
    /// At or above the dead zone's upper bound: negative correction.
    Above,
}

/// Dead-zone thresholds for one axis, pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlZone {
    /// Axis minimum (frame edge).
    pub min: i32,
    /// Axis maximum (frame edge).
    pub max: i32,
    /// Lower dead-zone bound, inclusive.
    pub dead_low: i32,
    /// Upper dead-zone bound, exclusive.
    pub dead_high: i32,
}

impl ControlZone {
    /// Build a zone, validating `min <= dead_low < dead_high <= max`.
    pub fn new(min: i32, max: i32, dead_low: i32, dead_high: i32) -> Result<Self, SteeringError> {
        if !(min <= dead_low && dead_low < dead_high && dead_high <= max) {
            return Err(SteeringError::InvalidZone(format!(
                "require min <= dead_low < dead_high <= max, got {min} <= {dead_low} < {dead_high} <= {max}"
            )));
        }
        Ok(Self { min, max, dead_low, dead_high })
    }

    /// Zone for an axis of length `extent` with a dead band of
    /// `half_width` pixels either side of the axis center.
    pub fn centered(extent: u32, half_width: u32) -> Result<Self, SteeringError> {
        let mid = (extent / 2) as i32;
        Self::new(
            0,
            extent as i32,
            mid - half_width as i32,
            mid + half_width as i32,
        )
    }

    /// Classify a coordinate into its band.
    pub fn classify(&self, v: i32) -> ZoneBand {
        if v < self.dead_low {
            ZoneBand::Below
        } else if v < self.dead_high {
            ZoneBand::Inside
        } else {
            ZoneBand::Above
        }
    }
}
