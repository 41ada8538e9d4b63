//! Tracker configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use overlay::AnnotationStyle;
use steering::{ControlZone, SteeringError};

use crate::TrackerError;

/// Detector tuning passed through to the detection backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorParams {
    /// Detection model resource. When set, the file must exist at startup;
    /// when unset, a stub detector is wired in.
    pub model_path: Option<PathBuf>,

    /// Detector pyramid step size.
    pub scale_factor: f32,

    /// Detector confidence threshold (neighbor count).
    pub min_neighbors: u32,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            model_path: None,
            scale_factor: 1.2,
            min_neighbors: 8,
        }
    }
}

/// Per-axis zone configuration.
///
/// Explicit zones win; otherwise zones are derived from the source
/// dimensions with `dead_half_width` pixels either side of center.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZonesConfig {
    pub horizontal: Option<ControlZone>,
    pub vertical: Option<ControlZone>,
    /// Dead-zone half width for derived zones, pixels.
    pub dead_half_width: u32,
    /// Corrective magnitude, percent.
    pub gain: i8,
}

impl Default for ZonesConfig {
    fn default() -> Self {
        Self {
            horizontal: None,
            vertical: None,
            dead_half_width: 20,
            gain: steering::controller::DEFAULT_GAIN,
        }
    }
}

/// Top-level tracker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Detector tuning
    pub detector: DetectorParams,

    /// Control zones
    pub zones: ZonesConfig,

    /// Annotation style
    pub style: AnnotationStyle,

    /// Label drawn under each detection
    pub label: String,

    /// Battery percentage at or below which the status line turns red
    pub low_battery_threshold: u8,

    /// Half extent of the center guide rectangle, pixels
    pub guide_half_extent: i32,

    /// Key that quits the loop
    pub quit_key: char,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            detector: DetectorParams::default(),
            zones: ZonesConfig::default(),
            style: AnnotationStyle::default(),
            label: "unknown".to_string(),
            low_battery_threshold: 20,
            guide_half_extent: 20,
            quit_key: 'q',
        }
    }
}

impl TrackerConfig {
    /// Load from a TOML file, layered with `TRACKER__*` environment overrides.
    pub fn load(path: &Path) -> Result<Self, TrackerError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("TRACKER").separator("__"))
            .build()
            .map_err(|e| TrackerError::Config(e.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|e| TrackerError::Config(e.to_string()))
    }

    /// Validate startup invariants.
    ///
    /// A configured-but-missing detector model is fatal: the pipeline must
    /// not enter its running state.
    pub fn validate(&self) -> Result<(), TrackerError> {
        if let Some(path) = &self.detector.model_path {
            if !path.exists() {
                return Err(TrackerError::Config(format!(
                    "detector model not found: {}",
                    path.display()
                )));
            }
        }
        if self.detector.scale_factor <= 1.0 {
            return Err(TrackerError::Config(format!(
                "scale_factor must be > 1.0, got {}",
                self.detector.scale_factor
            )));
        }
        if self.zones.gain <= 0 {
            return Err(TrackerError::Config(format!(
                "gain must be positive, got {}",
                self.zones.gain
            )));
        }
        for (axis, zone) in [("horizontal", &self.zones.horizontal), ("vertical", &self.zones.vertical)] {
            if let Some(z) = zone {
                // Re-run the ordering check; deserialization bypasses the
                // validating constructor
                ControlZone::new(z.min, z.max, z.dead_low, z.dead_high)
                    .map_err(|e: SteeringError| {
                        TrackerError::Config(format!("{axis} zone: {e}"))
                    })?;
            }
        }
        Ok(())
    }
}
