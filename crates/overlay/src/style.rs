//! Annotation colors and style configuration

use image::Rgb;
use serde::{Deserialize, Serialize};

/// Named colors used by the stock overlay set.
pub mod palette {
    use image::Rgb;

    /// Primary accent for brackets and markers.
    pub const PRIMARY: Rgb<u8> = Rgb([60, 85, 240]);
    /// Secondary accent.
    pub const SECONDARY: Rgb<u8> = Rgb([50, 181, 248]);
    /// Label plate fill.
    pub const LABEL: Rgb<u8> = Rgb([240, 72, 90]);

    pub const BLUE: Rgb<u8> = Rgb([0x00, 0x00, 0xFF]);
    pub const GREEN: Rgb<u8> = Rgb([0x00, 0xFF, 0x00]);
    pub const RED: Rgb<u8> = Rgb([0xFF, 0x00, 0x00]);
    pub const PURPLE: Rgb<u8> = Rgb([0xFF, 0x00, 0xFF]);
    pub const YELLOW: Rgb<u8> = Rgb([0xFF, 0xFF, 0x00]);
    pub const CYAN: Rgb<u8> = Rgb([0x00, 0xFF, 0xFF]);
    pub const WHITE: Rgb<u8> = Rgb([0xFF, 0xFF, 0xFF]);

    /// Status line color while battery is healthy.
    pub const BATTERY_OK: Rgb<u8> = Rgb([71, 185, 245]);
    /// Status line color at or below the low-battery threshold.
    pub const BATTERY_LOW: Rgb<u8> = Rgb([245, 95, 106]);

    /// Darken a color by subtracting `amount` from each channel.
    pub fn darken(color: Rgb<u8>, amount: u8) -> Rgb<u8> {
        Rgb([
            color[0].saturating_sub(amount),
            color[1].saturating_sub(amount),
            color[2].saturating_sub(amount),
        ])
    }
}

/// Center marker variant drawn inside a detection box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CenterMarker {
    /// Hollow circle of fixed radius.
    Circle,
    /// Two perpendicular segments with the given arm length.
    Crosshair { arm: i32 },
}

/// How a detection is rendered. Configured once at startup, read-only after.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationStyle {
    /// Bracket and marker color.
    pub primary: [u8; 3],
    /// Secondary accent (center marker).
    pub secondary: [u8; 3],
    /// Label plate fill.
    pub label_plate: [u8; 3],
    /// Label text color.
    pub label_text: [u8; 3],
    /// Offset line color.
    pub offset_line: [u8; 3],
    /// Stroke width for brackets and markers, pixels.
    pub stroke_width: u32,
    /// Corner bracket arm length, pixels.
    pub corner_size: i32,
    /// Center marker shape.
    pub marker: CenterMarker,
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            primary: palette::LABEL.0,
            secondary: palette::PRIMARY.0,
            label_plate: palette::PRIMARY.0,
            label_text: palette::WHITE.0,
            offset_line: palette::YELLOW.0,
            stroke_width: 2,
            corner_size: 20,
            marker: CenterMarker::Crosshair { arm: 15 },
        }
    }
}

impl AnnotationStyle {
    pub fn primary(&self) -> Rgb<u8> {
        Rgb(self.primary)
    }

    pub fn secondary(&self) -> Rgb<u8> {
        Rgb(self.secondary)
    }

    pub fn label_plate(&self) -> Rgb<u8> {
        Rgb(self.label_plate)
    }

    pub fn label_text(&self) -> Rgb<u8> {
        Rgb(self.label_text)
    }

    pub fn offset_line(&self) -> Rgb<u8> {
        Rgb(self.offset_line)
    }
}
