//! Axis-aligned detection regions

use serde::{Deserialize, Serialize};

/// Axis-aligned pixel region reported by a detector.
///
/// Top-left corner plus size, integer pixel units. A region with
/// non-positive size never reaches the renderer or the controller;
/// [`Region::clip_to`] enforces that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Center of the region (floor division).
    pub fn center(&self) -> (i32, i32) {
        (self.x + (self.width / 2) as i32, self.y + (self.height / 2) as i32)
    }

    /// Bottom-right corner, exclusive.
    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    /// Bottom edge, exclusive.
    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    /// Intersect with the frame bounds.
    ///
    /// Returns `None` when the region is degenerate (zero width or height)
    /// or lies entirely outside the frame.
    pub fn clip_to(&self, frame_width: u32, frame_height: u32) -> Option<Region> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let x0 = self.x.max(0);
        let y0 = self.y.max(0);
        let x1 = self.right().min(frame_width as i32);
        let y1 = self.bottom().min(frame_height as i32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some(Region {
            x: x0,
            y: y0,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        })
    }
}
