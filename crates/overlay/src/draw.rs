//! Drawing primitives for detection annotations
//!
//! All functions mutate the frame in place and hold no state between calls.
//! Coordinates may extend past the frame; drawing clips at the bounds.

use image::{Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_rect_mut, draw_hollow_circle_mut, draw_hollow_rect_mut, draw_line_segment_mut,
};
use imageproc::rect::Rect;

use frame_capture::{Region, VideoFrame};

use crate::font;
use crate::style::{palette, AnnotationStyle, CenterMarker};

/// Fixed radius of the circle center marker.
const CIRCLE_RADIUS: i32 = 5;
/// Vertical gap between box bottom and the label plate.
const LABEL_GAP: i32 = 8;
/// Label plate height: plate spans `y+h+8 .. y+h+30`.
const LABEL_PLATE_HEIGHT: i32 = 22;
/// Shadow plate offset.
const LABEL_SHADOW_OFFSET: i32 = 3;
/// Channel delta for the shadow plate.
const LABEL_SHADE: u8 = 30;
/// Horizontal gap between box and the info panel.
const PANEL_GAP: i32 = 10;
/// Info panel line height.
const PANEL_LINE_HEIGHT: i32 = 20;

/// Content of the side info panel.
#[derive(Debug, Clone)]
pub enum PanelContent {
    /// The region's raw X/Y/W/H values.
    Metrics,
    /// Arbitrary caller-supplied lines, rendered upper-cased.
    Lines(Vec<String>),
}

fn filled_rect(image: &mut RgbImage, x: i32, y: i32, width: u32, height: u32, color: Rgb<u8>) {
    if width == 0 || height == 0 {
        return;
    }
    draw_filled_rect_mut(image, Rect::at(x, y).of_size(width, height), color);
}

/// Draw the eight corner-bracket segments of a bounding frame.
///
/// Arms of length `size` run along the box edges from each corner, so the
/// frame reads as four L-shaped brackets rather than a full rectangle.
/// `size == 0` or `thickness == 0` draws nothing.
pub fn draw_corner_frame(
    frame: &mut VideoFrame,
    region: &Region,
    color: Rgb<u8>,
    size: i32,
    thickness: u32,
) {
    if size <= 0 || thickness == 0 {
        return;
    }
    let mut image = frame.take_image();
    let (x, y) = (region.x, region.y);
    let (w, h) = (region.width as i32, region.height as i32);
    let arm = size as u32;
    let t = thickness;

    // Top-left
    filled_rect(&mut image, x, y, arm, t, color);
    filled_rect(&mut image, x, y, t, arm, color);
    // Top-right
    filled_rect(&mut image, x + w - size, y, arm, t, color);
    filled_rect(&mut image, x + w - t as i32, y, t, arm, color);
    // Bottom-left
    filled_rect(&mut image, x, y + h - t as i32, arm, t, color);
    filled_rect(&mut image, x, y + h - size, t, arm, color);
    // Bottom-right
    filled_rect(&mut image, x + w - size, y + h - t as i32, arm, t, color);
    filled_rect(&mut image, x + w - t as i32, y + h - size, t, arm, color);

    frame.restore(image);
}

/// Draw a center marker at the region's center (floor division).
pub fn draw_center_marker(
    frame: &mut VideoFrame,
    region: &Region,
    color: Rgb<u8>,
    marker: CenterMarker,
    thickness: u32,
) {
    if thickness == 0 {
        return;
    }
    let (cx, cy) = region.center();
    let mut image = frame.take_image();

    match marker {
        CenterMarker::Circle => {
            for inset in 0..(thickness as i32).min(CIRCLE_RADIUS) {
                draw_hollow_circle_mut(&mut image, (cx, cy), CIRCLE_RADIUS - inset, color);
            }
        }
        CenterMarker::Crosshair { arm } => {
            if arm > 0 {
                let span = (2 * arm + 1) as u32;
                filled_rect(&mut image, cx - arm, cy, span, thickness, color);
                filled_rect(&mut image, cx, cy - arm, thickness, span, color);
            }
        }
    }

    frame.restore(image);
}

/// Draw a shadowed label plate below the region with upper-cased text.
///
/// The plate spans `x .. x + len(text)*12` horizontally and `y+h+8 ..
/// y+h+30` vertically; a darkened copy offset by 3 px is drawn first, then
/// the full-color plate and the text. Empty text draws nothing.
pub fn draw_label(frame: &mut VideoFrame, region: &Region, style: &AnnotationStyle, text: &str) {
    if text.is_empty() {
        return;
    }
    let plate_width = font::text_width(text) as u32;
    let x = region.x;
    let top = region.bottom() + LABEL_GAP;
    let mut image = frame.take_image();

    filled_rect(
        &mut image,
        x + LABEL_SHADOW_OFFSET,
        top + LABEL_SHADOW_OFFSET,
        plate_width,
        LABEL_PLATE_HEIGHT as u32,
        palette::darken(style.label_plate(), LABEL_SHADE),
    );
    filled_rect(&mut image, x, top, plate_width, LABEL_PLATE_HEIGHT as u32, style.label_plate());
    font::draw_text(
        &mut image,
        text,
        x + LABEL_SHADOW_OFFSET,
        top + (LABEL_PLATE_HEIGHT - font::TEXT_HEIGHT) / 2,
        style.label_text(),
    );

    frame.restore(image);
}

/// Draw the side info panel to the right of the region.
pub fn draw_info_panel(frame: &mut VideoFrame, region: &Region, color: Rgb<u8>, content: &PanelContent) {
    let metrics;
    let lines: &[String] = match content {
        PanelContent::Metrics => {
            metrics = [
                format!("X: {}px", region.x),
                format!("Y: {}px", region.y),
                format!("W: {}px", region.width),
                format!("H: {}px", region.height),
            ];
            &metrics
        }
        PanelContent::Lines(lines) => lines,
    };

    let x = region.right() + PANEL_GAP;
    let mut image = frame.take_image();
    for (i, line) in lines.iter().enumerate() {
        let y = region.y + PANEL_GAP + PANEL_LINE_HEIGHT * i as i32;
        font::draw_text(&mut image, line, x, y, color);
    }
    frame.restore(image);
}

/// Draw the segment connecting a detection center to the frame center.
pub fn draw_offset_line(frame: &mut VideoFrame, from: (i32, i32), to: (i32, i32), color: Rgb<u8>) {
    let mut image = frame.take_image();
    // Two offset passes approximate a 2 px stroke at any angle
    for (dx, dy) in [(0, 0), (1, 0), (0, 1)] {
        draw_line_segment_mut(
            &mut image,
            ((from.0 + dx) as f32, (from.1 + dy) as f32),
            ((to.0 + dx) as f32, (to.1 + dy) as f32),
            color,
        );
    }
    frame.restore(image);
}

/// Draw the fixed-size hollow guide rectangle at the frame center.
pub fn draw_center_guide(frame: &mut VideoFrame, color: Rgb<u8>, half_extent: i32) {
    if half_extent <= 0 {
        return;
    }
    let (cx, cy) = frame.center();
    let side = (2 * half_extent) as u32;
    let mut image = frame.take_image();
    draw_hollow_rect_mut(
        &mut image,
        Rect::at(cx - half_extent, cy - half_extent).of_size(side, side),
        color,
    );
    if side > 2 {
        draw_hollow_rect_mut(
            &mut image,
            Rect::at(cx - half_extent + 1, cy - half_extent + 1).of_size(side - 2, side - 2),
            color,
        );
    }
    frame.restore(image);
}

/// Draw a status line (battery / health) at `origin`.
pub fn draw_status_text(frame: &mut VideoFrame, text: &str, origin: (i32, i32), color: Rgb<u8>) {
    if text.is_empty() {
        return;
    }
    let mut image = frame.take_image();
    font::draw_text(&mut image, text, origin.0, origin.1, color);
    frame.restore(image);
}
