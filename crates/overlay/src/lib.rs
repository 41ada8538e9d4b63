//! Frame Annotation Overlays
//!
//! Draws diagnostic annotations onto video frames:
//! - Corner-bracket bounding frames
//! - Center markers (circle or crosshair)
//! - Shadowed label plates with upper-cased text
//! - Side info panels, offset lines, center guides, status text
//!
//! Every drawing call is a pure side effect on the supplied frame and is
//! idempotent: each draw overwrites pixels unconditionally, so repeating a
//! call with identical arguments produces identical bytes. Degenerate input
//! (empty text, zero sizes, off-frame regions) draws nothing.

pub mod draw;
pub mod font;
pub mod style;

pub use draw::{
    draw_center_guide, draw_center_marker, draw_corner_frame, draw_info_panel, draw_label,
    draw_offset_line, draw_status_text, PanelContent,
};
pub use style::{palette, AnnotationStyle, CenterMarker};
