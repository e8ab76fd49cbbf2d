//! Width/offset computation for the strip, in fractional cell units.
//!
//! Overflow markers and windowed segments partition the width budget: each
//! rendered marker costs `marker_width + margin`, and whatever remains is
//! split evenly among the segments inside the window. Offsets are stored
//! direction-agnostic; RTL mirroring happens at the point of application.

use super::windowing::{SegmentWindow, WindowParams};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SegmentLayout {
    pub width: f64,
    pub offset: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct LayoutParams {
    /// Fixed width of one collapsed overflow marker.
    pub marker_width: f64,
    /// Gap between adjacent segments.
    pub margin: f64,
}

/// Compute width + offset for every segment in display order.
///
/// The running offset starts at `-(first_visible - leading) * (marker + margin)`
/// so the cumulative collapsed width of segments scrolled past the leading
/// edge is subtracted: the visible leading markers land at the left edge of
/// the canvas, the window right after them, and everything beyond the edge
/// caps falls outside `[0, total_width)` where the renderer clips it.
pub fn compute_layout(
    count: usize,
    window: &SegmentWindow,
    wp: &WindowParams,
    lp: &LayoutParams,
    total_width: f64,
) -> Vec<SegmentLayout> {
    if count == 0 {
        return Vec::new();
    }
    let lead = window.leading_overflow(wp);
    let trail = window.trailing_overflow(count, wp);
    let marker_span = lp.marker_width + lp.margin;
    let denom = count.min(wp.size) as f64;
    let segment_width =
        ((total_width - (lead + trail) as f64 * marker_span) / denom - lp.margin).max(0.0);

    let mut offset = -((window.first_visible - lead) as f64) * marker_span;
    let mut out = Vec::with_capacity(count);
    for index in 0..count {
        let width = if window.contains(index, wp) {
            segment_width
        } else {
            lp.marker_width
        };
        out.push(SegmentLayout { width, offset });
        offset += width + lp.margin;
    }
    out
}

/// Map a stored offset to a canvas position for the given direction.
/// Under RTL every offset is negated at application time — anchored to the
/// right edge — so the stored layout stays direction-agnostic.
pub fn directed_offset(layout: &SegmentLayout, total_width: f64, rtl: bool) -> f64 {
    if rtl {
        total_width - layout.offset - layout.width
    } else {
        layout.offset
    }
}
