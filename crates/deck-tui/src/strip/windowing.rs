//! Sliding window over the segment list.
//!
//! At most `size` segments render at full width; the rest collapse into
//! fixed-width overflow markers, capped per side. When the active segment
//! crosses a window edge the window shifts by `step`, clamped so it never
//! overshoots either end of the list.

#[derive(Debug, Clone, Copy)]
pub struct WindowParams {
    /// Display budget: how many segments render at full width.
    pub size: usize,
    /// Max overflow markers shown on one side.
    pub edge_cap: usize,
    /// How far the window shifts when it has to move.
    pub step: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentWindow {
    pub first_visible: usize,
}

impl SegmentWindow {
    /// Window placement when the active index first becomes known.
    ///
    /// Boundaries snap to multiples of `size` rather than centering on the
    /// active segment, so the same active index always lands on the same
    /// window. Near either end the window pins flush to that end.
    pub fn initial_for(active: usize, count: usize, p: &WindowParams) -> Self {
        if count <= p.size {
            return Self { first_visible: 0 };
        }
        let first_visible = if active > p.size && active + p.size < count {
            active - active % p.size
        } else if active + p.size >= count {
            count - p.size
        } else {
            0
        };
        Self { first_visible }
    }

    /// Re-center after a progress update. Returns true when the window moved
    /// and the caller must relayout.
    pub fn check_overflow(&mut self, active: usize, count: usize, p: &WindowParams) -> bool {
        if active >= self.first_visible + p.size {
            // Active crossed the trailing edge: walk forward, never past the end.
            let next_limit = self.first_visible + p.size + p.step - 1;
            if next_limit < count {
                self.first_visible += p.step;
            } else {
                self.first_visible += count - (self.first_visible + p.size);
            }
            true
        } else if active < self.first_visible {
            // Active receded before the leading edge: walk back, floor at zero.
            self.first_visible -= p.step.min(self.first_visible);
            true
        } else {
            false
        }
    }

    pub fn leading_overflow(&self, p: &WindowParams) -> usize {
        p.edge_cap.min(self.first_visible)
    }

    pub fn trailing_overflow(&self, count: usize, p: &WindowParams) -> usize {
        count
            .saturating_sub(self.first_visible + p.size)
            .min(p.edge_cap)
    }

    pub fn contains(&self, index: usize, p: &WindowParams) -> bool {
        index >= self.first_visible && index < self.first_visible + p.size
    }
}
