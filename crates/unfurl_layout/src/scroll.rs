//! Scrollable containers
//!
//! A view becomes scrollable by carrying a [`ScrollableContainer`]. The tree
//! subtracts the container's offset from its children's positions, and the
//! auto-scroll logic only ever talks to the trait.
//!
//! Two adapters mirror the list kinds a host usually has:
//!
//! - [`RecyclerScroller`]: virtualized list, smooth scroll on both axes
//! - [`ListScroller`]: classic list, smooth vertical scroll with an explicit duration

use unfurl_animation::{lerp, Tween, DEFAULT_DURATION_MS};

/// Default smooth scroll duration of a virtualized list
pub const RECYCLER_SCROLL_DURATION_MS: u32 = 250;

/// A container that can be scrolled by a relative pixel delta
pub trait ScrollableContainer {
    /// Start a relative scroll. Offsets stay within the scroll range.
    fn scroll_by(&mut self, dx: i32, dy: i32);

    /// Current scroll offset `(x, y)`
    fn scroll_offset(&self) -> (i32, i32);

    /// Jump to an absolute offset, cancelling any smooth scroll
    fn scroll_to(&mut self, x: i32, y: i32);

    /// Update the maximum offsets, usually after a layout pass. The current
    /// offset and any running scroll are pulled back inside the new range.
    fn set_scroll_range(&mut self, max_x: i32, max_y: i32);

    /// Advance any running smooth scroll. Returns true if the offset moved.
    fn tick(&mut self, dt_ms: f32) -> bool;

    fn is_scrolling(&self) -> bool;
}

/// Smooth scroll along one axis
#[derive(Clone, Debug)]
struct AxisScroll {
    from: i32,
    to: i32,
    tween: Tween,
}

impl AxisScroll {
    fn new(from: i32, to: i32, duration_ms: u32) -> Self {
        Self {
            from,
            to,
            tween: Tween::started(duration_ms),
        }
    }

    /// Keep the scroll inside `[0, max]` after the range shrank. A scroll
    /// that ran past the new end continues from `offset` over its remaining
    /// time. Returns false once there is nothing left to scroll.
    fn clamp_to(&mut self, offset: i32, max: i32) -> bool {
        if self.from <= max && self.to <= max {
            return true;
        }
        let to = self.to.min(max);
        if to == offset {
            return false;
        }
        let remaining = self.tween.duration_ms() as f32 * (1.0 - self.tween.progress());
        *self = Self::new(offset, to, remaining.round() as u32);
        true
    }

    /// Advance and return the new offset, or `None` once settled
    fn step(&mut self, dt_ms: f32) -> Option<i32> {
        let t = self.tween.tick(dt_ms)?;
        Some(lerp(self.from as f32, self.to as f32, t).round() as i32)
    }
}

// ============================================================================
// Virtualized list
// ============================================================================

/// Scroll state of a virtualized, recycling list
#[derive(Clone, Debug)]
pub struct RecyclerScroller {
    offset_x: i32,
    offset_y: i32,
    max_x: i32,
    max_y: i32,
    scroll_x: Option<AxisScroll>,
    scroll_y: Option<AxisScroll>,
}

impl RecyclerScroller {
    pub fn new() -> Self {
        Self {
            offset_x: 0,
            offset_y: 0,
            max_x: 0,
            max_y: 0,
            scroll_x: None,
            scroll_y: None,
        }
    }

    /// Smooth scroll on both axes from the current offset
    pub fn smooth_scroll_by(&mut self, dx: i32, dy: i32) {
        self.scroll_x = (dx != 0).then(|| {
            let to = (self.offset_x + dx).clamp(0, self.max_x);
            AxisScroll::new(self.offset_x, to, RECYCLER_SCROLL_DURATION_MS)
        });
        self.scroll_y = (dy != 0).then(|| {
            let to = (self.offset_y + dy).clamp(0, self.max_y);
            AxisScroll::new(self.offset_y, to, RECYCLER_SCROLL_DURATION_MS)
        });
        tracing::trace!(dx, dy, "recycler smooth scroll");
    }
}

impl Default for RecyclerScroller {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollableContainer for RecyclerScroller {
    fn scroll_by(&mut self, dx: i32, dy: i32) {
        self.smooth_scroll_by(dx, dy);
    }

    fn scroll_offset(&self) -> (i32, i32) {
        (self.offset_x, self.offset_y)
    }

    fn scroll_to(&mut self, x: i32, y: i32) {
        self.scroll_x = None;
        self.scroll_y = None;
        self.offset_x = x.clamp(0, self.max_x);
        self.offset_y = y.clamp(0, self.max_y);
    }

    fn set_scroll_range(&mut self, max_x: i32, max_y: i32) {
        self.max_x = max_x.max(0);
        self.max_y = max_y.max(0);
        self.offset_x = self.offset_x.clamp(0, self.max_x);
        self.offset_y = self.offset_y.clamp(0, self.max_y);

        let (offset_x, max_x) = (self.offset_x, self.max_x);
        if self.scroll_x.as_mut().is_some_and(|s| !s.clamp_to(offset_x, max_x)) {
            self.scroll_x = None;
        }
        let (offset_y, max_y) = (self.offset_y, self.max_y);
        if self.scroll_y.as_mut().is_some_and(|s| !s.clamp_to(offset_y, max_y)) {
            self.scroll_y = None;
        }
    }

    fn tick(&mut self, dt_ms: f32) -> bool {
        let before = (self.offset_x, self.offset_y);

        if let Some(scroll) = self.scroll_x.as_mut() {
            match scroll.step(dt_ms) {
                Some(x) => self.offset_x = x,
                None => self.scroll_x = None,
            }
        }
        if let Some(scroll) = self.scroll_y.as_mut() {
            match scroll.step(dt_ms) {
                Some(y) => self.offset_y = y,
                None => self.scroll_y = None,
            }
        }
        // Drop settled axes so is_scrolling() turns false on the final tick
        if self.scroll_x.as_ref().is_some_and(|s| !s.tween.is_playing()) {
            self.scroll_x = None;
        }
        if self.scroll_y.as_ref().is_some_and(|s| !s.tween.is_playing()) {
            self.scroll_y = None;
        }

        before != (self.offset_x, self.offset_y)
    }

    fn is_scrolling(&self) -> bool {
        self.scroll_x.is_some() || self.scroll_y.is_some()
    }
}

// ============================================================================
// Classic list
// ============================================================================

/// Scroll state of a classic, absolutely positioned list
#[derive(Clone, Debug)]
pub struct ListScroller {
    offset_y: i32,
    max_y: i32,
    scroll: Option<AxisScroll>,
}

impl ListScroller {
    pub fn new() -> Self {
        Self {
            offset_y: 0,
            max_y: 0,
            scroll: None,
        }
    }

    /// Smooth vertical scroll over `duration_ms`
    pub fn smooth_scroll_by(&mut self, distance: i32, duration_ms: u32) {
        if distance == 0 {
            self.scroll = None;
            return;
        }
        let to = (self.offset_y + distance).clamp(0, self.max_y);
        self.scroll = Some(AxisScroll::new(self.offset_y, to, duration_ms));
        tracing::trace!(distance, duration_ms, "list smooth scroll");
    }
}

impl Default for ListScroller {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollableContainer for ListScroller {
    /// Classic lists only scroll vertically; `dx` is ignored
    fn scroll_by(&mut self, _dx: i32, dy: i32) {
        self.smooth_scroll_by(dy, DEFAULT_DURATION_MS);
    }

    fn scroll_offset(&self) -> (i32, i32) {
        (0, self.offset_y)
    }

    fn scroll_to(&mut self, _x: i32, y: i32) {
        self.scroll = None;
        self.offset_y = y.clamp(0, self.max_y);
    }

    fn set_scroll_range(&mut self, _max_x: i32, max_y: i32) {
        self.max_y = max_y.max(0);
        self.offset_y = self.offset_y.clamp(0, self.max_y);

        let (offset_y, max_y) = (self.offset_y, self.max_y);
        if self.scroll.as_mut().is_some_and(|s| !s.clamp_to(offset_y, max_y)) {
            self.scroll = None;
        }
    }

    fn tick(&mut self, dt_ms: f32) -> bool {
        let before = self.offset_y;
        if let Some(scroll) = self.scroll.as_mut() {
            match scroll.step(dt_ms) {
                Some(y) => self.offset_y = y,
                None => self.scroll = None,
            }
        }
        if self.scroll.as_ref().is_some_and(|s| !s.tween.is_playing()) {
            self.scroll = None;
        }
        before != self.offset_y
    }

    fn is_scrolling(&self) -> bool {
        self.scroll.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(container: &mut dyn ScrollableContainer) {
        for _ in 0..100 {
            container.tick(16.0);
            if !container.is_scrolling() {
                break;
            }
        }
    }

    #[test]
    fn test_recycler_scrolls_both_axes() {
        let mut scroller = RecyclerScroller::new();
        scroller.set_scroll_range(100, 1000);
        scroller.scroll_by(20, 300);
        assert!(scroller.is_scrolling());

        scroller.tick(125.0);
        assert_eq!(scroller.scroll_offset(), (10, 150));

        run(&mut scroller);
        assert_eq!(scroller.scroll_offset(), (20, 300));
        assert!(!scroller.is_scrolling());
    }

    #[test]
    fn test_recycler_clamps_to_range() {
        let mut scroller = RecyclerScroller::new();
        scroller.set_scroll_range(0, 120);
        scroller.scroll_by(0, 500);
        run(&mut scroller);
        assert_eq!(scroller.scroll_offset(), (0, 120));

        scroller.scroll_by(0, -500);
        run(&mut scroller);
        assert_eq!(scroller.scroll_offset(), (0, 0));
    }

    #[test]
    fn test_list_uses_animation_duration_and_ignores_dx() {
        let mut scroller = ListScroller::new();
        scroller.set_scroll_range(500, 600);
        scroller.scroll_by(40, 300);

        scroller.tick(150.0);
        assert_eq!(scroller.scroll_offset(), (0, 150));

        scroller.tick(150.0);
        assert_eq!(scroller.scroll_offset(), (0, 300));
        assert!(!scroller.is_scrolling());
    }

    #[test]
    fn test_shrinking_range_clamps_offset() {
        let mut scroller = RecyclerScroller::new();
        scroller.set_scroll_range(50, 400);
        scroller.scroll_to(40, 300);
        assert_eq!(scroller.scroll_offset(), (40, 300));

        scroller.set_scroll_range(10, 120);
        assert_eq!(scroller.scroll_offset(), (10, 120));

        scroller.set_scroll_range(0, 0);
        assert_eq!(scroller.scroll_offset(), (0, 0));

        let mut list = ListScroller::new();
        list.set_scroll_range(0, 400);
        list.scroll_to(0, 300);
        list.set_scroll_range(0, 100);
        assert_eq!(list.scroll_offset(), (0, 100));
    }

    #[test]
    fn test_shrinking_range_retargets_running_scroll() {
        let mut scroller = RecyclerScroller::new();
        scroller.set_scroll_range(0, 1000);
        scroller.scroll_by(0, 400);
        scroller.tick(125.0);
        assert_eq!(scroller.scroll_offset(), (0, 200));

        scroller.set_scroll_range(0, 300);
        assert!(scroller.is_scrolling());
        run(&mut scroller);
        assert_eq!(scroller.scroll_offset(), (0, 300));

        // already past the new end: nothing left to animate
        let mut list = ListScroller::new();
        list.set_scroll_range(0, 600);
        list.scroll_by(0, 400);
        list.tick(150.0);
        assert_eq!(list.scroll_offset(), (0, 200));
        list.set_scroll_range(0, 150);
        assert_eq!(list.scroll_offset(), (0, 150));
        assert!(!list.is_scrolling());
        assert!(!list.tick(16.0));
    }

    #[test]
    fn test_scroll_to_cancels_smooth_scroll() {
        let mut scroller = RecyclerScroller::new();
        scroller.set_scroll_range(0, 500);
        scroller.scroll_by(0, 300);
        scroller.tick(16.0);

        scroller.scroll_to(0, 900);
        assert!(!scroller.is_scrolling());
        assert_eq!(scroller.scroll_offset(), (0, 500));
        assert!(!scroller.tick(16.0));
    }

    #[test]
    fn test_zero_distance_does_not_scroll() {
        let mut scroller = ListScroller::new();
        scroller.set_scroll_range(0, 600);
        scroller.scroll_by(0, 0);
        assert!(!scroller.is_scrolling());
        assert!(!scroller.tick(16.0));
    }
}
