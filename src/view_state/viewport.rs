//! Scroll position over the row timeline.

use std::ops::Range;

/// Which window of the row store is shown.
///
/// A sum type that keeps scroll intent separate from ingestion:
/// - `Tracking`: always shows the newest rows
/// - `Fixed`: shows rows starting at a specific index
///
/// # Clamping Behavior
/// A fixed index is clamped to `[0, max(0, len - rows_visible)]` whenever it
/// moves, so the window never runs past the newest row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewportCursor {
    /// Follow the newest `rows_visible` rows.
    #[default]
    Tracking,

    /// Show rows starting at this index (0 = oldest stored row).
    Fixed(usize),
}

/// Largest valid fixed index.
fn max_offset(len: usize, rows_visible: usize) -> usize {
    len.saturating_sub(rows_visible)
}

impl ViewportCursor {
    /// True while following the newest rows.
    pub fn is_tracking(&self) -> bool {
        matches!(self, ViewportCursor::Tracking)
    }

    /// Resume following the newest rows.
    pub fn reanchor_to_tail(&mut self) {
        *self = ViewportCursor::Tracking;
    }

    /// Move back `n` rows.
    ///
    /// Leaving `Tracking` pins the cursor to the window that was on screen
    /// before moving. A stale fixed index (the pane grew or the store
    /// shrank) is clamped first, so every step moves the visible window.
    /// The index saturates at 0.
    pub fn scroll_up(&mut self, n: usize, len: usize, rows_visible: usize) {
        let max = max_offset(len, rows_visible);
        let from = match *self {
            ViewportCursor::Tracking => max,
            ViewportCursor::Fixed(v) => v.min(max),
        };
        *self = ViewportCursor::Fixed(from.saturating_sub(n));
    }

    /// Move forward `n` rows.
    ///
    /// No-op while the store holds fewer rows than fit on screen, and while
    /// already tracking. Reaching the newest window switches back to
    /// `Tracking` so fresh rows are followed again.
    pub fn scroll_down(&mut self, n: usize, len: usize, rows_visible: usize) {
        if len < rows_visible {
            return;
        }
        if let ViewportCursor::Fixed(v) = *self {
            let max = max_offset(len, rows_visible);
            let next = v.saturating_add(n).min(max);
            *self = if next == max {
                ViewportCursor::Tracking
            } else {
                ViewportCursor::Fixed(next)
            };
        }
    }

    /// Shift a fixed index after `evicted` rows left the front of the store,
    /// keeping the same rows on screen for as long as they exist.
    pub fn on_evicted(&mut self, evicted: usize) {
        if let ViewportCursor::Fixed(v) = self {
            *v = v.saturating_sub(evicted);
        }
    }

    /// Index range of the rows to show.
    pub fn current_window(&self, len: usize, rows_visible: usize) -> Range<usize> {
        match *self {
            ViewportCursor::Tracking => max_offset(len, rows_visible)..len,
            ViewportCursor::Fixed(v) => {
                let start = v.min(max_offset(len, rows_visible));
                start..(start + rows_visible).min(len)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_tracking() {
        assert_eq!(ViewportCursor::default(), ViewportCursor::Tracking);
        assert!(ViewportCursor::default().is_tracking());
    }

    mod current_window {
        use super::*;

        #[test]
        fn tracking_shows_newest_rows() {
            assert_eq!(ViewportCursor::Tracking.current_window(100, 20), 80..100);
        }

        #[test]
        fn tracking_shows_everything_when_store_is_short() {
            assert_eq!(ViewportCursor::Tracking.current_window(5, 20), 0..5);
        }

        #[test]
        fn empty_store_yields_empty_window() {
            assert_eq!(ViewportCursor::Tracking.current_window(0, 20), 0..0);
            assert_eq!(ViewportCursor::Fixed(3).current_window(0, 20), 0..0);
        }

        #[test]
        fn fixed_starts_at_index() {
            assert_eq!(ViewportCursor::Fixed(10).current_window(100, 20), 10..30);
        }

        #[test]
        fn fixed_is_clamped_after_store_shrinks() {
            assert_eq!(ViewportCursor::Fixed(90).current_window(50, 20), 30..50);
        }
    }

    mod scroll_up {
        use super::*;

        #[test]
        fn from_tracking_pins_then_moves() {
            let mut cursor = ViewportCursor::Tracking;
            cursor.scroll_up(1, 100, 20);
            assert_eq!(cursor, ViewportCursor::Fixed(79));
        }

        #[test]
        fn from_tracking_with_short_store_saturates_at_zero() {
            let mut cursor = ViewportCursor::Tracking;
            cursor.scroll_up(5, 10, 20);
            assert_eq!(cursor, ViewportCursor::Fixed(0));
        }

        #[test]
        fn stale_index_is_clamped_before_moving() {
            // Pane grew from 10 to 20 rows while pinned at 90
            let mut cursor = ViewportCursor::Fixed(90);
            let before = cursor.current_window(100, 20);

            cursor.scroll_up(1, 100, 20);

            assert_eq!(before, 80..100);
            assert_eq!(cursor, ViewportCursor::Fixed(79));
            assert_eq!(cursor.current_window(100, 20), 79..99);
        }

        #[test]
        fn fixed_saturates_at_zero() {
            let mut cursor = ViewportCursor::Fixed(3);
            cursor.scroll_up(5, 100, 20);
            assert_eq!(cursor, ViewportCursor::Fixed(0));
        }
    }

    mod scroll_down {
        use super::*;

        #[test]
        fn noop_when_store_shorter_than_viewport() {
            let mut cursor = ViewportCursor::Fixed(0);
            cursor.scroll_down(5, 10, 20);
            assert_eq!(cursor, ViewportCursor::Fixed(0));
        }

        #[test]
        fn noop_while_tracking() {
            let mut cursor = ViewportCursor::Tracking;
            cursor.scroll_down(1, 100, 20);
            assert_eq!(cursor, ViewportCursor::Tracking);
        }

        #[test]
        fn moves_by_exactly_n() {
            let mut cursor = ViewportCursor::Fixed(10);
            cursor.scroll_down(5, 100, 20);
            assert_eq!(cursor, ViewportCursor::Fixed(15));
        }

        #[test]
        fn reaching_bottom_resumes_tracking() {
            let mut cursor = ViewportCursor::Fixed(78);
            cursor.scroll_down(5, 100, 20);
            assert_eq!(cursor, ViewportCursor::Tracking);
        }

        #[test]
        fn up_then_down_round_trips_to_tracking() {
            let mut cursor = ViewportCursor::Tracking;
            cursor.scroll_up(1, 100, 20);
            cursor.scroll_down(1, 100, 20);
            assert_eq!(cursor, ViewportCursor::Tracking);
        }
    }

    #[test]
    fn reanchor_forces_tracking() {
        let mut cursor = ViewportCursor::Fixed(4);
        cursor.reanchor_to_tail();
        assert!(cursor.is_tracking());
    }

    #[test]
    fn on_evicted_shifts_fixed_index() {
        let mut cursor = ViewportCursor::Fixed(10);
        cursor.on_evicted(3);
        assert_eq!(cursor, ViewportCursor::Fixed(7));
        cursor.on_evicted(30);
        assert_eq!(cursor, ViewportCursor::Fixed(0));
    }

    #[test]
    fn on_evicted_leaves_tracking_alone() {
        let mut cursor = ViewportCursor::Tracking;
        cursor.on_evicted(3);
        assert_eq!(cursor, ViewportCursor::Tracking);
    }
}
