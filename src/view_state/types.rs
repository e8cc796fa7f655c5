//! Frame geometry derived from the terminal size.

/// Terminal lines not available to rows: header, bordered send bar,
/// rows-pane borders, status line.
pub const CHROME_ROWS: u16 = 1 + 3 + 2 + 1;

/// Terminal columns not available to rows: the rows-pane borders.
pub const CHROME_COLS: u16 = 2;

/// Width of the `HH:MM:SS.mmm ` prefix.
pub const TIMESTAMP_COLS: u16 = 13;

/// Width of the `[RX] ` tag that follows the timestamp.
pub const DIRECTION_TAG_COLS: u16 = 5;

/// Smallest width handed to the ingestor.
pub const MIN_ROW_WIDTH: usize = 8;

/// Smallest number of visible rows.
pub const MIN_ROWS_VISIBLE: usize = 1;

/// Per-frame sizes the row engine works against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGeometry {
    /// Bytes per RX row.
    pub width: usize,
    /// Rows that fit in the rows pane.
    pub rows_visible: usize,
}

impl FrameGeometry {
    /// Explicit geometry, clamped to the minimums.
    pub fn new(width: usize, rows_visible: usize) -> Self {
        Self {
            width: width.max(MIN_ROW_WIDTH),
            rows_visible: rows_visible.max(MIN_ROWS_VISIBLE),
        }
    }

    /// Geometry for a `cols` × `rows` terminal.
    ///
    /// The timestamp and direction tag columns are subtracted from the width
    /// while they are shown, so rows wrap at the edge of the visible text area.
    pub fn from_terminal(cols: u16, rows: u16, timestamps: bool) -> Self {
        let mut chrome_cols = CHROME_COLS;
        if timestamps {
            chrome_cols += TIMESTAMP_COLS + DIRECTION_TAG_COLS;
        }
        Self::new(
            usize::from(cols.saturating_sub(chrome_cols)),
            usize::from(rows.saturating_sub(CHROME_ROWS)),
        )
    }
}
