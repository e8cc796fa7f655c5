//! Bounded row timeline fed by received bytes and local transmissions.
//!
//! RX bytes are wrapped into rows of at most `width` bytes, closing early on
//! [`TERMINATOR`]. TX text is merged into the newest TX row until that row is
//! terminated. Both writers share one FIFO-evicted store.

use crate::model::{Direction, Row, RowError, TERMINATOR};
use std::collections::VecDeque;
use std::ops::Range;
use tracing::trace;

#[cfg(test)]
#[path = "row_store_tests.rs"]
mod tests;

/// Default number of rows retained.
pub const DEFAULT_ROW_CAPACITY: usize = 1024;

/// Result of one ingest call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IngestReport {
    /// Bytes appended to the row that was still open.
    pub continued: usize,
    /// Rows created by this call.
    pub rows_created: usize,
    /// Rows evicted from the oldest end.
    pub rows_evicted: usize,
}

/// Chronologically ordered, capacity-bounded sequence of rows.
#[derive(Debug, Clone)]
pub struct RowStore {
    /// Oldest at front, newest at back
    rows: VecDeque<Row>,
    capacity: usize,
}

impl Default for RowStore {
    fn default() -> Self {
        Self::new(DEFAULT_ROW_CAPACITY)
    }
}

impl RowStore {
    /// Create an empty store retaining at most `capacity` rows.
    pub fn new(capacity: usize) -> Self {
        Self {
            rows: VecDeque::with_capacity(capacity.min(DEFAULT_ROW_CAPACITY)),
            capacity,
        }
    }

    /// Maximum number of rows retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of rows currently held.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no rows are held.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row at `index` (0 = oldest).
    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Most recently created row.
    pub fn last(&self) -> Option<&Row> {
        self.rows.back()
    }

    /// All rows, oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Row> + ExactSizeIterator {
        self.rows.iter()
    }

    /// Rows in `window`, clamped to the stored range.
    pub fn window(&self, window: Range<usize>) -> impl Iterator<Item = &Row> {
        let end = window.end.min(self.rows.len());
        let start = window.start.min(end);
        self.rows.range(start..end)
    }

    /// Drop every row.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Wrap received bytes into RX rows of at most `width` bytes.
    ///
    /// The newest row is continued first when it is an unterminated RX row
    /// shorter than `width`; everything after that starts fresh rows. A row
    /// closes when it ends in [`TERMINATOR`] or reaches `width`.
    ///
    /// # Errors
    ///
    /// Returns [`RowError::InvalidWidth`] for `width == 0`, before touching the
    /// store.
    pub fn ingest(&mut self, bytes: &[u8], width: usize) -> Result<IngestReport, RowError> {
        if width == 0 {
            return Err(RowError::InvalidWidth { width });
        }

        let mut report = IngestReport::default();
        let mut rest = bytes;

        if let Some(open) = self.open_rx_row(width) {
            let bound = (width - open.len()).min(rest.len());
            let take = chunk_len(&rest[..bound]);
            open.extend(&rest[..take]);
            report.continued = take;
            rest = &rest[take..];
        }

        while !rest.is_empty() {
            let bound = width.min(rest.len());
            let take = chunk_len(&rest[..bound]);
            report.rows_evicted += self.push_row(Row::new(Direction::Rx, rest[..take].to_vec()));
            report.rows_created += 1;
            rest = &rest[take..];
        }

        report.rows_evicted += self.evict_overflow();
        trace!(
            bytes = bytes.len(),
            width,
            continued = report.continued,
            created = report.rows_created,
            evicted = report.rows_evicted,
            "ingested"
        );
        Ok(report)
    }

    /// Merge locally sent text into the TX timeline.
    ///
    /// Appends onto the newest row when it is an unterminated TX row, which
    /// lets send-on-type echo build one row per line instead of one per
    /// keystroke. TX rows have no width bound. Empty text is ignored.
    ///
    /// Returns the number of rows evicted.
    pub fn append_transmit(&mut self, text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }

        match self.rows.back_mut() {
            Some(last) if last.direction() == Direction::Tx && !last.is_terminated() => {
                last.extend(text.as_bytes());
            }
            _ => {
                return self.push_row(Row::new(Direction::Tx, text.as_bytes().to_vec()));
            }
        }

        self.evict_overflow()
    }

    /// Newest row, if it may still take RX bytes at this width.
    fn open_rx_row(&mut self, width: usize) -> Option<&mut Row> {
        self.rows.back_mut().filter(|row| {
            row.direction() == Direction::Rx && row.len() < width && !row.is_terminated()
        })
    }

    /// Append a row, evicting first so the store never exceeds capacity.
    fn push_row(&mut self, row: Row) -> usize {
        let mut evicted = 0;
        while !self.rows.is_empty() && self.rows.len() >= self.capacity {
            self.rows.pop_front();
            evicted += 1;
        }
        if self.capacity == 0 {
            return evicted + 1;
        }
        self.rows.push_back(row);
        evicted
    }

    /// Pop from the front until within capacity.
    fn evict_overflow(&mut self) -> usize {
        let overflow = self.rows.len().saturating_sub(self.capacity);
        self.rows.drain(..overflow);
        overflow
    }
}

/// Length of the next row chunk: through the first terminator, or all of it.
fn chunk_len(scan: &[u8]) -> usize {
    scan.iter()
        .position(|&b| b == TERMINATOR)
        .map_or(scan.len(), |idx| idx + 1)
}
