//! Display rows: the unit of the received/transmitted timeline.

use chrono::{DateTime, Local};

/// Line-break byte that closes an RX row before it reaches the width bound.
pub const TERMINATOR: u8 = b'\n';

/// Which side of the link a row originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Received from the device.
    Rx,
    /// Typed locally and transmitted to the device.
    Tx,
}

impl Direction {
    /// Short tag shown ahead of timestamped rows.
    pub fn tag(self) -> &'static str {
        match self {
            Direction::Rx => "RX",
            Direction::Tx => "TX",
        }
    }
}

/// One logical display line.
///
/// RX rows are bounded by the ingest width; TX rows are not. The text is kept
/// as raw bytes because the device stream is not guaranteed to be UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    direction: Direction,
    text: Vec<u8>,
    timestamp: DateTime<Local>,
}

impl Row {
    /// Create a row stamped with the current wall-clock time.
    pub fn new(direction: Direction, text: Vec<u8>) -> Self {
        Self::with_timestamp(direction, text, Local::now())
    }

    /// Create a row with an explicit creation time.
    pub fn with_timestamp(direction: Direction, text: Vec<u8>, timestamp: DateTime<Local>) -> Self {
        Self {
            direction,
            text,
            timestamp,
        }
    }

    /// Direction tag of this row.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Raw row bytes, including a trailing terminator if present.
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    /// Creation instant.
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// Length of the row text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// True when the row holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True when the row already ends in [`TERMINATOR`].
    pub fn is_terminated(&self) -> bool {
        self.text.last() == Some(&TERMINATOR)
    }

    pub(crate) fn extend(&mut self, bytes: &[u8]) {
        self.text.extend_from_slice(bytes);
    }

    /// Text prepared for display.
    ///
    /// Drops the trailing terminator and any carriage returns before it,
    /// decodes lossily, turns tabs into spaces and replaces the remaining
    /// control characters with `.`.
    pub fn display_text(&self) -> String {
        let mut end = self.text.len();
        if end > 0 && self.text[end - 1] == TERMINATOR {
            end -= 1;
        }
        while end > 0 && self.text[end - 1] == b'\r' {
            end -= 1;
        }

        String::from_utf8_lossy(&self.text[..end])
            .chars()
            .map(|c| match c {
                '\t' => ' ',
                c if c.is_control() => '.',
                c => c,
            })
            .collect()
    }
}
