//! Application state and transitions.
//!
//! AppState is the single context object owned by the UI loop. It holds the
//! row timeline, the scroll cursor and every piece of UI state. Transitions
//! are plain methods with no I/O; the shell performs device writes.

use crate::model::{KeyAction, LineEnding, RowError};
use crate::state::{CommandHistory, IngestReport, RowStore, SendInput};
use crate::view_state::ViewportCursor;
use tracing::debug;

// ===== InputMode =====

/// Which component receives key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Scrolling the row timeline.
    #[default]
    View,
    /// Typing into the send line.
    Send,
    /// Browsing the send history overlay.
    History,
}

// ===== AppOptions =====

/// Construction-time options, resolved from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppOptions {
    /// Rows retained by the store.
    pub max_rows: usize,
    /// Lines retained by the send history.
    pub history_capacity: usize,
    /// Initial line ending.
    pub line_ending: LineEnding,
    /// Whether the timestamp column starts visible.
    pub timestamps: bool,
    /// Keep a scrolled-back view in place while rows arrive.
    pub hold_scrollback: bool,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            max_rows: crate::state::row_store::DEFAULT_ROW_CAPACITY,
            history_capacity: crate::state::history::DEFAULT_HISTORY_CAPACITY,
            line_ending: LineEnding::default(),
            timestamps: true,
            hold_scrollback: true,
        }
    }
}

// ===== AppState =====

/// Application state. Pure data, no side effects.
///
/// # Reanchor policy
///
/// After each ingested batch the cursor is moved back to the newest rows
/// when `hold_scrollback` is off, or when it is on and the cursor is
/// already tracking. A scrolled-back view otherwise stays on the same rows
/// (shifted for evictions) until the user scrolls to the bottom or jumps to
/// the latest row.
#[derive(Debug, Clone)]
pub struct AppState {
    store: RowStore,

    /// Scroll position over the store.
    pub viewport: ViewportCursor,

    /// Which component receives key events.
    pub mode: InputMode,

    /// Send line and transmit options.
    pub send: SendInput,

    /// Previously sent lines.
    pub history: CommandHistory,

    /// Whether the timestamp column is shown.
    pub timestamps: bool,

    /// See the reanchor policy above.
    pub hold_scrollback: bool,

    /// Whether the device poller is suspended.
    pub paused: bool,

    /// Device description for the header.
    pub port_label: String,

    /// Last message for the status line.
    pub status: Option<String>,

    /// Stage overflow total last reported to the user.
    pub dropped_bytes: u64,
}

impl AppState {
    /// Fresh state for the device described by `port_label`.
    pub fn new(port_label: impl Into<String>, options: &AppOptions) -> Self {
        Self {
            store: RowStore::new(options.max_rows),
            viewport: ViewportCursor::default(),
            mode: InputMode::View,
            send: SendInput::new(options.line_ending),
            history: CommandHistory::new(options.history_capacity),
            timestamps: options.timestamps,
            hold_scrollback: options.hold_scrollback,
            paused: false,
            port_label: port_label.into(),
            status: None,
            dropped_bytes: 0,
        }
    }

    /// The row timeline.
    pub fn store(&self) -> &RowStore {
        &self.store
    }

    /// Wrap received bytes into rows and apply the reanchor policy.
    ///
    /// # Errors
    ///
    /// Returns [`RowError::InvalidWidth`] for `width == 0`; nothing changes.
    pub fn ingest_received(&mut self, bytes: &[u8], width: usize) -> Result<IngestReport, RowError> {
        if bytes.is_empty() {
            return Ok(IngestReport::default());
        }
        let report = self.store.ingest(bytes, width)?;
        self.viewport.on_evicted(report.rows_evicted);
        if !self.hold_scrollback || self.viewport.is_tracking() {
            self.viewport.reanchor_to_tail();
        }
        Ok(report)
    }

    /// Echo sent text into the timeline.
    ///
    /// The cursor is reanchored unconditionally: sending is an explicit
    /// action and its echo should be visible.
    pub fn record_transmit(&mut self, text: &str) {
        let evicted = self.store.append_transmit(text);
        self.viewport.on_evicted(evicted);
        self.viewport.reanchor_to_tail();
    }

    /// Apply a scroll action. Returns false for non-scroll actions.
    pub fn scroll(&mut self, action: KeyAction, rows_visible: usize) -> bool {
        let len = self.store.len();
        match (action, action.scroll_step()) {
            // Nothing above the pane while everything fits; pinning here
            // would stop the view from following later rows.
            (KeyAction::ScrollUp | KeyAction::ScrollUpFast, Some(_)) if len <= rows_visible => {}
            (KeyAction::ScrollUp | KeyAction::ScrollUpFast, Some(n)) => {
                self.viewport.scroll_up(n, len, rows_visible);
            }
            (KeyAction::ScrollDown | KeyAction::ScrollDownFast, Some(n)) => {
                self.viewport.scroll_down(n, len, rows_visible);
            }
            (KeyAction::ScrollToLatest, _) => self.viewport.reanchor_to_tail(),
            _ => return false,
        }
        true
    }

    /// Empty the timeline and resume tracking.
    pub fn clear(&mut self) {
        debug!(rows = self.store.len(), "clearing rows");
        self.store.clear();
        self.viewport.reanchor_to_tail();
    }

    /// Flip the timestamp column.
    pub fn toggle_timestamps(&mut self) {
        self.timestamps = !self.timestamps;
    }

    /// Enter `mode`. Switching to history with nothing recorded is refused.
    pub fn set_mode(&mut self, mode: InputMode) {
        if mode == InputMode::History && self.history.is_empty() {
            self.set_status("history is empty");
            return;
        }
        self.mode = mode;
    }

    /// Load the selected history line into the send line and focus it.
    pub fn recall_history(&mut self) {
        if let Some(line) = self.history.selected() {
            let line = line.to_string();
            self.send.set_text(line);
            self.mode = InputMode::Send;
        }
    }

    /// Replace the status message.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
