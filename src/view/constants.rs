//! Layout dimension constants for TUI rendering.
//!
//! The row geometry in `view_state::types` subtracts these, so a change
//! here must keep `CHROME_ROWS` in step.

/// Height of the header line.
pub const HEADER_HEIGHT: u16 = 1;

/// Height of the send bar in lines (border + content).
pub const SEND_BAR_HEIGHT: u16 = 3;

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Width percentage for the history overlay popup.
pub const HISTORY_POPUP_WIDTH_PERCENT: u16 = 60;

/// Height percentage for the history overlay popup.
pub const HISTORY_POPUP_HEIGHT_PERCENT: u16 = 50;
