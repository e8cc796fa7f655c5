//! Domain-level keyboard actions independent of key bindings.

/// Actions available while viewing the row timeline.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Scrolling
    /// Scroll back one row. Default: k/↑
    ScrollUp,
    /// Scroll forward one row. Default: j/↓
    ScrollDown,
    /// Scroll back five rows. Default: K/Page Up
    ScrollUpFast,
    /// Scroll forward five rows. Default: J/Page Down
    ScrollDownFast,
    /// Leave scrollback and follow the newest rows. Default: G/End
    ScrollToLatest,

    // Modes
    /// Focus the send line. Default: : or i
    EnterSendMode,
    /// Show or hide the send history overlay. Default: h
    ToggleHistory,

    // Display
    /// Show or hide the timestamp column. Default: t
    ToggleTimestamps,
    /// Empty the row timeline. Default: c
    ClearRows,

    // Send options
    /// Rotate CRLF → LF → CR → NONE. Default: Ctrl+l
    CycleLineEnding,
    /// Upper-case payloads on send. Default: u
    ToggleUpperOnSend,
    /// Transmit each character as it is typed. Default: o
    ToggleSendOnType,
    /// Assert a break condition on the line. Default: Ctrl+b
    SendBreak,

    // Device
    /// Suspend or resume the device poller. Default: p
    TogglePause,

    // Application
    /// Quit. Default: q
    Quit,
}

impl KeyAction {
    /// Number of rows a scroll action moves, if it is one.
    pub fn scroll_step(self) -> Option<usize> {
        match self {
            KeyAction::ScrollUp | KeyAction::ScrollDown => Some(1),
            KeyAction::ScrollUpFast | KeyAction::ScrollDownFast => Some(5),
            _ => None,
        }
    }
}
