//! Editable send line and its transmit options.
//!
//! Pure state transitions; the host performs the actual device write.

use crate::model::LineEnding;

/// The line being composed plus the options that shape its payload.
///
/// `cursor` counts characters, not bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendInput {
    text: String,
    cursor: usize,
    line_ending: LineEnding,
    upper_on_send: bool,
    send_on_type: bool,
}

impl SendInput {
    /// Empty input using `line_ending`.
    pub fn new(line_ending: LineEnding) -> Self {
        Self {
            line_ending,
            ..Self::default()
        }
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// True when nothing has been typed.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Active line ending.
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Whether payloads are upper-cased.
    pub fn upper_on_send(&self) -> bool {
        self.upper_on_send
    }

    /// Whether characters are transmitted as they are typed.
    pub fn send_on_type(&self) -> bool {
        self.send_on_type
    }

    /// Insert `ch` at the cursor and advance.
    pub fn insert(&mut self, ch: char) {
        let at = self.byte_offset(self.cursor);
        self.text.insert(at, ch);
        self.cursor += 1;
    }

    /// Delete the character before the cursor. No-op at position 0.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_offset(self.cursor - 1);
        self.text.remove(at);
        self.cursor -= 1;
    }

    /// Move the cursor left, saturating at 0.
    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor right, saturating at the end of the text.
    pub fn cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.text.chars().count());
    }

    /// Replace the text, cursor at the end. Used when recalling history.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.chars().count();
    }

    /// Drop the text and reset the cursor.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Rotate CRLF → LF → CR → NONE → CRLF.
    pub fn cycle_line_ending(&mut self) {
        self.line_ending = self.line_ending.next();
    }

    /// Flip upper-casing of payloads.
    pub fn toggle_upper_on_send(&mut self) {
        self.upper_on_send = !self.upper_on_send;
    }

    /// Flip send-on-type. The pending line is discarded either way.
    pub fn toggle_send_on_type(&mut self) {
        self.send_on_type = !self.send_on_type;
        self.clear();
    }

    /// Apply upper-casing to a single typed character for send-on-type.
    pub fn typed_payload(&self, ch: char) -> String {
        if self.upper_on_send {
            ch.to_ascii_uppercase().to_string()
        } else {
            ch.to_string()
        }
    }

    /// Build the payload for Enter and clear the line.
    ///
    /// In send-on-type mode the characters already went out, so only the
    /// line ending is produced.
    pub fn take_payload(&mut self) -> String {
        let mut payload = if self.send_on_type {
            String::new()
        } else if self.upper_on_send {
            self.text.to_ascii_uppercase()
        } else {
            self.text.clone()
        };
        payload.push_str(self.line_ending.as_str());
        self.clear();
        payload
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(idx, _)| idx)
    }
}

#[cfg(test)]
#[path = "send_input_tests.rs"]
mod tests;
