//! Tests for send input editing and payload assembly.

use super::*;

fn typed(text: &str) -> SendInput {
    let mut input = SendInput::default();
    for ch in text.chars() {
        input.insert(ch);
    }
    input
}

// ===== editing =====

#[test]
fn insert_appends_and_advances_cursor() {
    let input = typed("AT");
    assert_eq!(input.text(), "AT");
    assert_eq!(input.cursor(), 2);
}

#[test]
fn insert_at_cursor_in_middle() {
    let mut input = typed("AI");
    input.cursor_left();

    input.insert('T');

    assert_eq!(input.text(), "ATI");
    assert_eq!(input.cursor(), 2);
}

#[test]
fn backspace_removes_char_before_cursor() {
    let mut input = typed("ATX");

    input.backspace();

    assert_eq!(input.text(), "AT");
    assert_eq!(input.cursor(), 2);
}

#[test]
fn backspace_at_start_is_noop() {
    let mut input = typed("AT");
    input.cursor_left();
    input.cursor_left();

    input.backspace();

    assert_eq!(input.text(), "AT");
    assert_eq!(input.cursor(), 0);
}

#[test]
fn cursor_movement_saturates() {
    let mut input = typed("ab");
    input.cursor_right();
    assert_eq!(input.cursor(), 2);

    input.cursor_left();
    input.cursor_left();
    input.cursor_left();
    assert_eq!(input.cursor(), 0);
}

#[test]
fn editing_handles_multibyte_chars() {
    let mut input = typed("né");
    input.cursor_left();
    input.insert('x');
    assert_eq!(input.text(), "nxé");

    input.cursor_right();
    input.backspace();
    assert_eq!(input.text(), "nx");
}

#[test]
fn set_text_places_cursor_at_end() {
    let mut input = SendInput::default();

    input.set_text("ATZ");

    assert_eq!(input.cursor(), 3);
}

// ===== options =====

#[test]
fn new_uses_given_line_ending() {
    assert_eq!(SendInput::new(LineEnding::Lf).line_ending(), LineEnding::Lf);
}

#[test]
fn cycle_line_ending_rotates() {
    let mut input = SendInput::default();
    input.cycle_line_ending();
    assert_eq!(input.line_ending(), LineEnding::Lf);
}

#[test]
fn toggling_send_on_type_clears_line() {
    let mut input = typed("pending");

    input.toggle_send_on_type();

    assert!(input.send_on_type());
    assert!(input.is_empty());
    assert_eq!(input.cursor(), 0);
}

// ===== payloads =====

#[test]
fn take_payload_appends_line_ending_and_clears() {
    let mut input = typed("at");

    assert_eq!(input.take_payload(), "at\r\n");
    assert!(input.is_empty());
}

#[test]
fn take_payload_upper_cases_when_enabled() {
    let mut input = typed("at+gmr");
    input.toggle_upper_on_send();

    assert_eq!(input.take_payload(), "AT+GMR\r\n");
}

#[test]
fn take_payload_without_line_ending() {
    let mut input = SendInput::new(LineEnding::None);
    input.insert('x');

    assert_eq!(input.take_payload(), "x");
}

#[test]
fn take_payload_in_send_on_type_sends_only_line_ending() {
    let mut input = SendInput::new(LineEnding::Cr);
    input.toggle_send_on_type();
    input.insert('a');

    assert_eq!(input.take_payload(), "\r");
}

#[test]
fn typed_payload_respects_upper_on_send() {
    let mut input = SendInput::default();
    assert_eq!(input.typed_payload('q'), "q");

    input.toggle_upper_on_send();
    assert_eq!(input.typed_payload('q'), "Q");
}
