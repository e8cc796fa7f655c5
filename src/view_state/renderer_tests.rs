//! Tests for row rendering.

use super::*;
use crate::model::Direction;
use crate::view::styles::ColorConfig;
use chrono::{Duration, Local, TimeZone};

fn styles() -> RowStyles {
    RowStyles::with_color_config(ColorConfig::with_colors(true))
}

fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

fn store_with(bytes: &[u8]) -> RowStore {
    let mut store = RowStore::new(64);
    store.ingest(bytes, 10).unwrap();
    store
}

#[test]
fn renders_window_in_order_without_terminators() {
    let store = store_with(b"one\r\ntwo\nthree");

    let lines = render_rows(&store, &ViewportCursor::Tracking, 10, false, &styles());

    let texts: Vec<String> = lines.iter().map(line_text).collect();
    assert_eq!(texts, vec!["one", "two", "three"]);
}

#[test]
fn renders_only_visible_window() {
    let store = store_with(b"1\n2\n3\n4\n5\n");

    let tracking = render_rows(&store, &ViewportCursor::Tracking, 2, false, &styles());
    let fixed = render_rows(&store, &ViewportCursor::Fixed(1), 2, false, &styles());

    assert_eq!(tracking.iter().map(line_text).collect::<Vec<_>>(), vec!["4", "5"]);
    assert_eq!(fixed.iter().map(line_text).collect::<Vec<_>>(), vec!["2", "3"]);
}

#[test]
fn empty_store_renders_nothing() {
    let store = RowStore::new(8);
    assert!(render_rows(&store, &ViewportCursor::Tracking, 5, true, &styles()).is_empty());
}

#[test]
fn rendering_twice_is_identical() {
    let mut store = store_with(b"abc\ndef");
    store.append_transmit("AT\r\n");
    let viewport = ViewportCursor::Fixed(1);

    let first = render_rows(&store, &viewport, 2, true, &styles());
    let second = render_rows(&store, &viewport, 2, true, &styles());

    assert_eq!(first, second);
}

#[test]
fn timestamp_prefix_uses_millisecond_format() {
    let at = Local
        .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
        .single()
        .unwrap()
        + Duration::milliseconds(67);
    let row = Row::with_timestamp(Direction::Rx, b"OK\n".to_vec(), at);

    let line = render_row(&row, true, &styles());

    assert_eq!(line.spans.len(), 3);
    assert_eq!(line.spans[0].content, "03:04:05.067 ");
    assert_eq!(line.spans[0].style, styles().timestamp());
    assert_eq!(line.spans[1].content, "[RX] ");
    assert_eq!(line.spans[2].content, "OK");
}

#[test]
fn without_timestamps_only_text_span() {
    let row = Row::new(Direction::Tx, b"ATI".to_vec());

    let line = render_row(&row, false, &styles());

    assert_eq!(line.spans.len(), 1);
    assert_eq!(line.spans[0].style, styles().text(Direction::Tx, false));
}

#[test]
fn directions_render_in_distinct_styles() {
    let rx = render_row(&Row::new(Direction::Rx, b"x".to_vec()), true, &styles());
    let tx = render_row(&Row::new(Direction::Tx, b"x".to_vec()), true, &styles());

    assert_ne!(rx.spans[2].style, tx.spans[2].style);
}

#[test]
fn direction_tag_follows_row_style() {
    let tx = render_row(&Row::new(Direction::Tx, b"ATZ\r".to_vec()), true, &styles());

    assert_eq!(&line_text(&tx)[13..], "[TX] ATZ");
    assert_eq!(tx.spans[1].style, styles().text(Direction::Tx, true));
}

#[test]
fn without_timestamps_no_direction_tag() {
    let rx = render_row(&Row::new(Direction::Rx, b"OK".to_vec()), false, &styles());
    assert_eq!(line_text(&rx), "OK");
}

#[test]
fn control_bytes_are_replaced() {
    let store = store_with(b"a\x01b\tc");

    let lines = render_rows(&store, &ViewportCursor::Tracking, 1, false, &styles());

    assert_eq!(line_text(&lines[0]), "a.b c");
}
