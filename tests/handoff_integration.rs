//! Integration tests for the device-to-screen hand-off.
//!
//! Drives a loopback device through the poller, the staging buffer and the
//! per-frame pump into the row store, then checks what the viewport shows.

use sertui::integration::pump;
use sertui::source::{ByteSource, Loopback, OverflowPolicy, SourceOptions};
use sertui::state::{AppOptions, AppState};
use sertui::view_state::FrameGeometry;
use std::thread;
use std::time::{Duration, Instant};

// ===== Test Helpers =====

fn fast_options() -> SourceOptions {
    SourceOptions {
        poll_interval: Duration::from_millis(1),
        ..SourceOptions::default()
    }
}

fn start(options: &SourceOptions) -> (ByteSource, Loopback) {
    ByteSource::loopback(options).expect("loopback starts")
}

/// Pump frames until `done` holds or two seconds pass.
fn pump_until(
    state: &mut AppState,
    source: &ByteSource,
    geometry: FrameGeometry,
    done: impl Fn(&AppState) -> bool,
) {
    let mut scratch = Vec::new();
    let deadline = Instant::now() + Duration::from_secs(2);
    while !done(state) && Instant::now() < deadline {
        pump(state, source, geometry, &mut scratch).expect("valid geometry");
        thread::sleep(Duration::from_millis(1));
    }
}

fn visible(state: &AppState, rows_visible: usize) -> Vec<String> {
    let window = state
        .viewport
        .current_window(state.store().len(), rows_visible);
    state
        .store()
        .window(window)
        .map(|row| row.display_text())
        .collect()
}

fn lines(range: std::ops::Range<usize>) -> Vec<u8> {
    range.flat_map(|i| format!("L{i}\n").into_bytes()).collect()
}

// ===== Reanchor policy =====

#[test]
fn tracking_view_follows_new_rows() {
    let (source, device) = start(&fast_options());
    let mut state = AppState::new("loopback", &AppOptions::default());
    let geometry = FrameGeometry::new(40, 3);

    device.inject(&lines(0..10));
    pump_until(&mut state, &source, geometry, |s| s.store().len() == 10);

    assert!(state.viewport.is_tracking());
    assert_eq!(visible(&state, 3), vec!["L7", "L8", "L9"]);
}

#[test]
fn scrolled_back_view_holds_through_eviction() {
    let (source, device) = start(&fast_options());
    let options = AppOptions {
        max_rows: 10,
        ..AppOptions::default()
    };
    let mut state = AppState::new("loopback", &options);
    let geometry = FrameGeometry::new(40, 3);

    device.inject(&lines(0..10));
    pump_until(&mut state, &source, geometry, |s| s.store().len() == 10);
    state.viewport.scroll_up(4, state.store().len(), 3);
    assert_eq!(visible(&state, 3), vec!["L3", "L4", "L5"]);

    // Two rows arrive and two of the oldest are evicted underneath
    device.inject(&lines(10..12));
    pump_until(&mut state, &source, geometry, |s| {
        s.store().last().map(|r| r.display_text()) == Some("L11".into())
    });

    assert!(!state.viewport.is_tracking());
    assert_eq!(visible(&state, 3), vec!["L3", "L4", "L5"]);
}

#[test]
fn without_hold_scrollback_new_rows_reanchor() {
    let (source, device) = start(&fast_options());
    let options = AppOptions {
        hold_scrollback: false,
        ..AppOptions::default()
    };
    let mut state = AppState::new("loopback", &options);
    let geometry = FrameGeometry::new(40, 3);

    device.inject(&lines(0..10));
    pump_until(&mut state, &source, geometry, |s| s.store().len() == 10);
    state.viewport.scroll_up(4, state.store().len(), 3);

    device.inject(b"late\n");
    pump_until(&mut state, &source, geometry, |s| s.store().len() == 11);

    assert!(state.viewport.is_tracking());
    assert_eq!(visible(&state, 3), vec!["L8", "L9", "late"]);
}

// ===== Stage =====

#[test]
fn stage_overflow_is_reported_and_newest_bytes_survive() {
    let options = SourceOptions {
        staging_capacity: 16,
        overflow_policy: OverflowPolicy::DropOldest,
        ..fast_options()
    };
    let (source, device) = start(&options);
    let mut state = AppState::new("loopback", &AppOptions::default());

    // Not drained until the poller has staged everything
    device.inject(&[b'x'; 100]);
    let deadline = Instant::now() + Duration::from_secs(2);
    while source.dropped_bytes() == 0 && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(1));
    }

    pump_until(&mut state, &source, FrameGeometry::new(80, 10), |s| {
        !s.store().is_empty()
    });

    assert_eq!(source.dropped_bytes(), 84);
    assert_eq!(state.dropped_bytes, 84);
    assert_eq!(
        state.status.as_deref(),
        Some("stage overflow: 84 bytes dropped")
    );
    assert_eq!(state.store().last().map(|r| r.len()), Some(16));
}

#[test]
fn paused_source_delivers_after_resume() {
    let (source, device) = start(&fast_options());
    let mut state = AppState::new("loopback", &AppOptions::default());
    let geometry = FrameGeometry::new(40, 5);
    source.set_paused(true);

    device.inject(b"held\n");
    thread::sleep(Duration::from_millis(20));
    let mut scratch = Vec::new();
    pump(&mut state, &source, geometry, &mut scratch).unwrap();
    assert!(state.store().is_empty());
    assert_eq!(device.pending(), 5);

    source.set_paused(false);
    pump_until(&mut state, &source, geometry, |s| !s.store().is_empty());

    assert_eq!(visible(&state, 5), vec!["held"]);
}

// ===== Transmit =====

#[test]
fn sent_line_appears_as_tx_then_echo_as_rx() {
    let (mut source, _device) = start(&fast_options());
    let mut state = AppState::new("loopback", &AppOptions::default());

    source.send(b"ATI\r\n").unwrap();
    state.record_transmit("ATI\r\n");
    pump_until(&mut state, &source, FrameGeometry::new(40, 5), |s| {
        s.store().len() == 2
    });

    let directions: Vec<&str> = state.store().iter().map(|r| r.direction().tag()).collect();
    assert_eq!(directions.len(), 2);
    assert_ne!(directions[0], directions[1]);
    assert_eq!(visible(&state, 5), vec!["ATI", "ATI"]);
}

#[test]
fn shutdown_is_idempotent() {
    let (mut source, _device) = start(&fast_options());
    source.shutdown();
    source.shutdown();
    assert!(source.drain().is_empty());
}
