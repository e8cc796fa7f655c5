//! Property-based tests for the row store and viewport cursor.
//!
//! Inputs are random byte streams split into random batches, so the
//! continuation path (an open row picked up by the next batch) is exercised
//! as often as the fresh-row path.

use proptest::prelude::*;
use sertui::model::{Direction, TERMINATOR};
use sertui::state::RowStore;
use sertui::view_state::ViewportCursor;

// ===== Arbitrary Strategies =====

/// Bytes with a high share of terminators so short rows are common.
fn arb_stream() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(
        prop_oneof![3 => Just(TERMINATOR), 10 => b'a'..=b'z', 1 => any::<u8>()],
        0..400,
    )
}

/// A stream cut into batches at arbitrary points.
fn arb_batches() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(arb_stream(), 0..12)
}

fn ingest_all(store: &mut RowStore, batches: &[Vec<u8>], width: usize) {
    for batch in batches {
        store.ingest(batch, width).unwrap();
    }
}

// ===== RowStore =====

proptest! {
    #[test]
    fn rx_rows_respect_width(batches in arb_batches(), width in 1usize..40) {
        let mut store = RowStore::new(10_000);
        ingest_all(&mut store, &batches, width);

        for row in store.iter() {
            prop_assert!(row.len() <= width);
            prop_assert!(!row.is_empty());
        }
    }

    #[test]
    fn only_the_newest_row_may_be_short_and_open(
        batches in arb_batches(),
        width in 1usize..40,
    ) {
        let mut store = RowStore::new(10_000);
        ingest_all(&mut store, &batches, width);

        let len = store.len();
        for row in store.iter().take(len.saturating_sub(1)) {
            prop_assert!(row.is_terminated() || row.len() == width);
        }
    }

    #[test]
    fn terminator_only_at_row_end(batches in arb_batches(), width in 1usize..40) {
        let mut store = RowStore::new(10_000);
        ingest_all(&mut store, &batches, width);

        for row in store.iter() {
            let text = row.text();
            let body = &text[..text.len() - 1];
            prop_assert!(!body.contains(&TERMINATOR));
        }
    }

    #[test]
    fn rows_reassemble_the_stream(batches in arb_batches(), width in 1usize..40) {
        let mut store = RowStore::new(10_000);
        ingest_all(&mut store, &batches, width);

        let joined: Vec<u8> = store.iter().flat_map(|row| row.text().to_vec()).collect();
        prop_assert_eq!(joined, batches.concat());
    }

    #[test]
    fn batching_does_not_change_rows(stream in arb_stream(), width in 1usize..40, cut in 0usize..400) {
        let cut = cut.min(stream.len());
        let mut whole = RowStore::new(10_000);
        let mut split = RowStore::new(10_000);

        whole.ingest(&stream, width).unwrap();
        split.ingest(&stream[..cut], width).unwrap();
        split.ingest(&stream[cut..], width).unwrap();

        let texts = |store: &RowStore| store.iter().map(|r| r.text().to_vec()).collect::<Vec<_>>();
        prop_assert_eq!(texts(&whole), texts(&split));
    }

    #[test]
    fn capacity_holds_after_every_mutation(
        batches in arb_batches(),
        sends in prop::collection::vec("[a-z]{0,6}\n?", 1..12),
        capacity in 1usize..20,
        width in 1usize..12,
    ) {
        let mut store = RowStore::new(capacity);
        for (batch, send) in batches.iter().zip(sends.iter().cycle()) {
            store.ingest(batch, width).unwrap();
            prop_assert!(store.len() <= capacity);
            store.append_transmit(send);
            prop_assert!(store.len() <= capacity);
        }
    }

    #[test]
    fn eviction_keeps_the_newest_rows(
        batches in arb_batches(),
        capacity in 1usize..20,
        width in 1usize..12,
    ) {
        let mut bounded = RowStore::new(capacity);
        let mut unbounded = RowStore::new(100_000);
        ingest_all(&mut bounded, &batches, width);
        ingest_all(&mut unbounded, &batches, width);

        let tail: Vec<Vec<u8>> = unbounded
            .iter()
            .skip(unbounded.len().saturating_sub(capacity))
            .map(|r| r.text().to_vec())
            .collect();
        let kept: Vec<Vec<u8>> = bounded.iter().map(|r| r.text().to_vec()).collect();
        prop_assert_eq!(kept, tail);
    }

    #[test]
    fn transmit_rows_are_never_wrapped(text in "[a-z]{1,200}", width in 1usize..10) {
        let mut store = RowStore::new(16);
        store.ingest(b"rx\n", width).unwrap();
        store.append_transmit(&text);

        let last = store.last().unwrap();
        prop_assert_eq!(last.direction(), Direction::Tx);
        prop_assert_eq!(last.text(), text.as_bytes());
    }
}

// ===== ViewportCursor =====

proptest! {
    #[test]
    fn window_never_exceeds_bounds(
        ops in prop::collection::vec((any::<bool>(), 1usize..6), 0..40),
        len in 0usize..200,
        rows_visible in 1usize..50,
    ) {
        let mut cursor = ViewportCursor::default();
        for (up, n) in ops {
            if up {
                cursor.scroll_up(n, len, rows_visible);
            } else {
                cursor.scroll_down(n, len, rows_visible);
            }
            let window = cursor.current_window(len, rows_visible);
            prop_assert!(window.start <= window.end);
            prop_assert!(window.end <= len);
            prop_assert!(window.len() <= rows_visible);
        }
    }

    #[test]
    fn scroll_down_is_noop_when_rows_fit(
        start in 0usize..50,
        n in 1usize..6,
        len in 0usize..20,
        extra in 1usize..20,
    ) {
        let rows_visible = len + extra;
        let mut cursor = ViewportCursor::Fixed(start);
        cursor.scroll_down(n, len, rows_visible);
        prop_assert_eq!(cursor, ViewportCursor::Fixed(start));
    }

    #[test]
    fn reanchor_shows_newest_rows(
        start in 0usize..100,
        len in 0usize..200,
        rows_visible in 1usize..50,
    ) {
        let mut cursor = ViewportCursor::Fixed(start);
        cursor.reanchor_to_tail();

        let window = cursor.current_window(len, rows_visible);
        prop_assert_eq!(window.len(), rows_visible.min(len));
        prop_assert_eq!(window.end, len);
    }
}
