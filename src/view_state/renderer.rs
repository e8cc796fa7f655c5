//! Read-only projection of the visible rows into styled lines.
//!
//! Rendering never touches the store or the cursor, so drawing the same
//! state twice yields the same lines.

use crate::model::Row;
use crate::state::RowStore;
use crate::view::styles::RowStyles;
use crate::view_state::viewport::ViewportCursor;
use ratatui::text::{Line, Span};

/// Format of the timestamp prefix.
pub const TIMESTAMP_FORMAT: &str = "%H:%M:%S%.3f";

/// Lines for the window `viewport` selects, oldest first.
///
/// With `timestamps` each line starts with the row's creation time in the
/// timestamp style, then a `[RX] `/`[TX] ` tag in the direction style.
pub fn render_rows(
    store: &RowStore,
    viewport: &ViewportCursor,
    rows_visible: usize,
    timestamps: bool,
    styles: &RowStyles,
) -> Vec<Line<'static>> {
    let window = viewport.current_window(store.len(), rows_visible);
    store
        .window(window)
        .map(|row| render_row(row, timestamps, styles))
        .collect()
}

/// One styled line for `row`.
pub fn render_row(row: &Row, timestamps: bool, styles: &RowStyles) -> Line<'static> {
    let text = Span::styled(
        row.display_text(),
        styles.text(row.direction(), timestamps),
    );
    if timestamps {
        let stamp = format!("{} ", row.timestamp().format(TIMESTAMP_FORMAT));
        let tag = format!("[{}] ", row.direction().tag());
        Line::from(vec![
            Span::styled(stamp, styles.timestamp()),
            Span::styled(tag, text.style),
            text,
        ])
    } else {
        Line::from(text)
    }
}

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;
