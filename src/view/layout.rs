//! Screen layout rendering.
//!
//! Four stacked areas: header, send bar, rows pane and status bar. The
//! history overlay is drawn last, on top of everything else.

use crate::state::{AppState, InputMode};
use crate::view::constants::{HEADER_HEIGHT, SEND_BAR_HEIGHT, STATUS_BAR_HEIGHT};
use crate::view::history::render_history_overlay;
use crate::view::send_bar::SendBar;
use crate::view::styles::RowStyles;
use crate::view_state::render_rows;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

/// Render the whole screen for `state`.
pub fn render_layout(frame: &mut Frame, state: &AppState, styles: &RowStyles) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(SEND_BAR_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(frame.area());

    let rows_area = chunks[2];
    let rows_visible = usize::from(rows_area.height.saturating_sub(2));

    render_header(frame, chunks[0], state, rows_visible);
    frame.render_widget(
        SendBar::new(&state.send, state.mode == InputMode::Send),
        chunks[1],
    );
    render_rows_pane(frame, rows_area, state, styles, rows_visible);
    render_status_bar(frame, chunks[3], state);

    if state.mode == InputMode::History {
        render_history_overlay(frame, &state.history);
    }
}

/// Render the bordered pane holding the visible rows.
fn render_rows_pane(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    styles: &RowStyles,
    rows_visible: usize,
) {
    let lines = render_rows(
        state.store(),
        &state.viewport,
        rows_visible,
        state.timestamps,
        styles,
    );
    let border_style = if state.mode == InputMode::View {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Render the header: port, shown/total rows, tracking state and pause flag.
fn render_header(frame: &mut Frame, area: Rect, state: &AppState, rows_visible: usize) {
    let total = state.store().len();
    let shown = state
        .viewport
        .current_window(total, rows_visible)
        .len();
    let tracking = state.viewport.is_tracking();

    let mut header_text = format!(
        "{} | rows {}/{} | {}",
        state.port_label,
        shown,
        total,
        if tracking { "TRACKING" } else { "SCROLLBACK" }
    );
    if state.paused {
        header_text.push_str(" | PAUSED");
    }

    let style = if state.paused {
        Style::default().fg(Color::Yellow)
    } else if tracking {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Cyan)
    };

    frame.render_widget(Paragraph::new(Line::from(header_text)).style(style), area);
}

/// Keyboard hints for the mode that currently receives keys.
fn build_keyboard_hints(mode: InputMode) -> &'static str {
    match mode {
        InputMode::View => "q: quit | i: send | h: history | t: timestamps | p: pause | G: latest",
        InputMode::Send => "Enter: send | Esc: back | Ctrl+C: quit",
        InputMode::History => "j/k: select | Enter: recall | d: delete | Esc: back",
    }
}

/// Render the status bar: the last status message, or hints when there is none.
fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let (text, style) = match &state.status {
        Some(message) => (message.as_str(), Style::default().fg(Color::Yellow)),
        None => (
            build_keyboard_hints(state.mode),
            Style::default().fg(Color::Gray),
        ),
    };

    frame.render_widget(Paragraph::new(Line::from(text)).style(style), area);
}

// ===== Tests =====

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
