//! Send history overlay.
//!
//! A centered list of previously sent lines, oldest first, with the
//! selection highlighted. Enter recalls, `d` deletes, Esc closes.

use super::constants::{HISTORY_POPUP_HEIGHT_PERCENT, HISTORY_POPUP_WIDTH_PERCENT};
use crate::state::CommandHistory;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
};

/// Render the history overlay centered on the screen.
pub fn render_history_overlay(frame: &mut Frame, history: &CommandHistory) {
    let popup_area = centered_rect(
        HISTORY_POPUP_WIDTH_PERCENT,
        HISTORY_POPUP_HEIGHT_PERCENT,
        frame.area(),
    );
    frame.render_widget(Clear, popup_area);

    let items: Vec<ListItem> = history
        .iter()
        .map(|line| ListItem::new(Line::from(line.to_string())))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!(" History ({}) ", history.len()))
                .title_bottom(" Enter: recall | d: delete | Esc: close ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    if !history.is_empty() {
        list_state.select(Some(history.selected_index()));
    }
    frame.render_stateful_widget(list, popup_area, &mut list_state);
}

/// Rect of `percent_x` by `percent_y` of `area`, centered in it.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    Rect {
        x: area.x + area.width.saturating_sub(popup_width) / 2,
        y: area.y + area.height.saturating_sub(popup_height) / 2,
        width: popup_width,
        height: popup_height,
    }
}
