//! Send bar widget: the editable send line and its transmit options.

use crate::state::SendInput;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Send bar widget.
///
/// Shows the cursor only while focused. The title carries the line ending
/// label and the UPPER / TYPE flags.
pub struct SendBar<'a> {
    input: &'a SendInput,
    focused: bool,
}

impl<'a> SendBar<'a> {
    /// Create new SendBar widget.
    pub fn new(input: &'a SendInput, focused: bool) -> Self {
        Self { input, focused }
    }

    fn title(&self) -> String {
        let mut title = if self.focused {
            String::from("Send")
        } else {
            String::from("Send (i)")
        };
        title.push_str(&format!(" [{}]", self.input.line_ending().label()));
        if self.input.upper_on_send() {
            title.push_str(" UPPER");
        }
        if self.input.send_on_type() {
            title.push_str(" TYPE");
        }
        title
    }

    fn content(&self) -> Line<'static> {
        let text = self.input.text();
        if !self.focused {
            return Line::from(text.to_string());
        }

        let cursor = self.input.cursor();
        let before: String = text.chars().take(cursor).collect();
        let mut rest = text.chars().skip(cursor);
        // Past the end the cursor sits on a blank cell
        let cursor_char = rest.next().map_or_else(|| " ".to_string(), String::from);
        let after: String = rest.collect();

        Line::from(vec![
            Span::raw(before),
            Span::styled(
                cursor_char,
                Style::default()
                    .bg(Color::White)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(after),
        ])
    }
}

impl Widget for SendBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.title())
            .border_style(border_style);

        Paragraph::new(self.content()).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LineEnding;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(input: &SendInput, focused: bool) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(40, 3)).unwrap();
        terminal
            .draw(|frame| frame.render_widget(SendBar::new(input, focused), frame.area()))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn title_shows_line_ending_and_flags() {
        let mut input = SendInput::new(LineEnding::Lf);
        input.toggle_upper_on_send();
        input.toggle_send_on_type();

        let buf = draw(&input, true);
        let top = row_text(&buf, 0);

        assert!(top.contains("Send [  LF] UPPER TYPE"), "got: {top}");
    }

    #[test]
    fn unfocused_title_hints_key() {
        let input = SendInput::new(LineEnding::Crlf);
        let top = row_text(&draw(&input, false), 0);
        assert!(top.contains("Send (i) [CRLF]"), "got: {top}");
    }

    #[test]
    fn focused_cursor_cell_is_highlighted() {
        let mut input = SendInput::new(LineEnding::Crlf);
        for ch in "AT".chars() {
            input.insert(ch);
        }
        input.cursor_left();

        let buf = draw(&input, true);

        assert_eq!(row_text(&buf, 1).trim_end_matches([' ', '│']), "│AT");
        // Cursor is on 'T', one cell right of the border and 'A'
        assert_eq!(buf[(2, 1)].symbol(), "T");
        assert_eq!(buf[(2, 1)].bg, Color::White);
        assert_ne!(buf[(1, 1)].bg, Color::White);
    }

    #[test]
    fn cursor_at_end_highlights_blank_cell() {
        let mut input = SendInput::new(LineEnding::Crlf);
        input.insert('x');

        let buf = draw(&input, true);

        assert_eq!(buf[(2, 1)].symbol(), " ");
        assert_eq!(buf[(2, 1)].bg, Color::White);
    }

    #[test]
    fn unfocused_bar_has_no_cursor() {
        let mut input = SendInput::new(LineEnding::Crlf);
        input.insert('x');

        let buf = draw(&input, false);

        assert_ne!(buf[(2, 1)].bg, Color::White);
    }
}
