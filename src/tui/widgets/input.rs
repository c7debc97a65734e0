//! Chat input line

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::theme::Theme;

/// Single-line input with cursor
pub struct InputWidget<'a> {
    text: &'a str,
    cursor: usize,
    awaiting: bool,
    theme: &'a Theme,
}

impl<'a> InputWidget<'a> {
    pub fn new(text: &'a str, cursor: usize, theme: &'a Theme) -> Self {
        Self {
            text,
            cursor,
            awaiting: false,
            theme,
        }
    }

    /// Show the in-flight hint in the title
    pub fn awaiting(mut self, awaiting: bool) -> Self {
        self.awaiting = awaiting;
        self
    }
}

impl Widget for InputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.awaiting {
            " Сообщение (запрос выполняется…) "
        } else {
            " Сообщение "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_focused))
            .title(title);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 1 {
            return;
        }

        if self.text.is_empty() {
            Paragraph::new(Span::styled(
                "Введите сообщение...",
                Style::default().fg(self.theme.text_muted),
            ))
            .render(inner, buf);
        } else {
            Paragraph::new(Span::styled(
                self.text,
                Style::default().fg(self.theme.text_primary),
            ))
            .render(inner, buf);
        }

        // Cursor block at the byte-offset position
        let col = self.text[..self.cursor.min(self.text.len())].width() as u16;
        if col < inner.width {
            if let Some(cell) = buf.cell_mut((inner.x + col, inner.y)) {
                cell.set_style(
                    Style::default()
                        .bg(self.theme.text_secondary)
                        .fg(self.theme.text_primary),
                );
            }
        }
    }
}
