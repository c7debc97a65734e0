//! Chat message list

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::api::Subject;
use crate::tui::app::{ChatMessage, MessageSender};
use crate::tui::theme::Theme;

/// Scrollable chat history, pinned to the newest message
pub struct MessageArea<'a> {
    messages: &'a [ChatMessage],
    subject: Subject,
    theme: &'a Theme,
}

impl<'a> MessageArea<'a> {
    pub fn new(messages: &'a [ChatMessage], subject: Subject, theme: &'a Theme) -> Self {
        Self {
            messages,
            subject,
            theme,
        }
    }

    fn sender_span(&self, message: &ChatMessage) -> Span<'static> {
        match message.sender {
            MessageSender::User => Span::styled(
                "Вы",
                Style::default()
                    .fg(self.theme.user_fg)
                    .add_modifier(Modifier::BOLD),
            ),
            MessageSender::Ai => Span::styled(
                "AI",
                Style::default()
                    .fg(self.theme.ai_fg)
                    .add_modifier(Modifier::BOLD),
            ),
        }
    }
}

impl Widget for MessageArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .title(format!(" Чат — {} ", self.subject.label()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 1 || inner.width < 1 {
            return;
        }

        let mut lines: Vec<Line> = Vec::new();
        for message in self.messages {
            let time = message.timestamp.format("%H:%M").to_string();
            lines.push(Line::from(vec![
                self.sender_span(message),
                Span::styled(
                    format!(" · {}", time),
                    Style::default().fg(self.theme.text_muted),
                ),
            ]));

            let text_style = if message.is_placeholder() {
                Style::default()
                    .fg(self.theme.placeholder_fg)
                    .add_modifier(Modifier::ITALIC)
            } else {
                Style::default().fg(self.theme.text_primary)
            };
            for text_line in message.text.lines() {
                lines.push(Line::from(Span::styled(
                    text_line.to_string(),
                    text_style,
                )));
            }
            lines.push(Line::default());
        }

        // Follow the bottom: estimate wrapped height and scroll so the
        // newest message is visible.
        let width = inner.width.max(1) as usize;
        let total_rows: usize = lines
            .iter()
            .map(|l| (l.width().max(1) + width - 1) / width)
            .sum();
        let scroll = total_rows.saturating_sub(inner.height as usize) as u16;

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
            .render(inner, buf);
    }
}
