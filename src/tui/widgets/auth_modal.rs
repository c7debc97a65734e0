//! Sign-in modal
//!
//! Forced open while no session exists. Offers the two mock providers;
//! there is no close action besides a successful sign-in.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::api::AuthProvider;
use crate::tui::theme::Theme;

/// Centered provider-choice dialog
pub struct AuthModal<'a> {
    cursor: usize,
    in_flight: bool,
    theme: &'a Theme,
}

impl<'a> AuthModal<'a> {
    pub fn new(cursor: usize, in_flight: bool, theme: &'a Theme) -> Self {
        Self {
            cursor,
            in_flight,
            theme,
        }
    }

    fn button_line(&self, provider: AuthProvider, selected: bool) -> Line<'static> {
        let marker = if selected { "▸ " } else { "  " };
        let style = if selected {
            Style::default()
                .fg(self.theme.text_primary)
                .bg(self.theme.highlight_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.text_secondary)
        };
        Line::from(Span::styled(
            format!("{}{}", marker, provider.label()),
            style,
        ))
    }
}

impl Widget for AuthModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = 52.min(area.width.saturating_sub(2));
        let height = 14.min(area.height.saturating_sub(2));
        let modal = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };

        Clear.render(modal, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_focused))
            .title(" Вход в MegaChat ");
        let inner = block.inner(modal);
        block.render(modal, buf);

        let mut lines = vec![
            Line::from(Span::styled(
                "Выбери способ входа для доступа ко всем функциям",
                Style::default().fg(self.theme.text_secondary),
            )),
            Line::default(),
            Line::from(Span::styled(
                "Зачем нужна авторизация?",
                Style::default().fg(self.theme.text_primary),
            )),
            Line::from(Span::styled(
                "• Сохранение истории заданий",
                Style::default().fg(self.theme.text_muted),
            )),
            Line::from(Span::styled(
                "• Персональные настройки AI",
                Style::default().fg(self.theme.text_muted),
            )),
            Line::from(Span::styled(
                "• Доступ с любого устройства",
                Style::default().fg(self.theme.text_muted),
            )),
            Line::default(),
            self.button_line(AuthProvider::Google, self.cursor == 0),
            self.button_line(AuthProvider::Yandex, self.cursor == 1),
            Line::default(),
        ];

        if self.in_flight {
            lines.push(Line::from(Span::styled(
                "Выполняется вход…",
                Style::default().fg(self.theme.placeholder_fg),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "↑/↓ выбор · Enter вход",
                Style::default().fg(self.theme.text_muted),
            )));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}
