//! Model settings panel
//!
//! Temperature 0.0-2.0 in steps of 0.1, max tokens 100-4000 in steps of
//! 100, plus the response style selection.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{SettingsRow, SettingsState};
use crate::tui::theme::Theme;

pub struct SettingsPanel<'a> {
    settings: &'a SettingsState,
    theme: &'a Theme,
}

impl<'a> SettingsPanel<'a> {
    pub fn new(settings: &'a SettingsState, theme: &'a Theme) -> Self {
        Self { settings, theme }
    }

    fn slider(&self, ratio: f32, width: usize) -> String {
        let filled = ((ratio.clamp(0.0, 1.0)) * width as f32).round() as usize;
        let mut bar = String::with_capacity(width);
        for i in 0..width {
            bar.push(if i < filled { '█' } else { '░' });
        }
        bar
    }

    fn row_style(&self, row: SettingsRow) -> Style {
        if self.settings.row == row {
            Style::default()
                .fg(self.theme.text_primary)
                .bg(self.theme.highlight_bg)
        } else {
            Style::default().fg(self.theme.text_secondary)
        }
    }
}

impl Widget for SettingsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .title(" Настройки модели ");
        let inner = block.inner(area);
        block.render(area, buf);

        let slider_width = 24;
        let temp_ratio = self.settings.temperature / 2.0;
        let tokens_ratio = (self.settings.max_tokens.saturating_sub(100)) as f32 / 3900.0;

        let lines = vec![
            Line::from(Span::styled(
                "Настройте поведение AI под ваши задачи",
                Style::default().fg(self.theme.text_muted),
            )),
            Line::default(),
            Line::from(Span::styled(
                format!(
                    " Температура ({:.1})  {}",
                    self.settings.temperature,
                    self.slider(temp_ratio, slider_width)
                ),
                self.row_style(SettingsRow::Temperature),
            )),
            Line::from(Span::styled(
                "   Точные (0) — Креативные (2)",
                Style::default().fg(self.theme.text_muted),
            )),
            Line::default(),
            Line::from(Span::styled(
                format!(
                    " Длина ответа ({} токенов)  {}",
                    self.settings.max_tokens,
                    self.slider(tokens_ratio, slider_width)
                ),
                self.row_style(SettingsRow::MaxTokens),
            )),
            Line::from(Span::styled(
                "   Короткие (100) — Длинные (4000)",
                Style::default().fg(self.theme.text_muted),
            )),
            Line::default(),
            Line::from(Span::styled(
                format!(" Стиль ответов: ◂ {} ▸", self.settings.style.label()),
                self.row_style(SettingsRow::Style),
            )),
        ];
        Paragraph::new(lines).render(inner, buf);
    }
}
