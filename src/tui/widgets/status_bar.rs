//! Bottom status bar with key hints

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::tui::app::Panel;
use crate::tui::theme::Theme;

/// One-line hint bar, contents depend on the active panel
pub struct StatusBar<'a> {
    panel: Panel,
    awaiting: bool,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(panel: Panel, awaiting: bool, theme: &'a Theme) -> Self {
        Self {
            panel,
            awaiting,
            theme,
        }
    }

    fn hints(&self) -> &'static str {
        match self.panel {
            Panel::Solve => "Enter: отправить · Ctrl+S: предмет · Tab: раздел · Ctrl+C: выход",
            Panel::Essay | Panel::Test => {
                "↑/↓: поле · ←/→: значение · Tab: раздел · Ctrl+C: выход"
            }
            Panel::History => "↑/↓: выбор · Tab: раздел · Ctrl+C: выход",
            Panel::Settings => "↑/↓: параметр · ←/→: значение · Tab: раздел · Ctrl+C: выход",
            Panel::Profile => "Enter: выйти из аккаунта · Tab: раздел · Ctrl+C: выход",
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::styled(
            self.hints(),
            Style::default().fg(self.theme.text_muted),
        )];
        if self.awaiting {
            spans.push(Span::styled(
                "  ⏳ ожидание ответа",
                Style::default().fg(self.theme.placeholder_fg),
            ));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
