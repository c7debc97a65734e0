//! Essay and test form panels
//!
//! Pure state holders: the generate buttons are rendered but the action is
//! not wired to the backend in this snapshot.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{EssayField, EssayForm, TestField, TestForm};
use crate::tui::theme::Theme;

fn row_style(theme: &Theme, focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(theme.text_primary)
            .bg(theme.highlight_bg)
    } else {
        Style::default().fg(theme.text_secondary)
    }
}

/// Essay generation form
pub struct EssayPanel<'a> {
    form: &'a EssayForm,
    theme: &'a Theme,
}

impl<'a> EssayPanel<'a> {
    pub fn new(form: &'a EssayForm, theme: &'a Theme) -> Self {
        Self { form, theme }
    }
}

impl Widget for EssayPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .title(" Сочинения ");
        let inner = block.inner(area);
        block.render(area, buf);

        let topic = if self.form.topic.is_empty() {
            "— введите тему —".to_string()
        } else {
            self.form.topic.clone()
        };

        let lines = vec![
            Line::from(Span::styled(
                "Помощь со структурой и текстом сочинения",
                Style::default().fg(self.theme.text_muted),
            )),
            Line::default(),
            Line::from(Span::styled(
                format!(" Тема: {}", topic),
                row_style(self.theme, self.form.field == EssayField::Topic),
            )),
            Line::from(Span::styled(
                format!(" Предмет: ◂ {} ▸", self.form.subject.label()),
                row_style(self.theme, self.form.field == EssayField::Subject),
            )),
            Line::default(),
            Line::from(Span::styled(
                " [ Создать сочинение ]",
                row_style(self.theme, self.form.field == EssayField::Generate),
            )),
        ];
        Paragraph::new(lines).render(inner, buf);
    }
}

/// Test generation form
pub struct TestPanel<'a> {
    form: &'a TestForm,
    theme: &'a Theme,
}

impl<'a> TestPanel<'a> {
    pub fn new(form: &'a TestForm, theme: &'a Theme) -> Self {
        Self { form, theme }
    }
}

impl Widget for TestPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .title(" Контрольные ");
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = vec![
            Line::from(Span::styled(
                "Генерация контрольной с заданиями и ответами",
                Style::default().fg(self.theme.text_muted),
            )),
            Line::default(),
            Line::from(Span::styled(
                format!(" Предмет: ◂ {} ▸", self.form.subject.label()),
                row_style(self.theme, self.form.field == TestField::Subject),
            )),
            Line::from(Span::styled(
                format!(" Сложность: ◂ {} ▸", self.form.difficulty.label()),
                row_style(self.theme, self.form.field == TestField::Difficulty),
            )),
            Line::from(Span::styled(
                format!(" Заданий: ◂ {} ▸", self.form.questions),
                row_style(self.theme, self.form.field == TestField::Questions),
            )),
            Line::default(),
            Line::from(Span::styled(
                " [ Создать контрольную ]",
                row_style(self.theme, self.form.field == TestField::Generate),
            )),
        ];
        Paragraph::new(lines).render(inner, buf);
    }
}
