//! Profile panel
//!
//! Shows the signed-in user plus demo usage counters. The counters are
//! static until the backend exposes real usage.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::api::UserData;
use crate::tui::theme::Theme;

pub struct ProfilePanel<'a> {
    user: Option<&'a UserData>,
    theme: &'a Theme,
}

impl<'a> ProfilePanel<'a> {
    pub fn new(user: Option<&'a UserData>, theme: &'a Theme) -> Self {
        Self { user, theme }
    }
}

impl Widget for ProfilePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .title(" Профиль ");
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = match self.user {
            Some(user) => {
                let provider = match user.provider.as_str() {
                    "google" => "Google",
                    "yandex" => "Яндекс",
                    other => other,
                };
                vec![
                    Line::from(vec![
                        Span::styled(
                            format!(" ({}) ", user.initials()),
                            Style::default()
                                .fg(self.theme.accent)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(
                            user.name.clone(),
                            Style::default()
                                .fg(self.theme.text_primary)
                                .add_modifier(Modifier::BOLD),
                        ),
                    ]),
                    Line::from(Span::styled(
                        format!("      {}", user.email),
                        Style::default().fg(self.theme.text_secondary),
                    )),
                    Line::from(Span::styled(
                        format!("      Вход через {}", provider),
                        Style::default().fg(self.theme.text_muted),
                    )),
                    Line::default(),
                    Line::from(Span::styled(
                        " Статистика использования",
                        Style::default()
                            .fg(self.theme.text_primary)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        "   Диалогов: 24",
                        Style::default().fg(self.theme.text_secondary),
                    )),
                    Line::from(Span::styled(
                        "   Сообщений: 156",
                        Style::default().fg(self.theme.text_secondary),
                    )),
                    Line::from(Span::styled(
                        "   Токенов: 45 230",
                        Style::default().fg(self.theme.text_secondary),
                    )),
                    Line::default(),
                    Line::from(Span::styled(
                        " Enter — выйти из аккаунта",
                        Style::default().fg(self.theme.text_muted),
                    )),
                ]
            }
            None => vec![Line::from(Span::styled(
                " Вход не выполнен",
                Style::default().fg(self.theme.text_muted),
            ))],
        };
        Paragraph::new(lines).render(inner, buf);
    }
}
