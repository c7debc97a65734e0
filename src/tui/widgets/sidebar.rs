//! Sidebar - logo, panel navigation, signed-in user

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use crate::api::UserData;
use crate::tui::app::Panel;
use crate::tui::theme::Theme;

/// Left-hand navigation sidebar
pub struct Sidebar<'a> {
    active: Panel,
    user: Option<&'a UserData>,
    theme: &'a Theme,
}

impl<'a> Sidebar<'a> {
    pub fn new(active: Panel, user: Option<&'a UserData>, theme: &'a Theme) -> Self {
        Self {
            active,
            user,
            theme,
        }
    }
}

impl Widget for Sidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(self.theme.border));
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // logo
                Constraint::Min(4),    // navigation
                Constraint::Length(2), // user footer
            ])
            .split(inner);

        let logo = Paragraph::new(vec![
            Line::from(Span::styled(
                " ✦ MegaChat",
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "   AI-ассистент",
                Style::default().fg(self.theme.text_muted),
            )),
        ]);
        logo.render(chunks[0], buf);

        let items: Vec<ListItem> = Panel::ALL
            .iter()
            .map(|panel| {
                let (marker, style) = if *panel == self.active {
                    (
                        "▸",
                        Style::default()
                            .fg(self.theme.text_primary)
                            .bg(self.theme.highlight_bg)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    (" ", Style::default().fg(self.theme.text_secondary))
                };
                ListItem::new(Line::from(Span::styled(
                    format!(" {} {}", marker, panel.title()),
                    style,
                )))
            })
            .collect();
        Widget::render(List::new(items), chunks[1], buf);

        let footer = match self.user {
            Some(user) => Line::from(vec![
                Span::styled("● ", Style::default().fg(self.theme.ai_fg)),
                Span::styled(
                    user.name.clone(),
                    Style::default().fg(self.theme.text_secondary),
                ),
            ]),
            None => Line::from(Span::styled(
                "○ не выполнен вход",
                Style::default().fg(self.theme.text_muted),
            )),
        };
        Paragraph::new(footer).render(chunks[2], buf);
    }
}
