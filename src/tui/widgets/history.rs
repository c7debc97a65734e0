//! Task history panel (static demo data)

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem};

use crate::tui::app::TaskHistoryEntry;
use crate::tui::theme::Theme;

pub struct HistoryPanel<'a> {
    entries: &'a [TaskHistoryEntry],
    cursor: usize,
    theme: &'a Theme,
}

impl<'a> HistoryPanel<'a> {
    pub fn new(entries: &'a [TaskHistoryEntry], cursor: usize, theme: &'a Theme) -> Self {
        Self {
            entries,
            cursor,
            theme,
        }
    }
}

impl Widget for HistoryPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .title(" История заданий ");
        let inner = block.inner(area);
        block.render(area, buf);

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let selected = i == self.cursor;
                let title_style = if selected {
                    Style::default()
                        .fg(self.theme.text_primary)
                        .bg(self.theme.highlight_bg)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(self.theme.text_primary)
                };
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(
                            format!("{} ", entry.kind.icon()),
                            Style::default().fg(self.theme.accent),
                        ),
                        Span::styled(entry.title, title_style),
                    ]),
                    Line::from(Span::styled(
                        format!("  {} · {}", entry.subject, entry.date),
                        Style::default().fg(self.theme.text_muted),
                    )),
                    Line::default(),
                ])
            })
            .collect();
        Widget::render(List::new(items), inner, buf);
    }
}
