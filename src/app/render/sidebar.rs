//! Thread sidebar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::core::ChatMode;

impl App {
    /// Renders the thread sidebar: chat-mode summary plus the thread list
    /// with the active thread highlighted.
    pub(crate) fn render_sidebar(&self, frame: &mut Frame, area: Rect) {
        let mut lines = Vec::new();

        // Mode summary
        lines.push(Line::from(vec![
            Span::styled("Mode  ", self.theme.muted_style()),
            Span::styled(self.chat_mode.name(), self.theme.normal_style()),
        ]));
        if self.chat_mode == ChatMode::Single {
            lines.push(Line::from(vec![
                Span::styled("Model ", self.theme.muted_style()),
                Span::styled(
                    format!(
                        "{} {}",
                        self.selected_model.icon(),
                        self.selected_model.name()
                    ),
                    self.theme.model_style(self.selected_model.color()),
                ),
            ]));
        }
        lines.push(Line::from(""));

        // Thread list, most-recent-first
        if self.chats.threads().is_empty() {
            lines.push(Line::from(Span::styled(
                "No chats yet",
                self.theme.muted_style(),
            )));
        }
        let active_id = self.chats.active_id();
        let inner_width = area.width.saturating_sub(2) as usize;
        for thread in self.chats.threads() {
            let is_active = active_id == Some(thread.id.as_str());
            let prefix = if is_active { "› " } else { "  " };
            let mut title: String = format!("{prefix}{}", thread.title);
            // Keep each row on one sidebar line.
            if title.chars().count() > inner_width {
                title = title.chars().take(inner_width.saturating_sub(1)).collect();
                title.push('…');
            }
            let style = if is_active {
                self.theme.highlight_style()
            } else {
                self.theme.normal_style()
            };
            lines.push(Line::from(Span::styled(title, style)));
        }

        let block = Block::default()
            .title(" Threads ")
            .title_style(self.theme.header_style())
            .title_bottom(Line::from(vec![
                Span::styled(" [Ctrl+↑/↓] ", self.theme.highlight_style()),
                Span::styled("Select ", self.theme.muted_style()),
                Span::styled("[Ctrl+X] ", self.theme.highlight_style()),
                Span::styled("Delete ", self.theme.muted_style()),
            ]))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
