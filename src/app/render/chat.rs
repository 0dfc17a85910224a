//! Chat mode rendering.
//!
//! This module contains the rendering logic for the main chat interface:
//! header, message timeline, status line, composer and footer. The thread
//! sidebar lives in its own module.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::app::App;
use crate::core::{ChatMode, ModelId};
use crate::tui::widgets::TimelineWidget;

impl App {
    /// Renders the chat interface.
    ///
    /// Uses the cached layout from `self.layout.chat` which is calculated
    /// once per frame in `update_layout()`.
    pub(crate) fn render_chat(&self, frame: &mut Frame) {
        let layout = self.layout.chat;

        if layout.sidebar.width > 0 {
            self.render_sidebar(frame, layout.sidebar);
        }
        self.render_chat_header(frame, layout.header);
        self.render_timeline(frame, layout.timeline);
        self.render_status_line(frame, layout.status);
        self.render_composer(frame, layout.composer);
        self.render_chat_footer(frame, layout.footer);
    }

    /// Renders the chat header: app name, chat mode, and model badges.
    fn render_chat_header(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(" polychat ", self.theme.header_style()),
            Span::styled("[", self.theme.muted_style()),
            Span::styled(self.chat_mode.name(), self.theme.normal_style()),
            Span::styled("] ", self.theme.muted_style()),
        ];

        match self.chat_mode {
            // Multi mode: one badge per registry model, lit in the model's
            // color when the model is enabled and keyed.
            ChatMode::Multi => {
                for model in ModelId::all() {
                    let style = if self.settings.is_configured(*model) {
                        self.theme.model_style(model.color())
                    } else {
                        self.theme.badge_off_style()
                    };
                    spans.push(Span::styled(
                        format!("{} {} ", model.icon(), model.name()),
                        style,
                    ));
                }
            }
            // Single mode: show only the selected model.
            ChatMode::Single => {
                let model = self.selected_model;
                spans.push(Span::styled(
                    format!("{} {}", model.icon(), model.name()),
                    self.theme.model_style(model.color()),
                ));
            }
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// Renders the message timeline of the active thread.
    fn render_timeline(&self, frame: &mut Frame, area: Rect) {
        let (title, messages) = match self.chats.active_thread() {
            Some(thread) => (thread.title.as_str(), thread.messages.as_slice()),
            None => ("No chat selected", &[][..]),
        };

        let widget = TimelineWidget::new(
            messages,
            self.timeline_scroll.offset,
            title,
            &self.theme,
        );
        frame.render_widget(widget, area);
    }

    /// Renders the status line: dispatch progress or a transient warning.
    fn render_status_line(&self, frame: &mut Frame, area: Rect) {
        let line = if self.is_loading() {
            let names: Vec<&str> = self
                .pending_recipients
                .iter()
                .map(|m| m.name())
                .collect();
            Line::from(vec![
                Span::styled(" ⋯ ", self.theme.highlight_style()),
                Span::styled(
                    format!(
                        "Waiting on {} model{}: {}",
                        names.len(),
                        if names.len() == 1 { "" } else { "s" },
                        names.join(", ")
                    ),
                    self.theme.muted_style(),
                ),
            ])
        } else if let Some(status) = &self.status_line {
            Line::from(Span::styled(
                format!(" {status}"),
                self.theme.warning_style(),
            ))
        } else {
            Line::from("")
        };

        frame.render_widget(Paragraph::new(line), area);
    }

    /// Renders the composer.
    fn render_composer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title(" Message ")
            .title_style(self.theme.header_style())
            .title_bottom(Line::from(vec![
                Span::styled(" \\", self.theme.highlight_style()),
                Span::styled("+Enter for newline ", self.theme.muted_style()),
            ]))
            .border_style(self.theme.border_style());

        // Clone the textarea widget so the styled block can be attached.
        let mut textarea = self.composer.textarea.clone();
        textarea.set_block(block);
        textarea.set_style(self.theme.normal_style());
        textarea.set_cursor_line_style(ratatui::style::Style::default());
        textarea.set_placeholder_style(self.theme.placeholder_style());

        frame.render_widget(&textarea, area);
    }

    /// Renders the chat footer with key hints (single line).
    fn render_chat_footer(&self, frame: &mut Frame, area: Rect) {
        let footer_content = vec![
            Span::styled(" [Enter] ", self.theme.highlight_style()),
            Span::styled("Send  ", self.theme.muted_style()),
            Span::styled("[Ctrl+N] ", self.theme.highlight_style()),
            Span::styled("New  ", self.theme.muted_style()),
            Span::styled("[Ctrl+T] ", self.theme.highlight_style()),
            Span::styled("Mode  ", self.theme.muted_style()),
            Span::styled("[Ctrl+B] ", self.theme.highlight_style()),
            Span::styled("Sidebar  ", self.theme.muted_style()),
            Span::styled("[Ctrl+S] ", self.theme.highlight_style()),
            Span::styled("Settings  ", self.theme.muted_style()),
            Span::styled("[Ctrl+C] ", self.theme.highlight_style()),
            Span::styled("Quit", self.theme.muted_style()),
        ];

        frame.render_widget(Paragraph::new(Line::from(footer_content)), area);
    }
}
