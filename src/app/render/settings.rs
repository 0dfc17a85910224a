//! Settings panel rendering.
//!
//! The settings modal lists every registry model with its enablement
//! toggle and a masked API-key field, mirroring the platform's API
//! settings dialog.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::App;
use crate::core::ModelId;

/// Longest run of mask bullets shown for a stored key.
const KEY_MASK_MAX: usize = 20;

/// Masks an API key for display.
fn masked_key(key: &str) -> String {
    "•".repeat(key.chars().count().min(KEY_MASK_MAX))
}

impl App {
    /// Renders the settings panel as a centered overlay.
    pub(crate) fn render_settings(&self, frame: &mut Frame) {
        let area = frame.area();

        // Header (3) + 2 rows per model + spacing (2) + footer (1) + borders (2)
        let popup_width = 56u16;
        #[allow(clippy::cast_possible_truncation)] // registry size fits in u16
        let popup_height = 8u16 + 2 * ModelId::all().len() as u16;
        let x = area.width.saturating_sub(popup_width) / 2;
        let y = area.height.saturating_sub(popup_height) / 2;
        let popup_area = Rect::new(x, y, popup_width, popup_height);

        frame.render_widget(Clear, popup_area);

        let mut content_lines = Vec::new();

        content_lines.push(Line::from(Span::styled(
            "API Settings",
            self.theme.header_style(),
        )));
        content_lines.push(Line::from(Span::styled(
            "Configure your AI model API keys.",
            self.theme.muted_style(),
        )));
        content_lines.push(Line::from(""));

        for (i, model) in ModelId::all().iter().enumerate() {
            let is_selected = i == self.settings.selected_index;
            let prefix = if is_selected { "› " } else { "  " };
            let enabled = self.settings.is_enabled(*model);
            let toggle = if enabled { "[Enabled ]" } else { "[Disabled]" };

            let name_style = if is_selected {
                self.theme.highlight_style()
            } else {
                self.theme.normal_style()
            };
            let toggle_style = if enabled {
                self.theme.model_style(model.color())
            } else {
                self.theme.muted_style()
            };

            content_lines.push(Line::from(vec![
                Span::styled(prefix, name_style),
                Span::styled(
                    format!("{} {:<10}", model.icon(), model.name()),
                    name_style,
                ),
                Span::styled(toggle, toggle_style),
            ]));

            let key = self.settings.api_key(*model);
            let editing = is_selected && self.settings.editing_key;
            let key_display = if editing {
                format!("    Key: {}▌", masked_key(key))
            } else if key.is_empty() {
                "    Key: (not set)".to_string()
            } else {
                format!("    Key: {}", masked_key(key))
            };
            let key_style = if editing {
                self.theme.highlight_style()
            } else {
                self.theme.muted_style()
            };
            content_lines.push(Line::from(Span::styled(key_display, key_style)));
        }

        content_lines.push(Line::from(""));

        let footer = if self.settings.editing_key {
            vec![
                Span::styled("[Enter/Esc] ", self.theme.highlight_style()),
                Span::styled("Done editing key", self.theme.muted_style()),
            ]
        } else {
            vec![
                Span::styled("[↑/↓] ", self.theme.highlight_style()),
                Span::styled("Navigate  ", self.theme.muted_style()),
                Span::styled("[Space] ", self.theme.highlight_style()),
                Span::styled("Toggle  ", self.theme.muted_style()),
                Span::styled("[Enter] ", self.theme.highlight_style()),
                Span::styled("Edit Key  ", self.theme.muted_style()),
                Span::styled("[Esc] ", self.theme.highlight_style()),
                Span::styled("Save", self.theme.muted_style()),
            ]
        };
        content_lines.push(Line::from(footer));

        let block = Block::default()
            .title(" Settings ")
            .title_style(self.theme.header_style())
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());

        let paragraph = Paragraph::new(content_lines)
            .block(block)
            .alignment(ratatui::layout::Alignment::Left);

        frame.render_widget(paragraph, popup_area);
    }
}
