//! Message timeline widget.
//!
//! Renders a thread's message log as a scrollable panel. Every message
//! becomes a header line (author + time), its wrapped content lines, and a
//! blank separator. The same line-building code backs both rendering and
//! the scroll math in the app, so offsets always agree with what is on
//! screen.

use chrono::Local;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget,
        Widget,
    },
};
use unicode_width::UnicodeWidthChar;

use crate::core::{Message, ModelId, Role};
use crate::tui::Theme;

/// What a visual line of the timeline represents, for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimelineLineKind {
    /// Header of a user message.
    UserHeader,
    /// Header of an assistant message (carries the model for its color).
    AssistantHeader(ModelId),
    /// A wrapped line of message content.
    Content,
    /// Blank separator between messages.
    Blank,
}

/// One visual row of the timeline.
#[derive(Debug)]
struct TimelineLine {
    text: String,
    kind: TimelineLineKind,
}

/// Wraps a single line of text to fit within the given width.
///
/// Uses Unicode-aware width calculation to properly handle wide
/// characters. Each returned string is one visual row in the terminal.
fn wrap_line_to_width(text: &str, width: usize) -> Vec<String> {
    if width == 0 || text.is_empty() {
        return vec![String::new()];
    }

    let mut result = Vec::new();
    let mut current_line = String::new();
    let mut current_width = 0;

    for ch in text.chars() {
        let char_width = ch.width().unwrap_or(0);

        if current_width + char_width > width {
            result.push(current_line);
            current_line = String::new();
            current_width = 0;
        }

        current_line.push(ch);
        current_width += char_width;
    }

    result.push(current_line);
    result
}

/// Builds the header line text for a message.
fn header_text(message: &Message) -> String {
    let time = message.timestamp.with_timezone(&Local).format("%H:%M:%S");
    match (message.role, message.model) {
        (Role::Assistant, Some(model)) => {
            format!("{} {} · {time}", model.icon(), model.name())
        }
        // Assistant messages always carry a model; this arm only matters
        // for hand-built test data.
        (Role::Assistant, None) => format!("Assistant · {time}"),
        (Role::User, _) => format!("You · {time}"),
    }
}

/// Lays out messages into visual timeline rows for the given content width.
fn build_timeline_lines(messages: &[Message], width: usize) -> Vec<TimelineLine> {
    let mut lines = Vec::new();
    for message in messages {
        let header_kind = match (message.role, message.model) {
            (Role::Assistant, Some(model)) => TimelineLineKind::AssistantHeader(model),
            (Role::Assistant, None) => TimelineLineKind::Content,
            (Role::User, _) => TimelineLineKind::UserHeader,
        };
        lines.push(TimelineLine {
            text: header_text(message),
            kind: header_kind,
        });

        // Content may span multiple source lines (multi-line composer
        // input); wrap each one independently.
        for source_line in message.content.split('\n') {
            for wrapped in wrap_line_to_width(source_line, width) {
                lines.push(TimelineLine {
                    text: wrapped,
                    kind: TimelineLineKind::Content,
                });
            }
        }

        lines.push(TimelineLine {
            text: String::new(),
            kind: TimelineLineKind::Blank,
        });
    }
    lines
}

/// Calculates the total number of visual timeline rows after wrapping.
///
/// Used by the app for scroll-offset calculations; must stay in sync with
/// what [`TimelineWidget`] renders (both go through the same line builder).
#[must_use]
pub fn calculate_timeline_height(messages: &[Message], content_width: usize) -> usize {
    build_timeline_lines(messages, content_width).len()
}

/// A scrollable message timeline.
pub struct TimelineWidget<'a> {
    /// Messages to display, in log order.
    messages: &'a [Message],
    /// Current scroll offset in visual rows.
    scroll_offset: usize,
    /// Title for the panel.
    title: &'a str,
    /// Theme for styling.
    theme: &'a Theme,
}

impl<'a> TimelineWidget<'a> {
    /// Creates a new timeline widget.
    #[must_use]
    pub const fn new(
        messages: &'a [Message],
        scroll_offset: usize,
        title: &'a str,
        theme: &'a Theme,
    ) -> Self {
        Self {
            messages,
            scroll_offset,
            title,
            theme,
        }
    }
}

impl Widget for TimelineWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Line::from(Span::styled(
                self.title,
                self.theme.header_style(),
            )))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());

        let inner_area = block.inner(area);
        let visible_height = inner_area.height as usize;

        // Account for the scrollbar column on the right.
        let content_width = inner_area.width.saturating_sub(1) as usize;

        let visual_lines = build_timeline_lines(self.messages, content_width);
        let total_visual_lines = visual_lines.len();

        let visible_lines: Vec<Line> = visual_lines
            .into_iter()
            .skip(self.scroll_offset)
            .take(visible_height)
            .map(|vline| {
                let style = match vline.kind {
                    TimelineLineKind::UserHeader => self.theme.user_style(),
                    TimelineLineKind::AssistantHeader(model) => {
                        self.theme.model_style(model.color())
                    }
                    TimelineLineKind::Content => self.theme.normal_style(),
                    TimelineLineKind::Blank => self.theme.muted_style(),
                };
                Line::from(Span::styled(vline.text, style))
            })
            .collect();

        block.render(area, buf);

        let paragraph = Paragraph::new(visible_lines);
        paragraph.render(inner_area, buf);

        if total_visual_lines > visible_height {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("▲"))
                .end_symbol(Some("▼"))
                .track_symbol(Some("│"))
                .thumb_symbol("█")
                .track_style(self.theme.scrollbar_track_style())
                .thumb_style(self.theme.scrollbar_thumb_style());

            let mut scrollbar_state = ScrollbarState::new(total_visual_lines)
                .position(self.scroll_offset)
                .viewport_content_length(visible_height);

            scrollbar.render(inner_area, buf, &mut scrollbar_state);
        }
    }
}
