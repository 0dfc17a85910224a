//! Layout calculation helpers for the TUI.
//!
//! This module provides a single source of truth for layout definitions,
//! ensuring that dimension calculations in `App::update_layout` and
//! rendering in `App::render` are always in sync.

use ratatui::layout::{Constraint, Layout, Rect};

/// Width of the thread sidebar when open.
const SIDEBAR_WIDTH: u16 = 30;

/// Layout information for the chat interface.
///
/// The screen splits into an optional sidebar column and a main column:
/// - Sidebar: thread list and chat-mode summary (zero width when closed)
/// - Main: header, scrollable timeline, status line, composer, footer
#[derive(Debug, Clone, Copy, Default)]
pub struct ChatLayout {
    /// Thread sidebar (zero-width when closed).
    pub sidebar: Rect,
    /// Header area (1 line: app name, mode, model badges).
    pub header: Rect,
    /// Message timeline (scrollable, main content).
    pub timeline: Rect,
    /// Status line (1 line: dispatch progress or warnings).
    pub status: Rect,
    /// Composer area.
    pub composer: Rect,
    /// Footer area (key hints, 1 line).
    pub footer: Rect,
    /// Visible height of the timeline panel (excluding borders).
    pub timeline_visible_height: usize,
    /// Content width for the timeline panel (excluding borders and scrollbar).
    pub timeline_content_width: usize,
}

/// Row constraints for the main column.
const MAIN_COLUMN_CONSTRAINTS: [Constraint; 5] = [
    Constraint::Length(1), // Header
    Constraint::Min(5),    // Timeline (grows)
    Constraint::Length(1), // Status line
    Constraint::Length(5), // Composer (min 5 lines for comfortable typing)
    Constraint::Length(1), // Footer (key hints)
];

/// Calculates the layout for the chat interface.
///
/// Used by both `App::update_layout` and rendering so dimension
/// calculations never drift apart.
#[must_use]
pub fn calculate_chat_layout(area: Rect, sidebar_open: bool) -> ChatLayout {
    let sidebar_width = if sidebar_open { SIDEBAR_WIDTH } else { 0 };
    let columns =
        Layout::horizontal([Constraint::Length(sidebar_width), Constraint::Min(20)]).split(area);
    let sidebar = columns[0];
    let main = columns[1];

    let rows = Layout::vertical(MAIN_COLUMN_CONSTRAINTS).split(main);

    // Timeline: subtract 2 for borders, 1 for the scrollbar column.
    let timeline_visible_height = rows[1].height.saturating_sub(2) as usize;
    let timeline_content_width = rows[1].width.saturating_sub(3) as usize;

    ChatLayout {
        sidebar,
        header: rows[0],
        timeline: rows[1],
        status: rows[2],
        composer: rows[3],
        footer: rows[4],
        timeline_visible_height,
        timeline_content_width,
    }
}
