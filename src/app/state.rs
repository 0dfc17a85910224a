//! Application state structures.
//!
//! This module contains the state definitions for different parts of the
//! application:
//!
//! - **`ComposerState`**: Multi-line message input
//! - **`SettingsPanelState`**: Per-model enablement and API keys
//! - **`AuthState`**: Sign-in / sign-up form
//! - **`ScrollState`**: Timeline scrolling with auto-follow
//! - **`LayoutState`**: Dynamic layout dimensions
//!
//! ## Settings Panel
//!
//! The settings panel edits the in-memory per-model mappings; nothing is
//! written to disk until the panel closes, at which point both mappings
//! are persisted wholesale.

use std::collections::HashMap;

use tui_textarea::TextArea;

use crate::app::layout::ChatLayout;
use crate::core::ModelId;

/// Placeholder shown in the empty composer.
const COMPOSER_PLACEHOLDER: &str = "Ask me anything...";

/// Application mode.
///
/// - **Auth**: sign-in / sign-up screen, shown while no identity exists.
/// - **Chat**: the main interface with sidebar, timeline and composer.
/// - **Settings**: modal overlay for per-model configuration (Ctrl+S).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Sign-in / sign-up screen.
    Auth,
    /// Main chat interface. The mock session starts signed in, so this is
    /// the initial mode.
    #[default]
    Chat,
    /// Settings panel overlay.
    Settings,
}

/// Events sent from spawned dispatch tasks to the UI loop.
#[derive(Debug, Clone)]
pub enum ChatEvent {
    /// A fan-out batch settled.
    ///
    /// `replies` holds one entry per fulfilled responder in
    /// recipient-enumeration order; rejected responders are absent.
    RepliesSettled {
        /// Thread the batch was dispatched from.
        thread_id: String,
        /// Fulfilled replies, in enumeration order.
        replies: Vec<(ModelId, String)>,
    },
}

/// State for the message composer.
///
/// Wraps `tui-textarea`'s `TextArea`, which handles multi-line editing,
/// cursor management and wrapping.
pub struct ComposerState {
    /// The text area widget from the `tui-textarea` crate.
    pub textarea: TextArea<'static>,
}

impl ComposerState {
    /// Creates an empty composer.
    #[must_use]
    pub fn new() -> Self {
        let mut textarea = TextArea::default();
        textarea.set_placeholder_text(COMPOSER_PLACEHOLDER);
        Self { textarea }
    }

    /// Clears the composer content and resets the cursor.
    pub fn clear(&mut self) {
        let mut textarea = TextArea::default();
        textarea.set_placeholder_text(COMPOSER_PLACEHOLDER);
        self.textarea = textarea;
    }

    /// Returns the lines of text currently in the composer.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        self.textarea.lines()
    }

    /// Collects all composer lines into a single string.
    #[must_use]
    pub fn collect_text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    /// Replaces the composer content (for testing).
    #[cfg(test)]
    pub fn set_lines(&mut self, lines: Vec<String>) {
        let mut textarea = TextArea::new(lines);
        textarea.set_placeholder_text(COMPOSER_PLACEHOLDER);
        textarea.move_cursor(tui_textarea::CursorMove::Bottom);
        textarea.move_cursor(tui_textarea::CursorMove::End);
        self.textarea = textarea;
    }
}

impl Default for ComposerState {
    fn default() -> Self {
        Self::new()
    }
}

/// State for the settings panel.
///
/// Holds the in-memory per-model mappings plus the transient selection and
/// edit state of the modal.
#[derive(Debug, Clone, Default)]
pub struct SettingsPanelState {
    /// Currently selected row (index into `ModelId::all()`).
    pub selected_index: usize,
    /// Whether the selected row's API key is being edited.
    pub editing_key: bool,
    /// Per-model API keys.
    pub api_keys: HashMap<ModelId, String>,
    /// Per-model enabled flags.
    pub enabled: HashMap<ModelId, bool>,
    /// Mode to return to when closing the panel.
    pub previous_mode: Option<AppMode>,
}

impl SettingsPanelState {
    /// Returns the model of the currently selected row.
    #[must_use]
    pub fn selected_model(&self) -> ModelId {
        let models = ModelId::all();
        models[self.selected_index.min(models.len() - 1)]
    }

    /// Returns the stored API key for a model ("" when unset).
    #[must_use]
    pub fn api_key(&self, model: ModelId) -> &str {
        self.api_keys.get(&model).map_or("", String::as_str)
    }

    /// Returns whether a model is enabled.
    #[must_use]
    pub fn is_enabled(&self, model: ModelId) -> bool {
        self.enabled.get(&model).copied().unwrap_or(false)
    }

    /// Returns whether a model is both enabled and has a non-empty key.
    ///
    /// Only configured models take part in a multi-mode send (unless none
    /// is configured, in which case the full registry answers).
    #[must_use]
    pub fn is_configured(&self, model: ModelId) -> bool {
        self.is_enabled(model) && !self.api_key(model).is_empty()
    }

    /// Returns all configured models in registry order.
    #[must_use]
    pub fn configured_models(&self) -> Vec<ModelId> {
        ModelId::all()
            .iter()
            .copied()
            .filter(|m| self.is_configured(*m))
            .collect()
    }

    /// Toggles the enabled flag of the selected row.
    pub fn toggle_selected(&mut self) {
        let model = self.selected_model();
        let flag = self.enabled.entry(model).or_insert(false);
        *flag = !*flag;
    }

    /// Appends a character to the selected row's API key.
    pub fn push_key_char(&mut self, c: char) {
        let model = self.selected_model();
        self.api_keys.entry(model).or_default().push(c);
    }

    /// Removes the last character of the selected row's API key.
    pub fn pop_key_char(&mut self) {
        let model = self.selected_model();
        if let Some(key) = self.api_keys.get_mut(&model) {
            key.pop();
        }
    }
}

/// Which field of the auth form has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthField {
    /// Email input.
    #[default]
    Email,
    /// Password input.
    Password,
}

impl AuthField {
    /// Returns the other field.
    #[must_use]
    pub const fn toggled(&self) -> Self {
        match self {
            Self::Email => Self::Password,
            Self::Password => Self::Email,
        }
    }
}

/// State for the sign-in / sign-up screen.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    /// Email field content.
    pub email: String,
    /// Password field content.
    pub password: String,
    /// Field with input focus.
    pub focused: AuthField,
    /// false = sign in, true = sign up.
    pub signing_up: bool,
}

impl AuthState {
    /// Returns the focused field's buffer.
    pub fn focused_field_mut(&mut self) -> &mut String {
        match self.focused {
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
        }
    }

    /// Clears both fields and focuses the email input.
    pub fn reset(&mut self) {
        self.email.clear();
        self.password.clear();
        self.focused = AuthField::Email;
    }
}

/// Dynamic layout tracking state.
///
/// Stores the full [`ChatLayout`] calculated once per frame so scroll
/// calculations and rendering share one source of truth.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutState {
    /// The cached chat layout, calculated once per frame.
    pub chat: ChatLayout,
}

impl LayoutState {
    /// Returns the visible height of the timeline panel (excluding borders).
    #[must_use]
    pub const fn timeline_visible_height(&self) -> usize {
        self.chat.timeline_visible_height
    }

    /// Returns the content width of the timeline panel (excluding borders
    /// and scrollbar).
    #[must_use]
    pub const fn timeline_content_width(&self) -> usize {
        self.chat.timeline_content_width
    }
}

/// Scroll state for a panel, combining position and auto-scroll behavior.
#[derive(Debug, Clone, Default)]
pub struct ScrollState {
    /// Current scroll offset (visual lines from the top).
    pub offset: usize,
    /// Whether to follow the bottom when new content is added.
    /// Disabled when the user scrolls up, re-enabled at the bottom.
    pub auto_scroll: bool,
}

impl ScrollState {
    /// Creates a new scroll state with auto-scroll enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            offset: 0,
            auto_scroll: true,
        }
    }

    /// Resets to the top with auto-scroll enabled.
    pub fn reset(&mut self) {
        self.offset = 0;
        self.auto_scroll = true;
    }

    /// Scrolls up by one line, disabling auto-scroll.
    pub fn scroll_up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
        self.auto_scroll = false;
    }

    /// Scrolls down by one line, enabling auto-scroll at the bottom.
    pub fn scroll_down(&mut self, content_len: usize, visible_height: usize) {
        let max_scroll = content_len.saturating_sub(visible_height);
        self.offset = (self.offset + 1).min(max_scroll);
        self.auto_scroll = self.offset >= max_scroll;
    }

    /// Scrolls up by a page, disabling auto-scroll.
    pub fn page_up(&mut self, page_size: usize) {
        self.offset = self.offset.saturating_sub(page_size);
        self.auto_scroll = false;
    }

    /// Scrolls down by a page, enabling auto-scroll at the bottom.
    pub fn page_down(&mut self, content_len: usize, visible_height: usize, page_size: usize) {
        let max_scroll = content_len.saturating_sub(visible_height);
        self.offset = (self.offset + page_size).min(max_scroll);
        self.auto_scroll = self.offset >= max_scroll;
    }

    /// Jumps to the top, disabling auto-scroll.
    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
        self.auto_scroll = false;
    }

    /// Jumps to the bottom, enabling auto-scroll.
    pub fn scroll_to_bottom(&mut self, content_len: usize, visible_height: usize) {
        self.offset = content_len.saturating_sub(visible_height);
        self.auto_scroll = true;
    }

    /// Follows the bottom if auto-scroll is enabled.
    pub fn auto_scroll_if_enabled(&mut self, content_len: usize, visible_height: usize) {
        if self.auto_scroll {
            self.offset = content_len.saturating_sub(visible_height);
        }
    }
}
