//! Main application state and logic.
//!
//! This module contains the core App struct and its implementation,
//! organized into submodules:
//! - `input` - Composer input handling and the send path
//! - `events` - Key event handling and event-channel draining
//! - `render` - UI rendering
//! - `state` - Application state structures
//! - `layout` - Layout calculation
//!
//! ## Application Modes
//!
//! The application operates in three modes:
//!
//! - **`Auth`**: Sign-in / sign-up screen, shown while no identity exists.
//! - **`Chat`**: Main interface with thread sidebar, message timeline and
//!   composer.
//! - **`Settings`**: Modal overlay for per-model API keys and enablement
//!   (Ctrl+S). Settings persist to disk when the panel closes.

pub mod events;
mod input;
mod layout;
mod render;
pub mod state;

#[cfg(test)]
mod tests;

pub use layout::{ChatLayout, calculate_chat_layout};

use std::sync::Arc;

use ratatui::layout::Rect;
use tokio::sync::mpsc;

use crate::core::{
    ChatMode, ChatStore, CommandContext, CommandRegistry, CommandResult, IdentityProvider,
    MockIdentityProvider, MockResponder, ModelId, ModelResponder, parse_slash_command,
};
use crate::fs::{PersistedSettings, StoragePaths};
use crate::tui::Theme;

pub use self::state::{
    AppMode, AuthField, AuthState, ChatEvent, ComposerState, LayoutState, ScrollState,
    SettingsPanelState,
};

/// Channel buffer size for chat events.
const EVENT_CHANNEL_SIZE: usize = 64;

/// Main application state.
///
/// Owns every store and all transient view state; the UI loop is the only
/// mutator, so replies from spawned dispatch tasks come back over the
/// event channel instead of touching state directly.
pub struct App {
    // =========================================================================
    // Shared State
    // =========================================================================
    /// All polychat-related filesystem paths.
    pub(crate) paths: StoragePaths,
    /// Theme for styling.
    pub(crate) theme: Theme,
    /// Current application mode.
    pub(crate) mode: AppMode,
    /// Should quit flag.
    should_quit: bool,
    /// Whether a send operation is in flight.
    is_loading: bool,
    /// Recipient set of the in-flight send (for the status line).
    pub(crate) pending_recipients: Vec<ModelId>,
    /// Transient status-line message (warnings, command feedback).
    pub(crate) status_line: Option<String>,

    // =========================================================================
    // Chat Configuration
    // =========================================================================
    /// Multi or single recipient selection.
    pub(crate) chat_mode: ChatMode,
    /// The model targeted in single mode.
    pub(crate) selected_model: ModelId,
    /// Whether the thread sidebar is visible.
    pub(crate) sidebar_open: bool,

    // =========================================================================
    // Backends
    // =========================================================================
    /// Identity backend (mock in this build).
    pub(crate) identity: Arc<dyn IdentityProvider>,
    /// Model responder backend (mock in this build).
    pub(crate) responder: Arc<dyn ModelResponder>,

    // =========================================================================
    // Event Channel
    // =========================================================================
    /// Receiver drained by the UI loop.
    event_rx: mpsc::Receiver<ChatEvent>,
    /// Sender cloned into dispatch tasks.
    event_tx: mpsc::Sender<ChatEvent>,

    // =========================================================================
    // Component States
    // =========================================================================
    /// Chat threads and the active-thread marker.
    pub(crate) chats: ChatStore,
    /// Message composer state.
    pub(crate) composer: ComposerState,
    /// Settings panel state (per-model keys and flags).
    pub(crate) settings: SettingsPanelState,
    /// Sign-in / sign-up form state.
    pub(crate) auth: AuthState,
    /// Timeline scroll state.
    pub(crate) timeline_scroll: ScrollState,
    /// Dynamic layout dimensions.
    pub(crate) layout: LayoutState,
    /// Registry of available slash commands.
    pub(crate) command_registry: CommandRegistry,
}

impl App {
    /// Creates an application instance with the bundled mock backends.
    #[must_use]
    pub fn new(paths: StoragePaths) -> Self {
        Self::with_backends(
            paths,
            Arc::new(MockIdentityProvider::new()),
            Arc::new(MockResponder),
        )
    }

    /// Creates an application instance with injected backends.
    ///
    /// Used by tests (and by any future real integration) to substitute
    /// the identity and responder implementations.
    #[must_use]
    pub fn with_backends(
        paths: StoragePaths,
        identity: Arc<dyn IdentityProvider>,
        responder: Arc<dyn ModelResponder>,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_SIZE);

        // Session start: load persisted settings (missing or malformed
        // files yield empty mappings).
        let mut settings = SettingsPanelState::default();
        paths.load_settings().apply_to(&mut settings);

        let signed_in = identity.current_identity().is_some();
        let mut chats = ChatStore::new();
        if signed_in {
            chats.seed_initial_thread();
        }

        Self {
            paths,
            theme: Theme::default(),
            mode: if signed_in { AppMode::Chat } else { AppMode::Auth },
            should_quit: false,
            is_loading: false,
            pending_recipients: Vec::new(),
            status_line: None,
            chat_mode: ChatMode::default(),
            selected_model: ModelId::default(),
            sidebar_open: true,
            identity,
            responder,
            event_rx,
            event_tx,
            chats,
            composer: ComposerState::new(),
            settings,
            auth: AuthState::default(),
            timeline_scroll: ScrollState::new(),
            layout: LayoutState::default(),
            command_registry: CommandRegistry::with_builtins(),
        }
    }

    /// Returns true if the application should quit.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns true if a send operation is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Gets the event sender used by dispatch tasks.
    #[must_use]
    pub fn event_sender(&self) -> mpsc::Sender<ChatEvent> {
        self.event_tx.clone()
    }

    /// Sets the loading flag.
    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    /// Calculates and caches the layout based on terminal dimensions.
    ///
    /// Should be called once per frame before rendering so scroll math and
    /// rendering agree on panel sizes.
    pub fn update_layout(&mut self, terminal_area: Rect) {
        self.layout.chat = calculate_chat_layout(terminal_area, self.sidebar_open);
    }

    // =========================================================================
    // Mode Transitions
    // =========================================================================

    /// Opens the settings panel.
    pub(crate) fn open_settings(&mut self) {
        if self.mode == AppMode::Settings {
            return;
        }
        self.settings.previous_mode = Some(self.mode);
        self.settings.selected_index = 0;
        self.settings.editing_key = false;
        self.mode = AppMode::Settings;
    }

    /// Closes the settings panel and persists both mappings wholesale.
    ///
    /// A failed save is reported on the status line but never blocks the
    /// panel from closing.
    pub(crate) fn close_settings(&mut self) {
        let persisted = PersistedSettings::from(&self.settings);
        if let Err(e) = self.paths.save_settings(&persisted) {
            self.status_line = Some(format!("Failed to save settings: {e}"));
        }
        self.settings.previous_mode = None;
        self.settings.editing_key = false;
        self.mode = AppMode::Chat;
    }

    /// Signs the user out and returns to the auth screen.
    ///
    /// All threads are dropped; a batch still in flight will settle
    /// against the cleared store and vanish as a silent no-op.
    pub(crate) fn sign_out(&mut self) {
        self.identity.sign_out();
        self.chats.clear();
        self.composer.clear();
        self.is_loading = false;
        self.pending_recipients.clear();
        self.status_line = None;
        self.auth.reset();
        self.mode = AppMode::Auth;
    }

    /// Completes a successful sign-in: reload settings, seed the initial
    /// thread and enter chat mode.
    pub(crate) fn complete_sign_in(&mut self) {
        self.paths.load_settings().apply_to(&mut self.settings);
        self.chats.seed_initial_thread();
        self.timeline_scroll.reset();
        self.mode = AppMode::Chat;
    }

    // =========================================================================
    // Thread Intents
    // =========================================================================

    /// Starts a fresh thread and focuses it.
    pub(crate) fn new_thread(&mut self) {
        self.chats.create_thread();
        self.timeline_scroll.reset();
    }

    /// Deletes the active thread, if any.
    pub(crate) fn delete_active_thread(&mut self) {
        if let Some(id) = self.chats.active_id().map(str::to_string) {
            self.chats.delete_thread(&id);
            self.timeline_scroll.reset();
        }
    }

    /// Starts a separate single-model thread for the given model.
    pub(crate) fn split_off_thread(&mut self, model: ModelId) {
        self.chats
            .create_thread_titled(format!("{} Chat", model.name()));
        self.chat_mode = ChatMode::Single;
        self.selected_model = model;
        self.timeline_scroll.reset();
    }

    /// Splits off a thread for the model of the most recent assistant
    /// reply in the active thread.
    pub(crate) fn split_off_last_model(&mut self) {
        let last_model = self
            .chats
            .active_thread()
            .and_then(|t| t.messages.iter().rev().find_map(|m| m.model));
        match last_model {
            Some(model) => self.split_off_thread(model),
            None => {
                self.status_line = Some("No model reply to split off yet".to_string());
            }
        }
    }

    // =========================================================================
    // Slash Command Execution
    // =========================================================================

    /// Attempts to parse and execute a slash command from the composer.
    ///
    /// Returns `true` if the input was a command (whether or not it ran),
    /// `false` if it is a regular message.
    pub(crate) fn try_execute_slash_command(&mut self) -> bool {
        let input = self.composer.collect_text();

        let Some((name, args)) = parse_slash_command(&input) else {
            return false;
        };

        let Some(cmd) = self.command_registry.find(name) else {
            self.status_line = Some(format!("Unknown command: /{name}"));
            self.composer.clear();
            return true;
        };

        let ctx = CommandContext {
            is_loading: self.is_loading,
            mode: &self.mode,
            args,
        };

        if !cmd.can_execute(&ctx) {
            self.status_line = Some(format!("Cannot run /{name} while waiting for replies"));
            return true;
        }

        let result = cmd.execute(&ctx);
        self.composer.clear();
        self.handle_command_result(result);
        true
    }

    /// Applies the result of a slash command.
    fn handle_command_result(&mut self, result: CommandResult) {
        match result {
            CommandResult::Exit => self.should_quit = true,
            CommandResult::OpenSettings => self.open_settings(),
            CommandResult::NewThread => self.new_thread(),
            CommandResult::DeleteActiveThread => self.delete_active_thread(),
            CommandResult::ToggleMode => self.chat_mode = self.chat_mode.toggled(),
            CommandResult::SplitOffModel(model) => self.split_off_thread(model),
            CommandResult::SignOut => self.sign_out(),
            CommandResult::Message(msg) => self.status_line = Some(msg),
        }
    }

    /// Requests application exit.
    pub(crate) fn quit(&mut self) {
        self.should_quit = true;
    }
}
