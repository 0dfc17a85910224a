//! Event handling logic for the App.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::App;
use crate::app::{AppMode, ChatEvent};
use crate::core::{IdentityProvider, ModelId};
use crate::tui::widgets::calculate_timeline_height;

/// Scroll page size for timeline navigation.
const SCROLL_PAGE_SIZE: usize = 10;

impl App {
    /// Handles a key event, dispatching on the current mode.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.mode {
            AppMode::Auth => self.handle_auth_key(key),
            AppMode::Chat => self.handle_chat_key(key),
            AppMode::Settings => self.handle_settings_key(key),
        }
    }

    /// Handles key events in chat mode.
    ///
    /// Key event priorities:
    /// 1. Application shortcuts (quit, settings, sidebar, threads, mode)
    /// 2. Timeline scrolling (PageUp/PageDown, Ctrl+Home/End)
    /// 3. Composer input (default)
    fn handle_chat_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => {
                    self.quit();
                    return;
                }
                KeyCode::Char('s') => {
                    self.open_settings();
                    return;
                }
                KeyCode::Char('b') => {
                    self.sidebar_open = !self.sidebar_open;
                    return;
                }
                KeyCode::Char('n') => {
                    self.new_thread();
                    return;
                }
                KeyCode::Char('x') => {
                    self.delete_active_thread();
                    return;
                }
                KeyCode::Char('t') => {
                    self.chat_mode = self.chat_mode.toggled();
                    return;
                }
                KeyCode::Char('g') => {
                    self.selected_model = self.selected_model.next();
                    return;
                }
                KeyCode::Char('o') => {
                    self.split_off_last_model();
                    return;
                }
                KeyCode::Up => {
                    self.chats.select_prev();
                    self.timeline_scroll.reset();
                    return;
                }
                KeyCode::Down => {
                    self.chats.select_next();
                    self.timeline_scroll.reset();
                    return;
                }
                KeyCode::Home => {
                    self.timeline_scroll.scroll_to_top();
                    return;
                }
                KeyCode::End => {
                    let content_len = self.timeline_visual_height();
                    self.timeline_scroll
                        .scroll_to_bottom(content_len, self.layout.timeline_visible_height());
                    return;
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::PageUp => {
                self.timeline_scroll.page_up(SCROLL_PAGE_SIZE);
                return;
            }
            KeyCode::PageDown => {
                let content_len = self.timeline_visual_height();
                self.timeline_scroll.page_down(
                    content_len,
                    self.layout.timeline_visible_height(),
                    SCROLL_PAGE_SIZE,
                );
                return;
            }
            // No cancellation: once dispatched, an in-flight batch cannot
            // be aborted, so Esc deliberately does nothing here.
            KeyCode::Esc => {
                return;
            }
            _ => {}
        }

        self.handle_composer_key(key);
    }

    /// Handles key events in settings mode.
    ///
    /// While an API key is being edited every printable character goes
    /// into the key; otherwise the usual list navigation applies.
    fn handle_settings_key(&mut self, key: KeyEvent) {
        if self.settings.editing_key {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => {
                    self.settings.editing_key = false;
                }
                KeyCode::Backspace => {
                    self.settings.pop_key_char();
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.settings.push_key_char(c);
                }
                _ => {}
            }
            return;
        }

        let max_index = ModelId::all().len() - 1;
        match key.code {
            // Navigation: Up / k
            KeyCode::Up | KeyCode::Char('k') => {
                self.settings.selected_index = self.settings.selected_index.saturating_sub(1);
            }
            // Navigation: Down / j
            KeyCode::Down | KeyCode::Char('j') => {
                self.settings.selected_index = (self.settings.selected_index + 1).min(max_index);
            }
            // Emacs-style navigation: Ctrl+P (up) / Ctrl+N (down)
            KeyCode::Char('p') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.settings.selected_index = self.settings.selected_index.saturating_sub(1);
            }
            KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.settings.selected_index = (self.settings.selected_index + 1).min(max_index);
            }
            // Space toggles the enabled flag.
            KeyCode::Char(' ') => {
                self.settings.toggle_selected();
            }
            // Enter starts editing the selected row's API key.
            KeyCode::Enter => {
                self.settings.editing_key = true;
            }
            // Close and save with Esc or 'q'; Ctrl+C closes instead of quitting.
            KeyCode::Char('q') | KeyCode::Esc => {
                self.close_settings();
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.close_settings();
            }
            _ => {}
        }
    }

    /// Handles key events on the sign-in / sign-up screen.
    fn handle_auth_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit();
            }
            // Ctrl+T toggles between sign in and sign up.
            KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.auth.signing_up = !self.auth.signing_up;
            }
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => {
                self.auth.focused = self.auth.focused.toggled();
            }
            KeyCode::Enter => {
                self.submit_auth();
            }
            KeyCode::Backspace => {
                self.auth.focused_field_mut().pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.auth.focused_field_mut().push(c);
            }
            _ => {}
        }
    }

    /// Submits the auth form.
    ///
    /// The mock backend accepts anything, but the error paths are wired so
    /// a real [`IdentityProvider`] slots in without UI changes.
    ///
    /// [`IdentityProvider`]: crate::core::IdentityProvider
    fn submit_auth(&mut self) {
        let email = self.auth.email.clone();
        let password = self.auth.password.clone();
        let result = if self.auth.signing_up {
            self.identity.sign_up(&email, &password)
        } else {
            self.identity.sign_in(&email, &password)
        };

        match result {
            Ok(_) => {
                self.auth.password.clear();
                self.status_line = None;
                self.complete_sign_in();
            }
            Err(e) => {
                self.status_line = Some(e.to_string());
            }
        }
    }

    // =========================================================================
    // Event Channel
    // =========================================================================

    /// Drains pending chat events from dispatch tasks.
    ///
    /// Called once per UI-loop iteration. Appending replies here (rather
    /// than in the dispatch task) keeps all store mutation on the UI loop.
    pub fn process_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                ChatEvent::RepliesSettled { thread_id, replies } => {
                    // Replies arrive in recipient-enumeration order; append
                    // them in that order. If the thread was deleted
                    // mid-flight the appends are silent no-ops.
                    for (model, content) in replies {
                        self.chats
                            .append_assistant_message(&thread_id, model, content);
                    }
                    self.set_loading(false);
                    self.pending_recipients.clear();
                    self.auto_scroll_timeline();
                }
            }
        }
    }

    // =========================================================================
    // Timeline Scrolling Helpers
    // =========================================================================

    /// Calculates the total visual line count of the active thread's
    /// timeline after wrapping.
    pub(crate) fn timeline_visual_height(&self) -> usize {
        let messages = self
            .chats
            .active_thread()
            .map_or(&[][..], |t| t.messages.as_slice());
        calculate_timeline_height(messages, self.layout.timeline_content_width())
    }

    /// Follows the timeline bottom if auto-scroll is enabled.
    pub(crate) fn auto_scroll_timeline(&mut self) {
        let content_len = self.timeline_visual_height();
        self.timeline_scroll
            .auto_scroll_if_enabled(content_len, self.layout.timeline_visible_height());
    }
}
