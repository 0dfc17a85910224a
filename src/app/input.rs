//! Composer input handling and the send path.

use std::sync::Arc;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::App;
use crate::app::{AppMode, ChatEvent};
use crate::core::{fan_out, recipients};

impl App {
    /// Handles pasted text from bracketed paste mode.
    ///
    /// Multi-line pasted text arrives as a single `Event::Paste(String)`
    /// rather than individual key events, so Enter characters inside the
    /// paste never submit the message. Outside of chat mode, paste events
    /// are ignored.
    ///
    /// Line endings are normalized to `\n` (tui-textarea handles `\n` and
    /// `\r\n` but not a bare `\r`) and control characters other than
    /// newlines are filtered out.
    pub fn handle_paste(&mut self, text: &str) {
        if self.mode != AppMode::Chat || text.is_empty() {
            return;
        }

        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        let filtered: String = normalized
            .chars()
            .filter(|c| !c.is_control() || *c == '\n')
            .collect();

        self.composer.textarea.insert_str(&filtered);
    }

    /// Handles key events destined for the composer.
    ///
    /// Key bindings:
    /// - `Enter` - Send the message
    /// - `Shift+Enter` / `Alt+Enter` - Insert a newline
    /// - `Ctrl+J` - Insert a newline (works on every terminal)
    /// - trailing `\` + `Enter` - Insert a newline (universal escape)
    /// - Other keys - Delegated to `tui-textarea`
    pub(crate) fn handle_composer_key(&mut self, key: KeyEvent) {
        match key.code {
            // Newline: Ctrl+J (ASCII LF). Reliable even on terminals that
            // don't report Shift+Enter modifiers.
            KeyCode::Char('j') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.composer.textarea.insert_newline();
            }
            // Newline: Shift+Enter or Alt+Enter.
            KeyCode::Enter
                if key.modifiers.contains(KeyModifiers::SHIFT)
                    || key.modifiers.contains(KeyModifiers::ALT) =>
            {
                self.composer.textarea.insert_newline();
            }
            // Plain Enter: backslash-escape inserts a newline, otherwise send.
            KeyCode::Enter => {
                let text = self.composer.collect_text();
                if text.ends_with('\\') {
                    self.composer.textarea.delete_char();
                    self.composer.textarea.insert_newline();
                } else {
                    self.submit_composer();
                }
            }
            // tui-textarea handles backspace, delete, navigation,
            // character input, etc.
            _ => {
                self.composer.textarea.input(key);
            }
        }
    }

    /// Sends the composer content.
    ///
    /// The send path of one dispatch:
    /// 1. Empty or whitespace-only input is a complete no-op.
    /// 2. Slash commands are intercepted and never become messages.
    /// 3. While a batch is in flight, further sends are ignored.
    /// 4. The user message lands in the active thread (created with a
    ///    derived title if none exists), the loading flag goes up, and a
    ///    task fans the prompt out to the recipient set.
    ///
    /// The task reports back with [`ChatEvent::RepliesSettled`] once every
    /// responder has settled; `process_events` merges the replies.
    pub(crate) fn submit_composer(&mut self) {
        let text = self.composer.collect_text();
        if text.trim().is_empty() {
            return;
        }

        if self.try_execute_slash_command() {
            return;
        }

        if self.is_loading() {
            return;
        }

        self.status_line = None;

        let thread_id = self.chats.ensure_active_for_send(&text);
        self.chats.append_user_message(&thread_id, text.clone());
        self.composer.clear();
        self.set_loading(true);

        let recipient_set = recipients(
            self.chat_mode,
            self.selected_model,
            &self.settings.configured_models(),
        );
        self.pending_recipients = recipient_set.clone();
        self.auto_scroll_timeline();

        let tx = self.event_sender();
        let responder = Arc::clone(&self.responder);
        tokio::spawn(async move {
            let replies = fan_out(responder, &recipient_set, &text).await;
            // The UI loop owns all state; if it went away there is nobody
            // left to deliver to.
            let _ = tx.send(ChatEvent::RepliesSettled { thread_id, replies }).await;
        });
    }
}
