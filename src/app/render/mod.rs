//! Rendering methods for the App.
//!
//! This module contains all UI rendering logic including:
//! - **Chat mode**: sidebar, header, timeline, status line, composer, footer
//! - **Settings panel**: modal overlay for per-model configuration
//! - **Auth screen**: sign-in / sign-up form

mod auth;
mod chat;
mod settings;
mod sidebar;

use ratatui::Frame;

use super::{App, AppMode};

impl App {
    /// Renders the application UI.
    pub fn render(&self, frame: &mut Frame) {
        match self.mode {
            AppMode::Auth => self.render_auth(frame),
            AppMode::Chat => self.render_chat(frame),
            AppMode::Settings => {
                // Render chat as background, then overlay settings
                self.render_chat(frame);
                self.render_settings(frame);
            }
        }
    }
}
