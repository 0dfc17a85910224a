//! Shared test utilities for the app module.
//!
//! Provides:
//! - `create_test_app` / `create_test_app_with_paths` - `App` instances
//!   wired to instant test responders and temp-dir storage
//! - `EchoResponder` / `DelayResponder` - deterministic [`ModelResponder`]
//!   implementations
//! - `settle` - drives the runtime until the in-flight batch lands
//! - Key event helpers (`char_key`, `ctrl_key`, `enter_key`, `key`)
//! - `render_app_to_terminal` - renders into a `TestBackend` for buffer
//!   assertions

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};

use crate::app::App;
use crate::core::{MockIdentityProvider, ModelId, ModelResponder};
use crate::fs::StoragePaths;

/// Creates a [`KeyEvent`] for an arbitrary key code with no modifiers.
pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

/// Creates a [`KeyEvent`] for a character key with no modifiers.
pub fn char_key(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}

/// Creates a [`KeyEvent`] for an arbitrary key code with Ctrl held.
pub fn ctrl(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::CONTROL,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

/// Creates a [`KeyEvent`] for a character key with Ctrl held.
pub fn ctrl_key(c: char) -> KeyEvent {
    ctrl(KeyCode::Char(c))
}

/// Creates a [`KeyEvent`] for the Enter key with the given modifiers.
pub fn enter_key(modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Enter,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

/// Instant responder that echoes `"<model id>:<prompt>"`.
pub struct EchoResponder;

#[async_trait]
impl ModelResponder for EchoResponder {
    async fn respond(&self, model: ModelId, prompt: &str) -> Result<String> {
        Ok(format!("{}:{prompt}", model.id()))
    }
}

/// Responder with per-model delays, for completion-order tests.
#[derive(Default)]
pub struct DelayResponder {
    /// Delay per model in milliseconds (0 when absent).
    pub delays_ms: HashMap<ModelId, u64>,
}

#[async_trait]
impl ModelResponder for DelayResponder {
    async fn respond(&self, model: ModelId, prompt: &str) -> Result<String> {
        if let Some(delay) = self.delays_ms.get(&model) {
            tokio::time::sleep(Duration::from_millis(*delay)).await;
        }
        Ok(format!("{}:{prompt}", model.id()))
    }
}

/// Creates a test app with the echo responder and storage pointed at a
/// directory that never exists, so no persisted state leaks between tests.
pub fn create_test_app() -> App {
    create_test_app_with_paths(StoragePaths::new(
        &std::env::temp_dir().join("polychat-test-void"),
    ))
}

/// Creates a test app with custom storage paths and the echo responder.
pub fn create_test_app_with_paths(paths: StoragePaths) -> App {
    create_test_app_with_responder(paths, Arc::new(EchoResponder))
}

/// Creates a test app with a custom responder backend.
pub fn create_test_app_with_responder(
    paths: StoragePaths,
    responder: Arc<dyn ModelResponder>,
) -> App {
    App::with_backends(paths, Arc::new(MockIdentityProvider::new()), responder)
}

/// Drives the runtime until the in-flight batch settles.
///
/// # Panics
///
/// Panics if the batch has not settled after a couple of seconds.
pub async fn settle(app: &mut App) {
    for _ in 0..200 {
        tokio::time::sleep(Duration::from_millis(10)).await;
        app.process_events();
        if !app.is_loading() {
            return;
        }
    }
    panic!("fan-out batch never settled");
}

/// Renders the app to a `TestBackend` terminal for buffer assertions.
///
/// Mimics the main loop by calling `update_layout()` before rendering.
///
/// # Errors
///
/// Returns an error if terminal creation or rendering fails.
pub fn render_app_to_terminal(
    app: &mut App,
    width: u16,
    height: u16,
) -> Result<Terminal<TestBackend>> {
    use ratatui::layout::Rect;

    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend)?;

    app.update_layout(Rect::new(0, 0, width, height));
    terminal.draw(|f| app.render(f))?;

    Ok(terminal)
}

/// Collects one row of the rendered buffer as a string.
#[must_use]
pub fn buffer_row(terminal: &Terminal<TestBackend>, y: u16) -> String {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.width)
        .map(|x| buffer[(x, y)].symbol())
        .collect()
}

/// Collects the entire rendered buffer as one string.
#[must_use]
pub fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.height)
        .map(|y| buffer_row(terminal, y))
        .collect::<Vec<_>>()
        .join("\n")
}
