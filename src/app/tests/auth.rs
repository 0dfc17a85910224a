//! Sign-in / sign-out gating tests.

use std::sync::Arc;

use ratatui::crossterm::event::{KeyCode, KeyModifiers};

use crate::app::tests::helpers::{
    EchoResponder, char_key, create_test_app, ctrl_key, enter_key, key,
};
use crate::app::{App, AppMode, AuthField};
use crate::core::{IdentityProvider, MockIdentityProvider};
use crate::fs::StoragePaths;

fn signed_out_app() -> App {
    App::with_backends(
        StoragePaths::new(&std::env::temp_dir().join("polychat-test-void")),
        Arc::new(MockIdentityProvider::signed_out()),
        Arc::new(EchoResponder),
    )
}

#[test]
fn restored_session_starts_in_chat_mode() {
    let app = create_test_app();
    assert_eq!(app.mode, AppMode::Chat);
    // A fresh sign-in starts with one seeded thread.
    assert_eq!(app.chats.threads().len(), 1);
}

#[test]
fn without_a_session_the_auth_screen_gates_the_chat() {
    let app = signed_out_app();
    assert_eq!(app.mode, AppMode::Auth);
    assert!(app.chats.threads().is_empty());
}

#[test]
fn sign_in_enters_chat_and_seeds_a_thread() {
    let mut app = signed_out_app();
    for c in "demo@example.com".chars() {
        app.handle_key(char_key(c));
    }
    app.handle_key(key(KeyCode::Tab));
    assert_eq!(app.auth.focused, AuthField::Password);
    for c in "password".chars() {
        app.handle_key(char_key(c));
    }
    app.handle_key(enter_key(KeyModifiers::NONE));

    assert_eq!(app.mode, AppMode::Chat);
    assert_eq!(app.chats.threads().len(), 1);
    assert_eq!(
        app.identity.current_identity().map(|i| i.email),
        Some("demo@example.com".to_string())
    );
    // The password buffer is not kept around.
    assert!(app.auth.password.is_empty());
}

#[test]
fn ctrl_t_switches_between_sign_in_and_sign_up() {
    let mut app = signed_out_app();
    assert!(!app.auth.signing_up);
    app.handle_key(ctrl_key('t'));
    assert!(app.auth.signing_up);

    // Sign-up succeeds just like sign-in in the mock backend.
    app.handle_key(enter_key(KeyModifiers::NONE));
    assert_eq!(app.mode, AppMode::Chat);
}

#[test]
fn logout_clears_threads_and_returns_to_auth() {
    let mut app = create_test_app();
    let id = app.chats.active_id().unwrap().to_string();
    app.chats.append_user_message(&id, "hello");

    app.composer.set_lines(vec!["/logout".to_string()]);
    app.handle_key(enter_key(KeyModifiers::NONE));

    assert_eq!(app.mode, AppMode::Auth);
    assert!(app.chats.threads().is_empty());
    assert!(app.chats.active_id().is_none());
    assert!(app.identity.current_identity().is_none());
}

#[test]
fn sign_out_notifies_identity_subscribers() {
    let mut app = create_test_app();
    let rx = app.identity.subscribe();

    app.sign_out();

    assert!(rx.has_changed().unwrap_or(false));
    assert!(rx.borrow().is_none());
}

#[test]
fn backspace_edits_the_focused_auth_field() {
    let mut app = signed_out_app();
    for c in "abc".chars() {
        app.handle_key(char_key(c));
    }
    app.handle_key(key(KeyCode::Backspace));
    assert_eq!(app.auth.email, "ab");
}

#[test]
fn chat_keys_do_nothing_on_the_auth_screen() {
    let mut app = signed_out_app();
    app.handle_key(ctrl_key('n'));
    assert!(app.chats.threads().is_empty());
    // Ctrl+N typed no character either.
    assert!(app.auth.email.is_empty());
}
