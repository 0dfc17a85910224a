//! Thread intent tests (keys and slash commands).

use ratatui::crossterm::event::{KeyCode, KeyModifiers};

use crate::app::AppMode;
use crate::app::tests::helpers::{create_test_app, ctrl, ctrl_key, enter_key, key};
use crate::core::{ChatMode, ModelId};

#[test]
fn ctrl_n_creates_a_thread_at_the_head() {
    let mut app = create_test_app();
    let seeded = app.chats.active_id().unwrap().to_string();

    app.handle_key(ctrl_key('n'));

    let new_id = app.chats.active_id().unwrap().to_string();
    assert_ne!(seeded, new_id);
    assert_eq!(app.chats.threads().len(), 2);
    assert_eq!(app.chats.threads()[0].id, new_id);
}

#[test]
fn ctrl_x_deletes_the_active_thread() {
    let mut app = create_test_app();
    app.handle_key(ctrl_key('n'));
    assert_eq!(app.chats.threads().len(), 2);

    app.handle_key(ctrl_key('x'));
    assert_eq!(app.chats.threads().len(), 1);
    // The remaining head takes over as active.
    assert!(app.chats.active_id().is_some());

    app.handle_key(ctrl_key('x'));
    assert!(app.chats.threads().is_empty());
    assert!(app.chats.active_id().is_none());

    // Deleting with nothing active is harmless.
    app.handle_key(ctrl_key('x'));
    assert!(app.chats.threads().is_empty());
}

#[test]
fn ctrl_arrows_move_the_selection() {
    let mut app = create_test_app();
    app.handle_key(ctrl_key('n'));
    let newest = app.chats.active_id().unwrap().to_string();

    app.handle_key(ctrl(KeyCode::Down));
    assert_ne!(app.chats.active_id().unwrap(), newest);
    app.handle_key(ctrl(KeyCode::Up));
    assert_eq!(app.chats.active_id().unwrap(), newest);
}

#[test]
fn ctrl_t_toggles_the_chat_mode() {
    let mut app = create_test_app();
    assert_eq!(app.chat_mode, ChatMode::Multi);
    app.handle_key(ctrl_key('t'));
    assert_eq!(app.chat_mode, ChatMode::Single);
    app.handle_key(ctrl_key('t'));
    assert_eq!(app.chat_mode, ChatMode::Multi);
}

#[test]
fn ctrl_g_cycles_the_selected_model() {
    let mut app = create_test_app();
    assert_eq!(app.selected_model, ModelId::ChatGpt);
    app.handle_key(ctrl_key('g'));
    assert_eq!(app.selected_model, ModelId::Claude);
}

#[test]
fn ctrl_b_toggles_the_sidebar() {
    let mut app = create_test_app();
    assert!(app.sidebar_open);
    app.handle_key(ctrl_key('b'));
    assert!(!app.sidebar_open);
}

#[test]
fn split_off_uses_the_last_assistant_model() {
    let mut app = create_test_app();
    let id = app.chats.active_id().unwrap().to_string();
    app.chats.append_user_message(&id, "hi");
    app.chats
        .append_assistant_message(&id, ModelId::Claude, "hello");
    app.chats
        .append_assistant_message(&id, ModelId::DeepSeek, "hello too");

    app.handle_key(ctrl_key('o'));

    assert_eq!(app.chat_mode, ChatMode::Single);
    assert_eq!(app.selected_model, ModelId::DeepSeek);
    let thread = app.chats.active_thread().unwrap();
    assert_eq!(thread.title, "DeepSeek Chat");
    assert!(thread.messages.is_empty());
}

#[test]
fn split_off_without_replies_reports_on_the_status_line() {
    let mut app = create_test_app();
    app.handle_key(ctrl_key('o'));
    assert_eq!(app.chat_mode, ChatMode::Multi);
    assert!(app.status_line.is_some());
}

#[test]
fn slash_new_and_delete_manage_threads() {
    let mut app = create_test_app();
    app.composer.set_lines(vec!["/new".to_string()]);
    app.handle_key(enter_key(KeyModifiers::NONE));
    assert_eq!(app.chats.threads().len(), 2);
    assert_eq!(app.composer.collect_text(), "");

    app.composer.set_lines(vec!["/delete".to_string()]);
    app.handle_key(enter_key(KeyModifiers::NONE));
    assert_eq!(app.chats.threads().len(), 1);
}

#[test]
fn slash_model_splits_off_the_named_model() {
    let mut app = create_test_app();
    app.composer.set_lines(vec!["/model grok".to_string()]);
    app.handle_key(enter_key(KeyModifiers::NONE));

    assert_eq!(app.chat_mode, ChatMode::Single);
    assert_eq!(app.selected_model, ModelId::Grok);
    assert_eq!(app.chats.active_thread().unwrap().title, "Grok Chat");
}

#[test]
fn slash_model_with_unknown_id_reports_and_changes_nothing() {
    let mut app = create_test_app();
    app.composer.set_lines(vec!["/model llama".to_string()]);
    app.handle_key(enter_key(KeyModifiers::NONE));

    assert_eq!(app.chat_mode, ChatMode::Multi);
    assert_eq!(app.status_line.as_deref(), Some("Unknown model: llama"));
}

#[test]
fn unknown_slash_command_reports_and_clears_the_composer() {
    let mut app = create_test_app();
    app.composer.set_lines(vec!["/frobnicate".to_string()]);
    app.handle_key(enter_key(KeyModifiers::NONE));

    assert_eq!(
        app.status_line.as_deref(),
        Some("Unknown command: /frobnicate")
    );
    assert_eq!(app.composer.collect_text(), "");
    // No message was sent.
    assert!(app.chats.active_thread().unwrap().messages.is_empty());
}

#[test]
fn slash_exit_quits() {
    let mut app = create_test_app();
    app.composer.set_lines(vec!["/exit".to_string()]);
    app.handle_key(enter_key(KeyModifiers::NONE));
    assert!(app.should_quit());
}

#[test]
fn esc_in_chat_mode_does_nothing() {
    let mut app = create_test_app();
    let threads_before = app.chats.threads().len();
    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.chats.threads().len(), threads_before);
    assert_eq!(app.mode, AppMode::Chat);
    assert!(!app.should_quit());
}
