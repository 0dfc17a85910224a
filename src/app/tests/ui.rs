//! Rendering smoke tests against a `TestBackend`.

use crate::app::tests::helpers::{
    buffer_text, create_test_app, ctrl_key, render_app_to_terminal,
};
use crate::core::{ChatMode, ModelId};

#[test]
fn chat_view_shows_header_sidebar_and_composer() {
    let mut app = create_test_app();
    let terminal = render_app_to_terminal(&mut app, 100, 30).unwrap();
    let text = buffer_text(&terminal);

    assert!(text.contains("polychat"));
    assert!(text.contains("Multi-AI"));
    assert!(text.contains("Threads"));
    assert!(text.contains("New Chat"));
    assert!(text.contains("Message"));
    assert!(text.contains("Ask me anything..."));
}

#[test]
fn header_lists_every_registry_model_in_multi_mode() {
    let mut app = create_test_app();
    let terminal = render_app_to_terminal(&mut app, 120, 30).unwrap();
    let text = buffer_text(&terminal);

    for model in ModelId::all() {
        assert!(text.contains(model.name()), "missing {}", model.name());
    }
}

#[test]
fn single_mode_header_shows_only_the_selected_model() {
    let mut app = create_test_app();
    app.chat_mode = ChatMode::Single;
    app.selected_model = ModelId::Grok;
    let terminal = render_app_to_terminal(&mut app, 100, 30).unwrap();
    let text = buffer_text(&terminal);

    assert!(text.contains("Grok"));
    assert!(!text.contains("DeepSeek"));
}

#[test]
fn timeline_shows_messages_of_the_active_thread() {
    let mut app = create_test_app();
    let id = app.chats.active_id().unwrap().to_string();
    app.chats.append_user_message(&id, "what is rust?");
    app.chats
        .append_assistant_message(&id, ModelId::Claude, "a systems language");

    let terminal = render_app_to_terminal(&mut app, 100, 30).unwrap();
    let text = buffer_text(&terminal);

    assert!(text.contains("You ·"));
    assert!(text.contains("what is rust?"));
    assert!(text.contains("Claude ·"));
    assert!(text.contains("a systems language"));
}

#[test]
fn status_line_reports_the_pending_recipients() {
    let mut app = create_test_app();
    app.set_loading(true);
    app.pending_recipients = vec![ModelId::Claude, ModelId::Gemini];

    let terminal = render_app_to_terminal(&mut app, 100, 30).unwrap();
    let text = buffer_text(&terminal);

    assert!(text.contains("Waiting on 2 models: Claude, Gemini"));
}

#[test]
fn status_line_shows_transient_warnings() {
    let mut app = create_test_app();
    app.status_line = Some("Unknown command: /nope".to_string());

    let terminal = render_app_to_terminal(&mut app, 100, 30).unwrap();
    assert!(buffer_text(&terminal).contains("Unknown command: /nope"));
}

#[test]
fn settings_overlay_renders_on_top_of_the_chat() {
    let mut app = create_test_app();
    app.handle_key(ctrl_key('s'));

    let terminal = render_app_to_terminal(&mut app, 100, 30).unwrap();
    let text = buffer_text(&terminal);

    assert!(text.contains("API Settings"));
    assert!(text.contains("[Disabled]"));
    assert!(text.contains("(not set)"));
}

#[test]
fn settings_masks_stored_api_keys() {
    let mut app = create_test_app();
    app.settings
        .api_keys
        .insert(ModelId::ChatGpt, "secret".to_string());
    app.handle_key(ctrl_key('s'));

    let terminal = render_app_to_terminal(&mut app, 100, 30).unwrap();
    let text = buffer_text(&terminal);

    assert!(!text.contains("secret"));
    assert!(text.contains("••••••"));
}

#[test]
fn auth_screen_renders_the_sign_in_card() {
    let mut app = create_test_app();
    app.sign_out();

    let terminal = render_app_to_terminal(&mut app, 100, 30).unwrap();
    let text = buffer_text(&terminal);

    assert!(text.contains("Multi-AI Platform"));
    assert!(text.contains("Email"));
    assert!(text.contains("Password"));
    assert!(text.contains("Sign In"));
}

#[test]
fn closed_sidebar_hides_the_thread_list() {
    let mut app = create_test_app();
    app.handle_key(ctrl_key('b'));

    let terminal = render_app_to_terminal(&mut app, 100, 30).unwrap();
    let text = buffer_text(&terminal);

    assert!(!text.contains("Threads"));
}

#[test]
fn rendering_survives_a_tiny_terminal() {
    let mut app = create_test_app();
    // Must not panic on a degenerate terminal size.
    let _ = render_app_to_terminal(&mut app, 24, 8).unwrap();
}
