//! Fan-out dispatch of one prompt to many responders.
//!
//! One send operation resolves a recipient set, invokes the responder for
//! every recipient concurrently, and waits for every outcome before the
//! replies are merged back into the thread. The join never short-circuits:
//! a failed or panicked responder task contributes no reply and cancels
//! nothing. Replies are collected in recipient-enumeration order, not
//! completion order, which is what makes batches deterministic.

use std::sync::Arc;

use crate::core::{ChatMode, ModelId, ModelResponder};

/// Resolves the recipient set for one send operation.
///
/// `configured` is the set of models that are both enabled and keyed, in
/// registry order. In multi mode an empty configured set falls back to the
/// full registry — a send never targets nobody, it shows every model's
/// mock answer instead. Single mode targets exactly the selected model.
#[must_use]
pub fn recipients(mode: ChatMode, selected: ModelId, configured: &[ModelId]) -> Vec<ModelId> {
    match mode {
        ChatMode::Multi if configured.is_empty() => ModelId::all().to_vec(),
        ChatMode::Multi => configured.to_vec(),
        ChatMode::Single => vec![selected],
    }
}

/// Invokes the responder concurrently for every recipient and waits for
/// all outcomes.
///
/// Every recipient gets its own spawned task; all tasks are in flight
/// before the first one is awaited. Handles are then joined in recipient
/// order so the returned replies follow the enumeration order of
/// `models`. Failed responder calls (and panicked tasks) are simply
/// absent from the result.
pub async fn fan_out(
    responder: Arc<dyn ModelResponder>,
    models: &[ModelId],
    prompt: &str,
) -> Vec<(ModelId, String)> {
    let mut handles = Vec::with_capacity(models.len());
    for model in models {
        let responder = Arc::clone(&responder);
        let prompt = prompt.to_string();
        let model = *model;
        handles.push((
            model,
            tokio::spawn(async move { responder.respond(model, &prompt).await }),
        ));
    }

    let mut replies = Vec::with_capacity(handles.len());
    for (model, handle) in handles {
        match handle.await {
            Ok(Ok(content)) => replies.push((model, content)),
            // A rejected responder (or a panicked task) is isolated to its
            // own slot: no message for that model, batch continues.
            Ok(Err(_)) | Err(_) => {}
        }
    }
    replies
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use anyhow::{Result, bail};
    use async_trait::async_trait;

    use super::*;

    /// Test responder with per-model delays and scripted failures.
    #[derive(Default)]
    struct ScriptedResponder {
        delays_ms: HashMap<ModelId, u64>,
        failing: Vec<ModelId>,
    }

    #[async_trait]
    impl ModelResponder for ScriptedResponder {
        async fn respond(&self, model: ModelId, prompt: &str) -> Result<String> {
            if let Some(delay) = self.delays_ms.get(&model) {
                tokio::time::sleep(Duration::from_millis(*delay)).await;
            }
            if self.failing.contains(&model) {
                bail!("scripted failure for {}", model.id());
            }
            Ok(format!("{}:{prompt}", model.id()))
        }
    }

    fn tagged(replies: &[(ModelId, String)]) -> Vec<ModelId> {
        replies.iter().map(|(model, _)| *model).collect()
    }

    #[test]
    fn multi_mode_with_configured_models_uses_them() {
        let configured = vec![ModelId::Claude, ModelId::Gemini];
        let set = recipients(ChatMode::Multi, ModelId::ChatGpt, &configured);
        assert_eq!(set, configured);
    }

    #[test]
    fn multi_mode_without_configured_models_falls_back_to_full_registry() {
        let set = recipients(ChatMode::Multi, ModelId::ChatGpt, &[]);
        assert_eq!(set, ModelId::all().to_vec());
    }

    #[test]
    fn single_mode_targets_exactly_the_selected_model() {
        let configured = vec![ModelId::Claude, ModelId::Gemini];
        let set = recipients(ChatMode::Single, ModelId::Grok, &configured);
        assert_eq!(set, vec![ModelId::Grok]);
    }

    #[tokio::test]
    async fn fan_out_replies_one_per_recipient() {
        let responder = Arc::new(ScriptedResponder::default());
        let replies = fan_out(responder, ModelId::all(), "hello").await;
        assert_eq!(replies.len(), 5);
        assert_eq!(tagged(&replies), ModelId::all().to_vec());
        assert_eq!(replies[0].1, "chatgpt:hello");
    }

    #[tokio::test]
    async fn fan_out_preserves_enumeration_order_over_completion_order() {
        // Gemini resolves well before Claude; the merged order must still
        // be the recipient enumeration order.
        let responder = Arc::new(ScriptedResponder {
            delays_ms: HashMap::from([(ModelId::Claude, 60), (ModelId::Gemini, 5)]),
            failing: Vec::new(),
        });
        let replies = fan_out(responder, &[ModelId::Claude, ModelId::Gemini], "race").await;
        assert_eq!(tagged(&replies), vec![ModelId::Claude, ModelId::Gemini]);
    }

    #[tokio::test]
    async fn fan_out_isolates_failures_to_their_own_slot() {
        let responder = Arc::new(ScriptedResponder {
            delays_ms: HashMap::new(),
            failing: vec![ModelId::Gemini],
        });
        let replies = fan_out(
            responder,
            &[ModelId::Claude, ModelId::Gemini, ModelId::Grok],
            "hi",
        )
        .await;
        assert_eq!(tagged(&replies), vec![ModelId::Claude, ModelId::Grok]);
    }

    #[tokio::test]
    async fn fan_out_with_no_recipients_settles_empty() {
        let responder = Arc::new(ScriptedResponder::default());
        let replies = fan_out(responder, &[], "void").await;
        assert!(replies.is_empty());
    }
}
