//! Model responders.
//!
//! A responder turns (model, prompt) into a reply string. The trait is the
//! seam where real provider integrations would plug in; each provider
//! becomes an alternative implementation with its own transport, retry and
//! timeout policy. The bundled [`MockResponder`] simulates a provider call
//! with a randomized delay and a canned per-model template. It never fails
//! and always resolves within its delay bound.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use rand::Rng;

use crate::core::ModelId;

/// Lower bound of the simulated provider latency, inclusive.
const MOCK_DELAY_MIN_MS: u64 = 1000;

/// Upper bound of the simulated provider latency, exclusive.
const MOCK_DELAY_MAX_MS: u64 = 3000;

/// Produces a reply for a prompt on behalf of one model.
#[async_trait]
pub trait ModelResponder: Send + Sync {
    /// Produces the reply for `prompt` as `model`.
    ///
    /// # Errors
    ///
    /// Implementations may fail; a failed call contributes no message to
    /// the batch it belongs to.
    async fn respond(&self, model: ModelId, prompt: &str) -> Result<String>;
}

/// Renders the canned reply template for a model.
///
/// The template embeds the model's display name and the verbatim prompt,
/// so tests (and users) can tell replies apart deterministically.
#[must_use]
pub fn render_reply(model: ModelId, prompt: &str) -> String {
    let name = model.name();
    match model {
        ModelId::ChatGpt => format!(
            "{name}: I understand you said \"{prompt}\". This is a simulated response from the {name} model. In a real implementation, this would connect to OpenAI's API."
        ),
        ModelId::Claude => format!(
            "{name}: Thank you for your message \"{prompt}\". This is a mock response from {name}. The actual implementation would use Anthropic's API."
        ),
        ModelId::Gemini => format!(
            "{name}: I received \"{prompt}\". This is a simulated {name} response. Real integration would use Google's Gemini API."
        ),
        ModelId::DeepSeek => format!(
            "{name}: Processing \"{prompt}\". This is a mock {name} response. Actual implementation would connect to DeepSeek's API."
        ),
        ModelId::Grok => format!(
            "{name}: Got it! \"{prompt}\" - This is a simulated {name} response. Real version would use xAI's Grok API."
        ),
    }
}

/// Stand-in for real provider calls: waits a random 1-3 seconds, then
/// resolves with the canned template.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockResponder;

#[async_trait]
impl ModelResponder for MockResponder {
    async fn respond(&self, model: ModelId, prompt: &str) -> Result<String> {
        // Draw the delay before the first await; ThreadRng is not Send.
        let delay_ms = rand::thread_rng().gen_range(MOCK_DELAY_MIN_MS..MOCK_DELAY_MAX_MS);
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        Ok(render_reply(model, prompt))
    }
}
