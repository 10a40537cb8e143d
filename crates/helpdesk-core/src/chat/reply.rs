//! Reply generation over a completion provider.
//!
//! Wraps a single completion call with the store-policy system prompt and
//! turns every provider failure into a fixed fallback text. Nothing past this
//! boundary ever sees an `LlmError`.

use helpdesk_types::config::ReplySettings;
use helpdesk_types::llm::{CompletionRequest, Message};
use tracing::{debug, warn};

use crate::llm::box_provider::BoxLlmProvider;

/// Returned when the provider answered with no text.
pub const EMPTY_COMPLETION_REPLY: &str = "I couldn't generate a response.";

/// Returned when the provider reports a quota or billing failure.
pub const QUOTA_FALLBACK_REPLY: &str =
    "I am currently out of service due to quota limits. Please try again later.";

/// Returned for every other provider failure.
pub const GENERIC_FALLBACK_REPLY: &str =
    "I'm having trouble connecting to my brain right now. Please try again.";

/// Text produced for one user turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// True when `text` is a fallback rather than model output.
    pub degraded: bool,
}

impl Reply {
    fn fallback(text: &str) -> Self {
        Self {
            text: text.to_string(),
            degraded: true,
        }
    }
}

/// Builds completion requests and absorbs provider failures.
pub struct ReplyGenerator {
    provider: BoxLlmProvider,
    settings: ReplySettings,
}

impl ReplyGenerator {
    pub fn new(provider: BoxLlmProvider, settings: ReplySettings) -> Self {
        Self { provider, settings }
    }

    pub fn settings(&self) -> &ReplySettings {
        &self.settings
    }

    /// Build the request: history turns in order, then the new user message.
    pub fn build_request(&self, history: &[Message], user_message: &str) -> CompletionRequest {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.extend_from_slice(history);
        messages.push(Message::user(user_message));

        CompletionRequest {
            model: self.settings.model.clone(),
            messages,
            system: Some(self.settings.system_prompt.clone()),
            max_tokens: self.settings.max_tokens,
            temperature: Some(self.settings.temperature),
        }
    }

    /// Generate a reply. Never fails.
    pub async fn generate(&self, history: &[Message], user_message: &str) -> Reply {
        let request = self.build_request(history, user_message);

        match self.provider.complete(&request).await {
            Ok(response) => {
                debug!(
                    provider = self.provider.name(),
                    response_id = %response.id,
                    model = %response.model,
                    stop_reason = %response.stop_reason,
                    input_tokens = response.usage.input_tokens,
                    output_tokens = response.usage.output_tokens,
                    "completion received"
                );
                if response.content.is_empty() {
                    Reply::fallback(EMPTY_COMPLETION_REPLY)
                } else {
                    Reply {
                        text: response.content,
                        degraded: false,
                    }
                }
            }
            Err(e) if e.is_quota() => {
                warn!(provider = self.provider.name(), error = %e, "completion quota exhausted");
                Reply::fallback(QUOTA_FALLBACK_REPLY)
            }
            Err(e) => {
                warn!(provider = self.provider.name(), error = %e, "completion failed");
                Reply::fallback(GENERIC_FALLBACK_REPLY)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockOutcome, MockProvider};
    use helpdesk_types::llm::MessageRole;

    fn generator(outcome: MockOutcome) -> (ReplyGenerator, MockProvider) {
        let provider = MockProvider::new(outcome);
        let generator = ReplyGenerator::new(
            BoxLlmProvider::new(provider.clone()),
            ReplySettings::default(),
        );
        (generator, provider)
    }

    #[test]
    fn test_build_request_appends_user_message() {
        let (generator, _) = generator(MockOutcome::Text("ok".into()));
        let history = vec![Message::user("Hi"), Message::assistant("Hello!")];

        let request = generator.build_request(&history, "Do you ship to Canada?");

        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.max_tokens, 300);
        assert_eq!(request.temperature, Some(0.7));
        assert!(request.system.as_deref().unwrap().contains("Spur Mart"));
        assert_eq!(request.messages.len(), 3);
        assert_eq!(request.messages[0], Message::user("Hi"));
        assert_eq!(request.messages[1].role, MessageRole::Assistant);
        assert_eq!(request.messages[2], Message::user("Do you ship to Canada?"));
    }

    #[tokio::test]
    async fn test_generate_returns_model_text() {
        let (generator, provider) = generator(MockOutcome::Text("We ship worldwide.".into()));

        let reply = generator.generate(&[], "Shipping?").await;

        assert_eq!(reply.text, "We ship worldwide.");
        assert!(!reply.degraded);
        assert_eq!(provider.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_generate_empty_completion() {
        let (generator, _) = generator(MockOutcome::Text(String::new()));
        let reply = generator.generate(&[], "Hello").await;
        assert_eq!(reply.text, EMPTY_COMPLETION_REPLY);
        assert!(reply.degraded);
    }

    #[tokio::test]
    async fn test_generate_quota_fallback() {
        let (generator, _) = generator(MockOutcome::Quota);
        let reply = generator.generate(&[], "Hello").await;
        assert_eq!(reply.text, QUOTA_FALLBACK_REPLY);
        assert!(reply.degraded);
    }

    #[tokio::test]
    async fn test_generate_generic_fallback() {
        let (generator, _) = generator(MockOutcome::Unavailable);
        let reply = generator.generate(&[], "Hello").await;
        assert_eq!(reply.text, GENERIC_FALLBACK_REPLY);
        assert!(reply.degraded);
    }
}
