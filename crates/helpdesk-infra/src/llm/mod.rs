//! Completion provider implementations.
//!
//! [`create_provider`] builds the boxed provider the reply generator runs on.

pub mod openai;

use secrecy::SecretString;
use tracing::{debug, warn};

use helpdesk_core::llm::box_provider::BoxLlmProvider;

use self::openai::OpenAiProvider;

/// Build the completion provider for an OpenAI-compatible endpoint.
///
/// A missing key is not an error here: the provider is still returned and
/// every completion degrades to a fallback reply.
pub fn create_provider(api_key: Option<SecretString>, base_url: &str) -> BoxLlmProvider {
    if api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; replies will use the fallback text");
    }
    debug!(base_url, "completion provider configured");
    BoxLlmProvider::new(OpenAiProvider::new(api_key, base_url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider_with_key() {
        let provider = create_provider(Some(SecretString::from("sk-test".to_string())), openai::DEFAULT_BASE_URL);
        assert_eq!(provider.name(), "openai");
    }

    #[test]
    fn test_create_provider_without_key() {
        let provider = create_provider(None, "http://127.0.0.1:9/v1");
        assert_eq!(provider.name(), "openai");
    }
}
