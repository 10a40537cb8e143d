//! Configuration types for the helpdesk.
//!
//! `HelpdeskConfig` represents the optional `config.toml` that tunes reply
//! generation. Every field has a default so an empty or missing file yields a
//! working configuration.

use serde::{Deserialize, Serialize};

/// Store-policy persona sent as the system instruction on every completion.
pub const STORE_SYSTEM_PROMPT: &str = r#"You are a helpful support agent for "Spur Mart", an e-commerce store.

**Store Policies:**
*   **Shipping:** Worldwide shipping available. 5-9 business days for international, 2-4 days for domestic.
*   **Returns:** 30-day return policy for unused items. Refunds processed in 5-7 business days.
*   **Support:** Mon-Sat, 9AM - 6PM IST. Email: support@spurmart.com.

**Guidelines:**
*   Be concise, polite, and professional.
*   If unsure about a policy not listed here, say you are not sure and suggest contacting support.
*   Do not make up facts."#;

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HelpdeskConfig {
    #[serde(default)]
    pub reply: ReplySettings,
}

/// Parameters for every completion call made by the reply generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplySettings {
    #[serde(default = "default_model")]
    pub model: String,

    /// Upper bound on generated tokens.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// How many of the most recent messages are replayed as context.
    #[serde(default = "default_history_limit")]
    pub history_limit: u32,

    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_tokens() -> u32 {
    300
}

fn default_temperature() -> f64 {
    0.7
}

fn default_history_limit() -> u32 {
    10
}

fn default_system_prompt() -> String {
    STORE_SYSTEM_PROMPT.to_string()
}

impl Default for ReplySettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            history_limit: default_history_limit(),
            system_prompt: default_system_prompt(),
        }
    }
}
