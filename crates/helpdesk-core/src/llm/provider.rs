//! LlmProvider trait definition.
//!
//! This is the abstraction the reply generator calls; concrete providers live
//! in helpdesk-infra.

use helpdesk_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for hosted completion backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
