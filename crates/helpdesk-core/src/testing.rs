//! In-memory doubles shared by the unit tests in this crate.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use helpdesk_types::chat::{ChatMessage, Conversation};
use helpdesk_types::error::RepositoryError;
use helpdesk_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, StopReason, Usage,
};
use uuid::Uuid;

use crate::chat::repository::ChatRepository;
use crate::llm::provider::LlmProvider;

#[derive(Clone)]
pub enum MockOutcome {
    Text(String),
    /// Echo the last user turn back, prefixed with "echo: ".
    Echo,
    Quota,
    Unavailable,
}

/// Provider that records every request and answers with a fixed outcome.
#[derive(Clone)]
pub struct MockProvider {
    outcome: MockOutcome,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockProvider {
    pub fn new(outcome: MockOutcome) -> Self {
        Self {
            outcome,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());

        let content = match &self.outcome {
            MockOutcome::Text(text) => text.clone(),
            MockOutcome::Echo => {
                let last = request.messages.last().map(|m| m.content.as_str());
                format!("echo: {}", last.unwrap_or_default())
            }
            MockOutcome::Quota => {
                return Err(LlmError::QuotaExceeded("insufficient_quota".into()));
            }
            MockOutcome::Unavailable => {
                return Err(LlmError::Provider {
                    message: "connection refused".into(),
                });
            }
        };

        Ok(CompletionResponse {
            id: "resp-mock".to_string(),
            content,
            model: request.model.clone(),
            stop_reason: StopReason::EndTurn,
            usage: Usage::default(),
        })
    }
}

/// Vec-backed repository. Messages are kept in insertion order.
#[derive(Default)]
pub struct InMemoryChatRepository {
    conversations: Mutex<Vec<Conversation>>,
    messages: Mutex<Vec<ChatMessage>>,
    /// When set, `save_message` fails once this many messages are stored.
    pub fail_after_messages: Option<usize>,
    /// When set, the next `get_conversation` reports a miss even if the row
    /// exists, as if another writer inserted it right after the lookup.
    miss_next_lookup: AtomicBool,
}

impl InMemoryChatRepository {
    pub fn failing_after(messages: usize) -> Self {
        Self {
            fail_after_messages: Some(messages),
            ..Default::default()
        }
    }

    /// Store `conversation` now and hide it from the next lookup.
    pub fn with_racing_insert(conversation: Conversation) -> Self {
        let repo = Self::default();
        repo.conversations.lock().unwrap().push(conversation);
        repo.miss_next_lookup.store(true, Ordering::SeqCst);
        repo
    }

    pub fn conversation_count(&self) -> usize {
        self.conversations.lock().unwrap().len()
    }

    pub fn all_messages(&self) -> Vec<ChatMessage> {
        self.messages.lock().unwrap().clone()
    }
}

impl ChatRepository for InMemoryChatRepository {
    async fn create_conversation(
        &self,
        conversation: &Conversation,
    ) -> Result<Conversation, RepositoryError> {
        let mut conversations = self.conversations.lock().unwrap();
        if conversations.iter().any(|c| c.id == conversation.id) {
            return Err(RepositoryError::Conflict(conversation.id.to_string()));
        }
        conversations.push(conversation.clone());
        Ok(conversation.clone())
    }

    async fn get_conversation(
        &self,
        conversation_id: &Uuid,
    ) -> Result<Option<Conversation>, RepositoryError> {
        if self.miss_next_lookup.swap(false, Ordering::SeqCst) {
            return Ok(None);
        }
        let conversations = self.conversations.lock().unwrap();
        Ok(conversations.iter().find(|c| c.id == *conversation_id).cloned())
    }

    async fn save_message(&self, message: &ChatMessage) -> Result<(), RepositoryError> {
        let exists = self
            .conversations
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.id == message.conversation_id);
        if !exists {
            return Err(RepositoryError::Query("FOREIGN KEY constraint failed".into()));
        }

        let mut messages = self.messages.lock().unwrap();
        if self.fail_after_messages.is_some_and(|n| messages.len() >= n) {
            return Err(RepositoryError::Connection);
        }
        messages.push(message.clone());
        Ok(())
    }

    async fn get_recent_messages(
        &self,
        conversation_id: &Uuid,
        limit: u32,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let messages = self.messages.lock().unwrap();
        Ok(messages
            .iter()
            .rev()
            .filter(|m| m.conversation_id == *conversation_id)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn get_messages(
        &self,
        conversation_id: &Uuid,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let messages = self.messages.lock().unwrap();
        Ok(messages
            .iter()
            .filter(|m| m.conversation_id == *conversation_id)
            .cloned()
            .collect())
    }
}
