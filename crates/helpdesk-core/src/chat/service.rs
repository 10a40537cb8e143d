//! Conversation service.
//!
//! Orchestrates one turn: resolve (or create) the conversation, store the
//! user message, replay recent context to the reply generator, store the
//! reply. The steps are separate writes with no enclosing transaction, so a
//! failure after the user message is stored leaves that message without a
//! reply.

use helpdesk_types::chat::{ChatMessage, ChatReply, Conversation, HistoryEntry, Sender};
use helpdesk_types::error::{ChatError, RepositoryError};
use helpdesk_types::llm::Message;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::reply::ReplyGenerator;
use super::repository::ChatRepository;

/// Service handling message processing and history retrieval.
///
/// Generic over the repository so tests can run against an in-memory store.
pub struct ChatService<R: ChatRepository> {
    repo: R,
    replies: ReplyGenerator,
}

impl<R: ChatRepository> ChatService<R> {
    pub fn new(repo: R, replies: ReplyGenerator) -> Self {
        Self { repo, replies }
    }

    /// Process one user message and return the reply plus the session id.
    ///
    /// Without a session id a new conversation is started. With one that
    /// does not exist yet, a conversation is created under that id.
    #[instrument(skip(self, message), fields(message_chars = message.chars().count()))]
    pub async fn process_message(
        &self,
        message: &str,
        session_id: Option<&str>,
    ) -> Result<ChatReply, ChatError> {
        let conversation_id = self.resolve_conversation(session_id).await?;

        self.repo
            .save_message(&ChatMessage::new(conversation_id, Sender::User, message))
            .await?;
        debug!(%conversation_id, "user message stored");

        let history = self.recent_context(&conversation_id).await?;
        let reply = self.replies.generate(&history, message).await;

        self.repo
            .save_message(&ChatMessage::new(conversation_id, Sender::Ai, reply.text.as_str()))
            .await?;
        debug!(%conversation_id, degraded = reply.degraded, "reply stored");

        Ok(ChatReply {
            reply: reply.text,
            session_id: conversation_id.to_string(),
        })
    }

    /// All messages of a session in chronological order.
    ///
    /// Unknown sessions yield an empty list.
    #[instrument(skip(self))]
    pub async fn get_conversation_history(
        &self,
        session_id: &str,
    ) -> Result<Vec<HistoryEntry>, ChatError> {
        let conversation_id = parse_conversation_id(session_id)?;
        let messages = self.repo.get_messages(&conversation_id).await?;
        Ok(messages.into_iter().map(HistoryEntry::from).collect())
    }

    async fn resolve_conversation(&self, session_id: Option<&str>) -> Result<Uuid, ChatError> {
        let Some(raw) = session_id else {
            let conversation = self.repo.create_conversation(&Conversation::new()).await?;
            info!(conversation_id = %conversation.id, "conversation started");
            return Ok(conversation.id);
        };

        // Supplied ids are trusted as primary keys; a malformed one fails
        // here as a storage error, not as a validation error.
        let id = parse_conversation_id(raw)?;
        if self.repo.get_conversation(&id).await?.is_some() {
            return Ok(id);
        }

        match self.repo.create_conversation(&Conversation::with_id(id)).await {
            Ok(conversation) => {
                info!(conversation_id = %conversation.id, "conversation started with supplied id");
                Ok(conversation.id)
            }
            // A concurrent request created it between the lookup and the insert.
            Err(RepositoryError::Conflict(_)) => Ok(id),
            Err(e) => Err(e.into()),
        }
    }

    /// The most recent messages, fetched newest first and returned oldest first.
    async fn recent_context(&self, conversation_id: &Uuid) -> Result<Vec<Message>, ChatError> {
        let limit = self.replies.settings().history_limit;
        let mut recent = self.repo.get_recent_messages(conversation_id, limit).await?;
        recent.reverse();

        Ok(recent
            .into_iter()
            .map(|m| Message {
                role: m.sender.role(),
                content: m.text,
            })
            .collect())
    }
}

fn parse_conversation_id(raw: &str) -> Result<Uuid, RepositoryError> {
    Uuid::parse_str(raw)
        .map_err(|e| RepositoryError::Query(format!("invalid conversation id '{raw}': {e}")))
}
