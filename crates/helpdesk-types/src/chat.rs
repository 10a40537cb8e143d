//! Conversation, message, and HTTP payload types for the helpdesk.
//!
//! A conversation is an append-only thread of user and AI messages keyed by
//! an opaque session id. The inbound payload validation lives here as well so
//! the HTTP layer and the CLI reject the same inputs with the same messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::llm::MessageRole;

/// Maximum length of a user message, in UTF-16 code units.
pub const MAX_MESSAGE_CHARS: usize = 1000;

/// Who authored a stored message.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (sender IN ('user', 'ai'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

impl Sender {
    /// Role used when this message is replayed as model context.
    pub fn role(&self) -> MessageRole {
        match self {
            Sender::User => MessageRole::User,
            Sender::Ai => MessageRole::Assistant,
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Ai => write!(f, "ai"),
        }
    }
}

impl FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Sender::User),
            "ai" => Ok(Sender::Ai),
            other => Err(format!("invalid sender: '{other}'")),
        }
    }
}

/// A chat session. Created on the first message and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    /// A new conversation with a server-generated, time-sortable id.
    pub fn new() -> Self {
        Self::with_id(Uuid::now_v7())
    }

    /// A new conversation reusing a caller-supplied id.
    pub fn with_id(id: Uuid) -> Self {
        Self {
            id,
            created_at: Utc::now(),
        }
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

/// A single immutable message within a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub sender: Sender,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(conversation_id: Uuid, sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            conversation_id,
            sender,
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}

/// Body of `POST /chat/message`.
///
/// A missing or null `message` is reported as [`ValidationError::MissingMessage`]
/// rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// A send request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedMessage {
    pub message: String,
    /// `None` for absent, null, or empty-string session ids.
    pub session_id: Option<String>,
}

impl SendMessageRequest {
    /// Check the payload, returning the first violated rule.
    pub fn validate(self) -> Result<ValidatedMessage, ValidationError> {
        let message = self.message.ok_or(ValidationError::MissingMessage)?;
        let len = message.encode_utf16().count();
        if len == 0 {
            return Err(ValidationError::EmptyMessage);
        }
        if len > MAX_MESSAGE_CHARS {
            return Err(ValidationError::MessageTooLong);
        }

        Ok(ValidatedMessage {
            message,
            session_id: self.session_id.filter(|id| !id.is_empty()),
        })
    }
}

/// Validate the session id path parameter of the history endpoint.
pub fn validate_session_id(session_id: &str) -> Result<&str, ValidationError> {
    if session_id.is_empty() {
        return Err(ValidationError::MissingSessionId);
    }
    Ok(session_id)
}

/// Result of processing one user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub reply: String,
    pub session_id: String,
}

/// One row of `GET /chat/history/{sessionId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl From<ChatMessage> for HistoryEntry {
    fn from(message: ChatMessage) -> Self {
        Self {
            sender: message.sender,
            text: message.text,
            timestamp: message.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(message: &str, session_id: Option<&str>) -> SendMessageRequest {
        SendMessageRequest {
            message: Some(message.to_string()),
            session_id: session_id.map(str::to_string),
        }
    }

    #[test]
    fn test_sender_roundtrip() {
        for sender in [Sender::User, Sender::Ai] {
            let parsed: Sender = sender.to_string().parse().unwrap();
            assert_eq!(sender, parsed);
        }
        assert!("assistant".parse::<Sender>().is_err());
    }

    #[test]
    fn test_sender_role_mapping() {
        assert_eq!(Sender::User.role(), MessageRole::User);
        assert_eq!(Sender::Ai.role(), MessageRole::Assistant);
    }

    #[test]
    fn test_validate_accepts_boundary_lengths() {
        assert!(request("a", None).validate().is_ok());
        let max = "x".repeat(MAX_MESSAGE_CHARS);
        assert!(request(&max, None).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_message() {
        assert_eq!(
            request("", Some("abc")).validate(),
            Err(ValidationError::EmptyMessage)
        );
    }

    #[test]
    fn test_validate_rejects_long_message() {
        let long = "x".repeat(MAX_MESSAGE_CHARS + 1);
        assert_eq!(
            request(&long, None).validate(),
            Err(ValidationError::MessageTooLong)
        );
    }

    #[test]
    fn test_validate_counts_characters_not_bytes() {
        // 1000 two-byte characters is within the limit.
        let accented = "é".repeat(MAX_MESSAGE_CHARS);
        assert!(request(&accented, None).validate().is_ok());
    }

    #[test]
    fn test_validate_counts_astral_characters_as_two_units() {
        let at_limit = "😀".repeat(MAX_MESSAGE_CHARS / 2);
        assert!(request(&at_limit, None).validate().is_ok());

        let over = "😀".repeat(MAX_MESSAGE_CHARS / 2 + 1);
        assert_eq!(
            request(&over, None).validate(),
            Err(ValidationError::MessageTooLong)
        );
    }

    #[test]
    fn test_validate_treats_empty_session_id_as_absent() {
        let validated = request("hi", Some("")).validate().unwrap();
        assert_eq!(validated.session_id, None);

        let validated = request("hi", Some("s-1")).validate().unwrap();
        assert_eq!(validated.session_id.as_deref(), Some("s-1"));
    }

    #[test]
    fn test_send_request_deserialize() {
        let req: SendMessageRequest =
            serde_json::from_str(r#"{"message":"hi","sessionId":null}"#).unwrap();
        assert_eq!(req.message.as_deref(), Some("hi"));
        assert!(req.session_id.is_none());

        let req: SendMessageRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(req.validate(), Err(ValidationError::MissingMessage));

        let req: SendMessageRequest = serde_json::from_str(r#"{"message":null}"#).unwrap();
        assert_eq!(req.validate(), Err(ValidationError::MissingMessage));

        let req: SendMessageRequest = serde_json::from_str(r#"{"message":""}"#).unwrap();
        assert_eq!(req.validate(), Err(ValidationError::EmptyMessage));
    }

    #[test]
    fn test_validate_session_id() {
        assert_eq!(validate_session_id(""), Err(ValidationError::MissingSessionId));
        assert_eq!(validate_session_id("abc"), Ok("abc"));
    }

    #[test]
    fn test_chat_reply_serializes_camel_case() {
        let reply = ChatReply {
            reply: "Hello".to_string(),
            session_id: "s-1".to_string(),
        };
        let json = serde_json::to_string(&reply).unwrap();
        assert_eq!(json, r#"{"reply":"Hello","sessionId":"s-1"}"#);
    }

    #[test]
    fn test_history_entry_from_message() {
        let message = ChatMessage::new(Uuid::now_v7(), Sender::Ai, "Hi there");
        let created_at = message.created_at;
        let entry = HistoryEntry::from(message);
        assert_eq!(entry.sender, Sender::Ai);
        assert_eq!(entry.text, "Hi there");
        assert_eq!(entry.timestamp, created_at);

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["sender"], "ai");
        assert!(json["timestamp"].as_str().unwrap().contains('T'));
    }
}
