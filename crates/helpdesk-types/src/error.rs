use thiserror::Error;

/// Rejections produced when validating inbound chat payloads.
///
/// The display text is returned to the client verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Required")]
    MissingMessage,

    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("Message too long")]
    MessageTooLong,

    #[error("Session ID is required")]
    MissingSessionId,
}

/// Errors from repository operations (used by trait definitions in helpdesk-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors surfaced by the conversation service.
///
/// Completion failures never appear here; the reply generator absorbs them.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}
