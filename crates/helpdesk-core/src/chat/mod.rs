//! Conversation handling for the helpdesk.
//!
//! - `repository`: the `ChatRepository` persistence port
//! - `reply`: completion call wrapper with fallback replies
//! - `service`: the `ChatService` that sequences a chat turn

pub mod reply;
pub mod repository;
pub mod service;
