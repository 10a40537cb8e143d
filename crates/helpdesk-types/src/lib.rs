//! Shared domain types for the helpdesk chat backend.
//!
//! Conversations, messages, HTTP payloads and their validation, completion
//! request/response shapes, configuration, and the error types shared by the
//! other crates.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
