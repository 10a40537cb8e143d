//! Business logic and repository trait definitions for the helpdesk.
//!
//! This crate defines the "ports" (repository and completion provider
//! traits) that the infrastructure layer implements, plus the conversation
//! service and reply generator built on top of them. It depends only on
//! `helpdesk-types` -- never on `helpdesk-infra` or any database/IO crate.

pub mod chat;
pub mod llm;

#[cfg(test)]
pub(crate) mod testing;
