//! Infrastructure layer for the helpdesk.
//!
//! Concrete implementations of the ports defined in `helpdesk-core`: the
//! SQLite conversation store, the OpenAI completion provider, and the
//! config file loader.

pub mod config;
pub mod llm;
pub mod sqlite;
