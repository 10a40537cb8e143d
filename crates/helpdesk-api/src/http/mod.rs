//! HTTP layer: the chat endpoints plus liveness routes.

pub mod error;
pub mod handlers;
pub mod router;
