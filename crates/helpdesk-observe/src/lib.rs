//! Logging and trace export setup for the helpdesk binary.

pub mod tracing_setup;
