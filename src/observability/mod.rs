//! # Observability
//!
//! Structured JSON logging for registry and server events.

pub mod logger;

pub use logger::{Logger, Severity};
