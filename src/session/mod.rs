//! # Session State
//!
//! Opaque-id scoped key-value storage for the session demo endpoints.

pub mod store;

pub use store::{MemorySessionStore, SessionStore};
