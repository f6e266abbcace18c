//! # Session Store
//!
//! Key-value session state scoped by an opaque session id. Handlers receive
//! the store explicitly; there is no ambient per-request session global.
//!
//! Entries expire after a fixed idle TTL; any read or write of a live
//! session refreshes its clock, matching the usual web session lifecycle.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};

/// Session-scoped key-value storage.
pub trait SessionStore: Send + Sync {
    fn get_string(&self, session_id: &str, key: &str) -> Option<String>;
    fn set_string(&self, session_id: &str, key: &str, value: &str);
    fn get_int(&self, session_id: &str, key: &str) -> Option<i64>;
    fn set_int(&self, session_id: &str, key: &str, value: i64);
}

#[derive(Debug, Clone, PartialEq)]
enum SessionValue {
    Str(String),
    Int(i64),
}

#[derive(Debug)]
struct SessionEntry {
    values: HashMap<String, SessionValue>,
    expires_at: DateTime<Utc>,
}

/// In-memory session store with idle expiry.
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, SessionEntry>>,
    ttl: Duration,
}

impl MemorySessionStore {
    /// Default idle TTL for a session
    pub fn default_ttl() -> Duration {
        Duration::minutes(30)
    }

    pub fn new() -> Self {
        Self::with_ttl(Self::default_ttl())
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    fn get_value(&self, session_id: &str, key: &str) -> Option<SessionValue> {
        let mut sessions = self.sessions.write().ok()?;

        let expired = sessions
            .get(session_id)
            .is_some_and(|entry| entry.expires_at < Utc::now());
        if expired {
            sessions.remove(session_id);
            return None;
        }

        let entry = sessions.get_mut(session_id)?;
        entry.expires_at = Utc::now() + self.ttl;
        entry.values.get(key).cloned()
    }

    fn set_value(&self, session_id: &str, key: &str, value: SessionValue) {
        let Ok(mut sessions) = self.sessions.write() else {
            return;
        };

        let now = Utc::now();
        let entry = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| SessionEntry {
                values: HashMap::new(),
                expires_at: now + self.ttl,
            });

        // An expired entry that was never cleaned up starts over.
        if entry.expires_at < now {
            entry.values.clear();
        }
        entry.expires_at = now + self.ttl;
        entry.values.insert(key.to_string(), value);
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for MemorySessionStore {
    fn get_string(&self, session_id: &str, key: &str) -> Option<String> {
        match self.get_value(session_id, key)? {
            SessionValue::Str(s) => Some(s),
            SessionValue::Int(_) => None,
        }
    }

    fn set_string(&self, session_id: &str, key: &str, value: &str) {
        self.set_value(session_id, key, SessionValue::Str(value.to_string()));
    }

    fn get_int(&self, session_id: &str, key: &str) -> Option<i64> {
        match self.get_value(session_id, key)? {
            SessionValue::Int(n) => Some(n),
            SessionValue::Str(_) => None,
        }
    }

    fn set_int(&self, session_id: &str, key: &str, value: i64) {
        self.set_value(session_id, key, SessionValue::Int(value));
    }
}
