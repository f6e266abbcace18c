//! # Structured JSON Logger
//!
//! One log line = one event, emitted synchronously with no buffering.
//! Key ordering is deterministic so log output is stable across runs.

use std::fmt;
use std::io::{self, Write};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Normal operations
    Info,
    /// Recoverable issues
    Warn,
    /// Operation failures
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured logger emitting one JSON object per event.
pub struct Logger;

impl Logger {
    /// Log an event with the given severity and fields.
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        let line = Self::render(severity, event, fields);
        let _ = match severity {
            Severity::Info | Severity::Warn => writeln!(io::stdout(), "{}", line),
            Severity::Error => writeln!(io::stderr(), "{}", line),
        };
    }

    /// Render an event as a single JSON line.
    ///
    /// `serde_json::Map` keeps keys in sorted order, which gives the
    /// deterministic field ordering for free.
    fn render(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let mut map = serde_json::Map::new();
        map.insert("event".to_string(), event.into());
        map.insert("severity".to_string(), severity.as_str().into());
        for (key, value) in fields {
            map.insert((*key).to_string(), (*value).into());
        }
        serde_json::Value::Object(map).to_string()
    }

    /// Log at INFO level
    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Info, event, fields);
    }

    /// Log at WARN level
    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Warn, event, fields);
    }

    /// Log at ERROR level
    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Error, event, fields);
    }
}
