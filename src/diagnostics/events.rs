// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types.

use crate::toast::LifecycleEvent;
use serde::Serialize;
use std::time::Instant;

/// A diagnostic event with timestamp.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock for duration calculations)
    pub timestamp: Instant,
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates an event stamped with the current time.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }

    #[must_use]
    pub fn with_timestamp(kind: DiagnosticEventKind, timestamp: Instant) -> Self {
        Self { timestamp, kind }
    }
}

/// The type and associated data for a diagnostic event.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// A toast changed state.
    Lifecycle { event: LifecycleEvent },

    /// Non-critical issue, e.g. a rejected id or an overflowing stack.
    Warning { message: String },

    /// A callback failed or an error toast was shown.
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toast::{RemovalReason, ToastId};

    #[test]
    fn with_timestamp_uses_provided_timestamp() {
        let timestamp = Instant::now();
        let event = DiagnosticEvent::with_timestamp(
            DiagnosticEventKind::Warning {
                message: "w".into(),
            },
            timestamp,
        );
        assert_eq!(event.timestamp, timestamp);
    }

    #[test]
    fn warning_serializes_with_type_tag() {
        let warning = DiagnosticEventKind::Warning {
            message: "test warning".to_string(),
        };

        let json = serde_json::to_string(&warning).expect("serialization should succeed");
        assert!(json.contains("\"type\":\"warning\""));
        assert!(json.contains("\"message\":\"test warning\""));
    }

    #[test]
    fn lifecycle_serializes_nested_event() {
        let kind = DiagnosticEventKind::Lifecycle {
            event: LifecycleEvent::Removed {
                id: ToastId::from("abc123"),
                reason: RemovalReason::Keyboard,
            },
        };

        let json = serde_json::to_value(&kind).expect("serialization should succeed");
        assert_eq!(json["type"], "lifecycle");
        assert_eq!(json["event"]["event"], "removed");
        assert_eq!(json["event"]["id"], "abc123");
        assert_eq!(json["event"]["reason"], "keyboard");
    }
}
