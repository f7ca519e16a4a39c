// SPDX-License-Identifier: MPL-2.0
//! Diagnostic report structures for JSON export.

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::DiagnosticEventKind;

/// Metadata about a diagnostic report.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReportMetadata {
    /// When the report was generated (RFC 3339)
    pub generated_at: String,
    pub crate_version: String,
    /// When diagnostic collection started (RFC 3339)
    pub collection_started_at: String,
    pub collection_duration_ms: u64,
    pub event_count: usize,
}

impl ReportMetadata {
    #[must_use]
    pub fn new(
        collection_started_at: DateTime<Utc>,
        collection_duration_ms: u64,
        event_count: usize,
    ) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            crate_version: env!("CARGO_PKG_VERSION").to_string(),
            collection_started_at: collection_started_at.to_rfc3339(),
            collection_duration_ms,
            event_count,
        }
    }
}

/// An event with its timestamp made relative to the start of collection.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SerializableEvent {
    pub timestamp_ms: u64,
    #[serde(flatten)]
    pub kind: DiagnosticEventKind,
}

impl SerializableEvent {
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Duration in ms fits comfortably in u64
    pub fn new(
        event_timestamp: Instant,
        collection_start: Instant,
        kind: DiagnosticEventKind,
    ) -> Self {
        let timestamp_ms = event_timestamp
            .saturating_duration_since(collection_start)
            .as_millis() as u64;
        Self { timestamp_ms, kind }
    }
}

/// Event counts keyed by event type.
///
/// Lifecycle events are keyed by their lifecycle name (`created`,
/// `removed`...) rather than lumped together.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ReportSummary {
    pub event_counts: BTreeMap<String, usize>,
}

impl ReportSummary {
    #[must_use]
    pub fn from_events(events: &[SerializableEvent]) -> Self {
        let mut counts = BTreeMap::new();
        for event in events {
            let key = match &event.kind {
                DiagnosticEventKind::Lifecycle { event } => event.name(),
                DiagnosticEventKind::Warning { .. } => "warning",
                DiagnosticEventKind::Error { .. } => "error",
            };
            *counts.entry(key.to_string()).or_insert(0) += 1;
        }
        Self {
            event_counts: counts,
        }
    }
}

/// A complete diagnostic report ready for JSON export.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DiagnosticReport {
    pub metadata: ReportMetadata,
    pub events: Vec<SerializableEvent>,
    pub summary: ReportSummary,
}

impl DiagnosticReport {
    #[must_use]
    pub fn new(metadata: ReportMetadata, events: Vec<SerializableEvent>) -> Self {
        let summary = ReportSummary::from_events(&events);
        Self {
            metadata,
            events,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toast::{LifecycleEvent, ToastId};
    use std::time::Duration;

    #[test]
    fn serializable_event_uses_relative_timestamp() {
        let start = Instant::now();
        let later = start + Duration::from_millis(250);
        let event = SerializableEvent::new(
            later,
            start,
            DiagnosticEventKind::Error {
                message: "e".into(),
            },
        );
        assert_eq!(event.timestamp_ms, 250);
    }

    #[test]
    fn event_before_collection_start_clamps_to_zero() {
        let start = Instant::now() + Duration::from_secs(1);
        let event = SerializableEvent::new(
            Instant::now(),
            start,
            DiagnosticEventKind::Warning {
                message: "w".into(),
            },
        );
        assert_eq!(event.timestamp_ms, 0);
    }

    #[test]
    fn summary_counts_lifecycle_events_by_name() {
        let id = ToastId::from("a");
        let start = Instant::now();
        let events: Vec<_> = [
            DiagnosticEventKind::Lifecycle {
                event: LifecycleEvent::Created { id: id.clone() },
            },
            DiagnosticEventKind::Lifecycle {
                event: LifecycleEvent::Created { id: id.clone() },
            },
            DiagnosticEventKind::Lifecycle {
                event: LifecycleEvent::TimerPaused { id },
            },
            DiagnosticEventKind::Warning {
                message: "w".into(),
            },
        ]
        .into_iter()
        .map(|kind| SerializableEvent::new(start, start, kind))
        .collect();

        let summary = ReportSummary::from_events(&events);
        assert_eq!(summary.event_counts.get("created"), Some(&2));
        assert_eq!(summary.event_counts.get("timer_paused"), Some(&1));
        assert_eq!(summary.event_counts.get("warning"), Some(&1));
        assert_eq!(summary.event_counts.get("error"), None);
    }
}
