// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector for aggregating and storing diagnostic events.
//!
//! The orchestrator logs through a [`DiagnosticsHandle`]; the host drains
//! the channel with [`DiagnosticsCollector::process_pending`], typically on
//! each update.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender};

use super::{
    BufferCapacity, CircularBuffer, DiagnosticEvent, DiagnosticEventKind, DiagnosticReport,
    ReportMetadata, SerializableEvent,
};
use crate::error::{Error, Result};
use crate::toast::LifecycleEvent;

/// Handle for sending diagnostic events to the collector.
///
/// Cheap to clone. Sending never blocks: events are dropped when the
/// channel is full or the collector is gone.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    pub fn log_lifecycle(&self, event: LifecycleEvent) {
        self.send(DiagnosticEventKind::Lifecycle { event });
    }

    pub fn log_warning(&self, message: impl Into<String>) {
        self.send(DiagnosticEventKind::Warning {
            message: message.into(),
        });
    }

    pub fn log_error(&self, message: impl Into<String>) {
        self.send(DiagnosticEventKind::Error {
            message: message.into(),
        });
    }

    fn send(&self, kind: DiagnosticEventKind) {
        let _ = self.event_tx.try_send(DiagnosticEvent::new(kind));
    }
}

/// Central collector storing diagnostic events in a circular buffer.
pub struct DiagnosticsCollector {
    buffer: CircularBuffer<DiagnosticEvent>,
    event_rx: Receiver<DiagnosticEvent>,
    /// Kept to create handles.
    event_tx: Sender<DiagnosticEvent>,
    collection_started_at: Instant,
    collection_started_at_utc: DateTime<Utc>,
}

const DEFAULT_CHANNEL_CAPACITY: usize = 100;

impl DiagnosticsCollector {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        let (event_tx, event_rx) = bounded(DEFAULT_CHANNEL_CAPACITY);

        Self {
            buffer: CircularBuffer::new(capacity),
            event_rx,
            event_tx,
            collection_started_at: Instant::now(),
            collection_started_at_utc: Utc::now(),
        }
    }

    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Moves every pending event from the channel into the buffer.
    pub fn process_pending(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.buffer.push(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Buffered events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Builds a report from the buffered events.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Duration in ms fits comfortably in u64
    pub fn report(&self) -> DiagnosticReport {
        let collection_duration_ms = self.collection_started_at.elapsed().as_millis() as u64;

        let events: Vec<SerializableEvent> = self
            .buffer
            .iter()
            .map(|event| {
                SerializableEvent::new(
                    event.timestamp,
                    self.collection_started_at,
                    event.kind.clone(),
                )
            })
            .collect();

        let metadata = ReportMetadata::new(
            self.collection_started_at_utc,
            collection_duration_ms,
            events.len(),
        );

        DiagnosticReport::new(metadata, events)
    }

    /// Exports the buffered events as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.report())
    }

    /// Writes the JSON report to `path`, through a temporary file renamed
    /// into place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if serialization or any file operation fails.
    pub fn export_to_file(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();
        let json = self
            .export_json()
            .map_err(|err| Error::Io(err.to_string()))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        write_atomic(path, &json)?;
        Ok(path.to_path_buf())
    }
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}

fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, content)?;

    if let Err(err) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toast::{RemovalReason, ToastId};
    use tempfile::tempdir;

    fn collector() -> DiagnosticsCollector {
        DiagnosticsCollector::new(BufferCapacity::default())
    }

    #[test]
    fn handle_events_arrive_after_process_pending() {
        let mut collector = collector();
        let handle = collector.handle();

        handle.log_warning("first");
        handle.log_error("second");
        assert!(collector.is_empty());

        collector.process_pending();
        let kinds: Vec<_> = collector.iter().map(|event| event.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                DiagnosticEventKind::Warning {
                    message: "first".into()
                },
                DiagnosticEventKind::Error {
                    message: "second".into()
                },
            ]
        );
    }

    #[test]
    fn full_channel_drops_instead_of_blocking() {
        let mut collector = collector();
        let handle = collector.handle();
        for i in 0..(DEFAULT_CHANNEL_CAPACITY + 20) {
            handle.log_warning(format!("w{i}"));
        }

        collector.process_pending();
        assert_eq!(collector.len(), DEFAULT_CHANNEL_CAPACITY);
    }

    #[test]
    fn handle_outliving_collector_does_not_panic() {
        let handle = collector().handle();
        handle.log_error("nobody listening");
    }

    #[test]
    fn buffer_keeps_most_recent_events() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::new(0));
        let handle = collector.handle();
        let capacity = collector.capacity();

        for i in 0..capacity + 5 {
            handle.log_warning(format!("w{i}"));
            collector.process_pending();
        }

        assert_eq!(collector.len(), capacity);
        let first = collector.iter().next().map(|event| event.kind.clone());
        assert_eq!(
            first,
            Some(DiagnosticEventKind::Warning {
                message: "w5".into()
            })
        );
    }

    #[test]
    fn export_json_contains_metadata_events_and_summary() {
        let mut collector = collector();
        let handle = collector.handle();
        handle.log_lifecycle(LifecycleEvent::Removed {
            id: ToastId::from("t1"),
            reason: RemovalReason::Expired,
        });
        collector.process_pending();

        let json = collector.export_json().expect("export");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

        assert_eq!(value["metadata"]["event_count"], 1);
        assert!(value["metadata"]["collection_started_at"].is_string());
        assert_eq!(value["events"][0]["type"], "lifecycle");
        assert_eq!(value["events"][0]["event"]["reason"], "expired");
        assert!(value["events"][0]["timestamp_ms"].is_u64());
        assert_eq!(value["summary"]["event_counts"]["removed"], 1);
    }

    #[test]
    fn export_to_file_writes_report() {
        let mut collector = collector();
        collector.handle().log_warning("saved");
        collector.process_pending();

        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("reports").join("diagnostics.json");
        let written = collector.export_to_file(&path).expect("export");

        assert_eq!(written, path);
        let content = fs::read_to_string(&path).expect("read back");
        assert!(content.contains("\"saved\""));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn clear_empties_buffer() {
        let mut collector = collector();
        collector.handle().log_warning("w");
        collector.process_pending();
        collector.clear();
        assert!(collector.is_empty());
    }
}
