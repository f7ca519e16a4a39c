// SPDX-License-Identifier: MPL-2.0
//! Diagnostics for the toast lifecycle.
//!
//! Lifecycle transitions, warnings and callback failures are sent through a
//! [`DiagnosticsHandle`] and kept in a memory-bounded circular buffer that can
//! be exported as a JSON report.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Generic ring buffer with configurable capacity
//! - [`DiagnosticEvent`]: A timestamped [`DiagnosticEventKind`]
//! - [`DiagnosticsCollector`]: Owns the buffer and drains the event channel

mod buffer;
mod collector;
mod events;
mod report;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{DiagnosticEvent, DiagnosticEventKind};
pub use report::{DiagnosticReport, ReportMetadata, ReportSummary, SerializableEvent};
