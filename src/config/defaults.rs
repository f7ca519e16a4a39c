// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for toast configuration.
//!
//! # Categories
//!
//! - **Auto-dismiss**: countdown length and whether new toasts count down
//! - **Placement**: side of the anchor and spacing between toasts
//! - **Diagnostics**: event buffer bounds

// ==========================================================================
// Auto-dismiss Defaults
// ==========================================================================

/// Whether toasts count down when the caller does not say.
pub const DEFAULT_AUTO_DISMISS: bool = false;

/// Default countdown before an auto-dismissing toast is removed (in milliseconds).
pub const DEFAULT_AUTO_DISMISS_TIMEOUT_MS: u64 = 3000;

/// Minimum countdown (in milliseconds). Zero expires on the next tick.
pub const MIN_AUTO_DISMISS_TIMEOUT_MS: u64 = 0;

/// Maximum countdown (in milliseconds).
pub const MAX_AUTO_DISMISS_TIMEOUT_MS: u64 = 600_000;

// ==========================================================================
// Placement Defaults
// ==========================================================================

/// Default side of the anchor the stack grows from.
pub const DEFAULT_PLACEMENT: &str = "bottom";

/// Default spacing between the anchor and the first toast, and between toasts (in pixels).
pub const DEFAULT_GAP: f32 = 16.0;

/// Minimum gap (in pixels).
pub const MIN_GAP: f32 = 0.0;

/// Maximum gap (in pixels).
pub const MAX_GAP: f32 = 128.0;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events kept in memory.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 1000;

/// Minimum diagnostic buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 16;

/// Maximum diagnostic buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10_000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Timeout validation
    assert!(MAX_AUTO_DISMISS_TIMEOUT_MS > MIN_AUTO_DISMISS_TIMEOUT_MS);
    assert!(DEFAULT_AUTO_DISMISS_TIMEOUT_MS >= MIN_AUTO_DISMISS_TIMEOUT_MS);
    assert!(DEFAULT_AUTO_DISMISS_TIMEOUT_MS <= MAX_AUTO_DISMISS_TIMEOUT_MS);

    // Gap validation
    assert!(MIN_GAP >= 0.0);
    assert!(MAX_GAP > MIN_GAP);
    assert!(DEFAULT_GAP >= MIN_GAP);
    assert!(DEFAULT_GAP <= MAX_GAP);

    // Diagnostics validation
    assert!(MIN_DIAGNOSTICS_BUFFER_CAPACITY > 0);
    assert!(MAX_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);
};
