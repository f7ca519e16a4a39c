// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the demo.

use crate::toast::{Appearance, Side};
use crate::ui::{subscription, toast};

/// Messages consumed by `App::update`.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Shows a toast with the given appearance, counting down when `true`.
    Show(Appearance, bool),
    Toast(toast::Message),
    Toasts(subscription::Message),
    SetPlacement(Side),
    ClearAll,
    ExportDiagnostics,
}

/// Runtime flags parsed from the command line.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Overrides the configured placement.
    pub placement: Option<Side>,
    /// Overrides the configured auto-dismiss timeout.
    pub timeout_ms: Option<u64>,
    /// Config directory override (for settings.toml).
    /// Takes precedence over `ICED_TOASTS_CONFIG_DIR`.
    pub config_dir: Option<String>,
}
