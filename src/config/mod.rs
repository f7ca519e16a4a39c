// SPDX-License-Identifier: MPL-2.0
//! This module handles process-wide toast settings, loaded from and saved to
//! a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[toasts]` - Placement, auto-dismiss defaults and resume policy
//! - `[diagnostics]` - Diagnostic event buffer size
//!
//! # Path Resolution
//!
//! 1. Explicit override passed to the `_with_override()` functions
//! 2. `ICED_TOASTS_CONFIG_DIR` environment variable
//! 3. Platform-specific config directory (`dirs`) plus `IcedToasts/`
//!
//! # Examples
//!
//! ```no_run
//! use iced_toasts::config;
//! use iced_toasts::toast::Side;
//!
//! let (mut config, _warning) = config::load();
//! config.toasts.placement = Some(Side::Top);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use crate::toast::{ResumePolicy, Side, ToastSettings};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// Application name used for directory naming.
const APP_NAME: &str = "IcedToasts";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "ICED_TOASTS_CONFIG_DIR";

// =============================================================================
// Section Structs
// =============================================================================

/// Toast behaviour shared by every toast that does not override it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToastsConfig {
    /// Side of the anchor the stack grows from.
    #[serde(default = "default_placement", skip_serializing_if = "Option::is_none")]
    pub placement: Option<Side>,

    /// Whether new toasts count down unless told otherwise.
    #[serde(default = "default_auto_dismiss", skip_serializing_if = "Option::is_none")]
    pub auto_dismiss: Option<bool>,

    /// Countdown length in milliseconds.
    #[serde(
        default = "default_auto_dismiss_timeout_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub auto_dismiss_timeout_ms: Option<u64>,

    /// What resuming after hover or focus schedules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_policy: Option<ResumePolicy>,

    /// Spacing between the anchor and the first toast, and between toasts.
    #[serde(default = "default_gap", skip_serializing_if = "Option::is_none")]
    pub gap: Option<f32>,
}

impl Default for ToastsConfig {
    fn default() -> Self {
        Self {
            placement: default_placement(),
            auto_dismiss: default_auto_dismiss(),
            auto_dismiss_timeout_ms: default_auto_dismiss_timeout_ms(),
            resume_policy: Some(ResumePolicy::default()),
            gap: default_gap(),
        }
    }
}

impl ToastsConfig {
    /// Resolves the section into settings, clamping out-of-range values.
    #[must_use]
    pub fn settings(&self) -> ToastSettings {
        let timeout_ms = self
            .auto_dismiss_timeout_ms
            .unwrap_or(DEFAULT_AUTO_DISMISS_TIMEOUT_MS)
            .clamp(MIN_AUTO_DISMISS_TIMEOUT_MS, MAX_AUTO_DISMISS_TIMEOUT_MS);
        let gap = self.gap.unwrap_or(DEFAULT_GAP);
        let gap = if gap.is_finite() {
            gap.clamp(MIN_GAP, MAX_GAP)
        } else {
            DEFAULT_GAP
        };

        ToastSettings {
            placement: self.placement.unwrap_or_default(),
            auto_dismiss: self.auto_dismiss.unwrap_or(DEFAULT_AUTO_DISMISS),
            auto_dismiss_timeout: Duration::from_millis(timeout_ms),
            resume_policy: self.resume_policy.unwrap_or_default(),
            gap,
        }
    }
}

impl From<&ToastsConfig> for ToastSettings {
    fn from(config: &ToastsConfig) -> Self {
        config.settings()
    }
}

/// Diagnostics settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticsConfig {
    /// Number of events kept in memory.
    #[serde(
        default = "default_buffer_capacity",
        skip_serializing_if = "Option::is_none"
    )]
    pub buffer_capacity: Option<usize>,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: default_buffer_capacity(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub toasts: ToastsConfig,

    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_placement() -> Option<Side> {
    DEFAULT_PLACEMENT.parse().ok()
}

fn default_auto_dismiss() -> Option<bool> {
    Some(DEFAULT_AUTO_DISMISS)
}

fn default_auto_dismiss_timeout_ms() -> Option<u64> {
    Some(DEFAULT_AUTO_DISMISS_TIMEOUT_MS)
}

fn default_gap() -> Option<f32> {
    Some(DEFAULT_GAP)
}

fn default_buffer_capacity() -> Option<usize> {
    Some(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config directory.
///
/// `override_path` wins, then `ICED_TOASTS_CONFIG_DIR` (if non-empty), then
/// the platform config directory with the app name appended.
pub fn config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// the default config with a warning explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    return (
                        Config::default(),
                        Some(format!("{} ({})", err, path.display())),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
