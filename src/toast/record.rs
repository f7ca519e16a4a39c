// SPDX-License-Identifier: MPL-2.0
//! Toast records and the options used to create or patch them.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::time::{Duration, Instant};

/// Identifier of an active toast.
///
/// Either supplied by the caller or produced by [`super::id::generate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToastId(String);

impl ToastId {
    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ToastId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ToastId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Borrow<str> for ToastId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Visual flavour of a toast. Only the renderer looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Appearance {
    Info,
    Success,
    Warning,
    Error,
    /// No semantic styling.
    #[default]
    #[serde(rename = "none")]
    Plain,
}

impl Appearance {
    /// All appearances, in the order the demo offers them.
    pub const ALL: [Appearance; 5] = [
        Appearance::Info,
        Appearance::Success,
        Appearance::Warning,
        Appearance::Error,
        Appearance::Plain,
    ];

    /// Short lowercase label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Appearance::Info => "info",
            Appearance::Success => "success",
            Appearance::Warning => "warning",
            Appearance::Error => "error",
            Appearance::Plain => "none",
        }
    }
}

/// Interaction holds that keep a toast's countdown suspended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Interaction {
    pub hovered: bool,
    pub focused: bool,
}

impl Interaction {
    /// Returns whether any hold is active.
    #[must_use]
    pub fn is_held(self) -> bool {
        self.hovered || self.focused
    }
}

/// Which interaction a hold refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Hold {
    Hover,
    Focus,
}

impl Interaction {
    pub(crate) fn set(&mut self, hold: Hold, active: bool) {
        match hold {
            Hold::Hover => self.hovered = active,
            Hold::Focus => self.focused = active,
        }
    }
}

/// Callback invoked exactly once when a toast leaves the store.
pub type DismissCallback = Box<dyn FnOnce(&ToastId)>;

/// An active notification.
#[derive(Debug, Clone)]
pub struct Toast<T> {
    id: ToastId,
    content: T,
    appearance: Appearance,
    auto_dismiss: bool,
    auto_dismiss_timeout: Duration,
    created_order: u64,
    created_at: Instant,
    pub(crate) interaction: Interaction,
}

impl<T> Toast<T> {
    #[must_use]
    pub fn id(&self) -> &ToastId {
        &self.id
    }

    #[must_use]
    pub fn content(&self) -> &T {
        &self.content
    }

    #[must_use]
    pub fn appearance(&self) -> Appearance {
        self.appearance
    }

    #[must_use]
    pub fn auto_dismiss(&self) -> bool {
        self.auto_dismiss
    }

    #[must_use]
    pub fn auto_dismiss_timeout(&self) -> Duration {
        self.auto_dismiss_timeout
    }

    /// Insertion sequence number; iteration order follows it.
    #[must_use]
    pub fn created_order(&self) -> u64 {
        self.created_order
    }

    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    #[must_use]
    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    /// Merges a patch into the record.
    pub(crate) fn apply(&mut self, update: ToastUpdate<T>) {
        if let Some(content) = update.content {
            self.content = content;
        }
        if let Some(appearance) = update.appearance {
            self.appearance = appearance;
        }
        if let Some(auto_dismiss) = update.auto_dismiss {
            self.auto_dismiss = auto_dismiss;
        }
        if let Some(timeout) = update.auto_dismiss_timeout {
            self.auto_dismiss_timeout = timeout;
        }
    }
}

/// A toast that has not been inserted yet.
///
/// The store turns a draft into a [`Toast`] by resolving its id and
/// stamping the insertion order.
#[derive(Debug, Clone)]
pub struct ToastDraft<T> {
    pub id: Option<ToastId>,
    pub content: T,
    pub appearance: Appearance,
    pub auto_dismiss: bool,
    pub auto_dismiss_timeout: Duration,
}

impl<T> ToastDraft<T> {
    pub(crate) fn into_toast(self, id: ToastId, created_order: u64, created_at: Instant) -> Toast<T> {
        Toast {
            id,
            content: self.content,
            appearance: self.appearance,
            auto_dismiss: self.auto_dismiss,
            auto_dismiss_timeout: self.auto_dismiss_timeout,
            created_order,
            created_at,
            interaction: Interaction::default(),
        }
    }
}

/// Per-toast options accepted by `add_toast`.
///
/// Anything left unset falls back to the process-wide settings.
#[derive(Default)]
pub struct ToastOptions {
    pub(crate) id: Option<ToastId>,
    pub(crate) appearance: Option<Appearance>,
    pub(crate) auto_dismiss: Option<bool>,
    pub(crate) auto_dismiss_timeout: Option<Duration>,
    pub(crate) on_dismiss: Option<DismissCallback>,
}

impl ToastOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a caller-chosen id instead of a generated one.
    #[must_use]
    pub fn id(mut self, id: impl Into<ToastId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = Some(appearance);
        self
    }

    #[must_use]
    pub fn auto_dismiss(mut self, auto_dismiss: bool) -> Self {
        self.auto_dismiss = Some(auto_dismiss);
        self
    }

    /// Overrides the configured countdown for this toast.
    #[must_use]
    pub fn auto_dismiss_timeout(mut self, timeout: Duration) -> Self {
        self.auto_dismiss_timeout = Some(timeout);
        self
    }

    /// Registers a callback run once, with the toast id, when the toast is removed.
    #[must_use]
    pub fn on_dismiss(mut self, callback: impl FnOnce(&ToastId) + 'static) -> Self {
        self.on_dismiss = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for ToastOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastOptions")
            .field("id", &self.id)
            .field("appearance", &self.appearance)
            .field("auto_dismiss", &self.auto_dismiss)
            .field("auto_dismiss_timeout", &self.auto_dismiss_timeout)
            .field("on_dismiss", &self.on_dismiss.is_some())
            .finish()
    }
}

/// Partial fields merged by `update_toast`.
#[derive(Debug, Clone)]
pub struct ToastUpdate<T> {
    pub(crate) content: Option<T>,
    pub(crate) appearance: Option<Appearance>,
    pub(crate) auto_dismiss: Option<bool>,
    pub(crate) auto_dismiss_timeout: Option<Duration>,
}

impl<T> Default for ToastUpdate<T> {
    fn default() -> Self {
        Self {
            content: None,
            appearance: None,
            auto_dismiss: None,
            auto_dismiss_timeout: None,
        }
    }
}

impl<T> ToastUpdate<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn content(mut self, content: T) -> Self {
        self.content = Some(content);
        self
    }

    #[must_use]
    pub fn appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = Some(appearance);
        self
    }

    #[must_use]
    pub fn auto_dismiss(mut self, auto_dismiss: bool) -> Self {
        self.auto_dismiss = Some(auto_dismiss);
        self
    }

    #[must_use]
    pub fn auto_dismiss_timeout(mut self, timeout: Duration) -> Self {
        self.auto_dismiss_timeout = Some(timeout);
        self
    }
}
