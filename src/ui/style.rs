// SPDX-License-Identifier: MPL-2.0
//! Process-wide registry of named keyframe animations.
//!
//! The countdown bar of auto-dismissing toasts shrinks along the
//! `autoDismiss` keyframes. They are registered the first time any toast
//! needs them and never again, however many toasts or providers exist.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, Once, OnceLock};

/// Name of the countdown animation.
pub const COUNTDOWN: &str = "autoDismiss";

/// The countdown bar goes from full width to nothing.
pub const COUNTDOWN_KEYFRAMES: Keyframes = Keyframes {
    name: COUNTDOWN,
    from: 1.0,
    to: 0.0,
};

/// Linear two-stop animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframes {
    pub name: &'static str,
    pub from: f32,
    pub to: f32,
}

impl Keyframes {
    /// Value at `progress` (clamped to `0.0..=1.0`).
    #[must_use]
    pub fn sample(&self, progress: f32) -> f32 {
        let progress = progress.clamp(0.0, 1.0);
        self.from + (self.to - self.from) * progress
    }
}

#[derive(Debug, Default)]
pub struct StyleRegistry {
    keyframes: Mutex<HashMap<&'static str, Keyframes>>,
    registrations: AtomicUsize,
}

impl StyleRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry shared by the whole process.
    pub fn global() -> &'static StyleRegistry {
        static GLOBAL: OnceLock<StyleRegistry> = OnceLock::new();
        GLOBAL.get_or_init(StyleRegistry::new)
    }

    /// Adds `keyframes` unless the name is taken. Returns `true` if inserted.
    pub fn register(&self, keyframes: Keyframes) -> bool {
        let mut map = self.lock();
        if map.contains_key(keyframes.name) {
            return false;
        }
        map.insert(keyframes.name, keyframes);
        self.registrations.fetch_add(1, Ordering::Relaxed);
        true
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Keyframes> {
        self.lock().get(name).copied()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.lock().contains_key(name)
    }

    /// Number of successful registrations since creation.
    #[must_use]
    pub fn registrations(&self) -> usize {
        self.registrations.load(Ordering::Relaxed)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<&'static str, Keyframes>> {
        // The map holds plain values; a poisoned lock still has a usable map.
        self.keyframes
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Registers the countdown keyframes in the global registry, once per process.
pub fn ensure_countdown_keyframes() {
    static REGISTER: Once = Once::new();
    REGISTER.call_once(|| {
        StyleRegistry::global().register(COUNTDOWN_KEYFRAMES);
    });
}

/// Countdown keyframes as registered, falling back to the built-in ones.
#[must_use]
pub fn countdown_keyframes() -> Keyframes {
    StyleRegistry::global()
        .get(COUNTDOWN)
        .unwrap_or(COUNTDOWN_KEYFRAMES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn register_rejects_second_entry_with_same_name() {
        let registry = StyleRegistry::new();
        assert!(registry.register(COUNTDOWN_KEYFRAMES));
        assert!(!registry.register(Keyframes {
            name: COUNTDOWN,
            from: 0.0,
            to: 1.0,
        }));
        assert_eq!(registry.registrations(), 1);
        assert_eq!(registry.get(COUNTDOWN), Some(COUNTDOWN_KEYFRAMES));
    }

    #[test]
    fn ensure_is_idempotent() {
        for _ in 0..10 {
            ensure_countdown_keyframes();
        }
        let registry = StyleRegistry::global();
        assert!(registry.contains(COUNTDOWN));
        assert_eq!(registry.registrations(), 1);
        assert_eq!(countdown_keyframes(), COUNTDOWN_KEYFRAMES);
    }

    #[test]
    fn sample_interpolates_and_clamps() {
        assert_abs_diff_eq!(COUNTDOWN_KEYFRAMES.sample(0.0), 1.0);
        assert_abs_diff_eq!(COUNTDOWN_KEYFRAMES.sample(0.25), 0.75);
        assert_abs_diff_eq!(COUNTDOWN_KEYFRAMES.sample(2.0), 0.0);
    }
}
