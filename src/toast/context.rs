// SPDX-License-Identifier: MPL-2.0
//! Explicit handle passing for the toast orchestrator.
//!
//! The application owns one [`ToastProvider`]; anything that needs to raise
//! or dismiss toasts receives a [`ToastHandle`]. A handle does not keep the
//! provider alive: once the provider is dropped, every call reports
//! [`Error::NoContext`] instead of acting on stale state.

use super::orchestrator::Toasts;
use super::record::{ToastId, ToastOptions, ToastUpdate};
use crate::error::{Error, Result};
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Notify;

/// Owner of the shared orchestrator.
pub struct ToastProvider<T> {
    inner: Rc<RefCell<Toasts<T>>>,
}

impl<T> ToastProvider<T> {
    #[must_use]
    pub fn new(toasts: Toasts<T>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(toasts)),
        }
    }

    #[must_use]
    pub fn handle(&self) -> ToastHandle<T> {
        ToastHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Borrows the orchestrator for reading, e.g. from a view function.
    ///
    /// # Panics
    ///
    /// Panics if a mutable borrow is active.
    #[must_use]
    pub fn borrow(&self) -> Ref<'_, Toasts<T>> {
        self.inner.borrow()
    }

    /// # Panics
    ///
    /// Panics if any other borrow is active.
    #[must_use]
    pub fn borrow_mut(&self) -> RefMut<'_, Toasts<T>> {
        self.inner.borrow_mut()
    }
}

impl<T> Default for ToastProvider<T> {
    fn default() -> Self {
        Self::new(Toasts::default())
    }
}

impl<T> fmt::Debug for ToastProvider<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastProvider")
            .field("handles", &Rc::weak_count(&self.inner))
            .finish()
    }
}

/// Non-owning access to a provider's orchestrator.
pub struct ToastHandle<T> {
    inner: Weak<RefCell<Toasts<T>>>,
}

impl<T> Clone for ToastHandle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for ToastHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastHandle")
            .field("attached", &self.is_attached())
            .finish()
    }
}

impl<T> ToastHandle<T> {
    /// A handle that was never attached to a provider.
    #[must_use]
    pub fn detached() -> Self {
        Self { inner: Weak::new() }
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Runs `f` against the orchestrator.
    ///
    /// # Errors
    ///
    /// - [`Error::NoContext`] if the provider is gone.
    /// - [`Error::Reentrant`] if the orchestrator is already borrowed, e.g.
    ///   when called from inside an `on_dismiss` callback.
    pub fn with<R>(&self, f: impl FnOnce(&mut Toasts<T>) -> R) -> Result<R> {
        let inner = self.inner.upgrade().ok_or(Error::NoContext)?;
        let mut toasts = inner.try_borrow_mut().map_err(|_| Error::Reentrant)?;
        Ok(f(&mut toasts))
    }

    /// # Errors
    ///
    /// See [`Toasts::add_toast`] and [`ToastHandle::with`].
    pub fn add_toast(&self, content: T, options: ToastOptions) -> Result<ToastId> {
        self.with(|toasts| toasts.add_toast(content, options))?
    }

    /// # Errors
    ///
    /// See [`ToastHandle::with`]. An absent id is `Ok(false)`.
    pub fn remove_toast(&self, id: &ToastId) -> Result<bool> {
        self.with(|toasts| toasts.remove_toast(id))
    }

    /// # Errors
    ///
    /// See [`Toasts::update_toast`] and [`ToastHandle::with`].
    pub fn update_toast(&self, id: &ToastId, update: ToastUpdate<T>) -> Result<()> {
        self.with(|toasts| toasts.update_toast(id, update))?
    }

    /// # Errors
    ///
    /// See [`ToastHandle::with`].
    pub fn tick_now(&self) -> Result<Vec<ToastId>> {
        self.with(Toasts::tick_now)
    }

    /// # Errors
    ///
    /// See [`ToastHandle::with`].
    pub fn next_deadline(&self) -> Result<Option<Instant>> {
        self.with(|toasts| toasts.next_deadline())
    }

    pub(crate) fn wake_handle(&self) -> Result<Arc<Notify>> {
        self.with(|toasts| toasts.wake_handle())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toast::timer::ManualClock;
    use crate::toast::ToastSettings;
    use std::cell::Cell;
    use std::time::Duration;

    fn provider() -> (ToastProvider<String>, ManualClock) {
        let clock = ManualClock::new();
        let toasts = Toasts::with_clock(ToastSettings::default(), clock.clone());
        (ToastProvider::new(toasts), clock)
    }

    #[test]
    fn handle_reaches_provider() {
        let (provider, _clock) = provider();
        let handle = provider.handle();

        let id = handle
            .add_toast("Saved".into(), ToastOptions::new())
            .expect("add");
        assert_eq!(provider.borrow().len(), 1);
        assert_eq!(handle.remove_toast(&id), Ok(true));
        assert_eq!(handle.remove_toast(&id), Ok(false));
    }

    #[test]
    fn detached_handle_reports_no_context() {
        let handle: ToastHandle<String> = ToastHandle::detached();
        assert!(!handle.is_attached());
        assert_eq!(
            handle.add_toast("x".into(), ToastOptions::new()),
            Err(Error::NoContext)
        );
    }

    #[test]
    fn handle_outliving_provider_reports_no_context() {
        let (provider, _clock) = provider();
        let handle = provider.handle();
        drop(provider);

        assert_eq!(handle.remove_toast(&ToastId::from("a")), Err(Error::NoContext));
        assert_eq!(handle.next_deadline(), Err(Error::NoContext));
    }

    #[test]
    fn handle_used_from_callback_is_reentrant() {
        let (provider, clock) = provider();
        let handle = provider.handle();
        let inner = handle.clone();
        let outcome: Rc<Cell<Option<Result<ToastId>>>> = Rc::default();
        let sink = Rc::clone(&outcome);

        let id = handle
            .add_toast(
                "x".into(),
                ToastOptions::new()
                    .auto_dismiss(true)
                    .auto_dismiss_timeout(Duration::from_millis(10))
                    .on_dismiss(move |_| {
                        sink.set(Some(inner.add_toast("again".into(), ToastOptions::new())));
                    }),
            )
            .expect("add");

        clock.advance(Duration::from_millis(10));
        assert_eq!(handle.tick_now(), Ok(vec![id]));
        assert_eq!(outcome.take(), Some(Err(Error::Reentrant)));
        assert!(provider.borrow().is_empty());
    }
}
