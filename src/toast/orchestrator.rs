// SPDX-License-Identifier: MPL-2.0
//! Toast lifecycle orchestration.
//!
//! [`Toasts`] is the single entry point for creating, updating and removing
//! toasts. It owns the store, the timers and the current layout, and keeps
//! them consistent: every mutation runs to completion before render and
//! lifecycle listeners are called.
//!
//! Removal always follows the same path, whatever triggered it:
//!
//! 1. cancel the timer
//! 2. remove the record
//! 3. recompute the layout and notify renderers
//! 4. run `on_dismiss` once
//! 5. emit [`LifecycleEvent::Removed`]

use super::placement::{Layout, Placement, PlacementEngine, Side};
use super::record::{
    Appearance, DismissCallback, Hold, Toast, ToastDraft, ToastId, ToastOptions, ToastUpdate,
};
use super::store::{Store, StoreChange};
use super::timer::{Clock, ResumePolicy, SystemClock, TimerController, TimerState};
use crate::config::{
    DEFAULT_AUTO_DISMISS, DEFAULT_AUTO_DISMISS_TIMEOUT_MS, DEFAULT_GAP,
    MAX_AUTO_DISMISS_TIMEOUT_MS,
};
use crate::diagnostics::DiagnosticsHandle;
use crate::error::{Error, Result};
use crate::ui::style;
use iced::{Point, Rectangle, Size};
use serde::Serialize;
use std::any::Any;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Notify;

/// Lifecycle events kept for [`Toasts::drain_events`] before the oldest are dropped.
const MAX_PENDING_EVENTS: usize = 256;

/// Process-wide behaviour shared by every toast of one [`Toasts`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToastSettings {
    pub placement: Side,
    /// Applied to toasts created without an explicit `auto_dismiss`.
    pub auto_dismiss: bool,
    pub auto_dismiss_timeout: Duration,
    pub resume_policy: ResumePolicy,
    pub gap: f32,
}

impl Default for ToastSettings {
    fn default() -> Self {
        Self {
            placement: Side::default(),
            auto_dismiss: DEFAULT_AUTO_DISMISS,
            auto_dismiss_timeout: Duration::from_millis(DEFAULT_AUTO_DISMISS_TIMEOUT_MS),
            resume_policy: ResumePolicy::default(),
            gap: DEFAULT_GAP,
        }
    }
}

/// Why a toast left the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalReason {
    /// The countdown ran out.
    Expired,
    /// Click on the close control or an explicit `remove_toast`.
    Dismissed,
    /// Enter pressed while the toast had focus.
    Keyboard,
    /// Removed by [`Toasts::clear`].
    Cleared,
}

/// Observable lifecycle transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LifecycleEvent {
    Created { id: ToastId },
    Updated { id: ToastId },
    TimerPaused { id: ToastId },
    TimerResumed { id: ToastId },
    Removed { id: ToastId, reason: RemovalReason },
}

impl LifecycleEvent {
    #[must_use]
    pub fn id(&self) -> &ToastId {
        match self {
            LifecycleEvent::Created { id }
            | LifecycleEvent::Updated { id }
            | LifecycleEvent::TimerPaused { id }
            | LifecycleEvent::TimerResumed { id }
            | LifecycleEvent::Removed { id, .. } => id,
        }
    }

    /// Serialized tag of the event.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            LifecycleEvent::Created { .. } => "created",
            LifecycleEvent::Updated { .. } => "updated",
            LifecycleEvent::TimerPaused { .. } => "timer_paused",
            LifecycleEvent::TimerResumed { .. } => "timer_resumed",
            LifecycleEvent::Removed { .. } => "removed",
        }
    }
}

/// Keys the orchestrator reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKey {
    /// Removes the focused toast.
    Enter,
    /// Drops focus.
    Escape,
}

/// Countdown state of a rendered toast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    pub remaining: Duration,
    pub total: Duration,
    pub paused: bool,
}

impl Countdown {
    /// Fraction of the countdown still left, from 1.0 down to 0.0.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.total.is_zero() {
            return 0.0;
        }
        (self.remaining.as_secs_f32() / self.total.as_secs_f32()).clamp(0.0, 1.0)
    }
}

/// Everything a renderer needs to draw one toast.
#[derive(Debug, Clone, Copy)]
pub struct RenderedToast<'a, T> {
    pub id: &'a ToastId,
    pub content: &'a T,
    pub appearance: Appearance,
    pub auto_dismiss: bool,
    pub position: Point,
    pub size: Size,
    /// `false` while the toast waits for its size to be reported.
    pub measured: bool,
    pub focused: bool,
    pub countdown: Option<Countdown>,
}

type RenderListener<T> = Box<dyn for<'a> FnMut(&[RenderedToast<'a, T>])>;
type EventListener = Box<dyn FnMut(&LifecycleEvent)>;

/// Owns the active toasts and drives their lifecycle.
pub struct Toasts<T> {
    settings: ToastSettings,
    store: Store<T>,
    timers: TimerController,
    callbacks: HashMap<ToastId, DismissCallback>,
    extents: HashMap<ToastId, Size>,
    viewport: Rectangle,
    anchor: Rectangle,
    layout: Layout,
    focused: Option<ToastId>,
    events: VecDeque<LifecycleEvent>,
    render_listeners: Vec<RenderListener<T>>,
    event_listeners: Vec<EventListener>,
    diagnostics: Option<DiagnosticsHandle>,
    clock: Box<dyn Clock>,
    wake: Arc<Notify>,
}

impl<T> fmt::Debug for Toasts<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toasts")
            .field("settings", &self.settings)
            .field("active", &self.store.len())
            .field("timers", &self.timers)
            .field("focused", &self.focused)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl<T> Default for Toasts<T> {
    fn default() -> Self {
        Self::new(ToastSettings::default())
    }
}

impl<T> Drop for Toasts<T> {
    fn drop(&mut self) {
        // Lets a waiting driver notice the provider is gone.
        self.wake.notify_one();
    }
}

impl<T> Toasts<T> {
    #[must_use]
    pub fn new(settings: ToastSettings) -> Self {
        Self::with_clock(settings, SystemClock)
    }

    /// Creates an orchestrator reading time from `clock`.
    #[must_use]
    pub fn with_clock(settings: ToastSettings, clock: impl Clock + 'static) -> Self {
        Self {
            settings,
            store: Store::new(),
            timers: TimerController::new(settings.resume_policy),
            callbacks: HashMap::new(),
            extents: HashMap::new(),
            viewport: Rectangle::new(Point::ORIGIN, Size::ZERO),
            anchor: Rectangle::new(Point::ORIGIN, Size::ZERO),
            layout: Layout {
                side: settings.placement,
                ..Layout::default()
            },
            focused: None,
            events: VecDeque::new(),
            render_listeners: Vec::new(),
            event_listeners: Vec::new(),
            diagnostics: None,
            clock: Box::new(clock),
            wake: Arc::new(Notify::new()),
        }
    }

    /// Sets the diagnostics handle for lifecycle logging and callback failures.
    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    #[must_use]
    pub fn settings(&self) -> ToastSettings {
        self.settings
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Creates a toast and returns its id.
    ///
    /// Options left unset fall back to [`ToastSettings`].
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidOptions`] for an empty id or an out-of-range timeout.
    /// - [`Error::DuplicateId`] if the supplied id is already active.
    pub fn add_toast(&mut self, content: T, options: ToastOptions) -> Result<ToastId> {
        let ToastOptions {
            id,
            appearance,
            auto_dismiss,
            auto_dismiss_timeout,
            on_dismiss,
        } = options;

        if id.as_ref().is_some_and(|id| id.as_str().trim().is_empty()) {
            return Err(Error::InvalidOptions("id must not be empty".into()));
        }
        if let Some(timeout) = auto_dismiss_timeout {
            validate_timeout(timeout)?;
        }

        let auto_dismiss = auto_dismiss.unwrap_or(self.settings.auto_dismiss);
        let timeout = auto_dismiss_timeout.unwrap_or(self.settings.auto_dismiss_timeout);
        let appearance = appearance.unwrap_or_default();
        let draft = ToastDraft {
            id,
            content,
            appearance,
            auto_dismiss,
            auto_dismiss_timeout: timeout,
        };

        let now = self.clock.now();
        let id = match self.store.add(draft, now) {
            Ok(id) => id,
            Err(err) => {
                if let Some(handle) = &self.diagnostics {
                    handle.log_warning(err.to_string());
                }
                return Err(err);
            }
        };

        if let Some(callback) = on_dismiss {
            self.callbacks.insert(id.clone(), callback);
        }
        if auto_dismiss {
            style::ensure_countdown_keyframes();
            self.timers.start(id.clone(), timeout, now);
            self.wake.notify_one();
        }
        self.log_appearance(&id, appearance);

        self.sync(false);
        self.emit(LifecycleEvent::Created { id: id.clone() });
        Ok(id)
    }

    /// Removes a toast. Absent ids are a no-op and return `false`.
    pub fn remove_toast(&mut self, id: &ToastId) -> bool {
        self.remove_with(id, RemovalReason::Dismissed)
    }

    /// Merges `update` into an active toast, starting, cancelling or
    /// restarting its countdown as needed.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the id is not active.
    /// - [`Error::InvalidOptions`] for an out-of-range timeout.
    pub fn update_toast(&mut self, id: &ToastId, update: ToastUpdate<T>) -> Result<()> {
        if let Some(timeout) = update.auto_dismiss_timeout {
            validate_timeout(timeout)?;
        }
        let (was_auto, old_timeout) = self
            .store
            .get(id)
            .map(|toast| (toast.auto_dismiss(), toast.auto_dismiss_timeout()))
            .ok_or_else(|| Error::NotFound(id.clone()))?;

        self.store.update(id, update)?;

        let Some(toast) = self.store.get(id) else {
            return Err(Error::NotFound(id.clone()));
        };
        let is_auto = toast.auto_dismiss();
        let timeout = toast.auto_dismiss_timeout();
        let held = toast.interaction().is_held();

        let restart = match (was_auto, is_auto) {
            (false, true) => true,
            (true, true) => timeout != old_timeout,
            (true, false) => {
                self.timers.cancel(id);
                false
            }
            (false, false) => false,
        };
        // A held toast that only now gains a countdown starts paused; its
        // pause has not been announced yet.
        let mut announce_pause = false;
        if restart {
            style::ensure_countdown_keyframes();
            let now = self.clock.now();
            self.timers.start(id.clone(), timeout, now);
            if held {
                announce_pause = self.timers.pause(id, now) && !was_auto;
            } else {
                self.wake.notify_one();
            }
        }

        self.sync(false);
        self.emit(LifecycleEvent::Updated { id: id.clone() });
        if announce_pause {
            self.emit(LifecycleEvent::TimerPaused { id: id.clone() });
        }
        Ok(())
    }

    /// Removes every toast, running each `on_dismiss` in insertion order.
    pub fn clear(&mut self) -> usize {
        self.timers.clear();
        self.extents.clear();
        self.focused = None;
        let drained = self.store.clear();
        self.sync(false);

        for toast in &drained {
            let id = toast.id();
            if let Some(callback) = self.callbacks.remove(id) {
                self.run_guarded("on_dismiss", || callback(id));
            }
            self.emit(LifecycleEvent::Removed {
                id: id.clone(),
                reason: RemovalReason::Cleared,
            });
        }
        drained.len()
    }

    /// Expires every countdown due at `now` and returns the removed ids.
    pub fn tick(&mut self, now: Instant) -> Vec<ToastId> {
        self.timers
            .expire_due(now)
            .into_iter()
            .filter(|id| self.remove_with(id, RemovalReason::Expired))
            .collect()
    }

    /// [`Toasts::tick`] at the orchestrator's clock.
    pub fn tick_now(&mut self) -> Vec<ToastId> {
        let now = self.clock.now();
        self.tick(now)
    }

    // =========================================================================
    // Interaction
    // =========================================================================

    pub fn pointer_entered(&mut self, id: &ToastId) -> bool {
        self.set_hold(id, Hold::Hover, true)
    }

    pub fn pointer_left(&mut self, id: &ToastId) -> bool {
        self.set_hold(id, Hold::Hover, false)
    }

    /// Gives `id` keyboard focus, taking it from any other toast.
    pub fn focus(&mut self, id: &ToastId) -> bool {
        if self.focused.as_ref() == Some(id) || !self.store.contains(id) {
            return false;
        }
        if let Some(previous) = self.focused.take() {
            self.set_hold(&previous, Hold::Focus, false);
        }
        self.focused = Some(id.clone());
        self.set_hold(id, Hold::Focus, true);
        true
    }

    pub fn blur(&mut self, id: &ToastId) -> bool {
        if self.focused.as_ref() != Some(id) {
            return false;
        }
        self.focused = None;
        self.set_hold(id, Hold::Focus, false);
        true
    }

    #[must_use]
    pub fn focused(&self) -> Option<&ToastId> {
        self.focused.as_ref()
    }

    /// Handles a key press. Returns `true` if it changed anything.
    pub fn key_pressed(&mut self, key: ToastKey) -> bool {
        let Some(id) = self.focused.clone() else {
            return false;
        };
        match key {
            ToastKey::Enter => self.remove_with(&id, RemovalReason::Keyboard),
            ToastKey::Escape => self.blur(&id),
        }
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Records the rendered size of a toast and re-runs placement.
    pub fn report_extent(&mut self, id: &ToastId, size: Size) -> bool {
        if !self.store.contains(id) || self.extents.get(id) == Some(&size) {
            return false;
        }
        self.extents.insert(id.clone(), size);
        self.sync(true);
        true
    }

    pub fn set_viewport(&mut self, viewport: Rectangle) {
        if self.viewport != viewport {
            self.viewport = viewport;
            self.sync(true);
        }
    }

    #[must_use]
    pub fn viewport(&self) -> Rectangle {
        self.viewport
    }

    pub fn set_anchor(&mut self, anchor: Rectangle) {
        if self.anchor != anchor {
            self.anchor = anchor;
            self.sync(true);
        }
    }

    /// Changes the preferred side of the stack.
    pub fn set_placement(&mut self, side: Side) {
        if self.settings.placement != side {
            self.settings.placement = side;
            self.sync(true);
        }
    }

    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[must_use]
    pub fn placement(&self, id: &ToastId) -> Option<&Placement> {
        self.layout.get(id)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Render descriptors in insertion order, built from the store only.
    #[must_use]
    pub fn rendered(&self) -> Vec<RenderedToast<'_, T>> {
        let now = self.clock.now();
        self.store
            .list()
            .map(|toast| {
                let id = toast.id();
                let placement = self.layout.get(id);
                RenderedToast {
                    id,
                    content: toast.content(),
                    appearance: toast.appearance(),
                    auto_dismiss: toast.auto_dismiss(),
                    position: placement.map_or(Point::ORIGIN, |p| p.position),
                    size: placement.map_or(Size::ZERO, |p| p.size),
                    measured: placement.is_some_and(|p| p.measured),
                    focused: self.focused.as_ref() == Some(id),
                    countdown: self.countdown(id, now),
                }
            })
            .collect()
    }

    #[must_use]
    pub fn get(&self, id: &ToastId) -> Option<&Toast<T>> {
        self.store.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast<T>> {
        self.store.list()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    #[must_use]
    pub fn timer_state(&self, id: &ToastId) -> TimerState {
        self.timers.state(id)
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    #[must_use]
    pub fn has_running_timers(&self) -> bool {
        self.timers.has_running()
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    /// Registers a listener called with the full ordered descriptor list
    /// after every change.
    pub fn subscribe_render(&mut self, listener: impl for<'a> FnMut(&[RenderedToast<'a, T>]) + 'static) {
        self.render_listeners.push(Box::new(listener));
    }

    /// Registers a listener called with every lifecycle event.
    pub fn subscribe_events(&mut self, listener: impl FnMut(&LifecycleEvent) + 'static) {
        self.event_listeners.push(Box::new(listener));
    }

    /// Takes the lifecycle events recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<LifecycleEvent> {
        self.events.drain(..).collect()
    }

    pub(crate) fn wake_handle(&self) -> Arc<Notify> {
        Arc::clone(&self.wake)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn remove_with(&mut self, id: &ToastId, reason: RemovalReason) -> bool {
        self.timers.cancel(id);
        if self.store.remove(id).is_none() {
            return false;
        }
        if self.focused.as_ref() == Some(id) {
            self.focused = None;
        }
        let callback = self.callbacks.remove(id);
        self.sync(false);

        if let Some(callback) = callback {
            self.run_guarded("on_dismiss", || callback(id));
        }
        self.emit(LifecycleEvent::Removed {
            id: id.clone(),
            reason,
        });
        true
    }

    fn set_hold(&mut self, id: &ToastId, hold: Hold, active: bool) -> bool {
        let Some(toast) = self.store.get_mut(id) else {
            return false;
        };
        let was_held = toast.interaction.is_held();
        toast.interaction.set(hold, active);
        let is_held = toast.interaction.is_held();
        if !toast.auto_dismiss() || was_held == is_held {
            return false;
        }

        let now = self.clock.now();
        let event = if is_held {
            self.timers
                .pause(id, now)
                .then(|| LifecycleEvent::TimerPaused { id: id.clone() })
        } else {
            self.timers
                .resume(id, now)
                .then(|| LifecycleEvent::TimerResumed { id: id.clone() })
        };
        let Some(event) = event else {
            return false;
        };
        if !is_held {
            self.wake.notify_one();
        }
        self.emit(event);
        self.notify_render();
        true
    }

    fn countdown(&self, id: &ToastId, now: Instant) -> Option<Countdown> {
        let paused = match self.timers.state(id) {
            TimerState::Idle => return None,
            TimerState::Running { .. } => false,
            TimerState::Paused { .. } => true,
        };
        Some(Countdown {
            remaining: self.timers.remaining(id, now)?,
            total: self.timers.duration(id)?,
            paused,
        })
    }

    /// Drains store changes, recomputes placement and notifies renderers.
    ///
    /// With `force`, notifies even when the store did not change.
    fn sync(&mut self, force: bool) {
        let changes = self.store.take_changes();
        if changes.is_empty() && !force {
            return;
        }
        for change in &changes {
            if let StoreChange::Removed(id) = change {
                self.extents.remove(id);
            }
        }
        self.relayout();
        self.notify_render();
    }

    fn relayout(&mut self) {
        let items: Vec<(ToastId, Option<Size>)> = self
            .store
            .list()
            .map(|toast| (toast.id().clone(), self.extents.get(toast.id()).copied()))
            .collect();
        let engine = PlacementEngine::new(
            self.viewport,
            self.anchor,
            self.settings.placement,
            self.settings.gap,
        );
        let had_overflow = self.layout.overflow.is_some();
        self.layout = engine.layout(&items);

        if let (Some(overflow), false, Some(handle)) =
            (self.layout.overflow, had_overflow, &self.diagnostics)
        {
            handle.log_warning(format!(
                "Toast stack overflows the {} side by {overflow:.0}px",
                self.layout.side
            ));
        }
    }

    fn notify_render(&mut self) {
        if self.render_listeners.is_empty() {
            return;
        }
        let mut listeners = std::mem::take(&mut self.render_listeners);
        let mut failures = Vec::new();
        {
            let rendered = self.rendered();
            for listener in &mut listeners {
                if let Err(payload) = catch_unwind(AssertUnwindSafe(|| listener(&rendered))) {
                    failures.push(panic_message(payload.as_ref()));
                }
            }
        }
        self.render_listeners = listeners;
        for message in failures {
            self.report(Error::Callback(format!("render listener panicked: {message}")));
        }
    }

    fn emit(&mut self, event: LifecycleEvent) {
        if let Some(handle) = &self.diagnostics {
            handle.log_lifecycle(event.clone());
        }
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event.clone());

        let mut listeners = std::mem::take(&mut self.event_listeners);
        for listener in &mut listeners {
            self.run_guarded("event listener", || listener(&event));
        }
        self.event_listeners = listeners;
    }

    /// Runs user code, turning a panic into a reported [`Error::Callback`].
    fn run_guarded(&self, what: &str, f: impl FnOnce()) {
        if let Err(payload) = catch_unwind(AssertUnwindSafe(f)) {
            let message = panic_message(payload.as_ref());
            self.report(Error::Callback(format!("{what} panicked: {message}")));
        }
    }

    fn report(&self, error: Error) {
        match &self.diagnostics {
            Some(handle) => handle.log_error(error.to_string()),
            None => eprintln!("{error}"),
        }
    }

    fn log_appearance(&self, id: &ToastId, appearance: Appearance) {
        let Some(handle) = &self.diagnostics else {
            return;
        };
        match appearance {
            Appearance::Warning => handle.log_warning(format!("warning toast {id}")),
            Appearance::Error => handle.log_error(format!("error toast {id}")),
            Appearance::Info | Appearance::Success | Appearance::Plain => {}
        }
    }
}

fn validate_timeout(timeout: Duration) -> Result<()> {
    if timeout > Duration::from_millis(MAX_AUTO_DISMISS_TIMEOUT_MS) {
        return Err(Error::InvalidOptions(format!(
            "auto-dismiss timeout {}ms exceeds {MAX_AUTO_DISMISS_TIMEOUT_MS}ms",
            timeout.as_millis()
        )));
    }
    Ok(())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
