// SPDX-License-Identifier: MPL-2.0
//! Toast lifecycle engine.
//!
//! This module keeps the ordered set of active toasts, runs an independent
//! auto-dismiss countdown for each of them, and decides where each one is
//! drawn relative to its siblings and an anchor region. It knows nothing
//! about widgets: renderers consume [`RenderedToast`] descriptors and feed
//! pointer, focus, keyboard and size information back in.
//!
//! # Architecture
//!
//! - [`Store`]: insertion-ordered records and a change outbox
//! - [`TimerController`]: per-id deadlines, paused and resumed by interaction
//! - [`PlacementEngine`]: pure stacking geometry with side flipping
//! - [`Toasts`]: the orchestrator tying the three together
//! - [`ToastProvider`] / [`ToastHandle`]: shared ownership for application code
//! - [`drive`]: tokio loop that ticks the orchestrator at each deadline
//!
//! # Example
//!
//! ```
//! use iced_toasts::toast::{ToastOptions, ToastProvider};
//! use std::time::Duration;
//!
//! let provider: ToastProvider<String> = ToastProvider::default();
//! let toasts = provider.handle();
//!
//! let id = toasts
//!     .add_toast(
//!         "Saved".to_string(),
//!         ToastOptions::new()
//!             .auto_dismiss(true)
//!             .auto_dismiss_timeout(Duration::from_secs(3)),
//!     )
//!     .expect("provider is alive");
//! assert_eq!(provider.borrow().len(), 1);
//!
//! toasts.remove_toast(&id).expect("provider is alive");
//! assert!(provider.borrow().is_empty());
//! ```

mod context;
pub mod id;
mod orchestrator;
mod placement;
mod record;
mod runtime;
mod store;
mod timer;

pub use context::{ToastHandle, ToastProvider};
pub use orchestrator::{
    Countdown, LifecycleEvent, RemovalReason, RenderedToast, ToastKey, ToastSettings, Toasts,
};
pub use placement::{Layout, Placement, PlacementEngine, Side, MEASUREMENT_OFFSET};
pub use record::{
    Appearance, DismissCallback, Interaction, Toast, ToastDraft, ToastId, ToastOptions,
    ToastUpdate,
};
pub use runtime::drive;
pub use store::{Store, StoreChange};
pub use timer::{
    Clock, ManualClock, ResumePolicy, SystemClock, TimerController, TimerState, TokioClock,
};
