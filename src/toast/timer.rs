// SPDX-License-Identifier: MPL-2.0
//! Per-toast auto-dismiss countdowns.
//!
//! Each toast id owns at most one timer. A timer is a deadline, not a
//! scheduled callback: it can only fire through [`TimerController::expire_due`],
//! which consults the current state, so a cancelled or paused timer never
//! fires against its id.
//!
//! ```text
//! Idle ──start──▶ Running ──pause──▶ Paused
//!                   ▲  │                │
//!                   │  └─expire─▶ (Expired)
//!                   └────resume─────────┘
//! cancel from Running/Paused ─▶ (Cancelled)
//! ```
//!
//! Terminal states are not stored: the entry is dropped and the id reads as
//! `Idle` again.

use super::record::ToastId;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall-clock time from [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Time as seen by the tokio runtime, which honours a paused test clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}

/// Manually advanced clock. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    /// Moves time forward.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// What `resume` schedules after a pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResumePolicy {
    /// Continue with the time that was left when the timer was paused.
    #[default]
    Remaining,
    /// Start the full duration over.
    Restart,
}

/// Observable state of the timer for one id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// No timer is scheduled.
    Idle,
    Running { deadline: Instant },
    Paused { remaining: Duration },
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    duration: Duration,
    state: TimerState,
}

/// Owns every live countdown, keyed by toast id.
pub struct TimerController {
    timers: HashMap<ToastId, Timer>,
    policy: ResumePolicy,
}

impl fmt::Debug for TimerController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerController")
            .field("live", &self.timers.len())
            .field("policy", &self.policy)
            .finish()
    }
}

impl Default for TimerController {
    fn default() -> Self {
        Self::new(ResumePolicy::default())
    }
}

impl TimerController {
    #[must_use]
    pub fn new(policy: ResumePolicy) -> Self {
        Self {
            timers: HashMap::new(),
            policy,
        }
    }

    #[must_use]
    pub fn policy(&self) -> ResumePolicy {
        self.policy
    }

    /// Starts a countdown, replacing any timer the id already had.
    ///
    /// Returns `true` if an existing timer was replaced.
    pub fn start(&mut self, id: ToastId, duration: Duration, now: Instant) -> bool {
        let timer = Timer {
            duration,
            state: TimerState::Running {
                deadline: now + duration,
            },
        };
        self.timers.insert(id, timer).is_some()
    }

    /// Suspends a running timer, keeping the time left.
    ///
    /// Returns `false` (and does nothing) unless the timer was running.
    pub fn pause(&mut self, id: &ToastId, now: Instant) -> bool {
        let Some(timer) = self.timers.get_mut(id) else {
            return false;
        };
        let TimerState::Running { deadline } = timer.state else {
            return false;
        };
        timer.state = TimerState::Paused {
            remaining: deadline.saturating_duration_since(now),
        };
        true
    }

    /// Resumes a paused timer according to the resume policy.
    ///
    /// Returns `false` (and does nothing) unless the timer was paused.
    pub fn resume(&mut self, id: &ToastId, now: Instant) -> bool {
        let policy = self.policy;
        let Some(timer) = self.timers.get_mut(id) else {
            return false;
        };
        let TimerState::Paused { remaining } = timer.state else {
            return false;
        };
        let left = match policy {
            ResumePolicy::Remaining => remaining,
            ResumePolicy::Restart => timer.duration,
        };
        timer.state = TimerState::Running {
            deadline: now + left,
        };
        true
    }

    /// Drops the timer for `id`. Returns `true` if one was live.
    pub fn cancel(&mut self, id: &ToastId) -> bool {
        self.timers.remove(id).is_some()
    }

    /// Fires every running timer whose deadline has passed.
    ///
    /// Fired timers are removed, so each fires exactly once. Ids come back
    /// ordered by deadline.
    pub fn expire_due(&mut self, now: Instant) -> Vec<ToastId> {
        let mut due: Vec<(Instant, ToastId)> = self
            .timers
            .iter()
            .filter_map(|(id, timer)| match timer.state {
                TimerState::Running { deadline } if deadline <= now => Some((deadline, id.clone())),
                _ => None,
            })
            .collect();
        due.sort();

        for (_, id) in &due {
            self.timers.remove(id);
        }
        due.into_iter().map(|(_, id)| id).collect()
    }

    /// Earliest deadline among running timers.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers
            .values()
            .filter_map(|timer| match timer.state {
                TimerState::Running { deadline } => Some(deadline),
                _ => None,
            })
            .min()
    }

    #[must_use]
    pub fn state(&self, id: &ToastId) -> TimerState {
        self.timers
            .get(id)
            .map_or(TimerState::Idle, |timer| timer.state)
    }

    /// Time left before the timer fires, frozen while paused.
    #[must_use]
    pub fn remaining(&self, id: &ToastId, now: Instant) -> Option<Duration> {
        self.timers.get(id).map(|timer| match timer.state {
            TimerState::Running { deadline } => deadline.saturating_duration_since(now),
            TimerState::Paused { remaining } => remaining,
            TimerState::Idle => timer.duration,
        })
    }

    /// Full duration the timer was started with.
    #[must_use]
    pub fn duration(&self, id: &ToastId) -> Option<Duration> {
        self.timers.get(id).map(|timer| timer.duration)
    }

    #[must_use]
    pub fn has_running(&self) -> bool {
        self.timers
            .values()
            .any(|timer| matches!(timer.state, TimerState::Running { .. }))
    }

    /// Number of live (running or paused) timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }
}
