// SPDX-License-Identifier: MPL-2.0
//! Ordered storage of active toasts.
//!
//! The store is the single source of truth for what is currently shown.
//! Records are kept in insertion order; every mutation is recorded in an
//! outbox that the orchestrator drains to recompute placement and notify
//! renderers.

use super::id;
use super::record::{Toast, ToastDraft, ToastId, ToastUpdate};
use crate::error::{Error, Result};
use std::time::Instant;

/// How many times a generated id is redrawn when it collides.
const MAX_GENERATION_ATTEMPTS: usize = 8;

/// A mutation recorded by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    Added(ToastId),
    Removed(ToastId),
    Updated(ToastId),
}

impl StoreChange {
    /// Returns the id the change refers to.
    #[must_use]
    pub fn id(&self) -> &ToastId {
        match self {
            StoreChange::Added(id) | StoreChange::Removed(id) | StoreChange::Updated(id) => id,
        }
    }
}

/// Insertion-ordered collection of toasts.
#[derive(Debug)]
pub struct Store<T> {
    /// Records sorted by ascending `created_order`.
    records: Vec<Toast<T>>,
    next_order: u64,
    revision: u64,
    changes: Vec<StoreChange>,
}

impl<T> Default for Store<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            next_order: 0,
            revision: 0,
            changes: Vec::new(),
        }
    }
}

impl<T> Store<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a draft and returns the id it was stored under.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateId`] if the draft carries an id that is
    /// already active. The store is left unchanged.
    pub fn add(&mut self, draft: ToastDraft<T>, now: Instant) -> Result<ToastId> {
        let id = match draft.id.clone() {
            Some(id) if self.contains(&id) => return Err(Error::DuplicateId(id)),
            Some(id) => id,
            None => self.fresh_id(),
        };

        let order = self.next_order;
        self.next_order += 1;
        // Orders only grow, so pushing keeps the vector sorted.
        self.records.push(draft.into_toast(id.clone(), order, now));
        self.record(StoreChange::Added(id.clone()));
        Ok(id)
    }

    /// Removes a record if present.
    ///
    /// Removing an absent id is not an error: expiry and user dismissal race
    /// by nature.
    pub fn remove(&mut self, id: &ToastId) -> Option<Toast<T>> {
        let index = self.index_of(id)?;
        let removed = self.records.remove(index);
        self.record(StoreChange::Removed(id.clone()));
        Some(removed)
    }

    /// Merges `update` into an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no record has this id.
    pub fn update(&mut self, id: &ToastId, update: ToastUpdate<T>) -> Result<()> {
        let index = self
            .index_of(id)
            .ok_or_else(|| Error::NotFound(id.clone()))?;
        self.records[index].apply(update);
        self.record(StoreChange::Updated(id.clone()));
        Ok(())
    }

    /// Returns the records in insertion order.
    pub fn list(&self) -> impl Iterator<Item = &Toast<T>> {
        self.records.iter()
    }

    #[must_use]
    pub fn get(&self, id: &ToastId) -> Option<&Toast<T>> {
        self.records.iter().find(|toast| toast.id() == id)
    }

    /// Mutable access for interaction state only; does not record a change.
    pub(crate) fn get_mut(&mut self, id: &ToastId) -> Option<&mut Toast<T>> {
        self.records.iter_mut().find(|toast| toast.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: &ToastId) -> bool {
        self.index_of(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of changes recorded since the store was created.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Drains the pending change outbox.
    pub fn take_changes(&mut self) -> Vec<StoreChange> {
        std::mem::take(&mut self.changes)
    }

    /// Removes every record, returning them in insertion order.
    pub fn clear(&mut self) -> Vec<Toast<T>> {
        let drained: Vec<Toast<T>> = self.records.drain(..).collect();
        for toast in &drained {
            let change = StoreChange::Removed(toast.id().clone());
            self.record(change);
        }
        drained
    }

    fn index_of(&self, id: &ToastId) -> Option<usize> {
        self.records.iter().position(|toast| toast.id() == id)
    }

    fn record(&mut self, change: StoreChange) {
        self.revision += 1;
        self.changes.push(change);
    }

    fn fresh_id(&self) -> ToastId {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let candidate = id::generate();
            if !self.contains(&candidate) {
                return candidate;
            }
        }
        // The order suffix cannot collide with another generated id.
        ToastId::from(format!("{}-{}", id::generate(), self.next_order))
    }
}
