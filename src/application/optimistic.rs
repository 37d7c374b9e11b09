//! Optimistic list updates with rollback.
//!
//! A list shown to staff is patched before the data store confirms the write.
//! `apply` hands back a [`PendingMutation`] holding the pre-mutation snapshot;
//! `settle` either keeps the optimistic state or restores the snapshot verbatim
//! and reports the original error.
//!
//! # Example
//!
//! ```ignore
//! let mut payments = OptimisticList::new(rows);
//! let patch = PaymentPatch::new(id).with_status(PaymentStatus::Paid);
//! payments
//!     .run(&patch, handler.handle(cmd), |err| notifier.notify(failed(err)))
//!     .await?;
//! ```

use std::fmt::Debug;
use std::future::Future;

use crate::domain::attendance::Attendance;
use crate::domain::foundation::{AttendanceId, PaymentId};
use crate::domain::payment::{Payment, PaymentPatch};

use super::handlers::attendance::EditAttendanceCommand;

/// Items addressable by a stable id.
pub trait Identified {
    type Id: PartialEq + Debug;

    fn id(&self) -> &Self::Id;
}

/// A partial update targeting one item of type `T`.
pub trait Patch<T: Identified> {
    fn target(&self) -> &T::Id;

    /// Shallow-merges the patch into `item`.
    fn merge_into(&self, item: &mut T);
}

impl Identified for Payment {
    type Id = PaymentId;

    fn id(&self) -> &PaymentId {
        &self.id
    }
}

impl Identified for Attendance {
    type Id = AttendanceId;

    fn id(&self) -> &AttendanceId {
        &self.id
    }
}

impl Patch<Payment> for PaymentPatch {
    fn target(&self) -> &PaymentId {
        &self.id
    }

    fn merge_into(&self, item: &mut Payment) {
        item.apply(self);
    }
}

impl Patch<Attendance> for EditAttendanceCommand {
    fn target(&self) -> &AttendanceId {
        &self.id
    }

    fn merge_into(&self, item: &mut Attendance) {
        item.edit(self.check_in_time);
    }
}

/// Snapshot taken by [`OptimisticList::apply`], consumed by `settle`.
#[must_use = "a pending mutation must be settled"]
#[derive(Debug)]
pub struct PendingMutation<T> {
    snapshot: Vec<T>,
    matched: bool,
}

impl<T> PendingMutation<T> {
    /// Whether an item with the patch's id was present.
    pub fn matched(&self) -> bool {
        self.matched
    }
}

/// An in-memory list mutated optimistically.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimisticList<T> {
    items: Vec<T>,
}

impl<T: Identified + Clone> OptimisticList<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Replaces the whole list, e.g. after an authoritative refetch.
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
    }

    /// Applies `patch` to the matching item. Other items and order are untouched.
    pub fn apply<P: Patch<T>>(&mut self, patch: &P) -> PendingMutation<T> {
        let snapshot = self.items.clone();
        let mut matched = false;
        if let Some(item) = self.items.iter_mut().find(|i| i.id() == patch.target()) {
            patch.merge_into(item);
            matched = true;
        }
        PendingMutation { snapshot, matched }
    }

    /// Keeps the optimistic state on success. On failure restores the
    /// snapshot, then calls `on_error` with the original error.
    pub fn settle<R, E>(
        &mut self,
        mutation: PendingMutation<T>,
        result: Result<R, E>,
        on_error: impl FnOnce(&E),
    ) -> Result<R, E> {
        if let Err(err) = &result {
            self.items = mutation.snapshot;
            on_error(err);
        }
        result
    }

    /// `apply`, await `commit`, then `settle`.
    pub async fn run<P, R, E, F>(
        &mut self,
        patch: &P,
        commit: F,
        on_error: impl FnOnce(&E),
    ) -> Result<R, E>
    where
        P: Patch<T>,
        F: Future<Output = Result<R, E>>,
    {
        let mutation = self.apply(patch);
        let result = commit.await;
        self.settle(mutation, result, on_error)
    }
}
