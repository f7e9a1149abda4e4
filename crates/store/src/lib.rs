//! # Scheduler Store
//!
//! Storage seam for reserved time slots. Handlers talk to the
//! [`SlotStore`] trait; [`LocalStorage`] is the in-memory implementation and
//! [`mock::repositories::MockSlotStore`] a `mockall` substitute for tests.
//!
//! [`LocalStorage`]: repositories::time_slot::LocalStorage

pub mod repositories;

pub mod mock;

use async_trait::async_trait;
use scheduler_core::{errors::SchedulerResult, models::time_slot::TimeSlot};

/// Operations the request handlers need from slot storage.
///
/// Implementations must make every call atomic with respect to the others.
/// Deadlines are applied by the caller; implementations need not observe
/// cancellation.
#[async_trait]
pub trait SlotStore: Send + Sync {
    /// True iff a stored slot has exactly the same start instant and duration.
    async fn exists(&self, slot: TimeSlot) -> SchedulerResult<bool>;

    /// True iff any stored slot overlaps `slot` (see [`TimeSlot::overlaps`]).
    async fn overlaps(&self, slot: TimeSlot) -> SchedulerResult<bool>;

    /// Appends `slot` without checking for overlap.
    async fn add(&self, slot: TimeSlot) -> SchedulerResult<()>;

    /// Removes the first exact match, or fails with
    /// [`SchedulerError::NotFound`](scheduler_core::errors::SchedulerError::NotFound).
    async fn delete(&self, slot: TimeSlot) -> SchedulerResult<()>;
}
