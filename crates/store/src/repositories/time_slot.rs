use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use eyre::eyre;
use scheduler_core::{
    errors::{SchedulerError, SchedulerResult},
    models::time_slot::TimeSlot,
};

use crate::SlotStore;

/// In-memory slot storage.
///
/// Slots are kept in insertion order behind a mutex that is held for the
/// whole of each operation, so callers never observe a partial append or
/// removal. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct LocalStorage {
    slots: Mutex<Vec<TimeSlot>>,
}

impl LocalStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `slots`, in the given order.
    pub fn with_slots(slots: Vec<TimeSlot>) -> Self {
        Self {
            slots: Mutex::new(slots),
        }
    }

    /// Copy of the current collection, in insertion order.
    pub fn slots(&self) -> SchedulerResult<Vec<TimeSlot>> {
        Ok(self.lock()?.clone())
    }

    pub fn len(&self) -> SchedulerResult<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> SchedulerResult<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> SchedulerResult<MutexGuard<'_, Vec<TimeSlot>>> {
        self.slots
            .lock()
            .map_err(|_| SchedulerError::Store(eyre!("time slot collection lock poisoned")))
    }
}

#[async_trait]
impl SlotStore for LocalStorage {
    async fn exists(&self, slot: TimeSlot) -> SchedulerResult<bool> {
        Ok(self.lock()?.iter().any(|stored| *stored == slot))
    }

    async fn overlaps(&self, slot: TimeSlot) -> SchedulerResult<bool> {
        Ok(self.lock()?.iter().any(|stored| stored.overlaps(&slot)))
    }

    async fn add(&self, slot: TimeSlot) -> SchedulerResult<()> {
        self.lock()?.push(slot);
        Ok(())
    }

    async fn delete(&self, slot: TimeSlot) -> SchedulerResult<()> {
        let mut slots = self.lock()?;
        let index = slots
            .iter()
            .position(|stored| *stored == slot)
            .ok_or(SchedulerError::NotFound)?;
        slots.remove(index);
        Ok(())
    }
}
