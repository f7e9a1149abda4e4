use async_trait::async_trait;
use mockall::mock;
use scheduler_core::{errors::SchedulerResult, models::time_slot::TimeSlot};

use crate::SlotStore;

// Mock store for handler tests
mock! {
    pub SlotStore {}

    #[async_trait]
    impl SlotStore for SlotStore {
        async fn exists(&self, slot: TimeSlot) -> SchedulerResult<bool>;

        async fn overlaps(&self, slot: TimeSlot) -> SchedulerResult<bool>;

        async fn add(&self, slot: TimeSlot) -> SchedulerResult<()>;

        async fn delete(&self, slot: TimeSlot) -> SchedulerResult<()>;
    }
}
