use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Serialize};

/// Wire form of a time slot as submitted by clients.
///
/// Both fields are kept as raw text; the validator turns them into a
/// [`TimeSlot`]. A field missing from the JSON body deserializes as an empty
/// string and is rejected by the matching parse step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlotJson {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub duration: String,
}

/// A reserved (or candidate) interval `[start, start + duration)`.
///
/// Equality compares the instant of `start`, not the offset it was written
/// with, together with the exact duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub start: DateTime<FixedOffset>,
    pub duration: Duration,
}

impl TimeSlot {
    pub fn new(start: DateTime<FixedOffset>, duration: Duration) -> Self {
        Self { start, duration }
    }

    pub fn end(&self) -> DateTime<FixedOffset> {
        self.start + self.duration
    }

    /// Reports whether `self` and `other` share an instant.
    ///
    /// Any shared start, any shared end, or any boundary of one slot lying
    /// strictly inside the other counts. Slots that only touch, where one
    /// ends exactly when the other starts, do not overlap.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        let (start, end) = (self.start, self.end());
        let (other_start, other_end) = (other.start, other.end());

        start == other_start
            || end == other_end
            || (start > other_start && start < other_end)
            || (other_start > start && other_start < end)
            || (end > other_start && end < other_end)
            || (other_end > start && other_end < end)
    }
}
