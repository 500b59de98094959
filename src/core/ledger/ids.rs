//! Course id allocation

use crate::core::models::CourseId;
use std::time::{SystemTime, UNIX_EPOCH};

/// Hands out strictly increasing ids based on wall-clock milliseconds.
///
/// When the clock repeats a value or steps backwards the next id is the
/// previous id plus one, so ids never collide with each other or with any
/// id restored from the store. Once `u64::MAX` has been handed out, ids are
/// taken from the first value at or above the clock that `taken` rejects.
#[derive(Debug, Clone, Default)]
pub struct IdSource {
    last: u64,
}

impl IdSource {
    /// Source whose ids are all greater than `last`
    #[must_use]
    pub const fn starting_after(last: u64) -> Self {
        Self { last }
    }

    /// Next id given the current time in milliseconds.
    ///
    /// `taken` reports ids already in use; it is only consulted once the
    /// increasing range is exhausted.
    pub fn next_at(&mut self, now_ms: u64, taken: impl Fn(CourseId) -> bool) -> CourseId {
        if let Some(next) = self.last.checked_add(1) {
            let id = now_ms.max(next);
            self.last = id;
            return CourseId(id);
        }

        let mut candidate = now_ms;
        while taken(CourseId(candidate)) {
            candidate = candidate.wrapping_add(1);
        }
        CourseId(candidate)
    }

    /// Next id using the system clock
    pub fn next_id(&mut self, taken: impl Fn(CourseId) -> bool) -> CourseId {
        self.next_at(now_millis(), taken)
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}
