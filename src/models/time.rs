//! Weekly time ranges.
//!
//! # Time Model
//! A week has seven days numbered 0 to 6. Within a day, times are minutes
//! since midnight, so a valid range satisfies `start < end <= 1440`.
//! Ranges are half-open: `[start, end)`. Back-to-back lectures (one ends at
//! 10:00, the next starts at 10:00) do not overlap.

use serde::{Deserialize, Serialize};

/// Number of days in a week.
pub const DAYS_PER_WEEK: u8 = 7;

/// Minutes in one day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A time interval within one weekday, `[start_minute, end_minute)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    /// Weekday (0..=6).
    pub day: u8,
    /// Interval start (minutes since midnight, inclusive).
    pub start_minute: u32,
    /// Interval end (minutes since midnight, exclusive).
    pub end_minute: u32,
}

impl TimeRange {
    /// Creates a new time range.
    pub fn new(day: u8, start_minute: u32, end_minute: u32) -> Self {
        Self {
            day,
            start_minute,
            end_minute,
        }
    }

    /// Creates a range from hour/minute pairs, e.g. `at(1, (8, 30), (10, 0))`.
    pub fn at(day: u8, start: (u32, u32), end: (u32, u32)) -> Self {
        Self::new(day, start.0 * 60 + start.1, end.0 * 60 + end.1)
    }

    /// Duration of this range (minutes).
    #[inline]
    pub fn duration_minutes(&self) -> u32 {
        self.end_minute.saturating_sub(self.start_minute)
    }

    /// Whether the range is well-formed.
    pub fn is_valid(&self) -> bool {
        self.day < DAYS_PER_WEEK
            && self.start_minute < self.end_minute
            && self.end_minute <= MINUTES_PER_DAY
    }

    /// Whether two ranges overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.day == other.day
            && self.start_minute < other.end_minute
            && other.start_minute < self.end_minute
    }

    /// Idle minutes between two non-overlapping ranges on the same day.
    ///
    /// Returns `None` for different days or overlapping ranges.
    pub fn gap_minutes(&self, other: &Self) -> Option<u32> {
        if self.day != other.day || self.overlaps(other) {
            return None;
        }
        if self.end_minute <= other.start_minute {
            Some(other.start_minute - self.end_minute)
        } else {
            Some(self.start_minute - other.end_minute)
        }
    }
}
