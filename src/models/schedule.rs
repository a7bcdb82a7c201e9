//! Schedule (solution) model.
//!
//! A schedule is a set of chosen classes, at most one per course, together
//! with the aggregate figures the score function reads. Schedules are
//! immutable once built: extending a schedule builds a new one.

use serde::{Deserialize, Serialize};

use super::ClassId;

/// A weekly schedule built from chosen classes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Chosen classes, in selection order.
    pub course_class_ids: Vec<ClassId>,
    /// Weekly lecture time (minutes).
    pub total_minutes: u32,
    /// Weekly lecture time (hours).
    pub total_hours: f64,
    /// Distinct weekdays with at least one lecture.
    pub total_days: u32,
    /// Sum of the importance of the chosen classes' courses.
    pub total_importance: u32,
    /// Classes belonging to optional courses.
    pub optional_class_count: usize,
    /// Mandatory classes / total classes (0 for an empty schedule).
    pub mandatory_rate: f64,
    /// Earliest lecture start across the week (minutes since midnight).
    pub earliest_lecture: Option<u32>,
    /// Latest lecture end across the week (minutes since midnight).
    pub latest_lecture: Option<u32>,
    /// Credits earned from the optional courses included.
    pub optional_credits: u32,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of chosen classes.
    pub fn len(&self) -> usize {
        self.course_class_ids.len()
    }

    /// Whether no class is chosen.
    pub fn is_empty(&self) -> bool {
        self.course_class_ids.is_empty()
    }

    /// Whether the schedule includes a class.
    pub fn contains(&self, class_id: ClassId) -> bool {
        self.course_class_ids.contains(&class_id)
    }

    /// Order-independent identity of this schedule.
    pub fn key(&self) -> ScheduleKey {
        ScheduleKey::new(&self.course_class_ids)
    }
}

/// Canonical identity of a schedule: its class ids, sorted.
///
/// Two schedules reached through different selection orders share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScheduleKey(Vec<ClassId>);

impl ScheduleKey {
    /// Creates a key from class ids in any order.
    pub fn new(class_ids: &[ClassId]) -> Self {
        let mut ids = class_ids.to_vec();
        ids.sort_unstable();
        Self(ids)
    }

    /// Sorted class ids.
    pub fn class_ids(&self) -> &[ClassId] {
        &self.0
    }
}

/// A schedule and its score (higher = better).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSchedule {
    pub schedule: Schedule,
    pub score: f64,
}

impl ScoredSchedule {
    /// Pairs a schedule with its score.
    pub fn new(schedule: Schedule, score: f64) -> Self {
        Self { schedule, score }
    }
}
