//! Timetable domain models.
//!
//! Provides the catalog types read by the search (courses, classes,
//! lectures), the immutable input snapshot with its precomputed caches,
//! and the schedules the search produces.
//!
//! # Domain Mappings
//!
//! | u-timetable | University | Language school | Gym |
//! |-------------|-----------|-----------------|-----|
//! | Course | Subject | Level | Program |
//! | CourseClass | Section / commission | Group | Class slot |
//! | Lecture | Weekly meeting | Lesson | Session |
//! | Schedule | Term timetable | Weekly plan | Weekly plan |

mod course;
mod incompatibility;
mod input;
mod schedule;
mod time;
mod travel;

pub use course::{ClassId, Course, CourseClass, CourseId, Lecture, LectureId};
pub use incompatibility::{lectures_conflict, IncompatibilityCache};
pub use input::{ScheduleInputData, ScheduleInputDataBuilder};
pub use schedule::{Schedule, ScheduleKey, ScoredSchedule};
pub use time::{TimeRange, DAYS_PER_WEEK, MINUTES_PER_DAY};
pub use travel::TravelTimeMatrix;
