//! Utilities shared by every search strategy.
//!
//! - [`build_schedule`]: aggregates a [`Schedule`] from chosen class ids.
//! - [`is_compatible`]: checks a candidate against already-chosen classes.
//! - [`group_and_order_by_course`]: one candidate group per viable course.

use crate::error::{EntityKind, Result, ScheduleError};
use crate::models::{
    ClassId, CourseId, IncompatibilityCache, Schedule, ScheduleInputData, DAYS_PER_WEEK,
};

/// Candidate classes of one course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseGroup {
    /// Course the classes belong to.
    pub course_id: CourseId,
    /// Whether the program requires the course.
    pub mandatory: bool,
    /// Viable classes, in catalog order.
    pub class_ids: Vec<ClassId>,
}

impl CourseGroup {
    /// Number of candidate classes.
    pub fn len(&self) -> usize {
        self.class_ids.len()
    }

    /// Whether the course has no candidate class.
    pub fn is_empty(&self) -> bool {
        self.class_ids.is_empty()
    }
}

/// Builds a schedule from chosen classes.
///
/// # Errors
/// [`crate::ScheduleError::CorruptedInput`] if a class, its course, or one
/// of its lectures is missing from the snapshot, or if a lecture falls on
/// a weekday outside `0..7`. The search must abort.
pub fn build_schedule(input: &ScheduleInputData, class_ids: &[ClassId]) -> Result<Schedule> {
    let mut days: u8 = 0;
    let mut total_minutes = 0u32;
    let mut total_importance = 0u32;
    let mut optional_class_count = 0usize;
    let mut optional_credits = 0u32;
    let mut earliest_lecture: Option<u32> = None;
    let mut latest_lecture: Option<u32> = None;

    for &class_id in class_ids {
        input.course_class(class_id)?;
        let course_id = input.course_of(class_id)?;
        let course = input.course(course_id)?;

        for lecture in input.lectures_of(class_id)? {
            if lecture.time.day >= DAYS_PER_WEEK {
                return Err(ScheduleError::CorruptedInput {
                    entity: EntityKind::Lecture,
                    id: lecture.id,
                });
            }
            days |= 1 << lecture.time.day;
            earliest_lecture = Some(
                earliest_lecture.map_or(lecture.time.start_minute, |e| e.min(lecture.time.start_minute)),
            );
            latest_lecture = Some(
                latest_lecture.map_or(lecture.time.end_minute, |l| l.max(lecture.time.end_minute)),
            );
        }

        total_minutes += input.weekly_minutes(class_id)?;
        total_importance += input.importance(course_id);
        if !input.is_mandatory(course_id) {
            optional_class_count += 1;
            optional_credits += course.credits;
        }
    }

    let mandatory_rate = if class_ids.is_empty() {
        0.0
    } else {
        1.0 - optional_class_count as f64 / class_ids.len() as f64
    };

    Ok(Schedule {
        course_class_ids: class_ids.to_vec(),
        total_minutes,
        total_hours: total_minutes as f64 / 60.0,
        total_days: days.count_ones(),
        total_importance,
        optional_class_count,
        mandatory_rate,
        earliest_lecture,
        latest_lecture,
        optional_credits,
    })
}

/// Whether `candidate` conflicts with none of `chosen`.
#[inline]
pub fn is_compatible(
    chosen: &[ClassId],
    candidate: ClassId,
    cache: &IncompatibilityCache,
) -> bool {
    chosen
        .iter()
        .all(|&class_id| !cache.are_incompatible(class_id, candidate))
}

/// Groups viable classes by course.
///
/// Mandatory courses come first, then optional ones, each in course-ID
/// order. Courses left without classes (e.g. after filtering out
/// unavailable times) produce no group.
///
/// NOTE: executors walk the groups front to back, so mandatory courses are
/// processed first.
pub fn group_and_order_by_course(input: &ScheduleInputData) -> Result<Vec<CourseGroup>> {
    let mandatory = input.mandatory_course_ids.iter().map(|&id| (id, true));
    let optional = input.optional_course_ids.iter().map(|&id| (id, false));

    let mut groups = Vec::new();
    for (course_id, is_mandatory) in mandatory.chain(optional) {
        input.course(course_id)?;
        let class_ids = input.classes_of(course_id).to_vec();
        for &class_id in &class_ids {
            input.course_class(class_id)?;
        }
        if class_ids.is_empty() {
            continue;
        }
        groups.push(CourseGroup {
            course_id,
            mandatory: is_mandatory,
            class_ids,
        });
    }
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, CourseClass, Lecture, ScheduleInputDataBuilder, TimeRange};

    fn sample_input() -> ScheduleInputData {
        ScheduleInputDataBuilder::new()
            .with_optional_course(Course::new(1).with_credits(4))
            .with_mandatory_course(Course::new(2).with_credits(6))
            .with_optional_course(Course::new(3).with_credits(2).with_correlative(2))
            .with_class(CourseClass::new(10, 1))
            .with_class(CourseClass::new(20, 2))
            .with_class(CourseClass::new(21, 2))
            .with_lecture(Lecture::new(100, 10, TimeRange::at(0, (8, 0), (10, 0))))
            .with_lecture(Lecture::new(200, 20, TimeRange::at(2, (14, 0), (17, 0))))
            .with_lecture(Lecture::new(201, 20, TimeRange::at(4, (14, 0), (15, 0))))
            .with_lecture(Lecture::new(210, 21, TimeRange::at(0, (9, 0), (11, 0))))
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_schedule_aggregates() {
        let input = sample_input();
        let s = build_schedule(&input, &[10, 20]).unwrap();

        assert_eq!(s.course_class_ids, vec![10, 20]);
        assert_eq!(s.total_minutes, 120 + 240);
        assert!((s.total_hours - 6.0).abs() < 1e-10);
        assert_eq!(s.total_days, 3);
        assert_eq!(s.total_importance, 1); // course 2 unlocks course 3
        assert_eq!(s.optional_class_count, 1);
        assert!((s.mandatory_rate - 0.5).abs() < 1e-10);
        assert_eq!(s.earliest_lecture, Some(8 * 60));
        assert_eq!(s.latest_lecture, Some(17 * 60));
        assert_eq!(s.optional_credits, 4);
    }

    #[test]
    fn test_build_empty_schedule() {
        let input = sample_input();
        let s = build_schedule(&input, &[]).unwrap();
        assert!(s.is_empty());
        assert_eq!(s.total_days, 0);
        assert_eq!(s.mandatory_rate, 0.0);
    }

    #[test]
    fn test_build_schedule_missing_class() {
        let input = sample_input();
        let err = build_schedule(&input, &[10, 99]).unwrap_err();
        assert!(err.is_corrupted_input());
    }

    #[test]
    fn test_build_schedule_missing_lecture() {
        let mut input = sample_input();
        input.lectures.remove(&200);
        let err = build_schedule(&input, &[20]).unwrap_err();
        assert!(err.is_corrupted_input());
    }

    #[test]
    fn test_build_schedule_rejects_out_of_range_day() {
        for day in [DAYS_PER_WEEK, 9, u8::MAX] {
            let mut input = sample_input();
            if let Some(lecture) = input.lectures.get_mut(&100) {
                lecture.time.day = day;
            }
            let err = build_schedule(&input, &[10]).unwrap_err();
            assert!(err.is_corrupted_input(), "day {day}");
        }
    }

    #[test]
    fn test_is_compatible() {
        let input = sample_input();
        let cache = &input.incompatibilities;
        assert!(cache.are_incompatible(10, 21));
        assert!(is_compatible(&[20], 10, cache));
        assert!(!is_compatible(&[20, 21], 10, cache));
        assert!(is_compatible(&[], 10, cache));
    }

    #[test]
    fn test_groups_mandatory_first() {
        let input = sample_input();
        let groups = group_and_order_by_course(&input).unwrap();

        // Course 3 has no class and is skipped
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].course_id, 2);
        assert!(groups[0].mandatory);
        assert_eq!(groups[0].class_ids, vec![20, 21]);
        assert_eq!(groups[1].course_id, 1);
        assert!(!groups[1].mandatory);
    }

    #[test]
    fn test_groups_missing_course() {
        let mut input = sample_input();
        input.courses.remove(&2);
        assert!(group_and_order_by_course(&input).unwrap_err().is_corrupted_input());
    }
}
