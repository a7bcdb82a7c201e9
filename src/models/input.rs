//! Immutable input snapshot for one student/term/program search.
//!
//! Upstream collaborators resolve a student, program, and term into a
//! [`ScheduleInputData`]; the engine reads it and performs no I/O. All
//! derived data (weekly minutes, importance, incompatibilities) is
//! computed once, when the snapshot is built, and shared read-only by
//! every search that uses it.
//!
//! Course sets are ordered and per-course class lists keep insertion
//! order, so deterministic strategies see the same input order on every
//! run.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

use super::{
    ClassId, Course, CourseClass, CourseId, IncompatibilityCache, Lecture, LectureId, TimeRange,
    TravelTimeMatrix,
};
use crate::error::{EntityKind, Result, ScheduleError};
use crate::validation::{count_transitive_dependents, validate_catalog};

/// Read-only snapshot consumed by the executors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleInputData {
    /// Courses by ID.
    pub courses: HashMap<CourseId, Course>,
    /// Classes by ID.
    pub course_classes: HashMap<ClassId, CourseClass>,
    /// Lectures by ID.
    pub lectures: HashMap<LectureId, Lecture>,
    /// Class → owning course.
    pub course_of_course_class: HashMap<ClassId, CourseId>,
    /// Class → its lectures.
    pub lectures_of_course_class: HashMap<ClassId, Vec<LectureId>>,
    /// Course → its classes, in catalog order.
    pub course_classes_of_course: HashMap<CourseId, Vec<ClassId>>,
    /// Class → weekly lecture time (minutes).
    pub weekly_class_time_in_minutes: HashMap<ClassId, u32>,
    /// Course → number of courses that transitively require it.
    pub indirect_correlatives_amount: HashMap<CourseId, u32>,
    /// Pairwise class conflicts.
    pub incompatibilities: IncompatibilityCache,
    /// Courses the program requires.
    pub mandatory_course_ids: BTreeSet<CourseId>,
    /// Elective courses the student may take.
    pub optional_course_ids: BTreeSet<CourseId>,
    /// Optional credits the student has not earned yet.
    pub remaining_optional_credits: u32,
}

impl ScheduleInputData {
    /// Looks up a course, failing if the snapshot lacks it.
    pub fn course(&self, id: CourseId) -> Result<&Course> {
        self.courses
            .get(&id)
            .ok_or_else(|| ScheduleError::missing(EntityKind::Course, id))
    }

    /// Looks up a class, failing if the snapshot lacks it.
    pub fn course_class(&self, id: ClassId) -> Result<&CourseClass> {
        self.course_classes
            .get(&id)
            .ok_or_else(|| ScheduleError::missing(EntityKind::CourseClass, id))
    }

    /// Looks up a lecture, failing if the snapshot lacks it.
    pub fn lecture(&self, id: LectureId) -> Result<&Lecture> {
        self.lectures
            .get(&id)
            .ok_or_else(|| ScheduleError::missing(EntityKind::Lecture, id))
    }

    /// Course owning a class.
    pub fn course_of(&self, class_id: ClassId) -> Result<CourseId> {
        self.course_of_course_class
            .get(&class_id)
            .copied()
            .ok_or_else(|| ScheduleError::missing(EntityKind::CourseClass, class_id))
    }

    /// Lectures of a class. A class without an entry has no lectures.
    pub fn lectures_of(&self, class_id: ClassId) -> Result<Vec<&Lecture>> {
        self.lectures_of_course_class
            .get(&class_id)
            .map(|ids| ids.iter().map(|&id| self.lecture(id)).collect())
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    /// Classes of a course, in catalog order.
    pub fn classes_of(&self, course_id: CourseId) -> &[ClassId] {
        self.course_classes_of_course
            .get(&course_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Weekly lecture minutes of a class.
    pub fn weekly_minutes(&self, class_id: ClassId) -> Result<u32> {
        self.weekly_class_time_in_minutes
            .get(&class_id)
            .copied()
            .ok_or_else(|| ScheduleError::missing(EntityKind::CourseClass, class_id))
    }

    /// Importance of a course (0 when nothing depends on it).
    pub fn importance(&self, course_id: CourseId) -> u32 {
        self.indirect_correlatives_amount
            .get(&course_id)
            .copied()
            .unwrap_or(0)
    }

    /// Whether the program requires the course.
    pub fn is_mandatory(&self, course_id: CourseId) -> bool {
        self.mandatory_course_ids.contains(&course_id)
    }

    /// Number of classes offered.
    pub fn class_count(&self) -> usize {
        self.course_classes.len()
    }

    /// Returns a copy without the classes meeting during any of the
    /// given ranges.
    ///
    /// The removed classes disappear from the class map and from every
    /// relation. Their courses stay in the snapshot, possibly with no
    /// viable class left.
    pub fn without_unavailable(&self, unavailable: &[TimeRange]) -> Result<Self> {
        if unavailable.is_empty() {
            return Ok(self.clone());
        }

        let mut blocked = HashSet::new();
        for &class_id in self.course_classes.keys() {
            let lectures = self.lectures_of(class_id)?;
            if lectures
                .iter()
                .any(|l| unavailable.iter().any(|u| u.overlaps(&l.time)))
            {
                blocked.insert(class_id);
            }
        }

        let mut filtered = self.clone();
        filtered.course_classes.retain(|id, _| !blocked.contains(id));
        filtered.course_of_course_class.retain(|id, _| !blocked.contains(id));
        filtered
            .lectures_of_course_class
            .retain(|id, _| !blocked.contains(id));
        filtered
            .weekly_class_time_in_minutes
            .retain(|id, _| !blocked.contains(id));
        filtered
            .lectures
            .retain(|_, lecture| !blocked.contains(&lecture.class_id));
        for classes in filtered.course_classes_of_course.values_mut() {
            classes.retain(|id| !blocked.contains(id));
        }
        Ok(filtered)
    }
}

/// Assembles a [`ScheduleInputData`] from catalog rows.
///
/// # Example
/// ```
/// use u_timetable::models::{
///     Course, CourseClass, Lecture, ScheduleInputDataBuilder, TimeRange,
/// };
///
/// let input = ScheduleInputDataBuilder::new()
///     .with_mandatory_course(Course::new(1).with_credits(6))
///     .with_class(CourseClass::new(10, 1))
///     .with_lecture(Lecture::new(100, 10, TimeRange::at(0, (8, 0), (10, 0))))
///     .build()
///     .unwrap();
///
/// assert_eq!(input.weekly_class_time_in_minutes[&10], 120);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleInputDataBuilder {
    courses: Vec<Course>,
    mandatory: BTreeSet<CourseId>,
    classes: Vec<CourseClass>,
    lectures: Vec<Lecture>,
    travel: TravelTimeMatrix,
    remaining_optional_credits: u32,
}

impl ScheduleInputDataBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a course the program requires.
    pub fn with_mandatory_course(mut self, course: Course) -> Self {
        self.mandatory.insert(course.id);
        self.courses.push(course);
        self
    }

    /// Adds an elective course.
    pub fn with_optional_course(mut self, course: Course) -> Self {
        self.courses.push(course);
        self
    }

    /// Adds a class.
    pub fn with_class(mut self, class: CourseClass) -> Self {
        self.classes.push(class);
        self
    }

    /// Adds a lecture.
    pub fn with_lecture(mut self, lecture: Lecture) -> Self {
        self.lectures.push(lecture);
        self
    }

    /// Sets inter-building travel times.
    pub fn with_travel_times(mut self, travel: TravelTimeMatrix) -> Self {
        self.travel = travel;
        self
    }

    /// Sets the optional credits the student still needs.
    pub fn with_remaining_optional_credits(mut self, credits: u32) -> Self {
        self.remaining_optional_credits = credits;
        self
    }

    /// Validates the catalog and derives the snapshot.
    ///
    /// # Errors
    /// [`ScheduleError::InvalidInput`] with every validation issue found.
    pub fn build(self) -> Result<ScheduleInputData> {
        validate_catalog(&self.courses, &self.classes, &self.lectures)
            .map_err(ScheduleError::InvalidInput)?;

        let mut data = ScheduleInputData {
            indirect_correlatives_amount: count_transitive_dependents(&self.courses),
            remaining_optional_credits: self.remaining_optional_credits,
            ..ScheduleInputData::default()
        };

        for course in &self.courses {
            if self.mandatory.contains(&course.id) {
                data.mandatory_course_ids.insert(course.id);
            } else {
                data.optional_course_ids.insert(course.id);
            }
            data.course_classes_of_course.entry(course.id).or_default();
        }

        for class in &self.classes {
            data.course_of_course_class.insert(class.id, class.course_id);
            data.course_classes_of_course
                .entry(class.course_id)
                .or_default()
                .push(class.id);
            data.lectures_of_course_class.entry(class.id).or_default();
            data.weekly_class_time_in_minutes.insert(class.id, 0);
        }

        for lecture in &self.lectures {
            data.lectures_of_course_class
                .entry(lecture.class_id)
                .or_default()
                .push(lecture.id);
            *data
                .weekly_class_time_in_minutes
                .entry(lecture.class_id)
                .or_insert(0) += lecture.duration_minutes();
        }

        data.courses = self.courses.into_iter().map(|c| (c.id, c)).collect();
        data.course_classes = self.classes.into_iter().map(|c| (c.id, c)).collect();
        data.lectures = self.lectures.into_iter().map(|l| (l.id, l)).collect();

        let mut class_ids: Vec<ClassId> = data.course_classes.keys().copied().collect();
        class_ids.sort_unstable();
        let per_class: Vec<(ClassId, Vec<&Lecture>)> = class_ids
            .iter()
            .map(|&id| data.lectures_of(id).map(|lectures| (id, lectures)))
            .collect::<Result<_>>()?;
        let incompatibilities = IncompatibilityCache::compute(&per_class, &self.travel);
        data.incompatibilities = incompatibilities;

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    fn sample_input() -> ScheduleInputData {
        ScheduleInputDataBuilder::new()
            .with_mandatory_course(Course::new(1).with_credits(8))
            .with_optional_course(Course::new(2).with_credits(4).with_correlative(1))
            .with_class(CourseClass::new(10, 1))
            .with_class(CourseClass::new(11, 1))
            .with_class(CourseClass::new(20, 2))
            .with_lecture(Lecture::new(100, 10, TimeRange::at(0, (8, 0), (10, 0))))
            .with_lecture(Lecture::new(101, 10, TimeRange::at(2, (8, 0), (9, 30))))
            .with_lecture(Lecture::new(110, 11, TimeRange::at(1, (18, 0), (20, 0))))
            .with_lecture(Lecture::new(200, 20, TimeRange::at(0, (9, 0), (11, 0))))
            .with_remaining_optional_credits(12)
            .build()
            .unwrap()
    }

    #[test]
    fn test_relations() {
        let input = sample_input();
        assert_eq!(input.classes_of(1), &[10, 11]);
        assert_eq!(input.classes_of(2), &[20]);
        assert_eq!(input.course_of(20).unwrap(), 2);
        assert_eq!(input.lectures_of(10).unwrap().len(), 2);
        assert!(input.is_mandatory(1));
        assert!(!input.is_mandatory(2));
        assert_eq!(input.optional_course_ids.len(), 1);
        assert_eq!(input.remaining_optional_credits, 12);
    }

    #[test]
    fn test_weekly_minutes() {
        let input = sample_input();
        assert_eq!(input.weekly_minutes(10).unwrap(), 210);
        assert_eq!(input.weekly_minutes(11).unwrap(), 120);
    }

    #[test]
    fn test_importance() {
        let input = sample_input();
        assert_eq!(input.importance(1), 1);
        assert_eq!(input.importance(2), 0);
    }

    #[test]
    fn test_incompatibilities_computed() {
        let input = sample_input();
        assert!(input.incompatibilities.are_incompatible(10, 20));
        assert!(!input.incompatibilities.are_incompatible(11, 20));
    }

    #[test]
    fn test_missing_entities() {
        let input = sample_input();
        let err = input.course_class(999).unwrap_err();
        assert!(err.is_corrupted_input());
        assert!(input.course(999).is_err());
        assert!(input.lecture(999).is_err());
        assert!(input.course_of(999).is_err());
    }

    #[test]
    fn test_without_unavailable() {
        let input = sample_input();
        // Monday 9:30 blocks classes 10 and 20
        let filtered = input
            .without_unavailable(&[TimeRange::at(0, (9, 30), (9, 45))])
            .unwrap();

        assert_eq!(filtered.classes_of(1), &[11]);
        assert!(filtered.classes_of(2).is_empty());
        assert!(filtered.course_class(10).is_err());
        assert!(!filtered.lectures.contains_key(&100));
        assert!(filtered.courses.contains_key(&2));
        // Original untouched
        assert_eq!(input.classes_of(1), &[10, 11]);
    }

    #[test]
    fn test_build_rejects_invalid_catalog() {
        let result = ScheduleInputDataBuilder::new()
            .with_mandatory_course(Course::new(1))
            .with_class(CourseClass::new(10, 2))
            .build();

        match result {
            Err(ScheduleError::InvalidInput(errors)) => {
                assert!(errors
                    .iter()
                    .any(|e| e.kind == ValidationErrorKind::InvalidCourseReference));
            }
            other => panic!("expected invalid input, got {other:?}"),
        }
    }
}
