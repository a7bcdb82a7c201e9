//! Catalog models: courses, their classes, and lectures.
//!
//! A course is offered as one or more classes (sections) per term. A
//! student enrolls in at most one class of each course, and a class meets
//! through its lectures.
//!
//! | Model | Meaning |
//! |-------|---------|
//! | Course | Subject in the student's program (e.g. Algebra I) |
//! | CourseClass | One offered section of a course this term |
//! | Lecture | A weekly meeting of a class in a building |

use serde::{Deserialize, Serialize};

use super::TimeRange;

/// Course identifier.
pub type CourseId = u32;
/// Course class (section) identifier.
pub type ClassId = u32;
/// Lecture identifier.
pub type LectureId = u32;

/// A course of the student's program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course identifier.
    pub id: CourseId,
    /// Human-readable name.
    pub name: String,
    /// Credit value earned by passing the course.
    pub credits: u32,
    /// Courses that must be completed before this one.
    pub correlatives: Vec<CourseId>,
}

impl Course {
    /// Creates a new course with the given ID.
    pub fn new(id: CourseId) -> Self {
        Self {
            id,
            name: String::new(),
            credits: 0,
            correlatives: Vec::new(),
        }
    }

    /// Sets the course name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the credit value.
    pub fn with_credits(mut self, credits: u32) -> Self {
        self.credits = credits;
        self
    }

    /// Adds a correlative (prerequisite) course.
    pub fn with_correlative(mut self, course_id: CourseId) -> Self {
        self.correlatives.push(course_id);
        self
    }
}

/// One offered section of a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseClass {
    /// Unique class identifier.
    pub id: ClassId,
    /// Parent course.
    pub course_id: CourseId,
    /// Section label (e.g. "K1021").
    pub name: String,
}

impl CourseClass {
    /// Creates a class of the given course.
    pub fn new(id: ClassId, course_id: CourseId) -> Self {
        Self {
            id,
            course_id,
            name: String::new(),
        }
    }

    /// Sets the section label.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// A weekly meeting of a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lecture {
    /// Unique lecture identifier.
    pub id: LectureId,
    /// Class this lecture belongs to.
    pub class_id: ClassId,
    /// When the lecture meets.
    pub time: TimeRange,
    /// Building where the lecture meets.
    pub building: String,
}

impl Lecture {
    /// Creates a lecture of the given class.
    pub fn new(id: LectureId, class_id: ClassId, time: TimeRange) -> Self {
        Self {
            id,
            class_id,
            time,
            building: String::new(),
        }
    }

    /// Sets the building.
    pub fn in_building(mut self, building: impl Into<String>) -> Self {
        self.building = building.into();
        self
    }

    /// Duration (minutes).
    #[inline]
    pub fn duration_minutes(&self) -> u32 {
        self.time.duration_minutes()
    }
}
