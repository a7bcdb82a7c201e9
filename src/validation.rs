//! Input validation for course catalogs.
//!
//! Checks structural integrity of courses, classes, and lectures before a
//! snapshot is built. Detects:
//! - Duplicate IDs
//! - Classes of unknown courses, lectures of unknown classes
//! - Malformed lecture times
//! - Unknown or circular correlatives (DAG validation)
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use crate::models::{Course, CourseClass, CourseId, Lecture};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A class references a course that doesn't exist.
    InvalidCourseReference,
    /// A lecture references a class that doesn't exist.
    InvalidClassReference,
    /// A lecture has a malformed weekday or time range.
    InvalidTimeRange,
    /// A course lists a correlative that doesn't exist.
    InvalidCorrelative,
    /// Correlative graph contains a cycle.
    CyclicCorrelatives,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a course catalog.
///
/// Checks:
/// 1. No duplicate course, class, or lecture IDs
/// 2. Every class belongs to an existing course
/// 3. Every lecture belongs to an existing class
/// 4. Every lecture time is a valid weekday range
/// 5. Every correlative points to an existing course
/// 6. No circular correlatives
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_catalog(
    courses: &[Course],
    classes: &[CourseClass],
    lectures: &[Lecture],
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut course_ids = HashSet::new();
    for course in courses {
        if !course_ids.insert(course.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate course ID: {}", course.id),
            ));
        }
    }

    let mut class_ids = HashSet::new();
    for class in classes {
        if !class_ids.insert(class.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate class ID: {}", class.id),
            ));
        }
        if !course_ids.contains(&class.course_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCourseReference,
                format!(
                    "Class {} references unknown course {}",
                    class.id, class.course_id
                ),
            ));
        }
    }

    let mut lecture_ids = HashSet::new();
    for lecture in lectures {
        if !lecture_ids.insert(lecture.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate lecture ID: {}", lecture.id),
            ));
        }
        if !class_ids.contains(&lecture.class_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidClassReference,
                format!(
                    "Lecture {} references unknown class {}",
                    lecture.id, lecture.class_id
                ),
            ));
        }
        if !lecture.time.is_valid() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTimeRange,
                format!("Lecture {} has an invalid time range", lecture.id),
            ));
        }
    }

    for course in courses {
        for correlative in &course.correlatives {
            if !course_ids.contains(correlative) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidCorrelative,
                    format!(
                        "Course {} references unknown correlative {}",
                        course.id, correlative
                    ),
                ));
            }
        }
    }

    if let Some(cycle_err) = detect_cycles(courses) {
        errors.push(cycle_err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Adjacency list: course → courses that list it as a correlative.
///
/// Ordered by course ID so that traversals are deterministic.
pub(crate) fn dependents_graph(courses: &[Course]) -> BTreeMap<CourseId, Vec<CourseId>> {
    let mut adj: BTreeMap<CourseId, Vec<CourseId>> = BTreeMap::new();
    for course in courses {
        adj.entry(course.id).or_default();
        for &correlative in &course.correlatives {
            adj.entry(correlative).or_default().push(course.id);
        }
    }
    adj
}

/// Detects cycles in the correlative graph using DFS.
///
/// # Algorithm
/// Topological sort via DFS. If a back-edge is found (visiting a node
/// currently in the recursion stack), a cycle exists.
fn detect_cycles(courses: &[Course]) -> Option<ValidationError> {
    let adj = dependents_graph(courses);

    let mut visited = HashSet::new();
    let mut in_stack = HashSet::new();

    for &node in adj.keys() {
        if !visited.contains(&node) && has_cycle_dfs(node, &adj, &mut visited, &mut in_stack) {
            return Some(ValidationError::new(
                ValidationErrorKind::CyclicCorrelatives,
                format!("Circular correlatives detected involving course {node}"),
            ));
        }
    }

    None
}

fn has_cycle_dfs(
    node: CourseId,
    adj: &BTreeMap<CourseId, Vec<CourseId>>,
    visited: &mut HashSet<CourseId>,
    in_stack: &mut HashSet<CourseId>,
) -> bool {
    visited.insert(node);
    in_stack.insert(node);

    if let Some(neighbors) = adj.get(&node) {
        for &next in neighbors {
            if in_stack.contains(&next) {
                return true; // Back edge → cycle
            }
            if !visited.contains(&next) && has_cycle_dfs(next, adj, visited, in_stack) {
                return true;
            }
        }
    }

    in_stack.remove(&node);
    false
}

/// Counts, for every course, the distinct courses that transitively
/// require it.
///
/// Expects an acyclic graph (see [`validate_catalog`]).
pub(crate) fn count_transitive_dependents(courses: &[Course]) -> HashMap<CourseId, u32> {
    let adj = dependents_graph(courses);
    let mut counts = HashMap::with_capacity(adj.len());

    for &root in adj.keys() {
        let mut seen = HashSet::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if let Some(neighbors) = adj.get(&node) {
                for &next in neighbors {
                    if seen.insert(next) {
                        stack.push(next);
                    }
                }
            }
        }
        counts.insert(root, seen.len() as u32);
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeRange;

    fn sample_courses() -> Vec<Course> {
        vec![
            Course::new(1).with_name("Analysis I"),
            Course::new(2).with_name("Algebra"),
            Course::new(3).with_name("Analysis II").with_correlative(1).with_correlative(2),
            Course::new(4).with_name("Probability").with_correlative(3),
        ]
    }

    fn sample_classes() -> Vec<CourseClass> {
        vec![CourseClass::new(10, 1), CourseClass::new(20, 2)]
    }

    fn sample_lectures() -> Vec<Lecture> {
        vec![
            Lecture::new(100, 10, TimeRange::at(0, (8, 0), (10, 0))),
            Lecture::new(200, 20, TimeRange::at(1, (8, 0), (10, 0))),
        ]
    }

    #[test]
    fn test_valid_catalog() {
        assert!(validate_catalog(&sample_courses(), &sample_classes(), &sample_lectures()).is_ok());
    }

    #[test]
    fn test_duplicate_course_id() {
        let courses = vec![Course::new(1), Course::new(1)];
        let errors = validate_catalog(&courses, &[], &[]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("course")));
    }

    #[test]
    fn test_invalid_course_reference() {
        let classes = vec![CourseClass::new(10, 99)];
        let errors = validate_catalog(&sample_courses(), &classes, &[]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidCourseReference));
    }

    #[test]
    fn test_invalid_class_reference() {
        let lectures = vec![Lecture::new(100, 77, TimeRange::at(0, (8, 0), (10, 0)))];
        let errors = validate_catalog(&sample_courses(), &sample_classes(), &lectures).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidClassReference));
    }

    #[test]
    fn test_invalid_time_range() {
        let lectures = vec![Lecture::new(100, 10, TimeRange::new(0, 600, 540))];
        let errors = validate_catalog(&sample_courses(), &sample_classes(), &lectures).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidTimeRange));
    }

    #[test]
    fn test_invalid_correlative() {
        let courses = vec![Course::new(1).with_correlative(42)];
        let errors = validate_catalog(&courses, &[], &[]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidCorrelative));
    }

    #[test]
    fn test_cyclic_correlatives() {
        // 1 → 2 → 3 → 1
        let courses = vec![
            Course::new(1).with_correlative(3),
            Course::new(2).with_correlative(1),
            Course::new(3).with_correlative(2),
        ];
        let errors = validate_catalog(&courses, &[], &[]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::CyclicCorrelatives));
    }

    #[test]
    fn test_multiple_errors() {
        let classes = vec![CourseClass::new(10, 99)];
        let lectures = vec![Lecture::new(100, 77, TimeRange::new(9, 0, 60))];
        let errors = validate_catalog(&sample_courses(), &classes, &lectures).unwrap_err();
        assert!(errors.len() >= 3);
    }

    #[test]
    fn test_transitive_dependents() {
        let counts = count_transitive_dependents(&sample_courses());
        // 1 is required by 3, and through 3 by 4
        assert_eq!(counts[&1], 2);
        assert_eq!(counts[&2], 2);
        assert_eq!(counts[&3], 1);
        assert_eq!(counts[&4], 0);
    }

    #[test]
    fn test_diamond_counts_each_course_once() {
        // 4 requires 2 and 3, both of which require 1
        let courses = vec![
            Course::new(1),
            Course::new(2).with_correlative(1),
            Course::new(3).with_correlative(1),
            Course::new(4).with_correlative(2).with_correlative(3),
        ];
        let counts = count_transitive_dependents(&courses);
        assert_eq!(counts[&1], 3);
    }
}
