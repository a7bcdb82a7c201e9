//! Pairwise class incompatibility.
//!
//! Two classes cannot be taken together when any of their lectures
//! overlap, or when two lectures on the same day sit in different
//! buildings with an idle gap shorter than the walk between them.
//!
//! The relation is symmetric and computed once per input snapshot; pairs
//! are stored under a normalized `(min, max)` key so that lookups are a
//! single hash probe.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{ClassId, Lecture, TravelTimeMatrix};

/// Symmetric set of incompatible class pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncompatibilityCache {
    pairs: HashSet<(ClassId, ClassId)>,
}

#[inline]
fn key(a: ClassId, b: ClassId) -> (ClassId, ClassId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl IncompatibilityCache {
    /// Creates an empty cache (every pair compatible).
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the cache from each class's lectures.
    ///
    /// # Complexity
    /// O(c² · l²) for c classes with at most l lectures each.
    pub fn compute(classes: &[(ClassId, Vec<&Lecture>)], travel: &TravelTimeMatrix) -> Self {
        let mut cache = Self::new();
        for (i, (a, lectures_a)) in classes.iter().enumerate() {
            for (b, lectures_b) in &classes[i + 1..] {
                if lectures_conflict(lectures_a, lectures_b, travel) {
                    cache.insert(*a, *b);
                }
            }
        }
        cache
    }

    /// Marks two classes as incompatible. Self-pairs are ignored.
    pub fn insert(&mut self, a: ClassId, b: ClassId) {
        if a != b {
            self.pairs.insert(key(a, b));
        }
    }

    /// Builder: marks two classes as incompatible.
    pub fn with_pair(mut self, a: ClassId, b: ClassId) -> Self {
        self.insert(a, b);
        self
    }

    /// Whether two classes conflict.
    #[inline]
    pub fn are_incompatible(&self, a: ClassId, b: ClassId) -> bool {
        self.pairs.contains(&key(a, b))
    }

    /// Number of incompatible pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no pair conflicts.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Whether two lecture sets cannot be attended together.
pub fn lectures_conflict(a: &[&Lecture], b: &[&Lecture], travel: &TravelTimeMatrix) -> bool {
    a.iter().any(|la| {
        b.iter().any(|lb| {
            if la.time.overlaps(&lb.time) {
                return true;
            }
            match la.time.gap_minutes(&lb.time) {
                Some(gap) => {
                    let (first, second) = if la.time.end_minute <= lb.time.start_minute {
                        (la, lb)
                    } else {
                        (lb, la)
                    };
                    gap < travel.minutes_between(&first.building, &second.building)
                }
                None => false,
            }
        })
    })
}
