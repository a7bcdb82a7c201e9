//! Schedule desirability score.
//!
//! # Terms
//!
//! | Term | Definition | Sign |
//! |------|-----------|------|
//! | p1 | `1 − optional classes / classes` (mandatory rate) | + |
//! | p2 | `|target hours − weekly minutes / 60|` | − |
//! | p3 | `7 − distinct days used` | + when reducing days |
//! | p4 | total importance of the chosen courses | + when prioritizing unlocks |
//!
//! ```text
//! score = m0·p1 − m1·p2 + [reduce_days]·m2·p3 + [prioritize_unlocks]·m3·p4
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{AlgorithmParams, ScheduleParams};
use crate::executor::Scorer;
use crate::models::{Schedule, DAYS_PER_WEEK};

/// The four score terms of one schedule, before weighting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Share of mandatory classes.
    pub mandatory_rate: f64,
    /// Distance to the weekly hour target.
    pub hours_deviation: f64,
    /// Weekdays left free.
    pub free_days: f64,
    /// Courses unlocked downstream.
    pub importance: f64,
}

impl ScoreBreakdown {
    /// Computes the terms for a schedule.
    pub fn calculate(schedule: &Schedule, target_hours: f64) -> Self {
        Self {
            mandatory_rate: schedule.mandatory_rate,
            hours_deviation: (target_hours - f64::from(schedule.total_minutes) / 60.0).abs(),
            free_days: f64::from(DAYS_PER_WEEK) - f64::from(schedule.total_days),
            importance: f64::from(schedule.total_importance),
        }
    }
}

/// Weighted score for the student's params.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleScorer {
    params: ScheduleParams,
    multipliers: [f64; 4],
}

impl ScheduleScorer {
    /// Creates a scorer with the given multipliers.
    pub fn new(params: ScheduleParams, multipliers: [f64; 4]) -> Self {
        Self {
            params,
            multipliers,
        }
    }

    /// Creates a scorer using the multipliers from the algorithm params.
    pub fn from_params(params: &ScheduleParams, algorithm: &AlgorithmParams) -> Self {
        Self::new(params.clone(), algorithm.score_multipliers)
    }

    /// Weighted sum of a breakdown.
    pub fn weigh(&self, terms: &ScoreBreakdown) -> f64 {
        let [m0, m1, m2, m3] = self.multipliers;
        let mut score = m0 * terms.mandatory_rate - m1 * terms.hours_deviation;
        if self.params.reduce_days {
            score += m2 * terms.free_days;
        }
        if self.params.prioritize_unlocks {
            score += m3 * terms.importance;
        }
        score
    }
}

impl Scorer for ScheduleScorer {
    fn score(&self, schedule: &Schedule) -> f64 {
        self.weigh(&ScoreBreakdown::calculate(schedule, self.params.target_hours))
    }
}
