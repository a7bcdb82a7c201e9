//! Ranking and truncation of search results.
//!
//! # Rules
//!
//! 1. Sort by score, descending. Equal scores are ordered by
//!    [`ScheduleKey`], so the output does not depend on executor order.
//! 2. Drop repeated schedules (same class set), keeping the first.
//! 3. `winners` = schedules tied with the top score, capped at
//!    `max_ties`.
//! 4. Return the first `max(requested, winners)` schedules.
//!
//! Scores within [`SCORE_EPSILON`] of each other count as tied.

use crate::models::{ScheduleKey, ScoredSchedule};

/// Tolerance for treating two scores as equal.
pub const SCORE_EPSILON: f64 = 1e-9;

/// Sorts, deduplicates, and truncates search results.
pub fn rank_schedules(
    results: Vec<ScoredSchedule>,
    requested: usize,
    max_ties: usize,
) -> Vec<ScoredSchedule> {
    let mut keyed: Vec<(ScheduleKey, ScoredSchedule)> = results
        .into_iter()
        .map(|scored| (scored.schedule.key(), scored))
        .collect();
    keyed.sort_by(|(ka, a), (kb, b)| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| ka.cmp(kb))
    });
    keyed.dedup_by(|(later, _), (earlier, _)| later == earlier);

    let Some(top) = keyed.first().map(|(_, s)| s.score) else {
        return Vec::new();
    };
    let winners = tie_count(keyed.iter().map(|(_, s)| s.score), top).min(max_ties);
    let keep = requested.max(winners);

    keyed
        .into_iter()
        .take(keep)
        .map(|(_, scored)| scored)
        .collect()
}

/// Number of leading scores tied with `top`.
fn tie_count(scores: impl Iterator<Item = f64>, top: f64) -> usize {
    scores.take_while(|&score| is_tied(score, top)).count()
}

fn is_tied(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() <= SCORE_EPSILON
}
