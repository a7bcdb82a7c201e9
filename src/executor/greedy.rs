//! Greedy-by-course executor.
//!
//! # Algorithm
//!
//! 1. Group viable classes by course, mandatory courses first
//!    (optionally shuffling every group after the first K).
//! 2. For each course group, compute the average score of the schedules
//!    accumulated so far.
//! 3. For each class of the group:
//!    - start a new single-class schedule;
//!    - extend every accumulated schedule with the class when the weekly
//!      hours stay within `target × exceed_rate_limit` and the class is
//!      compatible with everything already chosen.
//! 4. Drop below-average extensions once pruning conditions hold.
//! 5. Merge the group's new schedules into the accumulated set only after
//!    the whole group is processed.
//!
//! Stops on the deadline, on the combinations budget, or after the last
//! group. Without shuffling the search is deterministic.
//!
//! # Complexity
//! O(g · c · s) attempts for g groups of c classes over s accumulated
//! schedules; the combinations budget bounds s in practice.

use rand::seq::SliceRandom;
use tracing::debug;

use super::base::{build_schedule, group_and_order_by_course, is_compatible};
use super::{Executor, SearchContext, Strategy};
use crate::config::AlgorithmParams;
use crate::error::Result;
use crate::models::ScoredSchedule;

/// Grows schedules one course at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyExecutor;

impl GreedyExecutor {
    /// Creates the executor.
    pub fn new() -> Self {
        Self
    }

    /// Whether a freshly extended schedule is discarded.
    fn should_prune(
        params: &AlgorithmParams,
        processed_courses: usize,
        population: usize,
        candidate: &ScoredSchedule,
        average: f64,
    ) -> bool {
        params.pruning_enabled
            && processed_courses >= params.min_courses_processed_to_prune
            && population >= params.min_schedules_to_prune
            && candidate.schedule.total_hours > params.min_hours_to_prune
            && candidate.score < average
    }
}

fn average_score(schedules: &[ScoredSchedule]) -> f64 {
    if schedules.is_empty() {
        return 0.0;
    }
    schedules.iter().map(|s| s.score).sum::<f64>() / schedules.len() as f64
}

impl Executor for GreedyExecutor {
    fn strategy(&self) -> Strategy {
        Strategy::Greedy
    }

    fn execute(&self, ctx: &mut SearchContext<'_>) -> Result<Vec<ScoredSchedule>> {
        let input = ctx.input;
        let params = ctx.algorithm_params;

        let mut groups = group_and_order_by_course(input)?;
        if params.shuffle_courses {
            let fixed = params.shuffle_fixed_count.min(groups.len());
            groups[fixed..].shuffle(&mut ctx.rng());
        }

        let max_minutes = ctx.schedule_params.target_hours * 60.0 * params.exceed_rate_limit;
        let mut valid: Vec<ScoredSchedule> = Vec::new();

        for (processed_courses, group) in groups.iter().enumerate() {
            if ctx.budget.should_stop() {
                break;
            }

            let average = average_score(&valid);
            let mut fresh: Vec<ScoredSchedule> = Vec::new();
            let mut pruned = 0usize;
            let mut exhausted = false;

            'classes: for &class_id in &group.class_ids {
                if !ctx.budget.try_consume() {
                    exhausted = true;
                    break;
                }
                let class_minutes = input.weekly_minutes(class_id)?;
                fresh.push(ctx.scored(build_schedule(input, &[class_id])?));

                for existing in &valid {
                    if !ctx.budget.try_consume() {
                        exhausted = true;
                        break 'classes;
                    }
                    let minutes = existing.schedule.total_minutes + class_minutes;
                    if f64::from(minutes) > max_minutes
                        || !is_compatible(
                            &existing.schedule.course_class_ids,
                            class_id,
                            &input.incompatibilities,
                        )
                    {
                        continue;
                    }

                    let mut class_ids = existing.schedule.course_class_ids.clone();
                    class_ids.push(class_id);
                    let candidate = ctx.scored(build_schedule(input, &class_ids)?);

                    if Self::should_prune(params, processed_courses, valid.len(), &candidate, average)
                    {
                        pruned += 1;
                        continue;
                    }
                    fresh.push(candidate);
                }
            }

            debug!(
                course = group.course_id,
                added = fresh.len(),
                pruned,
                total = valid.len() + fresh.len(),
                "greedy: course group processed"
            );
            valid.extend(fresh);

            if exhausted {
                break;
            }
        }

        Ok(valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScheduleParams;
    use crate::executor::test_support::{crowded, two_by_two};
    use crate::executor::{Scorer, SearchBudget};
    use crate::models::{Schedule, ScheduleInputData};

    fn run_with(
        input: &ScheduleInputData,
        target_hours: f64,
        params: &AlgorithmParams,
        scorer: &dyn Scorer,
    ) -> Vec<ScoredSchedule> {
        let schedule_params = ScheduleParams::new(target_hours);
        let mut ctx = SearchContext::new(
            input,
            &schedule_params,
            params,
            scorer,
            SearchBudget::new(params.max_schedules_to_process, None),
        );
        GreedyExecutor::new().execute(&mut ctx).unwrap()
    }

    fn run(
        input: &ScheduleInputData,
        target_hours: f64,
        params: &AlgorithmParams,
    ) -> Vec<ScoredSchedule> {
        let scorer = move |s: &Schedule| -(target_hours - s.total_hours).abs();
        run_with(input, target_hours, params, &scorer)
    }

    #[test]
    fn test_two_by_two_finds_all_pairs() {
        let input = two_by_two();
        let results = run(&input, 4.0, &AlgorithmParams::default());

        let pairs: Vec<_> = results.iter().filter(|s| s.schedule.len() == 2).collect();
        assert_eq!(pairs.len(), 4);
        assert!(pairs.iter().all(|s| (s.schedule.total_hours - 4.0).abs() < 1e-10));
        // Four singles as well
        assert_eq!(results.len(), 8);
    }

    #[test]
    fn test_hours_limit() {
        let input = two_by_two();
        // 2h target × 1.25 = 2.5h: no pair fits
        let results = run(&input, 2.0, &AlgorithmParams::default());
        assert!(results.iter().all(|s| s.schedule.len() == 1));
    }

    #[test]
    fn test_no_conflicts() {
        let input = crowded();
        let results = run(&input, 12.0, &AlgorithmParams::default());
        assert!(!results.is_empty());

        for scored in &results {
            let ids = &scored.schedule.course_class_ids;
            for (i, &a) in ids.iter().enumerate() {
                for &b in &ids[i + 1..] {
                    assert!(!input.incompatibilities.are_incompatible(a, b));
                    assert_ne!(input.course_of(a).unwrap(), input.course_of(b).unwrap());
                }
            }
        }
    }

    #[test]
    fn test_budget_respected() {
        let input = crowded();
        let params = AlgorithmParams::default().with_max_schedules_to_process(25);
        let schedule_params = ScheduleParams::new(12.0);
        let scorer = |s: &Schedule| s.total_hours;
        let mut ctx = SearchContext::new(
            &input,
            &schedule_params,
            &params,
            &scorer,
            SearchBudget::new(25, None),
        );

        let results = GreedyExecutor::new().execute(&mut ctx).unwrap();
        assert!(ctx.budget.processed() <= 25);
        assert!(!results.is_empty());
    }

    #[test]
    fn test_zero_budget_is_empty() {
        let input = crowded();
        let params = AlgorithmParams::default().with_max_schedules_to_process(0);
        assert!(run(&input, 12.0, &params).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let input = crowded();
        let params = AlgorithmParams::default();
        let a = run(&input, 10.0, &params);
        let b = run(&input, 10.0, &params);
        assert_eq!(a, b);
    }

    #[test]
    fn test_pruning_drops_below_average() {
        let input = crowded();
        let eager = AlgorithmParams {
            min_courses_processed_to_prune: 1,
            min_schedules_to_prune: 1,
            min_hours_to_prune: 0.0,
            ..AlgorithmParams::default()
        };
        // Longer schedules score lower, so every extension falls below the
        // running average of the shorter ones
        let shorter_is_better = |s: &Schedule| -s.total_hours;
        let pruned = run_with(&input, 12.0, &eager, &shorter_is_better);
        let full = run_with(
            &input,
            12.0,
            &AlgorithmParams::default().with_pruning(false),
            &shorter_is_better,
        );
        assert!(pruned.len() < full.len());
        assert!(pruned.iter().all(|s| s.schedule.len() == 1));
    }

    #[test]
    fn test_shuffle_keeps_fixed_prefix() {
        let input = crowded();
        let params = AlgorithmParams::default().with_shuffle(5).with_seed(3);
        // Every group fixed: same as no shuffle
        let shuffled = run(&input, 10.0, &params);
        let plain = run(&input, 10.0, &AlgorithmParams::default());
        assert_eq!(shuffled, plain);
    }
}
