//! Duration-bucketed executor.
//!
//! A rolling dynamic-programming sweep over total weekly minutes.
//!
//! # Algorithm
//!
//! 1. Bucket width `step` = greatest common divisor of the classes' weekly
//!    minutes (a single distinct duration is its own step). Every sum of
//!    class durations is a multiple of `step`, so bucket `k` holds
//!    schedules totalling exactly `k · step` minutes. The empty schedule
//!    seeds bucket 0; the last bucket is `⌊target / step⌋`.
//! 2. For each bucket, in increasing order, and for each course: extend
//!    every schedule retained at bucket `k − minutes(class) / step` with
//!    one class of the course, unless the course or class is already
//!    present or the class conflicts with a chosen one.
//! 3. Keep the best `best_picked_from_each_step` new schedules per course
//!    and bucket, in descending score order.
//! 4. Drop buckets further back than the longest class (rolling window).
//!
//! Stops at the target bucket, on the budget, or on the deadline; results
//! come from the last bucket completed for every course. The sweep is
//! deterministic.
//!
//! Classes without lectures occupy no bucket and are never chosen.

use tracing::{debug, trace};

use super::base::{build_schedule, group_and_order_by_course, is_compatible};
use super::{Executor, SearchContext, Strategy};
use crate::error::Result;
use crate::models::{ClassId, CourseId, ScheduleKey, ScoredSchedule};

/// Dynamic programming over weekly-minute buckets.
#[derive(Debug, Clone, Copy, Default)]
pub struct DurationBucketedExecutor;

/// A partial schedule retained in a bucket.
#[derive(Debug, Clone)]
struct Partial {
    courses: Vec<CourseId>,
    key: ScheduleKey,
    scored: ScoredSchedule,
}

impl Partial {
    fn class_ids(&self) -> &[ClassId] {
        &self.scored.schedule.course_class_ids
    }
}

/// Bucket width: greatest common divisor of the positive durations.
///
/// Divides every duration and therefore every gap between two of them.
/// Returns `None` when there is no positive duration.
pub fn bucket_width(durations: &[u32]) -> Option<u32> {
    durations
        .iter()
        .copied()
        .filter(|&d| d > 0)
        .reduce(gcd)
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Inserts a partial keeping the list sorted by descending score and at
/// most `capacity` long. Equal scores keep insertion order; a schedule
/// already in the list is not inserted twice.
fn insert_bounded(list: &mut Vec<Partial>, partial: Partial, capacity: usize) {
    if capacity == 0 || list.iter().any(|p| p.key == partial.key) {
        return;
    }
    let position = list
        .iter()
        .position(|p| p.scored.score < partial.scored.score)
        .unwrap_or(list.len());
    if position >= capacity {
        return;
    }
    list.insert(position, partial);
    list.truncate(capacity);
}

impl DurationBucketedExecutor {
    /// Creates the executor.
    pub fn new() -> Self {
        Self
    }
}

impl Executor for DurationBucketedExecutor {
    fn strategy(&self) -> Strategy {
        Strategy::DurationBucketed
    }

    fn execute(&self, ctx: &mut SearchContext<'_>) -> Result<Vec<ScoredSchedule>> {
        let input = ctx.input;
        let capacity = ctx.algorithm_params.best_picked_from_each_step;
        let groups = group_and_order_by_course(input)?;

        // (class, minutes) per group; zero-minute classes cannot fill a bucket
        let mut candidates: Vec<Vec<(ClassId, u32)>> = Vec::with_capacity(groups.len());
        let mut durations = Vec::new();
        for group in &groups {
            let mut classes = Vec::with_capacity(group.len());
            for &class_id in &group.class_ids {
                let minutes = input.weekly_minutes(class_id)?;
                if minutes > 0 {
                    classes.push((class_id, minutes));
                    durations.push(minutes);
                }
            }
            candidates.push(classes);
        }

        let Some(step) = bucket_width(&durations) else {
            return Ok(Vec::new());
        };
        // exact: step divides every duration
        let units = |minutes: u32| (minutes / step) as usize;
        let max_units = durations.iter().map(|&m| units(m)).max().unwrap_or(1);
        let target_minutes = ctx.schedule_params.target_minutes();
        let last_bucket = (target_minutes / step) as usize;
        let window = max_units + 1;

        debug!(
            step,
            buckets = last_bucket,
            final_minutes = last_bucket as u32 * step,
            window,
            "duration-bucketed: sweep configured"
        );

        let seed = Partial {
            courses: Vec::new(),
            key: ScheduleKey::new(&[]),
            scored: ctx.scored(build_schedule(input, &[])?),
        };
        // frontier[k % window][group] = best partials reaching bucket k
        let mut frontier: Vec<Vec<Vec<Partial>>> = vec![vec![Vec::new(); groups.len()]; window];
        let mut last_completed: Option<usize> = None;

        'buckets: for bucket in 1..=last_bucket {
            if ctx.budget.should_stop() {
                break;
            }
            let slot = bucket % window;
            for list in frontier[slot].iter_mut() {
                list.clear();
            }

            for (gi, group) in groups.iter().enumerate() {
                let mut best: Vec<Partial> = Vec::new();

                for &(class_id, minutes) in &candidates[gi] {
                    let span = units(minutes);
                    if span > bucket {
                        continue;
                    }
                    let source = bucket - span;
                    let sources: Vec<&Partial> = if source == 0 {
                        vec![&seed]
                    } else {
                        frontier[source % window].iter().flatten().collect()
                    };

                    for partial in sources {
                        if !ctx.budget.try_consume() {
                            break 'buckets;
                        }
                        if partial.courses.contains(&group.course_id)
                            || partial.class_ids().contains(&class_id)
                            || !is_compatible(
                                partial.class_ids(),
                                class_id,
                                &input.incompatibilities,
                            )
                        {
                            continue;
                        }

                        let mut class_ids = partial.class_ids().to_vec();
                        class_ids.push(class_id);
                        let mut courses = partial.courses.clone();
                        courses.push(group.course_id);
                        let extended = Partial {
                            courses,
                            key: ScheduleKey::new(&class_ids),
                            scored: ctx.scored(build_schedule(input, &class_ids)?),
                        };
                        insert_bounded(&mut best, extended, capacity);
                    }
                }

                frontier[slot][gi] = best;
            }

            trace!(
                bucket,
                retained = frontier[slot].iter().map(Vec::len).sum::<usize>(),
                "duration-bucketed: bucket completed"
            );
            last_completed = Some(bucket);
        }

        let Some(bucket) = last_completed else {
            return Ok(Vec::new());
        };
        debug!(
            bucket,
            target = last_bucket,
            processed = ctx.budget.processed(),
            "duration-bucketed: reading results"
        );

        let mut results: Vec<ScoredSchedule> = Vec::new();
        let mut seen: Vec<ScheduleKey> = Vec::new();
        for partial in frontier[bucket % window].iter().flatten() {
            if !seen.contains(&partial.key) {
                seen.push(partial.key.clone());
                results.push(partial.scored.clone());
            }
        }
        Ok(results)
    }
}
