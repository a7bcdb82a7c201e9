//! Schedule search strategies.
//!
//! Every strategy implements [`Executor`] and reads the same
//! [`SearchContext`]: the immutable input snapshot, the student's
//! [`ScheduleParams`], the [`AlgorithmParams`] tunables, a score function,
//! and the [`SearchBudget`] that ends the search. Executors return the
//! schedules they found unsorted; ranking belongs to the orchestrator.
//!
//! # Strategies
//!
//! | Strategy | Module | Randomized |
//! |----------|--------|------------|
//! | Greedy-by-course | [`greedy`] | only when shuffling |
//! | Genetic | [`genetic`] | yes |
//! | Duration-bucketed DP | [`bucketed`] | no |
//!
//! # Submodules
//!
//! - [`base`]: schedule building, compatibility checks, course grouping
//! - [`budget`]: deadline and combinations counter

pub mod base;
pub mod bucketed;
pub mod budget;
pub mod genetic;
pub mod greedy;

use std::fmt;
use std::str::FromStr;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

pub use base::{build_schedule, group_and_order_by_course, is_compatible, CourseGroup};
pub use bucketed::DurationBucketedExecutor;
pub use budget::{SearchBudget, StopReason};
pub use genetic::GeneticExecutor;
pub use greedy::GreedyExecutor;

use crate::config::{AlgorithmParams, ScheduleParams};
use crate::error::{Result, ScheduleError};
use crate::models::{Schedule, ScheduleInputData, ScoredSchedule};

/// Supported search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Grow schedules one course at a time.
    Greedy,
    /// Evolve one-gene-per-course chromosomes.
    Genetic,
    /// Dynamic programming over weekly-minute buckets.
    DurationBucketed,
}

impl Strategy {
    /// All strategies.
    pub const ALL: [Strategy; 3] = [
        Strategy::Greedy,
        Strategy::Genetic,
        Strategy::DurationBucketed,
    ];

    /// Configuration name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Greedy => "greedy",
            Strategy::Genetic => "genetic",
            Strategy::DurationBucketed => "duration_bucketed",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| ScheduleError::UnknownStrategy(s.to_string()))
    }
}

/// Scores a schedule (higher = better).
pub trait Scorer {
    fn score(&self, schedule: &Schedule) -> f64;
}

impl<F> Scorer for F
where
    F: Fn(&Schedule) -> f64,
{
    fn score(&self, schedule: &Schedule) -> f64 {
        self(schedule)
    }
}

/// Everything one search reads, plus its budget.
pub struct SearchContext<'a> {
    /// Snapshot being searched.
    pub input: &'a ScheduleInputData,
    /// Student preferences.
    pub schedule_params: &'a ScheduleParams,
    /// Strategy tunables.
    pub algorithm_params: &'a AlgorithmParams,
    /// Score function.
    pub scorer: &'a dyn Scorer,
    /// Deadline and combinations counter.
    pub budget: SearchBudget,
}

impl<'a> SearchContext<'a> {
    /// Creates a context.
    pub fn new(
        input: &'a ScheduleInputData,
        schedule_params: &'a ScheduleParams,
        algorithm_params: &'a AlgorithmParams,
        scorer: &'a dyn Scorer,
        budget: SearchBudget,
    ) -> Self {
        Self {
            input,
            schedule_params,
            algorithm_params,
            scorer,
            budget,
        }
    }

    /// Scores a schedule.
    #[inline]
    pub fn score(&self, schedule: &Schedule) -> f64 {
        self.scorer.score(schedule)
    }

    /// Scores a schedule and pairs the two.
    pub fn scored(&self, schedule: Schedule) -> ScoredSchedule {
        let score = self.score(&schedule);
        ScoredSchedule::new(schedule, score)
    }

    /// RNG for this search: seeded when a seed is configured.
    pub fn rng(&self) -> SmallRng {
        match self.algorithm_params.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        }
    }
}

/// A schedule search strategy.
///
/// Executors hold no per-search state: one instance serves every search,
/// and all mutable accumulators live inside [`Executor::execute`].
pub trait Executor: Send + Sync {
    /// Strategy this executor implements.
    fn strategy(&self) -> Strategy;

    /// Runs the search.
    ///
    /// Running out of budget is not an error: the schedules found so far
    /// are returned.
    ///
    /// # Errors
    /// [`ScheduleError::CorruptedInput`] if the snapshot is inconsistent.
    fn execute(&self, ctx: &mut SearchContext<'_>) -> Result<Vec<ScoredSchedule>>;
}
