//! Search parameters and engine configuration.
//!
//! [`ScheduleParams`] describes what the student asked for;
//! [`AlgorithmParams`] tunes the strategies. Both are plain values passed
//! to every search. [`EngineConfig`] bundles the strategy choice and its
//! tunables and can be loaded from TOML, where every field is optional:
//!
//! ```toml
//! strategy = "genetic"
//! max_execution_ms = 2000
//!
//! [algorithm]
//! generation_size = 120
//! score_multipliers = [10.0, 2.0, 3.5, 1.0]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::executor::Strategy;

/// What the student wants from the schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleParams {
    /// Desired weekly hours (> 0).
    pub target_hours: f64,
    /// Reward schedules that use fewer weekdays.
    pub reduce_days: bool,
    /// Reward courses that unlock many others.
    pub prioritize_unlocks: bool,
}

impl ScheduleParams {
    /// Creates params for a weekly hour target.
    pub fn new(target_hours: f64) -> Self {
        Self {
            target_hours,
            reduce_days: false,
            prioritize_unlocks: false,
        }
    }

    /// Sets the reduce-days flag.
    pub fn with_reduce_days(mut self, reduce_days: bool) -> Self {
        self.reduce_days = reduce_days;
        self
    }

    /// Sets the prioritize-unlocks flag.
    pub fn with_prioritize_unlocks(mut self, prioritize_unlocks: bool) -> Self {
        self.prioritize_unlocks = prioritize_unlocks;
        self
    }

    /// Target weekly minutes.
    pub fn target_minutes(&self) -> u32 {
        (self.target_hours * 60.0).round().max(0.0) as u32
    }
}

/// Strategy tunables. Unset fields take the documented defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlgorithmParams {
    /// Genetic: chromosomes per generation (default: 60).
    pub generation_size: usize,
    /// Genetic: generations to evolve (default: 80).
    pub generations: usize,
    /// Genetic: elite chromosomes kept from each generation (default: 5).
    pub best_picked_from_each_generation: usize,
    /// Genetic: per-gene re-randomization probability (default: 0.1).
    pub mutation_rate: f64,
    /// Genetic: per-gene swap probability in crossover (default: 0.5).
    pub crossover_swap_rate: f64,
    /// Genetic: probability that a no-worse candidate replaces the
    /// tournament leader (default: 0.5).
    pub tournament_replace_rate: f64,
    /// All: schedule-extension attempts allowed per search (default: 200 000).
    pub max_schedules_to_process: u64,
    /// Greedy: weekly hours may reach `target × rate` (default: 1.25).
    pub exceed_rate_limit: f64,
    /// Greedy: discard below-average extensions (default: true).
    pub pruning_enabled: bool,
    /// Greedy: course groups processed before pruning starts (default: 3).
    pub min_courses_processed_to_prune: usize,
    /// Greedy: schedules accumulated before pruning starts (default: 50).
    pub min_schedules_to_prune: usize,
    /// Greedy: only extensions above this many hours are pruned (default: 6.0).
    pub min_hours_to_prune: f64,
    /// Duration-bucketed: partial schedules kept per course and bucket (default: 8).
    pub best_picked_from_each_step: usize,
    /// Greedy: shuffle course groups before the search (default: false).
    pub shuffle_courses: bool,
    /// Greedy: leading groups left in place when shuffling (default: 2).
    pub shuffle_fixed_count: usize,
    /// Score multipliers `[m0, m1, m2, m3]` (default: `[10, 1.25, 3.5, 1]`).
    pub score_multipliers: [f64; 4],
    /// Cap on schedules returned because they tie for the top score (default: 20).
    pub max_amount_to_return: usize,
    /// RNG seed for reproducible randomized runs. `None` = OS entropy.
    pub seed: Option<u64>,
}

impl Default for AlgorithmParams {
    fn default() -> Self {
        Self {
            generation_size: 60,
            generations: 80,
            best_picked_from_each_generation: 5,
            mutation_rate: 0.1,
            crossover_swap_rate: 0.5,
            tournament_replace_rate: 0.5,
            max_schedules_to_process: 200_000,
            exceed_rate_limit: 1.25,
            pruning_enabled: true,
            min_courses_processed_to_prune: 3,
            min_schedules_to_prune: 50,
            min_hours_to_prune: 6.0,
            best_picked_from_each_step: 8,
            shuffle_courses: false,
            shuffle_fixed_count: 2,
            score_multipliers: [10.0, 1.25, 3.5, 1.0],
            max_amount_to_return: 20,
            seed: None,
        }
    }
}

impl AlgorithmParams {
    /// Sets the processing budget.
    pub fn with_max_schedules_to_process(mut self, max: u64) -> Self {
        self.max_schedules_to_process = max;
        self
    }

    /// Sets the genetic population size and generation count.
    pub fn with_generations(mut self, generation_size: usize, generations: usize) -> Self {
        self.generation_size = generation_size;
        self.generations = generations;
        self
    }

    /// Enables or disables greedy pruning.
    pub fn with_pruning(mut self, enabled: bool) -> Self {
        self.pruning_enabled = enabled;
        self
    }

    /// Enables greedy course shuffling, keeping `fixed` leading groups.
    pub fn with_shuffle(mut self, fixed: usize) -> Self {
        self.shuffle_courses = true;
        self.shuffle_fixed_count = fixed;
        self
    }

    /// Sets the bucket frontier size.
    pub fn with_best_picked_from_each_step(mut self, k: usize) -> Self {
        self.best_picked_from_each_step = k;
        self
    }

    /// Sets the score multipliers.
    pub fn with_score_multipliers(mut self, multipliers: [f64; 4]) -> Self {
        self.score_multipliers = multipliers;
        self
    }

    /// Sets the cap on tied schedules returned.
    pub fn with_max_amount_to_return(mut self, max: usize) -> Self {
        self.max_amount_to_return = max;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Engine-wide configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Strategy used by [`crate::scheduler::ScheduleOrchestrator::get_schedules`].
    pub strategy: Strategy,
    /// Wall-clock budget per search (ms).
    pub max_execution_ms: u64,
    /// Strategy tunables.
    pub algorithm: AlgorithmParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Greedy,
            max_execution_ms: 5_000,
            algorithm: AlgorithmParams::default(),
        }
    }
}

impl EngineConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    /// [`crate::ScheduleError::Config`] on malformed TOML or an unknown
    /// strategy name.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and parses a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Sets the strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the wall-clock budget.
    pub fn with_max_execution_ms(mut self, ms: u64) -> Self {
        self.max_execution_ms = ms;
        self
    }

    /// Sets the strategy tunables.
    pub fn with_algorithm(mut self, algorithm: AlgorithmParams) -> Self {
        self.algorithm = algorithm;
        self
    }
}
