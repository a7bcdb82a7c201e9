//! Schedule orchestrator.
//!
//! # Flow
//!
//! 1. Remove classes that meet during the student's unavailable times.
//! 2. Deadline = now + `max_execution_ms`.
//! 3. Dispatch to the configured strategy with the weighted score.
//! 4. Rank: sort, drop repeats, keep `max(requested, winners)`.
//!
//! The orchestrator owns one executor per [`Strategy`]. Executors are
//! stateless, so a single orchestrator can serve any number of requests.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::ranking::rank_schedules;
use super::score::ScheduleScorer;
use crate::config::{AlgorithmParams, EngineConfig, ScheduleParams};
use crate::error::{Result, ScheduleError};
use crate::executor::{
    DurationBucketedExecutor, Executor, GeneticExecutor, GreedyExecutor, SearchBudget,
    SearchContext, StopReason, Strategy,
};
use crate::models::{ScheduleInputData, ScoredSchedule, TimeRange};

/// One student's request.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRequest {
    /// Target hours and preference flags.
    pub params: ScheduleParams,
    /// Times the student cannot attend.
    pub unavailable_times: Vec<TimeRange>,
    /// Schedules wanted (more are returned when they tie for the top).
    pub amount: usize,
    /// Log the search summary at `info` level.
    pub debug: bool,
}

impl ScheduleRequest {
    /// Creates a request for `amount` schedules.
    pub fn new(params: ScheduleParams, amount: usize) -> Self {
        Self {
            params,
            unavailable_times: Vec::new(),
            amount,
            debug: false,
        }
    }

    /// Adds an unavailable time range.
    pub fn with_unavailable(mut self, range: TimeRange) -> Self {
        self.unavailable_times.push(range);
        self
    }

    /// Sets the debug flag.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Entry point of the engine.
///
/// # Example
///
/// ```
/// use u_timetable::config::{EngineConfig, ScheduleParams};
/// use u_timetable::models::{Course, CourseClass, Lecture, ScheduleInputDataBuilder, TimeRange};
/// use u_timetable::scheduler::{ScheduleOrchestrator, ScheduleRequest};
///
/// let input = ScheduleInputDataBuilder::new()
///     .with_mandatory_course(Course::new(1).with_credits(6))
///     .with_class(CourseClass::new(10, 1))
///     .with_lecture(Lecture::new(100, 10, TimeRange::at(0, (8, 0), (10, 0))))
///     .build()
///     .unwrap();
///
/// let orchestrator = ScheduleOrchestrator::new(EngineConfig::default());
/// let request = ScheduleRequest::new(ScheduleParams::new(2.0), 1);
/// let schedules = orchestrator.get_schedules(&request, &input).unwrap();
/// assert_eq!(schedules[0].schedule.course_class_ids, vec![10]);
/// ```
pub struct ScheduleOrchestrator {
    config: EngineConfig,
    executors: HashMap<Strategy, Box<dyn Executor>>,
}

impl ScheduleOrchestrator {
    /// Creates an orchestrator with every built-in strategy registered.
    pub fn new(config: EngineConfig) -> Self {
        let mut orchestrator = Self {
            config,
            executors: HashMap::new(),
        };
        orchestrator.register(Box::new(GreedyExecutor::new()));
        orchestrator.register(Box::new(GeneticExecutor::new()));
        orchestrator.register(Box::new(DurationBucketedExecutor::new()));
        orchestrator
    }

    /// Registers an executor, replacing the one for the same strategy.
    pub fn register(&mut self, executor: Box<dyn Executor>) {
        self.executors.insert(executor.strategy(), executor);
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs one strategy and returns its results unsorted.
    ///
    /// `deadline = None` leaves only the combinations budget.
    ///
    /// # Errors
    /// - [`ScheduleError::UnknownStrategy`] if no executor is registered
    /// - [`ScheduleError::CorruptedInput`] if the snapshot is inconsistent
    pub fn search(
        &self,
        strategy: Strategy,
        algorithm_params: &AlgorithmParams,
        schedule_params: &ScheduleParams,
        input: &ScheduleInputData,
        deadline: Option<Instant>,
        debug: bool,
    ) -> Result<Vec<ScoredSchedule>> {
        let executor = self
            .executors
            .get(&strategy)
            .ok_or_else(|| ScheduleError::UnknownStrategy(strategy.to_string()))?;

        let scorer = ScheduleScorer::from_params(schedule_params, algorithm_params);
        let budget = SearchBudget::new(algorithm_params.max_schedules_to_process, deadline);
        let mut ctx = SearchContext::new(input, schedule_params, algorithm_params, &scorer, budget);

        let started = Instant::now();
        let results = executor.execute(&mut ctx)?;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        let processed = ctx.budget.processed();

        if debug {
            info!(
                %strategy,
                classes = input.class_count(),
                processed,
                found = results.len(),
                elapsed_ms,
                "search finished"
            );
        } else {
            debug!(
                %strategy,
                classes = input.class_count(),
                processed,
                found = results.len(),
                elapsed_ms,
                "search finished"
            );
        }
        match ctx.budget.stop_reason() {
            Some(StopReason::Deadline) => {
                warn!(%strategy, processed, "search stopped at the deadline");
            }
            Some(StopReason::Combinations) => {
                debug!(%strategy, processed, "search spent its combinations budget");
            }
            None => {}
        }

        Ok(results)
    }

    /// Full request flow: filter, search with the configured strategy, rank.
    ///
    /// # Errors
    /// [`ScheduleError::CorruptedInput`] if the snapshot is inconsistent.
    pub fn get_schedules(
        &self,
        request: &ScheduleRequest,
        input: &ScheduleInputData,
    ) -> Result<Vec<ScoredSchedule>> {
        let filtered = input.without_unavailable(&request.unavailable_times)?;
        debug!(
            removed = input.class_count() - filtered.class_count(),
            "unavailable times applied"
        );

        let deadline = Instant::now() + Duration::from_millis(self.config.max_execution_ms);
        let results = self.search(
            self.config.strategy,
            &self.config.algorithm,
            &request.params,
            &filtered,
            Some(deadline),
            request.debug,
        )?;

        Ok(rank_schedules(
            results,
            request.amount,
            self.config.algorithm.max_amount_to_return,
        ))
    }
}
