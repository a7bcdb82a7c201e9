//! Strategy dispatch, scoring, and ranking.
//!
//! [`ScheduleOrchestrator`] is the engine's entry point: it filters the
//! snapshot by the student's unavailable times, runs the configured
//! executor under a deadline, and ranks what comes back.
//!
//! # Score
//!
//! [`ScheduleScorer`] weighs four terms: mandatory rate, distance to the
//! hour target, free weekdays, and unlocked courses. See [`score`].
//!
//! # Ranking
//!
//! [`rank_schedules`] returns the requested number of distinct schedules,
//! more when several tie for the top score (up to a cap).

mod orchestrator;
pub mod ranking;
pub mod score;

pub use orchestrator::{ScheduleOrchestrator, ScheduleRequest};
pub use ranking::{rank_schedules, SCORE_EPSILON};
pub use score::{ScheduleScorer, ScoreBreakdown};
