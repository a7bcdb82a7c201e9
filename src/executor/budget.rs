//! Cooperative search budget.
//!
//! A search may stop for two reasons: the wall-clock deadline passed, or
//! it attempted as many schedule extensions as it was allowed. Executors
//! ask the budget before every attempt and wind down gracefully when it
//! refuses, returning what they have accumulated.

use std::time::{Duration, Instant};

/// Why a search stopped before finishing its own loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The absolute deadline passed.
    Deadline,
    /// The combinations budget was spent.
    Combinations,
}

/// Deadline and combinations counter for one search.
#[derive(Debug, Clone)]
pub struct SearchBudget {
    deadline: Option<Instant>,
    max_processed: u64,
    processed: u64,
    stop_reason: Option<StopReason>,
}

impl SearchBudget {
    /// Creates a budget. `deadline = None` means budget-only termination.
    pub fn new(max_processed: u64, deadline: Option<Instant>) -> Self {
        Self {
            deadline,
            max_processed,
            processed: 0,
            stop_reason: None,
        }
    }

    /// A budget that never runs out.
    pub fn unlimited() -> Self {
        Self::new(u64::MAX, None)
    }

    /// Creates a budget whose deadline is `timeout` from now.
    pub fn with_timeout(max_processed: u64, timeout: Duration) -> Self {
        Self::new(max_processed, Some(Instant::now() + timeout))
    }

    /// Whether the search must stop now. Checked at the top of outer loops.
    pub fn should_stop(&mut self) -> bool {
        if self.stop_reason.is_some() {
            return true;
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                self.stop_reason = Some(StopReason::Deadline);
                return true;
            }
        }
        if self.processed >= self.max_processed {
            self.stop_reason = Some(StopReason::Combinations);
            return true;
        }
        false
    }

    /// Claims one extension attempt.
    ///
    /// Returns `false`, without counting, once the budget is spent.
    pub fn try_consume(&mut self) -> bool {
        if self.should_stop() {
            return false;
        }
        self.processed += 1;
        true
    }

    /// Extension attempts claimed so far.
    pub fn processed(&self) -> u64 {
        self.processed
    }

    /// Reason the search stopped, if it did.
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }
}
