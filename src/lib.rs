//! Student timetable optimization.
//!
//! Given a term's catalog of courses, class sections, and lecture times,
//! searches for weekly schedules that pick at most one section per course,
//! never overlap or leave too little time to walk between buildings, and
//! score best on a weighted desirability function.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Course`, `CourseClass`, `Lecture`,
//!   `TimeRange`, `TravelTimeMatrix`, `Schedule`, and the immutable
//!   `ScheduleInputData` snapshot with its `IncompatibilityCache`
//! - **`executor`**: Search strategies (greedy-by-course, genetic,
//!   duration-bucketed) behind the `Executor` trait, plus the shared
//!   `SearchBudget`
//! - **`scheduler`**: `ScheduleOrchestrator` with unavailable-time filtering,
//!   deadline, scoring, ranking
//! - **`config`**: `ScheduleParams`, `AlgorithmParams`, `EngineConfig` (TOML)
//! - **`validation`**: Catalog integrity checks (duplicate IDs, dangling
//!   references, malformed times, correlative cycles)
//!
//! # Example
//!
//! ```
//! use u_timetable::config::{EngineConfig, ScheduleParams};
//! use u_timetable::models::{Course, CourseClass, Lecture, ScheduleInputDataBuilder, TimeRange};
//! use u_timetable::scheduler::{ScheduleOrchestrator, ScheduleRequest};
//!
//! let input = ScheduleInputDataBuilder::new()
//!     .with_mandatory_course(Course::new(1).with_credits(6))
//!     .with_mandatory_course(Course::new(2).with_credits(6))
//!     .with_class(CourseClass::new(10, 1))
//!     .with_class(CourseClass::new(20, 2))
//!     .with_lecture(Lecture::new(100, 10, TimeRange::at(0, (8, 0), (10, 0))))
//!     .with_lecture(Lecture::new(200, 20, TimeRange::at(1, (8, 0), (10, 0))))
//!     .build()
//!     .unwrap();
//!
//! let orchestrator = ScheduleOrchestrator::new(EngineConfig::default());
//! let request = ScheduleRequest::new(ScheduleParams::new(4.0), 3);
//! let schedules = orchestrator.get_schedules(&request, &input).unwrap();
//!
//! assert_eq!(schedules[0].schedule.course_class_ids.len(), 2);
//! ```
//!
//! # Logging
//!
//! The crate emits `tracing` events and never installs a subscriber.
//!
//! # References
//!
//! - Burke & Petrovic (2002), "Recent research directions in automated
//!   timetabling"
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization, and
//!   Machine Learning"

pub mod config;
pub mod error;
pub mod executor;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{Result, ScheduleError};
