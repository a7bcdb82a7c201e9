//! Error types for the timetable engine.
//!
//! Only two kinds of failure are faults: an input snapshot that violates
//! its own relations (corrupted input) and a configuration the engine
//! cannot honor. Running out of budget or finding no feasible schedule is
//! reported through an empty or partial result, never through an error.

use std::fmt;

use thiserror::Error;

use crate::validation::ValidationError;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Entity referenced by a relation map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Course,
    CourseClass,
    Lecture,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Course => "course",
            EntityKind::CourseClass => "course class",
            EntityKind::Lecture => "lecture",
        };
        f.write_str(name)
    }
}

/// Errors produced by the engine.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// A relation references an entity missing from its map, or an entity
    /// holds values the snapshot builder would have rejected.
    ///
    /// Fatal for the running search; the snapshot must be rebuilt upstream.
    #[error("Corrupted input: {entity} {id} is missing or malformed")]
    CorruptedInput { entity: EntityKind, id: u32 },

    /// The configured strategy name is not one of the supported executors.
    #[error("Unknown scheduling strategy: {0}")]
    UnknownStrategy(String),

    /// The catalog handed to the snapshot builder failed validation.
    #[error("Invalid input: {} validation error(s)", .0.len())]
    InvalidInput(Vec<ValidationError>),

    /// Configuration file could not be parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScheduleError {
    pub(crate) fn missing(entity: EntityKind, id: u32) -> Self {
        ScheduleError::CorruptedInput { entity, id }
    }

    /// Whether this error signals an inconsistent input snapshot.
    pub fn is_corrupted_input(&self) -> bool {
        matches!(self, ScheduleError::CorruptedInput { .. })
    }
}
