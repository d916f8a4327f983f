//! Error types for the timetable core

use chrono::NaiveDateTime;
use thiserror::Error;
use uuid::Uuid;

/// Infrastructure errors raised by storage and configuration
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failures of timetable generation for an academic program
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Academic program {0} not found")]
    ProgramNotFound(Uuid),

    #[error("School {0} has no schedule configured")]
    NoScheduleConfigured(Uuid),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error(transparent)]
    Storage(#[from] Error),
}

impl GenerationError {
    /// Stable identifier for mapping to client-facing messages
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::ProgramNotFound(_) => "program_not_found",
            GenerationError::NoScheduleConfigured(_) => "no_schedule_configured",
            GenerationError::InvalidSchedule(_) => "invalid_schedule",
            GenerationError::Storage(_) => "storage",
        }
    }
}

/// Failures of a class-hour assignment request
#[derive(Error, Debug)]
pub enum AssignmentError {
    #[error("Class hour {0} not found")]
    SlotNotFound(Uuid),

    #[error("User {0} not found")]
    TeacherNotFound(Uuid),

    #[error("User {0} is not a teacher; only teachers can be allotted to a class hour")]
    InvalidRole(Uuid),

    #[error("Teacher {user_id} is not part of academic program {program_id}")]
    ProgramMismatch { user_id: Uuid, program_id: Uuid },

    #[error("Room {room_no} is already booked between {begins_at} and {ends_at}")]
    RoomTimeConflict {
        room_no: u32,
        begins_at: NaiveDateTime,
        ends_at: NaiveDateTime,
    },

    #[error(transparent)]
    Storage(#[from] Error),
}

impl AssignmentError {
    /// Stable identifier for mapping to client-facing messages
    pub fn kind(&self) -> &'static str {
        match self {
            AssignmentError::SlotNotFound(_) => "slot_not_found",
            AssignmentError::TeacherNotFound(_) => "teacher_not_found",
            AssignmentError::InvalidRole(_) => "invalid_role",
            AssignmentError::ProgramMismatch { .. } => "program_mismatch",
            AssignmentError::RoomTimeConflict { .. } => "room_time_conflict",
            AssignmentError::Storage(_) => "storage",
        }
    }
}
