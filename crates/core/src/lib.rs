//! Timetable Core Library
//!
//! Class hour generation and assignment for school timetables, with the
//! SQLite storage it runs against.

pub mod config;
pub mod error;
pub mod invariants;
pub mod models;
pub mod storage;
pub mod timetable;

pub use config::{EngineConfig, WindowAnchoring};
pub use error::{AssignmentError, Error, GenerationError, Result};
pub use models::*;
pub use storage::{
    ClassHourRepository, Database, ProgramRepository, SchoolRepository, Storage, UserRepository,
};
pub use timetable::TimetableEngine;
