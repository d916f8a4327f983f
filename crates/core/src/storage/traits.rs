//! Storage repository traits
//!
//! These are the only operations the timetable engine needs from
//! persistence. The SQLite [`Database`](super::Database) implements all of
//! them; tests can substitute their own implementations.

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{AcademicProgram, ClassHour, ScheduleConfig, School, User};

/// School and schedule repository operations
pub trait SchoolRepository {
    /// Create a new school (and its schedule, if set)
    fn create_school(&self, school: &School) -> Result<()>;

    /// Find school by ID
    fn find_school_by_id(&self, id: Uuid) -> Result<Option<School>>;

    /// Insert or replace a school's schedule
    fn save_schedule(&self, school_id: Uuid, schedule: &ScheduleConfig) -> Result<()>;

    /// Schedule configured for a school
    fn find_schedule_for_school(&self, school_id: Uuid) -> Result<Option<ScheduleConfig>>;
}

/// Academic program repository operations
pub trait ProgramRepository {
    /// Create a new program
    fn create_program(&self, program: &AcademicProgram) -> Result<()>;

    /// Find program by ID
    fn find_program_by_id(&self, id: Uuid) -> Result<Option<AcademicProgram>>;
}

/// User repository operations
pub trait UserRepository {
    /// Create a new user
    fn create_user(&self, user: &User) -> Result<()>;

    /// Find user by ID
    fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>>;

    /// Associate a user with a program
    fn add_user_program(&self, user_id: Uuid, program_id: Uuid) -> Result<()>;
}

/// Class hour repository operations
pub trait ClassHourRepository {
    /// Persist a generated or mutated class hour
    fn save_class_hour(&self, class_hour: &ClassHour) -> Result<()>;

    /// Find class hour by ID
    fn find_class_hour_by_id(&self, id: Uuid) -> Result<Option<ClassHour>>;

    /// All class hours of a program, in chronological order
    fn list_class_hours_for_program(&self, program_id: Uuid) -> Result<Vec<ClassHour>>;

    /// Half-open overlap test scoped to a room, ignoring the class hour `exclude`
    fn exists_conflicting_room_booking(
        &self,
        room_no: u32,
        begins_at: NaiveDateTime,
        ends_at: NaiveDateTime,
        exclude: Uuid,
    ) -> Result<bool>;
}

/// Combined storage interface
pub trait Storage: SchoolRepository + ProgramRepository + UserRepository + ClassHourRepository {}

// Blanket implementation: any type implementing all traits implements Storage
impl<T> Storage for T where
    T: SchoolRepository + ProgramRepository + UserRepository + ClassHourRepository
{
}
