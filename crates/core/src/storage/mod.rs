//! SQLite storage layer for timetables

mod class_hours;
mod migrations;
mod parse;
mod programs;
mod schools;
mod traits;
mod users;

use chrono::NaiveDateTime;
use rusqlite::Connection;
use std::path::Path;
use tracing::instrument;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{AcademicProgram, ClassHour, ScheduleConfig, School, User};

pub use class_hours::ClassHourStore;
pub use programs::ProgramStore;
pub use schools::SchoolStore;
pub use traits::{
    ClassHourRepository, ProgramRepository, SchoolRepository, Storage, UserRepository,
};
pub use users::UserStore;

/// Main database handle
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database at the given path
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open in-memory database (for testing)
    #[instrument]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        migrations::run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Get current schema version
    pub fn schema_version(&self) -> Result<u32> {
        migrations::current_version(&self.conn)
    }

    pub fn schools(&self) -> SchoolStore<'_> {
        SchoolStore::new(&self.conn)
    }

    pub fn programs(&self) -> ProgramStore<'_> {
        ProgramStore::new(&self.conn)
    }

    pub fn users(&self) -> UserStore<'_> {
        UserStore::new(&self.conn)
    }

    pub fn class_hours(&self) -> ClassHourStore<'_> {
        ClassHourStore::new(&self.conn)
    }
}

// Repository traits delegate to the stores so the engine can run against
// `Database` through the trait interface

impl SchoolRepository for Database {
    fn create_school(&self, school: &School) -> Result<()> {
        self.schools().create(school)
    }

    fn find_school_by_id(&self, id: Uuid) -> Result<Option<School>> {
        self.schools().find_by_id(id)
    }

    fn save_schedule(&self, school_id: Uuid, schedule: &ScheduleConfig) -> Result<()> {
        self.schools().save_schedule(school_id, schedule)
    }

    fn find_schedule_for_school(&self, school_id: Uuid) -> Result<Option<ScheduleConfig>> {
        self.schools().find_schedule(school_id)
    }
}

impl ProgramRepository for Database {
    fn create_program(&self, program: &AcademicProgram) -> Result<()> {
        self.programs().create(program)
    }

    fn find_program_by_id(&self, id: Uuid) -> Result<Option<AcademicProgram>> {
        self.programs().find_by_id(id)
    }
}

impl UserRepository for Database {
    fn create_user(&self, user: &User) -> Result<()> {
        self.users().create(user)
    }

    fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        self.users().find_by_id(id)
    }

    fn add_user_program(&self, user_id: Uuid, program_id: Uuid) -> Result<()> {
        self.users().add_program(user_id, program_id)
    }
}

impl ClassHourRepository for Database {
    fn save_class_hour(&self, class_hour: &ClassHour) -> Result<()> {
        self.class_hours().save(class_hour)
    }

    fn find_class_hour_by_id(&self, id: Uuid) -> Result<Option<ClassHour>> {
        self.class_hours().find_by_id(id)
    }

    fn list_class_hours_for_program(&self, program_id: Uuid) -> Result<Vec<ClassHour>> {
        self.class_hours().list_for_program(program_id)
    }

    fn exists_conflicting_room_booking(
        &self,
        room_no: u32,
        begins_at: NaiveDateTime,
        ends_at: NaiveDateTime,
        exclude: Uuid,
    ) -> Result<bool> {
        self.class_hours()
            .exists_room_conflict(room_no, begins_at, ends_at, exclude)
    }
}
