//! Timetable engine: slot generation and class hour assignment

pub mod assignment;
pub mod generator;

use chrono::{Local, NaiveDate};
use tracing::instrument;
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::{AssignmentError, GenerationError, Result};
use crate::models::{ClassHour, ClassHourRequest};
use crate::storage::Storage;

pub use assignment::{assign_class_hours, assign_one};
pub use generator::{generate_slots, generate_timetable, SlotGenerator, DAYS_PER_CYCLE};

/// Entry point binding a storage backend to the engine settings
pub struct TimetableEngine<S> {
    storage: S,
    config: EngineConfig,
}

impl<S: Storage> TimetableEngine<S> {
    pub fn new(storage: S, config: EngineConfig) -> Self {
        Self { storage, config }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Generate this week's class hours for a program, starting today
    pub fn generate_timetable(&self, program_id: Uuid) -> std::result::Result<Vec<ClassHour>, GenerationError> {
        self.generate_timetable_from(program_id, Local::now().date_naive())
    }

    /// Generate class hours for a program, starting on `start`
    #[instrument(skip(self))]
    pub fn generate_timetable_from(
        &self,
        program_id: Uuid,
        start: NaiveDate,
    ) -> std::result::Result<Vec<ClassHour>, GenerationError> {
        generate_timetable(&self.storage, &self.config, program_id, start)
    }

    /// Allot teachers and rooms to class hours, in request order
    pub fn assign_class_hours(
        &self,
        requests: &[ClassHourRequest],
    ) -> std::result::Result<Vec<ClassHour>, AssignmentError> {
        assign_class_hours(&self.storage, requests)
    }

    /// Stored class hours of a program in chronological order
    pub fn timetable(&self, program_id: Uuid) -> Result<Vec<ClassHour>> {
        self.storage.list_class_hours_for_program(program_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    use crate::config::WindowAnchoring;
    use crate::models::{AcademicProgram, ClassStatus, ScheduleConfig, School, User, UserRole};
    use crate::storage::{Database, ProgramRepository, SchoolRepository, UserRepository};

    fn schedule() -> ScheduleConfig {
        ScheduleConfig {
            opens_at: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            class_hours_per_day: 3,
            class_hour_length_minutes: 60,
            lunch_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            lunch_length_minutes: 45,
            break_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            break_length_minutes: 15,
        }
    }

    #[test]
    fn test_generate_then_assign() {
        let db = Database::open_in_memory().unwrap();
        let school = School::new("Hillcrest".to_string()).with_schedule(schedule());
        db.create_school(&school).unwrap();
        let program = AcademicProgram::new(school.id, "Literature".to_string());
        db.create_program(&program).unwrap();
        let teacher = User::new("ms_austen".to_string(), UserRole::Teacher)
            .with_subject("English".to_string());
        db.create_user(&teacher).unwrap();
        db.add_user_program(teacher.id, program.id).unwrap();

        let config = EngineConfig {
            window_anchoring: WindowAnchoring::PerDay,
            ..EngineConfig::default()
        };
        let engine = TimetableEngine::new(db, config);

        let start = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();
        let slots = engine.generate_timetable_from(program.id, start).unwrap();
        assert_eq!(slots.len(), 6 * 5);

        let teaching: Vec<_> = slots
            .iter()
            .filter(|s| s.status == ClassStatus::NotScheduled)
            .take(2)
            .map(|s| ClassHourRequest {
                class_hour_id: s.id,
                user_id: teacher.id,
                room_no: 12,
            })
            .collect();
        engine.assign_class_hours(&teaching).unwrap();

        let stored = engine.timetable(program.id).unwrap();
        assert_eq!(stored.len(), 30);
        assert_eq!(stored.iter().filter(|s| s.is_assigned()).count(), 2);
    }
}
