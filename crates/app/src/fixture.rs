//! TOML input files: seed fixtures and assignment batches

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use timetable_core::{
    AcademicProgram, ClassHourRequest, ProgramRepository, ScheduleConfig, School,
    SchoolRepository, Storage, User, UserRepository, UserRole,
};
use uuid::Uuid;

use crate::error::CliError;

/// A school with its programs and users
///
/// ```toml
/// [school]
/// name = "Riverside High"
///
/// [school.schedule]
/// opens_at = "08:00:00"
/// class_hours_per_day = 4
/// class_hour_length_minutes = 45
/// lunch_time = "11:15:00"
/// lunch_length_minutes = 30
/// break_time = "09:30:00"
/// break_length_minutes = 15
///
/// [[programs]]
/// name = "Computer Science"
/// program_type = "UG"
///
/// [[users]]
/// username = "mrs_curie"
/// role = "teacher"
/// subject = "Physics"
/// programs = ["Computer Science"]
/// ```
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub school: SchoolFixture,
    #[serde(default)]
    pub programs: Vec<ProgramFixture>,
    #[serde(default)]
    pub users: Vec<UserFixture>,
}

#[derive(Debug, Deserialize)]
pub struct SchoolFixture {
    pub name: String,
    pub schedule: Option<ScheduleConfig>,
}

#[derive(Debug, Deserialize)]
pub struct ProgramFixture {
    pub name: String,
    pub program_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserFixture {
    pub username: String,
    pub role: UserRole,
    pub subject: Option<String>,
    /// Program names, resolved against `programs`
    #[serde(default)]
    pub programs: Vec<String>,
}

/// Identifiers assigned while seeding
#[derive(Debug, Default)]
pub struct Seeded {
    pub school: Option<(String, Uuid)>,
    pub programs: Vec<(String, Uuid)>,
    pub users: Vec<(String, Uuid)>,
}

impl Fixture {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path).map_err(timetable_core::Error::from)?;
        toml::from_str(&content).map_err(|e| CliError::Input(format!("{}: {}", path.display(), e)))
    }

    /// Insert everything into storage, validating the schedule first
    pub fn apply<S: Storage>(&self, storage: &S) -> Result<Seeded, CliError> {
        let mut seeded = Seeded::default();

        let mut school = School::new(self.school.name.clone());
        if let Some(schedule) = &self.school.schedule {
            schedule.validate()?;
            school = school.with_schedule(schedule.clone());
        }
        storage.create_school(&school)?;
        seeded.school = Some((school.name.clone(), school.id));

        let mut by_name = HashMap::new();
        for entry in &self.programs {
            let mut program = AcademicProgram::new(school.id, entry.name.clone());
            program.program_type = entry.program_type.clone();
            storage.create_program(&program)?;
            by_name.insert(entry.name.as_str(), program.id);
            seeded.programs.push((program.name, program.id));
        }

        for entry in &self.users {
            let mut user = User::new(entry.username.clone(), entry.role);
            user.subject = entry.subject.clone();
            for name in &entry.programs {
                let id = by_name.get(name.as_str()).ok_or_else(|| {
                    CliError::Input(format!("user {} references unknown program {}", entry.username, name))
                })?;
                user.academic_programs.push(*id);
            }
            storage.create_user(&user)?;
            seeded.users.push((user.username, user.id));
        }

        Ok(seeded)
    }
}

/// A batch of `[[request]]` tables
#[derive(Debug, Deserialize)]
pub struct RequestBatch {
    #[serde(rename = "request", default)]
    pub requests: Vec<ClassHourRequest>,
}

impl RequestBatch {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path).map_err(timetable_core::Error::from)?;
        Self::parse(&content).map_err(|e| CliError::Input(format!("{}: {}", path.display(), e)))
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
