//! Academic program storage operations

use rusqlite::{params, Connection};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{format_date_opt, parse_date_opt, parse_uuid, OptionalExt};
use crate::error::Result;
use crate::models::AcademicProgram;

pub struct ProgramStore<'a> {
    conn: &'a Connection,
}

impl<'a> ProgramStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create a new program
    #[instrument(skip(self, program), fields(program_id = %program.id, school_id = %program.school_id))]
    pub fn create(&self, program: &AcademicProgram) -> Result<()> {
        self.conn.execute(
            "INSERT INTO academic_programs (id, school_id, name, program_type, begins_at, ends_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                program.id.to_string(),
                program.school_id.to_string(),
                program.name,
                program.program_type,
                format_date_opt(program.begins_at),
                format_date_opt(program.ends_at),
            ],
        )?;
        Ok(())
    }

    /// Find program by ID
    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<AcademicProgram>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, school_id, name, program_type, begins_at, ends_at
             FROM academic_programs WHERE id = ?1",
        )?;

        let program = stmt
            .query_row(params![id.to_string()], |row| {
                Ok(AcademicProgram {
                    id: parse_uuid(&row.get::<_, String>(0)?)?,
                    school_id: parse_uuid(&row.get::<_, String>(1)?)?,
                    name: row.get(2)?,
                    program_type: row.get(3)?,
                    begins_at: parse_date_opt(row.get::<_, Option<String>>(4)?)?,
                    ends_at: parse_date_opt(row.get::<_, Option<String>>(5)?)?,
                })
            })
            .optional()?;

        Ok(program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::School;
    use crate::storage::Database;
    use chrono::NaiveDate;

    #[test]
    fn test_program_round_trip() {
        let db = Database::open_in_memory().unwrap();
        let school = School::new("Riverside High".to_string());
        db.schools().create(&school).unwrap();

        let program = AcademicProgram::new(school.id, "Computer Science".to_string())
            .with_program_type("UG".to_string())
            .with_term(
                NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 4, 30).unwrap(),
            );
        db.programs().create(&program).unwrap();

        let found = db.programs().find_by_id(program.id).unwrap().unwrap();
        assert_eq!(found.school_id, school.id);
        assert_eq!(found.program_type.as_deref(), Some("UG"));
        assert_eq!(found.ends_at, program.ends_at);
    }

    #[test]
    fn test_program_requires_school() {
        let db = Database::open_in_memory().unwrap();
        let program = AcademicProgram::new(Uuid::new_v4(), "Orphan".to_string());
        assert!(db.programs().create(&program).is_err());
    }
}
