//! Academic program model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A course of study offered by a school; timetables are generated per program
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcademicProgram {
    pub id: Uuid,
    pub school_id: Uuid,
    pub name: String,
    /// Free-form program type, e.g. "UG" or "PG"
    pub program_type: Option<String>,
    pub begins_at: Option<NaiveDate>,
    pub ends_at: Option<NaiveDate>,
}

impl AcademicProgram {
    pub fn new(school_id: Uuid, name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            school_id,
            name,
            program_type: None,
            begins_at: None,
            ends_at: None,
        }
    }

    pub fn with_program_type(mut self, program_type: String) -> Self {
        self.program_type = Some(program_type);
        self
    }

    pub fn with_term(mut self, begins_at: NaiveDate, ends_at: NaiveDate) -> Self {
        self.begins_at = Some(begins_at);
        self.ends_at = Some(ends_at);
        self
    }
}
