//! User model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a school user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum UserRole {
    Admin = 1,
    Teacher = 2,
    Student = 3,
}

impl UserRole {
    pub fn display_name(&self) -> &'static str {
        match self {
            UserRole::Admin => "Admin",
            UserRole::Teacher => "Teacher",
            UserRole::Student => "Student",
        }
    }

    /// Only teachers can be allotted to a class hour
    pub fn can_teach(&self) -> bool {
        *self == UserRole::Teacher
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A school user; teachers carry a subject and the programs they teach in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub role: UserRole,
    pub subject: Option<String>,
    #[serde(default)]
    pub academic_programs: Vec<Uuid>,
}

impl User {
    pub fn new(username: String, role: UserRole) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            role,
            subject: None,
            academic_programs: Vec::new(),
        }
    }

    pub fn with_subject(mut self, subject: String) -> Self {
        self.subject = Some(subject);
        self
    }

    pub fn with_program(mut self, program_id: Uuid) -> Self {
        self.academic_programs.push(program_id);
        self
    }

    pub fn teaches_in(&self, program_id: Uuid) -> bool {
        self.academic_programs.contains(&program_id)
    }
}
