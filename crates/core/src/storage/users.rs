//! User storage operations

use rusqlite::{params, Connection};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{parse_uuid, role_from_u8, OptionalExt};
use crate::error::Result;
use crate::models::User;

pub struct UserStore<'a> {
    conn: &'a Connection,
}

impl<'a> UserStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create a new user together with their program memberships
    #[instrument(skip(self, user), fields(username = %user.username, role = %user.role))]
    pub fn create(&self, user: &User) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO users (id, username, role, subject) VALUES (?1, ?2, ?3, ?4)",
            params![
                user.id.to_string(),
                user.username,
                user.role as u8,
                user.subject,
            ],
        )?;
        for program_id in &user.academic_programs {
            tx.execute(
                "INSERT INTO user_programs (user_id, program_id) VALUES (?1, ?2)",
                params![user.id.to_string(), program_id.to_string()],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Find user by ID, academic programs included
    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, username, role, subject FROM users WHERE id = ?1")?;

        let user = stmt
            .query_row(params![id.to_string()], |row| {
                Ok(User {
                    id: parse_uuid(&row.get::<_, String>(0)?)?,
                    username: row.get(1)?,
                    role: role_from_u8(row.get::<_, u8>(2)?),
                    subject: row.get(3)?,
                    academic_programs: Vec::new(),
                })
            })
            .optional()?;

        match user {
            Some(mut user) => {
                user.academic_programs = self.list_programs(user.id)?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    /// Associate a user with an academic program
    #[instrument(skip(self))]
    pub fn add_program(&self, user_id: Uuid, program_id: Uuid) -> Result<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO user_programs (user_id, program_id) VALUES (?1, ?2)",
            params![user_id.to_string(), program_id.to_string()],
        )?;
        Ok(())
    }

    fn list_programs(&self, user_id: Uuid) -> Result<Vec<Uuid>> {
        let mut stmt = self.conn.prepare(
            "SELECT program_id FROM user_programs WHERE user_id = ?1 ORDER BY program_id",
        )?;

        let programs = stmt
            .query_map(params![user_id.to_string()], |row| {
                parse_uuid(&row.get::<_, String>(0)?)
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(programs)
    }
}
