//! Class hour storage operations

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Row};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{
    format_datetime, parse_datetime, parse_status, parse_uuid, parse_uuid_opt, OptionalExt,
};
use crate::error::Result;
use crate::models::ClassHour;

const SELECT_COLUMNS: &str =
    "SELECT id, academic_program_id, begins_at, ends_at, status, user_id, room_no, subject FROM class_hours";

fn class_hour_from_row(row: &Row<'_>) -> rusqlite::Result<ClassHour> {
    Ok(ClassHour {
        id: parse_uuid(&row.get::<_, String>(0)?)?,
        academic_program_id: parse_uuid(&row.get::<_, String>(1)?)?,
        begins_at: parse_datetime(&row.get::<_, String>(2)?)?,
        ends_at: parse_datetime(&row.get::<_, String>(3)?)?,
        status: parse_status(&row.get::<_, String>(4)?)?,
        user_id: parse_uuid_opt(row.get::<_, Option<String>>(5)?)?,
        room_no: row.get(6)?,
        subject: row.get(7)?,
    })
}

pub struct ClassHourStore<'a> {
    conn: &'a Connection,
}

impl<'a> ClassHourStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert a new class hour or overwrite the stored one with the same ID
    #[instrument(skip(self, class_hour), fields(class_hour_id = %class_hour.id, status = %class_hour.status))]
    pub fn save(&self, class_hour: &ClassHour) -> Result<()> {
        self.conn.execute(
            "INSERT INTO class_hours (id, academic_program_id, begins_at, ends_at, status, user_id, room_no, subject)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(id) DO UPDATE SET
                begins_at = excluded.begins_at,
                ends_at = excluded.ends_at,
                status = excluded.status,
                user_id = excluded.user_id,
                room_no = excluded.room_no,
                subject = excluded.subject",
            params![
                class_hour.id.to_string(),
                class_hour.academic_program_id.to_string(),
                format_datetime(&class_hour.begins_at),
                format_datetime(&class_hour.ends_at),
                class_hour.status.as_str(),
                class_hour.user_id.map(|u| u.to_string()),
                class_hour.room_no,
                class_hour.subject,
            ],
        )?;
        Ok(())
    }

    /// Find class hour by ID
    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<ClassHour>> {
        let mut stmt = self.conn.prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))?;

        let class_hour = stmt
            .query_row(params![id.to_string()], class_hour_from_row)
            .optional()?;

        Ok(class_hour)
    }

    /// All class hours of a program in chronological order
    #[instrument(skip(self))]
    pub fn list_for_program(&self, program_id: Uuid) -> Result<Vec<ClassHour>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SELECT_COLUMNS} WHERE academic_program_id = ?1 ORDER BY begins_at, rowid"
        ))?;

        let class_hours = stmt
            .query_map(params![program_id.to_string()], class_hour_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(class_hours)
    }

    /// Whether any class hour other than `exclude` holds `room_no` during an
    /// interval overlapping `[begins_at, ends_at)`
    #[instrument(skip(self))]
    pub fn exists_room_conflict(
        &self,
        room_no: u32,
        begins_at: NaiveDateTime,
        ends_at: NaiveDateTime,
        exclude: Uuid,
    ) -> Result<bool> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM class_hours
                WHERE room_no = ?1
                  AND begins_at < ?3
                  AND ends_at > ?2
                  AND id != ?4
             )",
            params![
                room_no,
                format_datetime(&begins_at),
                format_datetime(&ends_at),
                exclude.to_string(),
            ],
            |row| row.get(0),
        )?;
        Ok(exists)
    }
}
