//! School and schedule storage operations

use rusqlite::{params, Connection};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{format_time, parse_time, parse_uuid, OptionalExt};
use crate::error::Result;
use crate::models::{ScheduleConfig, School};

pub struct SchoolStore<'a> {
    conn: &'a Connection,
}

impl<'a> SchoolStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create a school, along with its schedule when present
    #[instrument(skip(self, school), fields(school_id = %school.id, name = %school.name))]
    pub fn create(&self, school: &School) -> Result<()> {
        self.conn.execute(
            "INSERT INTO schools (id, name) VALUES (?1, ?2)",
            params![school.id.to_string(), school.name],
        )?;

        if let Some(schedule) = &school.schedule {
            self.save_schedule(school.id, schedule)?;
        }
        Ok(())
    }

    /// Find school by ID, schedule included
    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<School>> {
        let school = self
            .conn
            .query_row(
                "SELECT id, name FROM schools WHERE id = ?1",
                params![id.to_string()],
                |row| {
                    Ok(School {
                        id: parse_uuid(&row.get::<_, String>(0)?)?,
                        name: row.get(1)?,
                        schedule: None,
                    })
                },
            )
            .optional()?;

        match school {
            Some(mut school) => {
                school.schedule = self.find_schedule(school.id)?;
                Ok(Some(school))
            }
            None => Ok(None),
        }
    }

    /// Insert or replace the schedule of a school
    #[instrument(skip(self, schedule))]
    pub fn save_schedule(&self, school_id: Uuid, schedule: &ScheduleConfig) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO schedules (
                school_id, opens_at, class_hours_per_day, class_hour_length_minutes,
                lunch_time, lunch_length_minutes, break_time, break_length_minutes
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                school_id.to_string(),
                format_time(&schedule.opens_at),
                schedule.class_hours_per_day,
                schedule.class_hour_length_minutes,
                format_time(&schedule.lunch_time),
                schedule.lunch_length_minutes,
                format_time(&schedule.break_time),
                schedule.break_length_minutes,
            ],
        )?;
        Ok(())
    }

    /// Schedule of a school, if one was configured
    #[instrument(skip(self))]
    pub fn find_schedule(&self, school_id: Uuid) -> Result<Option<ScheduleConfig>> {
        let mut stmt = self.conn.prepare(
            "SELECT opens_at, class_hours_per_day, class_hour_length_minutes,
                    lunch_time, lunch_length_minutes, break_time, break_length_minutes
             FROM schedules WHERE school_id = ?1",
        )?;

        let schedule = stmt
            .query_row(params![school_id.to_string()], |row| {
                Ok(ScheduleConfig {
                    opens_at: parse_time(&row.get::<_, String>(0)?)?,
                    class_hours_per_day: row.get(1)?,
                    class_hour_length_minutes: row.get(2)?,
                    lunch_time: parse_time(&row.get::<_, String>(3)?)?,
                    lunch_length_minutes: row.get(4)?,
                    break_time: parse_time(&row.get::<_, String>(5)?)?,
                    break_length_minutes: row.get(6)?,
                })
            })
            .optional()?;

        Ok(schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;
    use chrono::NaiveTime;

    fn schedule() -> ScheduleConfig {
        ScheduleConfig {
            opens_at: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            class_hours_per_day: 5,
            class_hour_length_minutes: 50,
            lunch_time: NaiveTime::from_hms_opt(12, 10, 0).unwrap(),
            lunch_length_minutes: 40,
            break_time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            break_length_minutes: 10,
        }
    }

    #[test]
    fn test_school_without_schedule() {
        let db = Database::open_in_memory().unwrap();
        let school = School::new("Riverside High".to_string());
        db.schools().create(&school).unwrap();

        let found = db.schools().find_by_id(school.id).unwrap().unwrap();
        assert_eq!(found.name, "Riverside High");
        assert!(found.schedule.is_none());
    }

    #[test]
    fn test_schedule_round_trip_and_replace() {
        let db = Database::open_in_memory().unwrap();
        let school = School::new("Riverside High".to_string()).with_schedule(schedule());
        db.schools().create(&school).unwrap();

        assert_eq!(db.schools().find_schedule(school.id).unwrap(), Some(schedule()));

        let mut updated = schedule();
        updated.class_hours_per_day = 6;
        db.schools().save_schedule(school.id, &updated).unwrap();

        let found = db.schools().find_by_id(school.id).unwrap().unwrap();
        assert_eq!(found.schedule, Some(updated));
    }

    #[test]
    fn test_unknown_school() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.schools().find_by_id(Uuid::new_v4()).unwrap().is_none());
    }
}
