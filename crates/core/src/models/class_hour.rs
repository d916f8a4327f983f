//! Class hour (timetable slot) model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a class hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClassStatus {
    /// Regular teaching slot without a teacher yet
    NotScheduled,
    LunchTime,
    BreakTime,
    /// Teacher, subject and room have been allotted
    Assigned,
}

impl ClassStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassStatus::NotScheduled => "NOT_SCHEDULED",
            ClassStatus::LunchTime => "LUNCH_TIME",
            ClassStatus::BreakTime => "BREAK_TIME",
            ClassStatus::Assigned => "ASSIGNED",
        }
    }

    pub fn from_str_opt(value: &str) -> Option<Self> {
        match value {
            "NOT_SCHEDULED" => Some(ClassStatus::NotScheduled),
            "LUNCH_TIME" => Some(ClassStatus::LunchTime),
            "BREAK_TIME" => Some(ClassStatus::BreakTime),
            "ASSIGNED" => Some(ClassStatus::Assigned),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClassStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single scheduled interval `[begins_at, ends_at)` of an academic program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassHour {
    pub id: Uuid,
    pub begins_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub status: ClassStatus,
    pub academic_program_id: Uuid,
    /// Assigned teacher
    pub user_id: Option<Uuid>,
    pub room_no: Option<u32>,
    pub subject: Option<String>,
}

impl ClassHour {
    pub fn new(
        academic_program_id: Uuid,
        begins_at: NaiveDateTime,
        ends_at: NaiveDateTime,
        status: ClassStatus,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            begins_at,
            ends_at,
            status,
            academic_program_id,
            user_id: None,
            room_no: None,
            subject: None,
        }
    }

    /// Half-open overlap test against another interval
    pub fn overlaps(&self, begins_at: NaiveDateTime, ends_at: NaiveDateTime) -> bool {
        self.begins_at < ends_at && begins_at < self.ends_at
    }

    pub fn is_assigned(&self) -> bool {
        self.status == ClassStatus::Assigned
    }
}

/// Request to allot a teacher and a room to one class hour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassHourRequest {
    pub class_hour_id: Uuid,
    pub user_id: Uuid,
    pub room_no: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 3)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_overlap_is_half_open() {
        let slot = ClassHour::new(Uuid::new_v4(), at(10, 0), at(10, 45), ClassStatus::NotScheduled);

        assert!(slot.overlaps(at(10, 30), at(11, 15)));
        assert!(slot.overlaps(at(9, 30), at(10, 1)));
        // Touching intervals do not overlap
        assert!(!slot.overlaps(at(10, 45), at(11, 30)));
        assert!(!slot.overlaps(at(9, 15), at(10, 0)));
    }

    #[test]
    fn test_status_round_trips_through_text() {
        for status in [
            ClassStatus::NotScheduled,
            ClassStatus::LunchTime,
            ClassStatus::BreakTime,
            ClassStatus::Assigned,
        ] {
            assert_eq!(ClassStatus::from_str_opt(status.as_str()), Some(status));
        }
        assert_eq!(ClassStatus::from_str_opt("TAUGHT"), None);
    }
}
