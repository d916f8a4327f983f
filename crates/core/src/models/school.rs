//! School and schedule configuration models

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// A school, owner of the schedule its programs are generated from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct School {
    pub id: Uuid,
    pub name: String,
    pub schedule: Option<ScheduleConfig>,
}

impl School {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            schedule: None,
        }
    }

    pub fn with_schedule(mut self, schedule: ScheduleConfig) -> Self {
        self.schedule = Some(schedule);
        self
    }
}

/// School-level parameters governing slot generation
///
/// Lunch and break are each expected to start within the school day.
/// Nothing enforces this during generation; a malformed config yields a
/// malformed timetable. Use [`ScheduleConfig::validate`] to reject the
/// obviously broken cases up front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub opens_at: NaiveTime,
    pub class_hours_per_day: u32,
    pub class_hour_length_minutes: u32,
    pub lunch_time: NaiveTime,
    pub lunch_length_minutes: u32,
    pub break_time: NaiveTime,
    pub break_length_minutes: u32,
}

impl ScheduleConfig {
    pub fn class_hour_length(&self) -> Duration {
        Duration::minutes(i64::from(self.class_hour_length_minutes))
    }

    pub fn lunch_length(&self) -> Duration {
        Duration::minutes(i64::from(self.lunch_length_minutes))
    }

    pub fn break_length(&self) -> Duration {
        Duration::minutes(i64::from(self.break_length_minutes))
    }

    /// Number of slots emitted per day: every class hour plus one lunch and one break
    pub fn slots_per_day(&self) -> u32 {
        self.class_hours_per_day + 2
    }

    /// Reject configurations that cannot produce a usable timetable
    pub fn validate(&self) -> Result<()> {
        if self.class_hours_per_day == 0 {
            return Err(Error::InvalidSchedule(
                "class_hours_per_day must be at least 1".to_string(),
            ));
        }
        if self.class_hour_length_minutes == 0 {
            return Err(Error::InvalidSchedule(
                "class_hour_length_minutes must be positive".to_string(),
            ));
        }
        if self.lunch_length_minutes == 0 || self.break_length_minutes == 0 {
            return Err(Error::InvalidSchedule(
                "lunch and break windows must have a positive length".to_string(),
            ));
        }
        if self.lunch_time < self.opens_at || self.break_time < self.opens_at {
            return Err(Error::InvalidSchedule(format!(
                "lunch ({}) and break ({}) must start after the school opens ({})",
                self.lunch_time, self.break_time, self.opens_at
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ScheduleConfig {
        ScheduleConfig {
            opens_at: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            class_hours_per_day: 4,
            class_hour_length_minutes: 45,
            lunch_time: NaiveTime::from_hms_opt(11, 15, 0).unwrap(),
            lunch_length_minutes: 30,
            break_time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            break_length_minutes: 15,
        }
    }

    #[test]
    fn test_valid_schedule() {
        let schedule = sample();
        assert!(schedule.validate().is_ok());
        assert_eq!(schedule.slots_per_day(), 6);
        assert_eq!(schedule.class_hour_length(), Duration::minutes(45));
    }

    #[test]
    fn test_zero_length_rejected() {
        let mut schedule = sample();
        schedule.class_hour_length_minutes = 0;
        assert!(matches!(schedule.validate(), Err(Error::InvalidSchedule(_))));
    }

    #[test]
    fn test_lunch_before_opening_rejected() {
        let mut schedule = sample();
        schedule.lunch_time = NaiveTime::from_hms_opt(7, 0, 0).unwrap();
        assert!(matches!(schedule.validate(), Err(Error::InvalidSchedule(_))));
    }
}
