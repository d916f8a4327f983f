//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use uuid::Uuid;

use crate::models::{ClassHour, ClassStatus, ScheduleConfig};
use crate::timetable::DAYS_PER_CYCLE;

/// Validate that a class hour's assignment fields agree with its status
pub fn assert_class_hour_invariants(class_hour: &ClassHour) {
    debug_assert!(
        class_hour.academic_program_id != Uuid::nil(),
        "Class hour {} has nil academic_program_id",
        class_hour.id
    );

    if class_hour.status == ClassStatus::Assigned {
        debug_assert!(
            class_hour.user_id.is_some() && class_hour.room_no.is_some(),
            "Class hour {} is assigned but has teacher {:?} and room {:?}",
            class_hour.id,
            class_hour.user_id,
            class_hour.room_no
        );
    } else {
        debug_assert!(
            class_hour.user_id.is_none(),
            "Class hour {} has teacher {:?} but status {}",
            class_hour.id,
            class_hour.user_id,
            class_hour.status
        );
    }
}

/// Validate a freshly generated cycle
pub fn assert_timetable_invariants(slots: &[ClassHour], schedule: &ScheduleConfig, program_id: Uuid) {
    debug_assert!(
        slots.len() <= (DAYS_PER_CYCLE * schedule.slots_per_day()) as usize,
        "Generated {} slots, more than {} days of {}",
        slots.len(),
        DAYS_PER_CYCLE,
        schedule.slots_per_day()
    );

    for slot in slots {
        debug_assert!(
            slot.academic_program_id == program_id,
            "Slot {} belongs to {} instead of {}",
            slot.id,
            slot.academic_program_id,
            program_id
        );
        debug_assert!(
            slot.status != ClassStatus::Assigned && slot.user_id.is_none(),
            "Slot {} was generated already assigned",
            slot.id
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_slot(status: ClassStatus) -> ClassHour {
        let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        ClassHour::new(
            Uuid::new_v4(),
            day.and_hms_opt(8, 0, 0).unwrap(),
            day.and_hms_opt(8, 45, 0).unwrap(),
            status,
        )
    }

    #[test]
    fn test_valid_unassigned_slot() {
        assert_class_hour_invariants(&make_slot(ClassStatus::NotScheduled));
        assert_class_hour_invariants(&make_slot(ClassStatus::LunchTime));
    }

    #[test]
    fn test_valid_assigned_slot() {
        let mut slot = make_slot(ClassStatus::Assigned);
        slot.user_id = Some(Uuid::new_v4());
        slot.room_no = Some(4);
        assert_class_hour_invariants(&slot);
    }

    #[test]
    #[should_panic(expected = "is assigned but")]
    fn test_assigned_without_room() {
        let mut slot = make_slot(ClassStatus::Assigned);
        slot.user_id = Some(Uuid::new_v4());
        assert_class_hour_invariants(&slot);
    }

    #[test]
    #[should_panic(expected = "belongs to")]
    fn test_foreign_slot_in_timetable() {
        let schedule = ScheduleConfig {
            opens_at: chrono::NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            class_hours_per_day: 1,
            class_hour_length_minutes: 45,
            lunch_time: chrono::NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            lunch_length_minutes: 30,
            break_time: chrono::NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            break_length_minutes: 15,
        };
        assert_timetable_invariants(&[make_slot(ClassStatus::NotScheduled)], &schedule, Uuid::new_v4());
    }
}
