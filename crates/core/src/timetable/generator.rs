//! Slot generation
//!
//! Walks a cursor through six school days, emitting one slot per step. A
//! step emits the lunch window when lunch starts at the cursor or strictly
//! inside the regular class hour beginning there; otherwise the break window
//! under the same rule; otherwise the regular class hour. Lunch is checked
//! first. Each day gets `class_hours_per_day + 2` steps.
//!
//! Window containment is tested on time of day only, so the test fires on
//! every day even under [`WindowAnchoring::Fixed`], where the emitted window
//! itself still carries the anchor date.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::config::{EngineConfig, WindowAnchoring};
use crate::error::GenerationError;
use crate::invariants::assert_timetable_invariants;
use crate::models::{ClassHour, ClassStatus, ScheduleConfig};
use crate::storage::{ClassHourRepository, ProgramRepository, SchoolRepository};

/// Days covered by one generation call
pub const DAYS_PER_CYCLE: u32 = 6;

/// A fixed non-teaching interval
#[derive(Debug, Clone, Copy)]
struct Window {
    begins_at: NaiveDateTime,
    ends_at: NaiveDateTime,
    status: ClassStatus,
}

impl Window {
    fn on(date: NaiveDate, start: NaiveTime, length: Duration, status: ClassStatus) -> Self {
        let begins_at = date.and_time(start);
        Self {
            begins_at,
            ends_at: begins_at + length,
            status,
        }
    }

    /// Starts at `begins` or strictly between `begins` and `ends`
    fn starts_within(&self, begins: NaiveDateTime, ends: NaiveDateTime) -> bool {
        let start = self.begins_at.time();
        (start > begins.time() && start < ends.time()) || start == begins.time()
    }
}

#[derive(Debug, Clone, Copy)]
struct DayWindows {
    lunch: Window,
    recess: Window,
}

impl DayWindows {
    fn on(date: NaiveDate, schedule: &ScheduleConfig) -> Self {
        Self {
            lunch: Window::on(
                date,
                schedule.lunch_time,
                schedule.lunch_length(),
                ClassStatus::LunchTime,
            ),
            recess: Window::on(
                date,
                schedule.break_time,
                schedule.break_length(),
                ClassStatus::BreakTime,
            ),
        }
    }
}

/// Lazily yields the slots of one six-day cycle, in order
pub struct SlotGenerator<'a> {
    schedule: &'a ScheduleConfig,
    program_id: Uuid,
    anchoring: WindowAnchoring,
    fixed: DayWindows,
    today: DayWindows,
    cursor: NaiveDateTime,
    day: u32,
    step: u32,
}

impl<'a> SlotGenerator<'a> {
    pub fn new(
        schedule: &'a ScheduleConfig,
        program_id: Uuid,
        anchor: NaiveDate,
        anchoring: WindowAnchoring,
    ) -> Self {
        let fixed = DayWindows::on(anchor, schedule);
        Self {
            schedule,
            program_id,
            anchoring,
            fixed,
            today: fixed,
            cursor: anchor.and_time(schedule.opens_at),
            day: 0,
            step: 0,
        }
    }

    /// Total number of slots the generator will yield
    pub fn total_slots(&self) -> usize {
        (DAYS_PER_CYCLE * self.schedule.slots_per_day()) as usize
    }

    fn start_day(&mut self) {
        self.today = match self.anchoring {
            WindowAnchoring::Fixed => self.fixed,
            WindowAnchoring::PerDay => DayWindows::on(self.cursor.date(), self.schedule),
        };
    }

    /// Move the cursor to opening time on the day after the cursor's date
    fn end_day(&mut self) -> Option<()> {
        let next = self.cursor.date().succ_opt()?;
        self.cursor = next.and_time(self.schedule.opens_at);
        self.day += 1;
        self.step = 0;
        Some(())
    }
}

impl Iterator for SlotGenerator<'_> {
    type Item = ClassHour;

    fn next(&mut self) -> Option<ClassHour> {
        if self.day >= DAYS_PER_CYCLE {
            return None;
        }
        if self.step == 0 {
            self.start_day();
        }

        let begins_at = self.cursor;
        let ends_at = begins_at.checked_add_signed(self.schedule.class_hour_length())?;

        let (begins_at, ends_at, status) = if self.today.lunch.starts_within(begins_at, ends_at) {
            let w = self.today.lunch;
            (w.begins_at, w.ends_at, w.status)
        } else if self.today.recess.starts_within(begins_at, ends_at) {
            let w = self.today.recess;
            (w.begins_at, w.ends_at, w.status)
        } else {
            (begins_at, ends_at, ClassStatus::NotScheduled)
        };

        self.cursor = ends_at;
        self.step += 1;
        if self.step == self.schedule.slots_per_day() && self.end_day().is_none() {
            // Calendar exhausted; yield this slot and stop afterwards
            self.day = DAYS_PER_CYCLE;
        }

        Some(ClassHour::new(self.program_id, begins_at, ends_at, status))
    }
}

/// Generate the slots of one cycle without touching storage
pub fn generate_slots(
    schedule: &ScheduleConfig,
    program_id: Uuid,
    anchor: NaiveDate,
    anchoring: WindowAnchoring,
) -> Vec<ClassHour> {
    SlotGenerator::new(schedule, program_id, anchor, anchoring).collect()
}

/// Generate and persist the timetable of a program, starting on `anchor`
///
/// Slots are saved as they are produced. The first failed save aborts
/// generation; slots saved before it stay saved.
#[instrument(skip(storage, config), fields(anchoring = ?config.window_anchoring))]
pub fn generate_timetable<S>(
    storage: &S,
    config: &EngineConfig,
    program_id: Uuid,
    anchor: NaiveDate,
) -> Result<Vec<ClassHour>, GenerationError>
where
    S: ProgramRepository + SchoolRepository + ClassHourRepository,
{
    let program = storage
        .find_program_by_id(program_id)?
        .ok_or(GenerationError::ProgramNotFound(program_id))?;

    let schedule = storage
        .find_schedule_for_school(program.school_id)?
        .ok_or(GenerationError::NoScheduleConfigured(program.school_id))?;

    if config.validate_schedules {
        schedule.validate().map_err(|e| GenerationError::InvalidSchedule(e.to_string()))?;
    }

    let generator = SlotGenerator::new(&schedule, program.id, anchor, config.window_anchoring);
    let mut slots = Vec::with_capacity(generator.total_slots());
    for slot in generator {
        storage.save_class_hour(&slot)?;
        debug!(begins_at = %slot.begins_at, ends_at = %slot.ends_at, status = %slot.status, "Saved class hour");
        slots.push(slot);
    }

    assert_timetable_invariants(&slots, &schedule, program.id);
    info!(
        program_id = %program.id,
        program = %program.name,
        slots = slots.len(),
        "Generated class hours for the current cycle"
    );
    Ok(slots)
}
