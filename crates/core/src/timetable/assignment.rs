//! Class hour assignment
//!
//! Requests are handled strictly in order. The first failing request aborts
//! the batch; requests committed before it stay committed.

use tracing::{info, instrument, warn};

use crate::error::AssignmentError;
use crate::invariants::assert_class_hour_invariants;
use crate::models::{ClassHour, ClassHourRequest, ClassStatus};
use crate::storage::{ClassHourRepository, UserRepository};

/// Validate and commit a batch of assignment requests
///
/// Returns the updated class hours, one per request.
#[instrument(skip(storage, requests), fields(requests = requests.len()))]
pub fn assign_class_hours<S>(
    storage: &S,
    requests: &[ClassHourRequest],
) -> Result<Vec<ClassHour>, AssignmentError>
where
    S: UserRepository + ClassHourRepository,
{
    let mut assigned = Vec::with_capacity(requests.len());

    for (index, request) in requests.iter().enumerate() {
        match assign_one(storage, request) {
            Ok(class_hour) => assigned.push(class_hour),
            Err(e) => {
                warn!(
                    index,
                    kind = e.kind(),
                    committed = assigned.len(),
                    error = %e,
                    "Assignment batch aborted"
                );
                return Err(e);
            }
        }
    }

    info!(assigned = assigned.len(), "Class hours updated");
    Ok(assigned)
}

/// Validate and commit a single request
pub fn assign_one<S>(storage: &S, request: &ClassHourRequest) -> Result<ClassHour, AssignmentError>
where
    S: UserRepository + ClassHourRepository,
{
    let mut class_hour = storage
        .find_class_hour_by_id(request.class_hour_id)?
        .ok_or(AssignmentError::SlotNotFound(request.class_hour_id))?;

    let user = storage
        .find_user_by_id(request.user_id)?
        .ok_or(AssignmentError::TeacherNotFound(request.user_id))?;

    if !user.role.can_teach() {
        return Err(AssignmentError::InvalidRole(user.id));
    }

    if !user.teaches_in(class_hour.academic_program_id) {
        return Err(AssignmentError::ProgramMismatch {
            user_id: user.id,
            program_id: class_hour.academic_program_id,
        });
    }

    // Check-then-write: callers sharing a store must serialize assignments
    // touching the same room
    if storage.exists_conflicting_room_booking(
        request.room_no,
        class_hour.begins_at,
        class_hour.ends_at,
        class_hour.id,
    )? {
        return Err(AssignmentError::RoomTimeConflict {
            room_no: request.room_no,
            begins_at: class_hour.begins_at,
            ends_at: class_hour.ends_at,
        });
    }

    class_hour.subject = user.subject.clone();
    class_hour.user_id = Some(user.id);
    class_hour.room_no = Some(request.room_no);
    class_hour.status = ClassStatus::Assigned;
    assert_class_hour_invariants(&class_hour);

    storage.save_class_hour(&class_hour)?;
    info!(
        class_hour_id = %class_hour.id,
        teacher = %user.username,
        room_no = request.room_no,
        begins_at = %class_hour.begins_at,
        "Assigned class hour"
    );

    Ok(class_hour)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use uuid::Uuid;

    use crate::models::{AcademicProgram, School, User, UserRole};
    use crate::storage::Database;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 3)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    struct Fixture {
        db: Database,
        program: Uuid,
        other_program: Uuid,
        teacher: Uuid,
    }

    fn fixture() -> Fixture {
        let db = Database::open_in_memory().unwrap();
        let school = School::new("Riverside High".to_string());
        db.schools().create(&school).unwrap();

        let program = AcademicProgram::new(school.id, "Biology".to_string());
        let other_program = AcademicProgram::new(school.id, "Chemistry".to_string());
        db.programs().create(&program).unwrap();
        db.programs().create(&other_program).unwrap();

        let teacher = User::new("dr_darwin".to_string(), UserRole::Teacher)
            .with_subject("Biology".to_string())
            .with_program(program.id);
        db.users().create(&teacher).unwrap();

        Fixture {
            db,
            program: program.id,
            other_program: other_program.id,
            teacher: teacher.id,
        }
    }

    fn slot(fx: &Fixture, program: Uuid, begins: NaiveDateTime, ends: NaiveDateTime) -> Uuid {
        let class_hour = ClassHour::new(program, begins, ends, ClassStatus::NotScheduled);
        fx.db.class_hours().save(&class_hour).unwrap();
        class_hour.id
    }

    fn request(class_hour_id: Uuid, user_id: Uuid, room_no: u32) -> ClassHourRequest {
        ClassHourRequest {
            class_hour_id,
            user_id,
            room_no,
        }
    }

    #[test]
    fn test_assign_sets_teacher_subject_room() {
        let fx = fixture();
        let id = slot(&fx, fx.program, at(10, 0), at(10, 45));

        let updated = assign_class_hours(&fx.db, &[request(id, fx.teacher, 101)]).unwrap();
        assert_eq!(updated.len(), 1);

        let stored = fx.db.class_hours().find_by_id(id).unwrap().unwrap();
        assert_eq!(stored.user_id, Some(fx.teacher));
        assert_eq!(stored.room_no, Some(101));
        assert_eq!(stored.subject.as_deref(), Some("Biology"));
        assert_eq!(stored.status, ClassStatus::Assigned);
    }

    #[test]
    fn test_overlapping_room_conflicts_in_either_order() {
        for reversed in [false, true] {
            let fx = fixture();
            let a = slot(&fx, fx.program, at(10, 0), at(10, 45));
            let b = slot(&fx, fx.program, at(10, 30), at(11, 15));

            let mut batch = vec![request(a, fx.teacher, 101), request(b, fx.teacher, 101)];
            if reversed {
                batch.reverse();
            }

            let err = assign_class_hours(&fx.db, &batch).unwrap_err();
            assert!(matches!(err, AssignmentError::RoomTimeConflict { room_no: 101, .. }));

            let first = fx.db.class_hours().find_by_id(batch[0].class_hour_id).unwrap().unwrap();
            let second = fx.db.class_hours().find_by_id(batch[1].class_hour_id).unwrap().unwrap();
            assert!(first.is_assigned());
            assert!(!second.is_assigned());
            assert_eq!(second.room_no, None);
        }
    }

    #[test]
    fn test_adjacent_slots_share_room() {
        let fx = fixture();
        let a = slot(&fx, fx.program, at(10, 0), at(10, 45));
        let b = slot(&fx, fx.program, at(10, 45), at(11, 30));

        let updated =
            assign_class_hours(&fx.db, &[request(a, fx.teacher, 101), request(b, fx.teacher, 101)])
                .unwrap();
        assert_eq!(updated.len(), 2);
    }

    #[test]
    fn test_reassigning_same_slot_is_not_a_conflict() {
        let fx = fixture();
        let a = slot(&fx, fx.program, at(10, 0), at(10, 45));

        assign_class_hours(&fx.db, &[request(a, fx.teacher, 101)]).unwrap();
        assign_class_hours(&fx.db, &[request(a, fx.teacher, 101)]).unwrap();
    }

    #[test]
    fn test_non_teacher_rejected() {
        let fx = fixture();
        let id = slot(&fx, fx.program, at(10, 0), at(10, 45));
        let student = User::new("pupil".to_string(), UserRole::Student).with_program(fx.program);
        fx.db.users().create(&student).unwrap();

        let err = assign_class_hours(&fx.db, &[request(id, student.id, 101)]).unwrap_err();
        assert!(matches!(err, AssignmentError::InvalidRole(u) if u == student.id));
        assert!(!fx.db.class_hours().find_by_id(id).unwrap().unwrap().is_assigned());
    }

    #[test]
    fn test_teacher_outside_program_rejected() {
        let fx = fixture();
        let id = slot(&fx, fx.other_program, at(10, 0), at(10, 45));

        let err = assign_class_hours(&fx.db, &[request(id, fx.teacher, 101)]).unwrap_err();
        assert!(matches!(
            err,
            AssignmentError::ProgramMismatch { program_id, .. } if program_id == fx.other_program
        ));
    }

    #[test]
    fn test_unknown_ids() {
        let fx = fixture();
        let id = slot(&fx, fx.program, at(10, 0), at(10, 45));

        let err = assign_class_hours(&fx.db, &[request(Uuid::new_v4(), fx.teacher, 1)]).unwrap_err();
        assert_eq!(err.kind(), "slot_not_found");

        let err = assign_class_hours(&fx.db, &[request(id, Uuid::new_v4(), 1)]).unwrap_err();
        assert_eq!(err.kind(), "teacher_not_found");
    }

    #[test]
    fn test_first_failure_stops_batch() {
        let fx = fixture();
        let a = slot(&fx, fx.program, at(8, 0), at(8, 45));
        let b = slot(&fx, fx.program, at(9, 0), at(9, 45));

        let batch = [
            request(a, fx.teacher, 7),
            request(Uuid::new_v4(), fx.teacher, 7),
            request(b, fx.teacher, 8),
        ];
        let err = assign_class_hours(&fx.db, &batch).unwrap_err();
        assert!(matches!(err, AssignmentError::SlotNotFound(_)));

        assert!(fx.db.class_hours().find_by_id(a).unwrap().unwrap().is_assigned());
        assert!(!fx.db.class_hours().find_by_id(b).unwrap().unwrap().is_assigned());
    }
}
