//! Schedule mutation for an accepted move

use crate::core::error::EngineError;
use crate::core::models::Schedule;

/// Move `course_id` from semester `origin` to the end of semester `target`
///
/// The entry itself is transferred, so its completion flag, name and
/// description survive. Only the two semesters involved change, and each
/// credit total is adjusted by the entry's credits. Moving within the same
/// semester is a no-op.
///
/// # Errors
/// Returns an error if either semester is out of range or `origin` does not
/// hold the course. The schedule is untouched on error.
pub fn apply_move(
    course_id: &str,
    origin: usize,
    target: usize,
    schedule: &mut Schedule,
) -> Result<(), EngineError> {
    schedule.semester(target)?;
    if !schedule.semester(origin)?.contains(course_id) {
        return Err(EngineError::NotFound(format!(
            "{course_id} in semester {}",
            origin + 1
        )));
    }
    if origin == target {
        return Ok(());
    }

    let entry = schedule
        .semester_mut(origin)?
        .take(course_id)
        .ok_or_else(|| EngineError::NotFound(course_id.to_string()))?;
    schedule.semester_mut(target)?.push(entry);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{CourseEntry, Semester, SemesterLabel};

    fn plan() -> Schedule {
        let mut fall = Semester::new(0, SemesterLabel::Fall);
        let mut entry = CourseEntry::new("CMP SCI 1250", "Programming I", 3);
        entry.is_completed = true;
        entry.description = "Intro".to_string();
        fall.push(entry);
        fall.push(CourseEntry::new("MATH 1320", "Statistics", 4));
        let spring = Semester::new(1, SemesterLabel::Spring);
        let fall2 = Semester::new(2, SemesterLabel::Fall);
        Schedule::new(vec![fall, spring, fall2])
    }

    #[test]
    fn test_move_transfers_entry_and_credits() {
        let mut schedule = plan();
        apply_move("CMP SCI 1250", 0, 2, &mut schedule).unwrap();

        assert_eq!(schedule.semesters[0].credits_total, 4);
        assert_eq!(schedule.semesters[2].credits_total, 3);
        assert_eq!(schedule.semesters[1].credits_total, 0);

        let moved = schedule.entry(2, "CMP SCI 1250").unwrap();
        assert!(moved.is_completed);
        assert_eq!(moved.description, "Intro");

        for semester in &schedule.semesters {
            assert_eq!(semester.credits_total, semester.summed_credits());
        }
    }

    #[test]
    fn test_same_semester_is_noop() {
        let mut schedule = plan();
        let before = schedule.clone();
        apply_move("CMP SCI 1250", 0, 0, &mut schedule).unwrap();
        assert_eq!(schedule, before);
    }

    #[test]
    fn test_errors_leave_schedule_untouched() {
        let mut schedule = plan();
        let before = schedule.clone();

        assert!(apply_move("CMP SCI 1250", 1, 2, &mut schedule).is_err());
        assert!(apply_move("CMP SCI 1250", 0, 9, &mut schedule).is_err());
        assert!(apply_move("CMP SCI 1250", 9, 0, &mut schedule).is_err());
        assert_eq!(schedule, before);
    }
}
