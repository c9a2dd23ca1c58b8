//! Ripple re-validation of courses affected by a moved course

use super::validator::{self, ValidationOutcome};
use super::EngineConfig;
use crate::core::error::EngineError;
use crate::core::models::{Catalog, CourseInfo, DependencyIndex, Schedule};
use crate::debug;
use std::ops::Range;

/// Re-validation result for one affected course
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeOutcome {
    /// Affected course key
    pub course_id: String,
    /// Semester the course occupies (unchanged by the cascade)
    pub semester_index: usize,
    /// Result of re-checking it where it stands
    pub outcome: ValidationOutcome,
}

/// Re-check the scheduled courses a move can affect
///
/// Two groups are re-checked, in this order:
/// - every scheduled course that lists `moved_course_id` as a prerequisite
/// - every scheduled course with a credit threshold sitting in a semester of
///   `shifted`, the positions whose cumulative credits the move changed
///
/// Each course is judged in its own semester with the full rule set against
/// `schedule` as it is now, so callers pass the post-move schedule. Results
/// are written onto the entries; no course changes position. The moved course
/// and electives are never re-checked.
///
/// # Errors
/// Returns an error if a dependent is missing from the catalog.
pub fn revalidate_dependents(
    moved_course_id: &str,
    shifted: Range<usize>,
    schedule: &mut Schedule,
    catalog: &Catalog,
    index: &DependencyIndex,
    config: &EngineConfig,
) -> Result<Vec<CascadeOutcome>, EngineError> {
    let mut affected: Vec<(String, usize)> = index
        .dependents_of(moved_course_id)
        .iter()
        .filter_map(|dependent| {
            schedule
                .locate(dependent)
                .map(|position| (dependent.clone(), position))
        })
        .collect();

    for (position, semester) in schedule.semesters.iter().enumerate() {
        if !shifted.contains(&position) {
            continue;
        }
        for entry in &semester.courses {
            if entry.course_id == moved_course_id
                || entry.is_elective(&config.elective_marker)
                || affected.iter().any(|(id, _)| *id == entry.course_id)
            {
                continue;
            }
            if catalog
                .get(&entry.course_id)
                .is_some_and(CourseInfo::has_credit_threshold)
            {
                affected.push((entry.course_id.clone(), position));
            }
        }
    }

    let mut results = Vec::with_capacity(affected.len());
    for (course_id, semester_index) in affected {
        let outcome =
            validator::validate_in_place(&course_id, semester_index, schedule, catalog, config)?;
        debug!(
            "Cascade: {course_id} in semester {} -> {:?}",
            semester_index + 1,
            outcome.verdict
        );
        results.push(CascadeOutcome {
            course_id,
            semester_index,
            outcome,
        });
    }

    for result in &results {
        if let Some(entry) = schedule.entry_mut(result.semester_index, &result.course_id) {
            entry.annotate(result.outcome.is_passed(), result.outcome.message.clone());
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::FailureKind;
    use crate::core::models::{CourseEntry, Semester, SemesterLabel, Term};

    fn labels() -> [SemesterLabel; 2] {
        [SemesterLabel::Fall, SemesterLabel::Spring]
    }

    fn semester(index: usize, label: SemesterLabel, courses: &[(&str, u32)]) -> Semester {
        let mut semester = Semester::new(index, label);
        for (id, credits) in courses {
            semester.push(CourseEntry::new(*id, *id, *credits));
        }
        semester
    }

    #[test]
    fn test_dependents_flip_without_moving() {
        let catalog = Catalog::from_entries([
            CourseInfo::new("B", 3, labels()),
            CourseInfo::new("A", 3, labels()).with_term(Term::Single("B".into())),
            CourseInfo::new("C", 3, labels()).with_term(Term::Single("B".into())),
            CourseInfo::new("UNSCHEDULED", 3, labels()).with_term(Term::Single("B".into())),
        ])
        .unwrap();
        let index = DependencyIndex::build(&catalog);

        let mut schedule = Schedule::new(vec![
            semester(0, SemesterLabel::Fall, &[("A", 3)]),
            semester(1, SemesterLabel::Spring, &[("B", 3)]),
            semester(2, SemesterLabel::Fall, &[("C", 3)]),
        ]);

        let results = revalidate_dependents(
            "B",
            0..1,
            &mut schedule,
            &catalog,
            &index,
            &EngineConfig::default(),
        )
        .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].course_id, "A");
        assert!(!results[0].outcome.is_passed());
        assert_eq!(results[1].course_id, "C");
        assert!(results[1].outcome.is_passed());

        let a = schedule.entry(0, "A").unwrap();
        assert_eq!(a.passed_validation, Some(false));
        assert!(a.validation_msg.as_deref().unwrap().contains("(B)"));
        assert_eq!(schedule.entry(2, "C").unwrap().passed_validation, Some(true));
        assert_eq!(schedule.locate("A"), Some(0));
    }

    #[test]
    fn test_no_dependents() {
        let catalog = Catalog::from_entries([CourseInfo::new("B", 3, labels())]).unwrap();
        let index = DependencyIndex::build(&catalog);
        let mut schedule = Schedule::new(vec![Semester::new(0, SemesterLabel::Fall)]);

        let results = revalidate_dependents(
            "B",
            0..0,
            &mut schedule,
            &catalog,
            &index,
            &EngineConfig::default(),
        )
        .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_dependent_keeps_offering_failure() {
        let catalog = Catalog::from_entries([
            CourseInfo::new("B", 3, labels()),
            CourseInfo::new("D", 3, [SemesterLabel::Fall]).with_term(Term::Single("B".into())),
        ])
        .unwrap();
        let index = DependencyIndex::build(&catalog);

        // B now sits before D, but D is still in a Spring it is not taught in
        let mut schedule = Schedule::new(vec![
            semester(0, SemesterLabel::Fall, &[("B", 3)]),
            semester(1, SemesterLabel::Spring, &[("D", 3)]),
        ]);

        let results = revalidate_dependents(
            "B",
            0..0,
            &mut schedule,
            &catalog,
            &index,
            &EngineConfig::default(),
        )
        .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0].outcome.failure(),
            Some(FailureKind::OfferingMismatch)
        );
        let d = schedule.entry(1, "D").unwrap();
        assert_eq!(d.passed_validation, Some(false));
        assert_eq!(
            d.validation_msg.as_deref(),
            Some("D is not offered during the Spring semester!")
        );
    }

    #[test]
    fn test_threshold_courses_in_shifted_semesters() {
        let catalog = Catalog::from_entries([
            CourseInfo::new("BIG", 10, labels()),
            CourseInfo::new("F1", 6, labels()),
            CourseInfo::new("T", 3, labels()).with_term(Term::CreditThreshold(12)),
            CourseInfo::new("U", 3, labels()).with_term(Term::CreditThreshold(12)),
        ])
        .unwrap();
        let index = DependencyIndex::build(&catalog);

        // BIG was moved from the first semester to the third
        let mut schedule = Schedule::new(vec![
            semester(0, SemesterLabel::Fall, &[("F1", 6)]),
            semester(1, SemesterLabel::Spring, &[("T", 3), ("GEN ED", 3)]),
            semester(2, SemesterLabel::Fall, &[("BIG", 10), ("U", 3)]),
        ]);
        schedule.semesters[1].courses[1].name = "[User Selects]".to_string();

        let results = revalidate_dependents(
            "BIG",
            0..2,
            &mut schedule,
            &catalog,
            &index,
            &EngineConfig::default(),
        )
        .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].course_id, "T");
        assert_eq!(results[0].semester_index, 1);
        assert_eq!(
            results[0].outcome.failure(),
            Some(FailureKind::CreditThreshold)
        );
        let t = schedule.entry(1, "T").unwrap();
        assert_eq!(t.passed_validation, Some(false));
        assert!(t.validation_msg.as_deref().unwrap().contains("only 9"));
        assert_eq!(schedule.entry(2, "U").unwrap().passed_validation, None);
    }
}
