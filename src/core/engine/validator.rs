//! Placement validation for a single course

use super::evaluator::{self, Evaluation};
use super::EngineConfig;
use crate::core::error::EngineError;
use crate::core::models::{Catalog, CourseInfo, Schedule, Term};
use serde::{Deserialize, Serialize};

/// Why a placement failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The course is pinned to early semesters and the target is outside them
    FixedPosition,
    /// The course is not taught in the target semester's season
    OfferingMismatch,
    /// A course-based prerequisite term is not satisfied
    PrerequisiteUnmet,
    /// Not enough cumulative credits by the target semester
    CreditThreshold,
}

impl FailureKind {
    /// Whether a failure of this kind stops the course from being moved at all
    ///
    /// Prerequisite and threshold failures still let the course move; it is
    /// only flagged.
    #[must_use]
    pub const fn blocks_move(self) -> bool {
        matches!(self, Self::FixedPosition | Self::OfferingMismatch)
    }
}

/// Verdict of one validation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Every rule holds
    Passed,
    /// A rule does not hold
    Failed(FailureKind),
    /// The course already occupies the target semester; nothing to do
    Unchanged,
}

/// Pass/fail result with its diagnostic message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// Verdict
    pub verdict: Verdict,
    /// Message for failures (and no-ops), `None` on success
    pub message: Option<String>,
}

impl ValidationOutcome {
    /// A passing outcome
    #[must_use]
    pub const fn passed() -> Self {
        Self {
            verdict: Verdict::Passed,
            message: None,
        }
    }

    /// A failing outcome
    #[must_use]
    pub const fn failed(kind: FailureKind, message: String) -> Self {
        Self {
            verdict: Verdict::Failed(kind),
            message: Some(message),
        }
    }

    /// A no-op outcome for a course dropped back into its own semester
    #[must_use]
    pub fn unchanged(course_id: &str) -> Self {
        Self {
            verdict: Verdict::Unchanged,
            message: Some(format!("{course_id} is already in the selected semester")),
        }
    }

    /// Whether the verdict is [`Verdict::Passed`]
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self.verdict, Verdict::Passed)
    }

    /// Failure kind, if the verdict is a failure
    #[must_use]
    pub const fn failure(&self) -> Option<FailureKind> {
        match self.verdict {
            Verdict::Failed(kind) => Some(kind),
            _ => None,
        }
    }

    fn from_evaluation(eval: Evaluation) -> Self {
        if eval.satisfied {
            return Self::passed();
        }
        let kind = match eval.failing_term {
            Some(Term::CreditThreshold(_)) => FailureKind::CreditThreshold,
            _ => FailureKind::PrerequisiteUnmet,
        };
        Self {
            verdict: Verdict::Failed(kind),
            message: eval.message,
        }
    }
}

/// Whether `course_id` names an elective slot anywhere in the schedule
#[must_use]
pub fn is_elective(schedule: &Schedule, course_id: &str, elective_marker: &str) -> bool {
    schedule
        .semesters
        .iter()
        .flat_map(|s| s.courses.iter())
        .any(|entry| entry.course_id == course_id && entry.is_elective(elective_marker))
}

/// Check whether `course_id` may be moved into semester `target`
///
/// Rules, in order:
/// 1. the target semester must exist
/// 2. electives always pass
/// 3. a course already in the target semester is a no-op ([`Verdict::Unchanged`])
/// 4. fixed-position rules; prerequisites are not evaluated when they fail
/// 5. the target season must be one the course is offered in
/// 6. the prerequisite expression, including any credit threshold
///
/// Rule failures are returned as outcomes, never as errors.
///
/// # Errors
/// Returns [`EngineError::SemesterOutOfRange`] for a bad target and
/// [`EngineError::NotFound`] for a non-elective course missing from the catalog.
pub fn validate_move(
    course_id: &str,
    target: usize,
    schedule: &Schedule,
    catalog: &Catalog,
    config: &EngineConfig,
) -> Result<ValidationOutcome, EngineError> {
    let semester = schedule.semester(target)?;

    if is_elective(schedule, course_id, &config.elective_marker) {
        return Ok(ValidationOutcome::passed());
    }

    let info = catalog.lookup(course_id)?;

    if semester.contains(course_id) {
        return Ok(ValidationOutcome::unchanged(course_id));
    }

    Ok(check_rules(info, target, schedule, catalog, config))
}

/// Full placement check for a course already sitting in semester `index`
///
/// Applies the fixed-position, offering, and prerequisite rules without the
/// no-op check. Used when validating a whole plan and when re-checking the
/// courses a move affects.
///
/// # Errors
/// Returns an error if the semester does not exist or the course is not in the catalog.
pub fn validate_in_place(
    course_id: &str,
    index: usize,
    schedule: &Schedule,
    catalog: &Catalog,
    config: &EngineConfig,
) -> Result<ValidationOutcome, EngineError> {
    schedule.semester(index)?;
    let info = catalog.lookup(course_id)?;
    Ok(check_rules(info, index, schedule, catalog, config))
}

fn check_rules(
    info: &CourseInfo,
    index: usize,
    schedule: &Schedule,
    catalog: &Catalog,
    config: &EngineConfig,
) -> ValidationOutcome {
    if let Some(placement) = info.placement {
        if !placement.allows(index) {
            return ValidationOutcome::failed(
                FailureKind::FixedPosition,
                format!("{} must be taken {}!", info.course_id, placement.describe()),
            );
        }
    }

    let label = schedule.semesters[index].label;
    if !info.is_offered(label) {
        return ValidationOutcome::failed(
            FailureKind::OfferingMismatch,
            format!("{} is not offered during the {label} semester!", info.course_id),
        );
    }

    check_prerequisites(info, index, schedule, catalog, config)
}

fn check_prerequisites(
    info: &CourseInfo,
    index: usize,
    schedule: &Schedule,
    catalog: &Catalog,
    config: &EngineConfig,
) -> ValidationOutcome {
    if info.prerequisite.is_empty() {
        return ValidationOutcome::passed();
    }
    let eval = evaluator::evaluate(info, index, schedule, catalog, &config.elective_marker);
    ValidationOutcome::from_evaluation(eval)
}
