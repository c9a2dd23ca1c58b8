//! Prerequisite evaluation against a schedule snapshot
//!
//! A course's prerequisite expression is a list of terms that must all hold
//! for the semester the course sits in (or is about to be moved to). Terms are
//! judged against three sets of scheduled courses, split around the target
//! semester:
//!
//! - *prior*: courses in earlier semesters, plus courses completed outside the plan
//! - *concurrent*: courses in the target semester itself
//! - *later*: courses in later semesters
//!
//! A concurrent course only counts for a term when it is the requiring
//! course's declared companion. Electives are left out of all three sets.

use crate::core::models::{Catalog, CourseInfo, Schedule, Term};
use std::collections::HashSet;

/// Scheduled courses split around a target semester
#[derive(Debug, Clone, Default)]
pub struct Partition<'a> {
    /// Courses before the target semester or completed elsewhere
    pub prior: HashSet<&'a str>,
    /// Courses in the target semester
    pub concurrent: HashSet<&'a str>,
    /// Courses after the target semester; keeps them out of `prior`
    pub(crate) later: HashSet<&'a str>,
}

impl<'a> Partition<'a> {
    /// Split the non-elective courses of `schedule` around `target`
    ///
    /// Semesters are ordered by position in the schedule, not by their
    /// stored index.
    #[must_use]
    pub fn around(schedule: &'a Schedule, target: usize, elective_marker: &str) -> Self {
        let mut partition = Self::default();

        for (position, semester) in schedule.semesters.iter().enumerate() {
            let bucket = match position.cmp(&target) {
                std::cmp::Ordering::Less => &mut partition.prior,
                std::cmp::Ordering::Equal => &mut partition.concurrent,
                std::cmp::Ordering::Greater => &mut partition.later,
            };
            bucket.extend(
                semester
                    .courses
                    .iter()
                    .filter(|entry| !entry.is_elective(elective_marker))
                    .map(|entry| entry.course_id.as_str()),
            );
        }

        for course_id in &schedule.completed_elsewhere {
            let id = course_id.as_str();
            if !partition.concurrent.contains(id) && !partition.later.contains(id) {
                partition.prior.insert(id);
            }
        }

        partition
    }

    /// Whether `prereq` satisfies a single-course requirement of `info`
    #[must_use]
    pub fn satisfies(&self, info: &CourseInfo, prereq: &str) -> bool {
        self.prior.contains(prereq)
            || (self.concurrent.contains(prereq) && info.is_concurrent_with(prereq))
    }
}

/// Result of evaluating one course's prerequisite expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Whether every term holds
    pub satisfied: bool,
    /// The first term (in expression order) that does not hold
    pub failing_term: Option<Term>,
    /// Diagnostic message for the failing term
    pub message: Option<String>,
    /// Credits earned at or before the target semester, excluding the course itself
    pub cumulative_credits: u32,
}

impl Evaluation {
    const fn pass(cumulative_credits: u32) -> Self {
        Self {
            satisfied: true,
            failing_term: None,
            message: None,
            cumulative_credits,
        }
    }
}

/// Message reported when a course-based term is not satisfied
#[must_use]
pub fn unmet_message(course_id: &str, prereq: &str) -> String {
    format!("{course_id} prerequisite ({prereq}) has to be completed prior to the selected semester!")
}

/// Message reported when a credit-threshold term is not satisfied
#[must_use]
pub fn threshold_message(course_id: &str, min_credits: u32, cumulative: u32) -> String {
    format!(
        "{course_id} requires a minimum of {min_credits} credit hours by the selected semester; only {cumulative} will have been earned!"
    )
}

/// Credits that count toward a threshold for `course_id` placed in `target`
///
/// Starting credits plus every semester at or before `target`, minus the
/// course's own credits when it already sits in one of those semesters.
#[must_use]
pub fn cumulative_credits(schedule: &Schedule, course_id: &str, target: usize) -> u32 {
    let total = schedule.credits_through(target);
    let own = schedule
        .locate(course_id)
        .filter(|&index| index <= target)
        .and_then(|index| schedule.entry(index, course_id))
        .map_or(0, |entry| entry.credits);
    total.saturating_sub(own)
}

/// Evaluate `info`'s prerequisite expression for placement in semester `target`
///
/// Terms are checked in expression order and evaluation stops at the first
/// one that does not hold, so the reported term is always the earliest
/// failing one.
///
/// For an any-of term, the alternative named in the message is the last one
/// that is itself a catalog course (or the last alternative when none is).
#[must_use]
pub fn evaluate(
    info: &CourseInfo,
    target: usize,
    schedule: &Schedule,
    catalog: &Catalog,
    elective_marker: &str,
) -> Evaluation {
    let partition = Partition::around(schedule, target, elective_marker);
    let cumulative = cumulative_credits(schedule, &info.course_id, target);

    for term in &info.prerequisite {
        let failure = match term {
            Term::Single(prereq) => {
                (!partition.satisfies(info, prereq)).then(|| unmet_message(&info.course_id, prereq))
            }
            Term::AnyOf(alternatives) => {
                if alternatives.iter().any(|alt| partition.satisfies(info, alt)) {
                    None
                } else {
                    let reported = alternatives
                        .iter()
                        .rev()
                        .find(|alt| catalog.contains(alt))
                        .or_else(|| alternatives.last())
                        .map_or("", String::as_str);
                    Some(unmet_message(&info.course_id, reported))
                }
            }
            Term::CreditThreshold(min) => (cumulative < *min)
                .then(|| threshold_message(&info.course_id, *min, cumulative)),
        };

        if let Some(message) = failure {
            return Evaluation {
                satisfied: false,
                failing_term: Some(term.clone()),
                message: Some(message),
                cumulative_credits: cumulative,
            };
        }
    }

    Evaluation::pass(cumulative)
}
