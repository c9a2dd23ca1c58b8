//! Schedule mutation and prerequisite validation engine
//!
//! The engine owns an immutable catalog and the dependency index built from
//! it. Every call takes the current [`Schedule`] by value and returns the next
//! one together with structured [`Diagnostics`]; nothing is kept between calls.
//!
//! A move request goes through these steps:
//! 1. validate the placement of the moved course ([`validator::validate_move`])
//! 2. stop without mutating on a no-op, a fixed-position failure, or an
//!    offering mismatch
//! 3. move the entry and fix both credit totals ([`mutator::apply_move`])
//! 4. annotate the moved entry and re-check, in place, its dependents and the
//!    credit-threshold courses whose cumulative credits shifted
//!    ([`cascade::revalidate_dependents`])
//!
//! Semesters are addressed by position; stored indices are renumbered on entry.

pub mod cascade;
pub mod diagnostics;
pub mod evaluator;
pub mod mutator;
pub mod validator;

pub use cascade::CascadeOutcome;
pub use diagnostics::{Diagnostic, Diagnostics, Role};
pub use evaluator::{evaluate, Evaluation, Partition};
pub use validator::{FailureKind, ValidationOutcome, Verdict};

use crate::core::error::EngineError;
use crate::core::models::{Catalog, DependencyIndex, Schedule};
use crate::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Minimum cumulative credits for courses flagged with a credit threshold
pub const DEFAULT_CREDIT_THRESHOLD: u32 = 48;

/// Reserved course name identifying elective slots
pub const DEFAULT_ELECTIVE_MARKER: &str = "[User Selects]";

/// Rule settings shared by every engine call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Course name that marks an entry as an elective slot
    pub elective_marker: String,
    /// Threshold used for catalog entries that request the default
    pub credit_threshold: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            elective_marker: DEFAULT_ELECTIVE_MARKER.to_string(),
            credit_threshold: DEFAULT_CREDIT_THRESHOLD,
        }
    }
}

/// A request to move one course between semesters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Course key
    pub course_id: String,
    /// Credit hours of the entry being moved
    pub credits: u32,
    /// Semester the course is in now
    pub origin: usize,
    /// Semester to move it to
    pub target: usize,
}

/// What a move request did to the schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveStatus {
    /// The course moved (it may still be flagged invalid)
    Applied,
    /// A blocking rule failed; the schedule is unchanged
    Rejected,
    /// The course was already in the target semester; the schedule is unchanged
    Unchanged,
}

/// Result of a move request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    /// What happened
    pub status: MoveStatus,
    /// The next schedule
    pub schedule: Schedule,
    /// Validation events, moved course first
    pub diagnostics: Diagnostics,
}

/// Validation engine over one catalog
#[derive(Debug, Clone)]
pub struct Engine {
    catalog: Catalog,
    dependencies: DependencyIndex,
    config: EngineConfig,
}

impl Engine {
    /// Create an engine, building the dependency index once
    #[must_use]
    pub fn new(catalog: Catalog, config: EngineConfig) -> Self {
        let dependencies = DependencyIndex::build(&catalog);
        debug!(
            "Engine ready: {} catalog courses, {} indexed",
            catalog.len(),
            dependencies.course_count()
        );
        Self {
            catalog,
            dependencies,
            config,
        }
    }

    /// The catalog
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The reverse prerequisite index
    #[must_use]
    pub const fn dependencies(&self) -> &DependencyIndex {
        &self.dependencies
    }

    /// The rule settings
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Move a course and re-validate everything that depends on it
    ///
    /// Prerequisite and credit-threshold failures do not stop the move: the
    /// course moves and is flagged. Fixed-position and offering failures
    /// reject the move, leaving the schedule as it was.
    ///
    /// # Errors
    /// Returns an error if the request does not match the schedule (unknown
    /// semester, course not in `origin`, credits differing from the entry) or
    /// names a course missing from the catalog.
    pub fn move_course(
        &self,
        mut schedule: Schedule,
        request: &MoveRequest,
    ) -> Result<MoveReport, EngineError> {
        schedule.reindex();
        let course_id = request.course_id.as_str();
        let entry = schedule
            .semester(request.origin)?
            .get(course_id)
            .ok_or_else(|| {
                EngineError::NotFound(format!("{course_id} in semester {}", request.origin + 1))
            })?;
        if entry.credits != request.credits {
            return Err(EngineError::MalformedRequest(format!(
                "{course_id} carries {} credits, request says {}",
                entry.credits, request.credits
            )));
        }
        let elective = entry.is_elective(&self.config.elective_marker);
        schedule.semester(request.target)?;

        if request.origin == request.target {
            return Ok(Self::unchanged(schedule));
        }

        let outcome = validator::validate_move(
            course_id,
            request.target,
            &schedule,
            &self.catalog,
            &self.config,
        )?;

        let mut diagnostics = Diagnostics::new();
        match outcome.verdict {
            Verdict::Unchanged => return Ok(Self::unchanged(schedule)),
            Verdict::Failed(kind) if kind.blocks_move() => {
                info!(
                    "Move of {course_id} to semester {} rejected: {}",
                    request.target + 1,
                    outcome.message.as_deref().unwrap_or_default()
                );
                diagnostics.record(course_id, request.origin, &outcome, Role::Moved);
                return Ok(MoveReport {
                    status: MoveStatus::Rejected,
                    schedule,
                    diagnostics,
                });
            }
            _ => {}
        }

        mutator::apply_move(course_id, request.origin, request.target, &mut schedule)?;
        info!(
            "Moved {course_id} from semester {} to semester {}",
            request.origin + 1,
            request.target + 1
        );

        if !elective {
            if let Some(moved) = schedule.entry_mut(request.target, course_id) {
                moved.annotate(outcome.is_passed(), outcome.message.clone());
            }
        }
        diagnostics.record(course_id, request.target, &outcome, Role::Moved);

        let shifted = request.origin.min(request.target)..request.origin.max(request.target);
        let cascade = cascade::revalidate_dependents(
            course_id,
            shifted,
            &mut schedule,
            &self.catalog,
            &self.dependencies,
            &self.config,
        )?;
        for result in &cascade {
            diagnostics.record(
                &result.course_id,
                result.semester_index,
                &result.outcome,
                Role::Dependent,
            );
        }

        let failed = diagnostics.failures().count();
        if failed > 0 {
            debug!("{failed} course(s) flagged after moving {course_id}");
        }

        Ok(MoveReport {
            status: MoveStatus::Applied,
            schedule,
            diagnostics,
        })
    }

    /// Validate every non-elective course of a plan where it stands
    ///
    /// Credit totals are reconciled first; each course is then annotated with
    /// the full rule check (position, offering, prerequisites).
    ///
    /// # Errors
    /// Returns [`EngineError::NotFound`] if a scheduled course is not in the catalog.
    pub fn validate_schedule(
        &self,
        mut schedule: Schedule,
    ) -> Result<(Schedule, Diagnostics), EngineError> {
        schedule.reindex();
        for index in schedule.recompute_credits() {
            warn!("Semester {} credit total did not match its courses; recomputed", index + 1);
        }
        if let Err(duplicates) = schedule.check_integrity(&self.config.elective_marker) {
            for message in duplicates {
                warn!("{message}");
            }
        }

        let mut results = Vec::new();
        for semester in &schedule.semesters {
            for entry in &semester.courses {
                if entry.is_elective(&self.config.elective_marker) {
                    continue;
                }
                let outcome = validator::validate_in_place(
                    &entry.course_id,
                    semester.index,
                    &schedule,
                    &self.catalog,
                    &self.config,
                )?;
                results.push((semester.index, entry.course_id.clone(), outcome));
            }
        }

        let mut diagnostics = Diagnostics::new();
        for (index, course_id, outcome) in results {
            if let Some(entry) = schedule.entry_mut(index, &course_id) {
                entry.annotate(outcome.is_passed(), outcome.message.clone());
            }
            diagnostics.record(&course_id, index, &outcome, Role::Planned);
        }

        info!(
            "Validated {} courses: {} flagged",
            diagnostics.len(),
            diagnostics.failures().count()
        );
        Ok((schedule, diagnostics))
    }

    fn unchanged(schedule: Schedule) -> MoveReport {
        MoveReport {
            status: MoveStatus::Unchanged,
            schedule,
            diagnostics: Diagnostics::new(),
        }
    }
}
