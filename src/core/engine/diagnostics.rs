//! Structured validation diagnostics for a presentation layer

use super::validator::{FailureKind, ValidationOutcome};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a course was validated in this request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The course the request moved
    Moved,
    /// A course re-checked because the move affected it (a prerequisite or its earned credits)
    Dependent,
    /// A course checked during a whole-plan validation
    Planned,
}

/// One validation event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Course key
    pub course_id: String,
    /// Semester the course was judged in
    pub semester_index: usize,
    /// Whether it passed
    pub passed: bool,
    /// Failure message, if any
    pub message: Option<String>,
    /// Failure category, if any
    pub kind: Option<FailureKind>,
    /// Why it was validated
    pub role: Role,
}

/// Ordered list of validation events from one engine call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an outcome
    pub fn record(
        &mut self,
        course_id: &str,
        semester_index: usize,
        outcome: &ValidationOutcome,
        role: Role,
    ) {
        self.entries.push(Diagnostic {
            course_id: course_id.to_string(),
            semester_index,
            passed: outcome.is_passed(),
            message: outcome.message.clone(),
            kind: outcome.failure(),
            role,
        });
    }

    /// All events in emission order
    #[must_use]
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Events that did not pass
    pub fn failures(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(|d| !d.passed)
    }

    /// Event for `course_id`, if one was recorded
    #[must_use]
    pub fn find(&self, course_id: &str) -> Option<&Diagnostic> {
        self.entries.iter().find(|d| d.course_id == course_id)
    }

    /// Number of events
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no events were recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in &self.entries {
            let mark = if d.passed { "✓" } else { "✗" };
            write!(f, "{mark} {} (semester {})", d.course_id, d.semester_index + 1)?;
            if let Some(message) = &d.message {
                write!(f, ": {message}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
