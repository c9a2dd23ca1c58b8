//! Catalog course model

use super::SemesterLabel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One atomic requirement within a prerequisite expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Term {
    /// A single course that must be completed first (or taken concurrently
    /// when it is the declared companion)
    Single(String),

    /// A group of alternatives; any one of them satisfies the term
    AnyOf(Vec<String>),

    /// Minimum cumulative credits earned at or before the target semester
    CreditThreshold(u32),
}

impl Term {
    /// Course keys referenced by this term (empty for credit thresholds)
    #[must_use]
    pub fn course_ids(&self) -> &[String] {
        match self {
            Self::Single(id) => std::slice::from_ref(id),
            Self::AnyOf(ids) => ids,
            Self::CreditThreshold(_) => &[],
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(id) => write!(f, "{id}"),
            Self::AnyOf(ids) => write!(f, "one of ({})", ids.join(", ")),
            Self::CreditThreshold(min) => write!(f, "{min} credit hours"),
        }
    }
}

/// Ordered list of prerequisite terms. Every term must hold.
pub type PrereqExpr = Vec<Term>;

/// Fixed-position rule for courses that may only sit in early semesters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Only valid in exactly this semester index (e.g. first-semester seminar)
    Exactly(usize),
    /// Only valid in a semester index less than or equal to this one
    AtMost(usize),
}

impl Placement {
    /// Whether a course with this rule may occupy `semester_index`
    #[must_use]
    pub const fn allows(self, semester_index: usize) -> bool {
        match self {
            Self::Exactly(index) => semester_index == index,
            Self::AtMost(max) => semester_index <= max,
        }
    }

    /// Human-readable description of where the course must be taken
    #[must_use]
    pub fn describe(self) -> String {
        match self {
            Self::Exactly(0) => "in the first semester".to_string(),
            Self::Exactly(index) => format!("in semester {}", index + 1),
            Self::AtMost(0) => "in the first semester".to_string(),
            Self::AtMost(1) => "in the first or second semester".to_string(),
            Self::AtMost(max) => format!("within the first {} semesters", max + 1),
        }
    }
}

/// Immutable catalog entry for a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseInfo {
    /// Course key (e.g., "CMP SCI 2250")
    pub course_id: String,

    /// Prerequisite expression, resolved at catalog load
    pub prerequisite: PrereqExpr,

    /// Companion course that may be taken in the same semester
    pub concurrent: Option<String>,

    /// Semester labels in which the course is taught
    pub offered_semesters: BTreeSet<SemesterLabel>,

    /// Credit hours
    pub credits: u32,

    /// Optional fixed-position rule
    pub placement: Option<Placement>,
}

impl CourseInfo {
    /// Create a new catalog entry with no prerequisites
    ///
    /// # Arguments
    /// * `course_id` - Course key
    /// * `credits` - Credit hours
    /// * `offered` - Semester labels the course is taught in
    #[must_use]
    pub fn new(
        course_id: impl Into<String>,
        credits: u32,
        offered: impl IntoIterator<Item = SemesterLabel>,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            prerequisite: Vec::new(),
            concurrent: None,
            offered_semesters: offered.into_iter().collect(),
            credits,
            placement: None,
        }
    }

    /// Append a prerequisite term
    #[must_use]
    pub fn with_term(mut self, term: Term) -> Self {
        if !self.prerequisite.contains(&term) {
            self.prerequisite.push(term);
        }
        self
    }

    /// Declare the concurrent companion course
    #[must_use]
    pub fn with_concurrent(mut self, course_id: impl Into<String>) -> Self {
        self.concurrent = Some(course_id.into());
        self
    }

    /// Attach a fixed-position rule
    #[must_use]
    pub const fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    /// Whether the course is taught during `label`
    #[must_use]
    pub fn is_offered(&self, label: SemesterLabel) -> bool {
        self.offered_semesters.contains(&label)
    }

    /// Whether `course_id` is the declared concurrent companion
    #[must_use]
    pub fn is_concurrent_with(&self, course_id: &str) -> bool {
        self.concurrent.as_deref() == Some(course_id)
    }

    /// Whether any term requires a minimum of earned credits
    #[must_use]
    pub fn has_credit_threshold(&self) -> bool {
        self.prerequisite
            .iter()
            .any(|term| matches!(term, Term::CreditThreshold(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_info_creation() {
        let info = CourseInfo::new(
            "CMP SCI 1250",
            3,
            [SemesterLabel::Fall, SemesterLabel::Spring],
        );

        assert_eq!(info.course_id, "CMP SCI 1250");
        assert_eq!(info.credits, 3);
        assert!(info.prerequisite.is_empty());
        assert!(info.concurrent.is_none());
        assert!(info.placement.is_none());
        assert!(info.is_offered(SemesterLabel::Fall));
        assert!(!info.is_offered(SemesterLabel::Summer));
    }

    #[test]
    fn test_duplicate_term_not_added() {
        let info = CourseInfo::new("CMP SCI 2250", 3, [SemesterLabel::Fall])
            .with_term(Term::Single("CMP SCI 1250".to_string()))
            .with_term(Term::Single("CMP SCI 1250".to_string()));

        assert_eq!(info.prerequisite.len(), 1);
    }

    #[test]
    fn test_concurrent_companion() {
        let info = CourseInfo::new("CMP SCI 2261", 3, [SemesterLabel::Fall])
            .with_concurrent("CMP SCI 2250");

        assert!(info.is_concurrent_with("CMP SCI 2250"));
        assert!(!info.is_concurrent_with("MATH 1320"));
    }

    #[test]
    fn test_has_credit_threshold() {
        let plain = CourseInfo::new("ENGLISH 3130", 3, [SemesterLabel::Fall])
            .with_term(Term::Single("ENGLISH 1100".to_string()));
        assert!(!plain.has_credit_threshold());
        assert!(plain
            .with_term(Term::CreditThreshold(48))
            .has_credit_threshold());
    }

    #[test]
    fn test_placement_rules() {
        assert!(Placement::Exactly(0).allows(0));
        assert!(!Placement::Exactly(0).allows(1));
        assert!(Placement::AtMost(1).allows(0));
        assert!(Placement::AtMost(1).allows(1));
        assert!(!Placement::AtMost(1).allows(2));
        assert_eq!(Placement::AtMost(1).describe(), "in the first or second semester");
        assert_eq!(Placement::Exactly(0).describe(), "in the first semester");
    }

    #[test]
    fn test_term_display_and_ids() {
        let any = Term::AnyOf(vec!["MATH 1320".to_string(), "MATH 1800".to_string()]);
        assert_eq!(any.to_string(), "one of (MATH 1320, MATH 1800)");
        assert_eq!(any.course_ids().len(), 2);
        assert!(Term::CreditThreshold(48).course_ids().is_empty());
        assert_eq!(Term::Single("A".to_string()).course_ids(), ["A".to_string()]);
    }
}
