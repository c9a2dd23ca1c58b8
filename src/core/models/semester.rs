//! Semester and schedule entry models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Season of a semester, used to test offering eligibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SemesterLabel {
    /// Fall semester
    Fall,
    /// Spring semester
    Spring,
    /// Summer session
    Summer,
}

impl SemesterLabel {
    /// Label of the semester that follows this one
    ///
    /// Fall is followed by Spring; Spring by Summer when summers are included,
    /// otherwise by Fall; Summer always by Fall.
    #[must_use]
    pub const fn next(self, include_summer: bool) -> Self {
        match self {
            Self::Fall => Self::Spring,
            Self::Spring if include_summer => Self::Summer,
            Self::Spring | Self::Summer => Self::Fall,
        }
    }

    /// Season ordering for a plan starting in `first`
    ///
    /// Summer is only part of the rotation when `include_summer` is set; a
    /// Summer start without summers falls back to Fall.
    #[must_use]
    pub fn rotation(first: Self, include_summer: bool) -> Vec<Self> {
        let start = if !include_summer && first == Self::Summer {
            Self::Fall
        } else {
            first
        };
        let len = if include_summer { 3 } else { 2 };

        let mut seasons = Vec::with_capacity(len);
        let mut current = start;
        for _ in 0..len {
            seasons.push(current);
            current = current.next(include_summer);
        }
        seasons
    }

    /// Calendar year of this season when it follows a semester in `previous_year`
    ///
    /// The year turns over between Fall and Spring.
    #[must_use]
    pub const fn year_after(self, previous_year: u16) -> u16 {
        match self {
            Self::Spring => previous_year.saturating_add(1),
            Self::Fall | Self::Summer => previous_year,
        }
    }
}

impl fmt::Display for SemesterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fall => "Fall",
            Self::Spring => "Spring",
            Self::Summer => "Summer",
        };
        write!(f, "{name}")
    }
}

impl FromStr for SemesterLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fall" => Ok(Self::Fall),
            "spring" => Ok(Self::Spring),
            "summer" => Ok(Self::Summer),
            other => Err(format!("Unknown semester label: '{other}'")),
        }
    }
}

/// A course placed in a semester
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseEntry {
    /// Course key (e.g., "CMP SCI 2250"), or an elective slot key (e.g., "GEN ED")
    #[serde(alias = "course")]
    pub course_id: String,

    /// Course title; electives carry the reserved marker name
    pub name: String,

    /// Credit hours
    pub credits: u32,

    /// Catalog description
    #[serde(default)]
    pub description: String,

    /// Whether the student has already passed the course
    #[serde(default)]
    pub is_completed: bool,

    /// Result of the last validation against the current position
    #[serde(default)]
    pub passed_validation: Option<bool>,

    /// Diagnostic message from the last failed validation
    #[serde(default)]
    pub validation_msg: Option<String>,
}

impl CourseEntry {
    /// Create a new, unvalidated entry
    #[must_use]
    pub fn new(course_id: impl Into<String>, name: impl Into<String>, credits: u32) -> Self {
        Self {
            course_id: course_id.into(),
            name: name.into(),
            credits,
            description: String::new(),
            is_completed: false,
            passed_validation: None,
            validation_msg: None,
        }
    }

    /// Whether this entry is an elective slot (its name is the reserved marker)
    #[must_use]
    pub fn is_elective(&self, marker: &str) -> bool {
        self.name == marker
    }

    /// Record a validation result on this entry
    pub fn annotate(&mut self, passed: bool, message: Option<String>) {
        self.passed_validation = Some(passed);
        self.validation_msg = message;
    }
}

/// One semester of the plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semester {
    /// Position in the plan (0-based)
    #[serde(default)]
    pub index: usize,

    /// Season
    #[serde(alias = "semester")]
    pub label: SemesterLabel,

    /// Calendar year, when the plan is dated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,

    /// Sum of credit hours of `courses`
    #[serde(default, alias = "credits")]
    pub credits_total: u32,

    /// Courses in plan order
    #[serde(default, alias = "schedule")]
    pub courses: Vec<CourseEntry>,
}

impl Semester {
    /// Create an empty semester
    #[must_use]
    pub const fn new(index: usize, label: SemesterLabel) -> Self {
        Self {
            index,
            label,
            year: None,
            credits_total: 0,
            courses: Vec::new(),
        }
    }

    /// Append a course and add its credits
    pub fn push(&mut self, entry: CourseEntry) {
        self.credits_total = self.credits_total.saturating_add(entry.credits);
        self.courses.push(entry);
    }

    /// Remove the first entry with `course_id`, subtracting its credits
    pub fn take(&mut self, course_id: &str) -> Option<CourseEntry> {
        let pos = self.courses.iter().position(|c| c.course_id == course_id)?;
        let entry = self.courses.remove(pos);
        self.credits_total = self.credits_total.saturating_sub(entry.credits);
        Some(entry)
    }

    /// Whether the semester holds an entry with `course_id`
    #[must_use]
    pub fn contains(&self, course_id: &str) -> bool {
        self.courses.iter().any(|c| c.course_id == course_id)
    }

    /// Find an entry by course key
    #[must_use]
    pub fn get(&self, course_id: &str) -> Option<&CourseEntry> {
        self.courses.iter().find(|c| c.course_id == course_id)
    }

    /// Find a mutable entry by course key
    pub fn get_mut(&mut self, course_id: &str) -> Option<&mut CourseEntry> {
        self.courses.iter_mut().find(|c| c.course_id == course_id)
    }

    /// Sum of the credits of the courses currently held
    #[must_use]
    pub fn summed_credits(&self) -> u32 {
        self.courses
            .iter()
            .fold(0, |total, c| total.saturating_add(c.credits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_parse_and_display() {
        assert_eq!("fall".parse::<SemesterLabel>(), Ok(SemesterLabel::Fall));
        assert_eq!(" Spring ".parse::<SemesterLabel>(), Ok(SemesterLabel::Spring));
        assert_eq!("SUMMER".parse::<SemesterLabel>(), Ok(SemesterLabel::Summer));
        assert!("winter".parse::<SemesterLabel>().is_err());
        assert_eq!(SemesterLabel::Summer.to_string(), "Summer");
    }

    #[test]
    fn test_label_next() {
        assert_eq!(SemesterLabel::Fall.next(false), SemesterLabel::Spring);
        assert_eq!(SemesterLabel::Spring.next(false), SemesterLabel::Fall);
        assert_eq!(SemesterLabel::Spring.next(true), SemesterLabel::Summer);
        assert_eq!(SemesterLabel::Summer.next(true), SemesterLabel::Fall);
    }

    #[test]
    fn test_label_rotation() {
        use SemesterLabel::{Fall, Spring, Summer};
        assert_eq!(SemesterLabel::rotation(Fall, true), vec![Fall, Spring, Summer]);
        assert_eq!(SemesterLabel::rotation(Spring, true), vec![Spring, Summer, Fall]);
        assert_eq!(SemesterLabel::rotation(Spring, false), vec![Spring, Fall]);
        assert_eq!(SemesterLabel::rotation(Summer, false), vec![Fall, Spring]);
    }

    #[test]
    fn test_year_turns_over_in_spring() {
        assert_eq!(SemesterLabel::Spring.year_after(2025), 2026);
        assert_eq!(SemesterLabel::Summer.year_after(2026), 2026);
        assert_eq!(SemesterLabel::Fall.year_after(2026), 2026);
        assert_eq!(SemesterLabel::Spring.year_after(u16::MAX), u16::MAX);
    }

    #[test]
    fn test_huge_credits_saturate() {
        let mut semester = Semester::new(0, SemesterLabel::Fall);
        semester.push(CourseEntry::new("A", "A", u32::MAX));
        semester.push(CourseEntry::new("B", "B", 3));
        assert_eq!(semester.credits_total, u32::MAX);
        assert_eq!(semester.summed_credits(), u32::MAX);
    }

    #[test]
    fn test_year_round_trips_and_is_optional() {
        let dated: Semester = serde_json::from_str(
            r#"{"semester": "Fall", "year": 2025, "credits": 0, "schedule": []}"#,
        )
        .unwrap();
        assert_eq!(dated.year, Some(2025));
        let json = serde_json::to_string(&dated).unwrap();
        assert!(json.contains("\"year\":2025"));

        let undated = Semester::new(0, SemesterLabel::Spring);
        assert!(!serde_json::to_string(&undated).unwrap().contains("year"));
    }

    #[test]
    fn test_semester_push_and_take() {
        let mut semester = Semester::new(0, SemesterLabel::Fall);
        semester.push(CourseEntry::new("CMP SCI 1250", "Programming I", 3));
        semester.push(CourseEntry::new("MATH 1320", "Statistics", 4));
        assert_eq!(semester.credits_total, 7);
        assert!(semester.contains("MATH 1320"));

        let taken = semester.take("CMP SCI 1250").unwrap();
        assert_eq!(taken.credits, 3);
        assert_eq!(semester.credits_total, 4);
        assert_eq!(semester.credits_total, semester.summed_credits());
        assert!(semester.take("CMP SCI 1250").is_none());
    }

    #[test]
    fn test_entry_elective_and_annotation() {
        let mut entry = CourseEntry::new("GEN ED", "[User Selects]", 3);
        assert!(entry.is_elective("[User Selects]"));
        assert!(entry.passed_validation.is_none());

        entry.annotate(false, Some("nope".to_string()));
        assert_eq!(entry.passed_validation, Some(false));
        assert_eq!(entry.validation_msg.as_deref(), Some("nope"));
    }

    #[test]
    fn test_semester_deserializes_original_field_names() {
        let json = r#"{
            "semester": "Spring",
            "credits": 3,
            "schedule": [
                {"course": "ENGLISH 1100", "name": "Composition", "credits": 3, "description": ""}
            ]
        }"#;

        let semester: Semester = serde_json::from_str(json).unwrap();
        assert_eq!(semester.label, SemesterLabel::Spring);
        assert_eq!(semester.credits_total, 3);
        assert_eq!(semester.courses[0].course_id, "ENGLISH 1100");
        assert!(!semester.courses[0].is_completed);
    }
}
