//! Multi-semester schedule model

use super::{CourseEntry, Semester, SemesterLabel};
use crate::core::error::EngineError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A student's plan: semesters in chronological order plus credit earned outside it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Semesters, index 0..N-1
    pub semesters: Vec<Semester>,

    /// Course keys satisfied outside the tracked schedule (transfer, waived, taken)
    #[serde(default, alias = "courses_taken")]
    pub completed_elsewhere: Vec<String>,

    /// Credit hours earned before the first planned semester
    #[serde(default)]
    pub starting_credits: u32,
}

impl Schedule {
    /// Create a schedule from semesters, renumbering them positionally
    #[must_use]
    pub fn new(semesters: Vec<Semester>) -> Self {
        let mut schedule = Self {
            semesters,
            completed_elsewhere: Vec::new(),
            starting_credits: 0,
        };
        schedule.reindex();
        schedule
    }

    /// Create `count` empty semesters following the season rotation
    ///
    /// With `first_year` set, every semester is dated and the year advances
    /// at each Spring.
    #[must_use]
    pub fn with_rotation(
        first: SemesterLabel,
        first_year: Option<u16>,
        include_summer: bool,
        count: usize,
    ) -> Self {
        let mut schedule = Self::default();
        let mut year = first_year;
        for (index, label) in SemesterLabel::rotation(first, include_summer)
            .into_iter()
            .cycle()
            .take(count)
            .enumerate()
        {
            if index > 0 {
                year = year.map(|y| label.year_after(y));
            }
            let mut semester = Semester::new(index, label);
            semester.year = year;
            schedule.semesters.push(semester);
        }
        schedule
    }

    /// Number of semesters
    #[must_use]
    pub fn len(&self) -> usize {
        self.semesters.len()
    }

    /// Whether the schedule has no semesters
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.semesters.is_empty()
    }

    /// Semester at `index`
    ///
    /// # Errors
    /// Returns [`EngineError::SemesterOutOfRange`] if `index` is past the end.
    pub fn semester(&self, index: usize) -> Result<&Semester, EngineError> {
        self.semesters.get(index).ok_or(EngineError::SemesterOutOfRange {
            index,
            len: self.semesters.len(),
        })
    }

    /// Mutable semester at `index`
    ///
    /// # Errors
    /// Returns [`EngineError::SemesterOutOfRange`] if `index` is past the end.
    pub fn semester_mut(&mut self, index: usize) -> Result<&mut Semester, EngineError> {
        let len = self.semesters.len();
        self.semesters
            .get_mut(index)
            .ok_or(EngineError::SemesterOutOfRange { index, len })
    }

    /// Index of the first semester holding `course_id`
    #[must_use]
    pub fn locate(&self, course_id: &str) -> Option<usize> {
        self.semesters.iter().position(|s| s.contains(course_id))
    }

    /// Entry for `course_id` in semester `index`, if present
    #[must_use]
    pub fn entry(&self, index: usize, course_id: &str) -> Option<&CourseEntry> {
        self.semesters.get(index).and_then(|s| s.get(course_id))
    }

    /// Mutable entry for `course_id` in semester `index`, if present
    pub fn entry_mut(&mut self, index: usize, course_id: &str) -> Option<&mut CourseEntry> {
        self.semesters.get_mut(index).and_then(|s| s.get_mut(course_id))
    }

    /// Whether `course_id` was completed outside the schedule
    #[must_use]
    pub fn is_completed_elsewhere(&self, course_id: &str) -> bool {
        self.completed_elsewhere.iter().any(|c| c == course_id)
    }

    /// Starting credits plus credit totals of semesters `0..=index`
    #[must_use]
    pub fn credits_through(&self, index: usize) -> u32 {
        self.semesters
            .iter()
            .take(index.saturating_add(1))
            .fold(self.starting_credits, |total, s| {
                total.saturating_add(s.credits_total)
            })
    }

    /// Append an empty semester whose label follows the last one
    ///
    /// An empty schedule starts with Fall. When the last semester is dated the
    /// new one is dated too, moving to the next year on Spring.
    ///
    /// # Returns
    /// The index of the new semester
    pub fn push_semester(&mut self, include_summer: bool) -> usize {
        let (label, year) = self.semesters.last().map_or((SemesterLabel::Fall, None), |s| {
            let label = s.label.next(include_summer);
            (label, s.year.map(|y| label.year_after(y)))
        });
        let index = self.semesters.len();
        let mut semester = Semester::new(index, label);
        semester.year = year;
        self.semesters.push(semester);
        index
    }

    /// Flip the completion flag of one entry
    ///
    /// # Returns
    /// The new value of the flag
    ///
    /// # Errors
    /// Returns an error if the semester does not exist or does not hold `course_id`.
    pub fn toggle_completed(
        &mut self,
        semester_index: usize,
        course_id: &str,
    ) -> Result<bool, EngineError> {
        let entry = self
            .semester_mut(semester_index)?
            .get_mut(course_id)
            .ok_or_else(|| EngineError::NotFound(course_id.to_string()))?;
        entry.is_completed = !entry.is_completed;
        Ok(entry.is_completed)
    }

    /// Renumber semesters to match their position
    pub fn reindex(&mut self) {
        for (index, semester) in self.semesters.iter_mut().enumerate() {
            semester.index = index;
        }
    }

    /// Recompute every semester's credit total from its courses
    ///
    /// # Returns
    /// Indices of semesters whose stored total disagreed with their courses
    pub fn recompute_credits(&mut self) -> Vec<usize> {
        let mut mismatched = Vec::new();
        for semester in &mut self.semesters {
            let summed = semester.summed_credits();
            if semester.credits_total != summed {
                mismatched.push(semester.index);
                semester.credits_total = summed;
            }
        }
        mismatched
    }

    /// Check that every non-elective course appears in at most one semester
    ///
    /// # Errors
    /// Returns one message per course key placed more than once.
    pub fn check_integrity(&self, elective_marker: &str) -> Result<(), Vec<String>> {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        let mut errors = Vec::new();

        for semester in &self.semesters {
            for entry in &semester.courses {
                if entry.is_elective(elective_marker) {
                    continue;
                }
                if let Some(first) = seen.insert(entry.course_id.as_str(), semester.index) {
                    errors.push(format!(
                        "{} is placed in both semester {} and semester {}",
                        entry.course_id,
                        first + 1,
                        semester.index + 1
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
