//! Reverse prerequisite index

use super::Catalog;
use std::collections::HashMap;

/// Reverse prerequisite graph over catalog courses
///
/// Maps each course to the courses whose terms reference it. Courses that are
/// only referenced, never defined in the catalog, are indexed too. Any-of alternatives contribute one edge per alternative. Credit-threshold
/// terms contribute no edges. Built once per catalog and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct DependencyIndex {
    /// Maps course key -> courses that list it as a prerequisite
    dependents: HashMap<String, Vec<String>>,

    /// All course keys seen, in first-seen order
    courses: Vec<String>,
}

impl DependencyIndex {
    /// Create an empty index
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index in a single pass over the catalog
    #[must_use]
    pub fn build(catalog: &Catalog) -> Self {
        let mut index = Self::new();
        for info in catalog.iter() {
            index.add_course(&info.course_id);
            for term in &info.prerequisite {
                for prereq in term.course_ids() {
                    index.add_prerequisite(&info.course_id, prereq);
                }
            }
        }
        index
    }

    /// Register a course with no edges
    pub fn add_course(&mut self, course_id: &str) {
        if !self.dependents.contains_key(course_id) {
            self.courses.push(course_id.to_string());
            self.dependents.insert(course_id.to_string(), Vec::new());
        }
    }

    /// Record that `course_id` lists `prerequisite_id` in one of its terms
    pub fn add_prerequisite(&mut self, course_id: &str, prerequisite_id: &str) {
        self.add_course(course_id);
        self.add_course(prerequisite_id);

        if let Some(deps) = self.dependents.get_mut(prerequisite_id) {
            if !deps.iter().any(|d| d == course_id) {
                deps.push(course_id.to_string());
            }
        }
    }

    /// Courses that list `course_id` as a prerequisite (empty if none)
    #[must_use]
    pub fn dependents_of(&self, course_id: &str) -> &[String] {
        self.dependents.get(course_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of courses in the index
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Whether the index has seen `course_id`
    #[must_use]
    pub fn contains_course(&self, course_id: &str) -> bool {
        self.dependents.contains_key(course_id)
    }
}

impl std::fmt::Display for DependencyIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Dependency index ({} courses):", self.courses.len())?;
        writeln!(f)?;

        let mut sorted_courses = self.courses.clone();
        sorted_courses.sort();

        for course_id in sorted_courses {
            let deps = self.dependents_of(&course_id);
            if deps.is_empty() {
                writeln!(f, "  {course_id} ← (no dependents)")?;
            } else {
                writeln!(f, "  {course_id} ← {}", deps.join(", "))?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{CourseInfo, SemesterLabel, Term};

    fn catalog() -> Catalog {
        Catalog::from_entries([
            CourseInfo::new("CMP SCI 1250", 3, [SemesterLabel::Fall]),
            CourseInfo::new("CMP SCI 2250", 3, [SemesterLabel::Fall])
                .with_term(Term::Single("CMP SCI 1250".to_string())),
            CourseInfo::new("CMP SCI 2700", 3, [SemesterLabel::Spring]).with_term(Term::AnyOf(
                vec!["CMP SCI 1250".to_string(), "MATH 1800".to_string()],
            )),
            CourseInfo::new("ENGLISH 3130", 3, [SemesterLabel::Fall])
                .with_term(Term::CreditThreshold(48))
                .with_term(Term::Single("ENGLISH 1100".to_string())),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_index() {
        let index = DependencyIndex::new();
        assert_eq!(index.course_count(), 0);
        assert!(index.dependents_of("CMP SCI 1250").is_empty());
    }

    #[test]
    fn test_build_inverts_terms() {
        let index = DependencyIndex::build(&catalog());

        let deps = index.dependents_of("CMP SCI 1250");
        assert_eq!(deps, ["CMP SCI 2250".to_string(), "CMP SCI 2700".to_string()]);

        assert_eq!(index.dependents_of("MATH 1800"), ["CMP SCI 2700".to_string()]);
        assert_eq!(index.dependents_of("ENGLISH 1100"), ["ENGLISH 3130".to_string()]);
        assert!(index.dependents_of("CMP SCI 2250").is_empty());
    }

    #[test]
    fn test_referenced_courses_are_indexed() {
        let index = DependencyIndex::build(&catalog());
        assert!(index.contains_course("MATH 1800"));
        assert!(index.contains_course("ENGLISH 1100"));
        assert!(!index.contains_course("PHYS 1000"));
        assert_eq!(index.course_count(), 6);
    }

    #[test]
    fn test_duplicate_edge() {
        let mut index = DependencyIndex::new();
        index.add_prerequisite("CMP SCI 2250", "CMP SCI 1250");
        index.add_prerequisite("CMP SCI 2250", "CMP SCI 1250");

        assert_eq!(index.course_count(), 2);
        assert_eq!(index.dependents_of("CMP SCI 1250").len(), 1);
    }

    #[test]
    fn test_display() {
        let index = DependencyIndex::build(&catalog());
        let display = format!("{index}");
        assert!(display.contains("Dependency index"));
        assert!(display.contains("CMP SCI 1250 ← CMP SCI 2250, CMP SCI 2700"));
        assert!(display.contains("(no dependents)"));
    }
}
