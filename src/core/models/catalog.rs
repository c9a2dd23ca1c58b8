//! Catalog index: course key -> catalog entry

use super::CourseInfo;
use crate::core::error::EngineError;
use std::collections::HashMap;

/// Read-only lookup of every course the planner knows about
///
/// Insertion order is remembered so that iteration (and therefore the
/// dependency index built from it) is deterministic.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Entries indexed by course key
    courses: HashMap<String, CourseInfo>,

    /// Course keys in insertion order
    order: Vec<String>,
}

impl Catalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from entries, rejecting duplicate keys
    ///
    /// # Errors
    /// Returns [`EngineError::MalformedCatalog`] if two entries share a key,
    /// or if an entry has an empty key or no offered semesters.
    pub fn from_entries<I>(entries: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = CourseInfo>,
    {
        let mut catalog = Self::new();
        for info in entries {
            catalog.insert(info)?;
        }
        Ok(catalog)
    }

    /// Add a course to the catalog
    ///
    /// # Errors
    /// Returns [`EngineError::MalformedCatalog`] for duplicate or incomplete entries.
    pub fn insert(&mut self, info: CourseInfo) -> Result<(), EngineError> {
        if info.course_id.trim().is_empty() {
            return Err(EngineError::malformed("<empty>", "course key is empty"));
        }
        if info.offered_semesters.is_empty() {
            return Err(EngineError::malformed(
                &info.course_id,
                "no offered semesters",
            ));
        }
        if self.courses.contains_key(&info.course_id) {
            return Err(EngineError::malformed(
                &info.course_id,
                "duplicate catalog entry",
            ));
        }
        self.order.push(info.course_id.clone());
        self.courses.insert(info.course_id.clone(), info);
        Ok(())
    }

    /// Look up a course by key
    ///
    /// # Errors
    /// Returns [`EngineError::NotFound`] if the key is not in the catalog.
    pub fn lookup(&self, course_id: &str) -> Result<&CourseInfo, EngineError> {
        self.courses
            .get(course_id)
            .ok_or_else(|| EngineError::NotFound(course_id.to_string()))
    }

    /// Look up a course by key, returning `None` when absent
    #[must_use]
    pub fn get(&self, course_id: &str) -> Option<&CourseInfo> {
        self.courses.get(course_id)
    }

    /// Whether the catalog knows `course_id`
    #[must_use]
    pub fn contains(&self, course_id: &str) -> bool {
        self.courses.contains_key(course_id)
    }

    /// Number of catalog entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &CourseInfo> {
        self.order.iter().filter_map(|key| self.courses.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::SemesterLabel;

    fn info(id: &str) -> CourseInfo {
        CourseInfo::new(id, 3, [SemesterLabel::Fall])
    }

    #[test]
    fn test_lookup() {
        let catalog = Catalog::from_entries([info("CMP SCI 1250"), info("MATH 1320")]).unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(catalog.lookup("MATH 1320").is_ok());
        assert_eq!(
            catalog.lookup("MATH 9999"),
            Err(EngineError::NotFound("MATH 9999".to_string()))
        );
    }

    #[test]
    fn test_duplicate_rejected() {
        let result = Catalog::from_entries([info("MATH 1320"), info("MATH 1320")]);
        assert!(matches!(
            result,
            Err(EngineError::MalformedCatalog { ref course_id, .. }) if course_id == "MATH 1320"
        ));
    }

    #[test]
    fn test_missing_offering_rejected() {
        let mut catalog = Catalog::new();
        let result = catalog.insert(CourseInfo::new("PHIL 1000", 3, []));
        assert!(matches!(result, Err(EngineError::MalformedCatalog { .. })));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_iteration_keeps_insertion_order() {
        let catalog =
            Catalog::from_entries([info("B"), info("A"), info("C")]).unwrap();
        let keys: Vec<&str> = catalog.iter().map(|c| c.course_id.as_str()).collect();
        assert_eq!(keys, vec!["B", "A", "C"]);
    }
}
