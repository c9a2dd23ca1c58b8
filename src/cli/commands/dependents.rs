//! Dependents command handler

use super::read_catalog;
use semester_planner::config::Config;
use semester_planner::core::models::{Catalog, DependencyIndex};
use semester_planner::core::planner::normalize_course_key;
use semester_planner::EngineError;
use std::path::Path;

/// Print the courses that list `course` as a prerequisite, or the whole index
///
/// A course that is only referenced by other entries is still reported, with a
/// note that the catalog does not define it.
///
/// # Errors
/// Returns a message if the catalog cannot be loaded or `course` appears nowhere in it.
pub fn run(catalog_path: &Path, course: Option<&str>, config: &Config) -> Result<(), String> {
    let catalog = read_catalog(catalog_path, config)?;
    let index = DependencyIndex::build(&catalog);

    let Some(course) = course else {
        print!("{index}");
        return Ok(());
    };

    let course_id = normalize_course_key(course);
    if !index.contains_course(&course_id) {
        return Err(EngineError::NotFound(course_id).to_string());
    }

    for line in describe(&catalog, &index, &course_id) {
        println!("{line}");
    }
    Ok(())
}

fn describe(catalog: &Catalog, index: &DependencyIndex, course_id: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let dependents = index.dependents_of(course_id);
    if dependents.is_empty() {
        lines.push(format!("{course_id} is not a prerequisite of any course"));
    } else {
        lines.push(format!("{course_id} is required by:"));
        lines.extend(dependents.iter().map(|d| format!("  {d}")));
    }

    match catalog.get(course_id) {
        Some(info) if !info.prerequisite.is_empty() => {
            let terms: Vec<String> = info.prerequisite.iter().map(ToString::to_string).collect();
            lines.push(format!("{course_id} requires: {}", terms.join(", ")));
        }
        Some(_) => {}
        None => lines.push(format!("{course_id} is referenced but not defined in the catalog")),
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use semester_planner::core::models::{CourseInfo, SemesterLabel, Term};

    fn catalog() -> Catalog {
        Catalog::from_entries([
            CourseInfo::new("CMP SCI 1250", 3, [SemesterLabel::Fall]),
            CourseInfo::new("CMP SCI 2250", 3, [SemesterLabel::Fall])
                .with_term(Term::Single("CMP SCI 1250".to_string()))
                .with_term(Term::Single("MATH 1100".to_string())),
        ])
        .unwrap()
    }

    #[test]
    fn test_describe_catalog_course() {
        let catalog = catalog();
        let index = DependencyIndex::build(&catalog);
        let lines = describe(&catalog, &index, "CMP SCI 2250");
        assert_eq!(lines[0], "CMP SCI 2250 is not a prerequisite of any course");
        assert_eq!(lines[1], "CMP SCI 2250 requires: CMP SCI 1250, MATH 1100");
    }

    #[test]
    fn test_describe_referenced_only_course() {
        let catalog = catalog();
        let index = DependencyIndex::build(&catalog);
        let lines = describe(&catalog, &index, "MATH 1100");
        assert_eq!(lines[0], "MATH 1100 is required by:");
        assert_eq!(lines[1], "  CMP SCI 2250");
        assert!(lines[2].contains("not defined in the catalog"));
    }

    #[test]
    fn test_unknown_course_is_an_error() {
        let config = Config::from_defaults();
        let result = run(Path::new("samples/catalog.toml"), Some("PHYS 9999"), &config);
        assert!(result.unwrap_err().contains("PHYS 9999"));
    }
}
