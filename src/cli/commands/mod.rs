//! CLI command handlers for `planner`.
//!
//! Each command is implemented in its own submodule. Handlers return
//! `Result<(), String>`; `main` prints the error and sets the exit code.

pub mod config;
pub mod dependents;
pub mod edit;
pub mod move_course;
pub mod validate;

use crate::args::PlanInput;
use semester_planner::config::Config;
use semester_planner::core::models::{Catalog, Schedule};
use semester_planner::core::planner::{load_catalog, load_schedule, write_json};
use semester_planner::{info, verbose};
use std::path::{Path, PathBuf};

/// Load the catalog named on the command line
pub(crate) fn read_catalog(path: &Path, config: &Config) -> Result<Catalog, String> {
    let catalog = load_catalog(path, &config.engine_config())
        .map_err(|e| format!("Failed to load catalog {}: {e}", path.display()))?;
    verbose!("✓ Catalog loaded: {} courses from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Load the schedule named on the command line
pub(crate) fn read_schedule(path: &Path) -> Result<Schedule, String> {
    let schedule = load_schedule(path)
        .map_err(|e| format!("Failed to load schedule {}: {e}", path.display()))?;
    verbose!(
        "✓ Schedule loaded: {} semesters from {}",
        schedule.len(),
        path.display()
    );
    Ok(schedule)
}

/// Load both payloads and fold the command-line extras into the schedule
pub(crate) fn read_plan(input: &PlanInput, config: &Config) -> Result<(Catalog, Schedule), String> {
    let catalog = read_catalog(&input.catalog, config)?;
    let mut schedule = read_schedule(&input.schedule)?;

    for course in &input.taken {
        let course = semester_planner::core::planner::normalize_course_key(course);
        if !schedule.is_completed_elsewhere(&course) {
            schedule.completed_elsewhere.push(course);
        }
    }
    if let Some(credits) = input.starting_credits {
        schedule.starting_credits = credits;
    }
    Ok((catalog, schedule))
}

/// Output path: explicit `--output`, else `<out_dir>/<schedule file name>`
pub(crate) fn output_path(explicit: Option<&Path>, schedule: &Path, config: &Config) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    let name = schedule
        .file_name()
        .map_or_else(|| "schedule.json".into(), std::ffi::OsStr::to_os_string);
    if config.paths.out_dir.is_empty() {
        PathBuf::from(name)
    } else {
        PathBuf::from(&config.paths.out_dir).join(name)
    }
}

/// Write the schedule as JSON and report where it went
pub(crate) fn save_schedule(path: &Path, schedule: &Schedule) -> Result<(), String> {
    write_json(path, schedule).map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
    info!("Schedule written to {}", path.display());
    println!("✓ Schedule written to: {}", path.display());
    Ok(())
}

/// Convert a 1-based semester number from the command line
pub(crate) fn semester_index(number: usize) -> Result<usize, String> {
    number
        .checked_sub(1)
        .ok_or_else(|| "Semesters are numbered from 1".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semester_index() {
        assert_eq!(semester_index(1), Ok(0));
        assert_eq!(semester_index(8), Ok(7));
        assert!(semester_index(0).is_err());
    }

    #[test]
    fn test_output_path_prefers_explicit() {
        let config = Config::from_defaults();
        assert_eq!(
            output_path(Some(Path::new("x/out.json")), Path::new("plan.json"), &config),
            PathBuf::from("x/out.json")
        );
    }

    #[test]
    fn test_output_path_uses_out_dir() {
        let mut config = Config::from_defaults();
        config.paths.out_dir = "plans".to_string();
        assert_eq!(
            output_path(None, Path::new("data/plan.json"), &config),
            PathBuf::from("plans/plan.json")
        );
        config.paths.out_dir.clear();
        assert_eq!(
            output_path(None, Path::new("data/plan.json"), &config),
            PathBuf::from("plan.json")
        );
    }
}
