//! Schedule edit handlers: creation, completion toggling and semester rotation

use super::{read_schedule, save_schedule, semester_index};
use semester_planner::config::Config;
use semester_planner::core::models::{Schedule, Semester, SemesterLabel};
use semester_planner::core::planner::normalize_course_key;
use semester_planner::info;
use std::path::Path;

/// Init-specific arguments
pub struct InitArgs {
    /// Season of the first semester
    pub first: SemesterLabel,
    /// Calendar year of the first semester; semesters stay undated when `None`
    pub year: Option<u16>,
    /// Number of semesters to create
    pub semesters: usize,
    /// Overwrite an existing file
    pub force: bool,
}

/// Write a new schedule of empty semesters
///
/// # Errors
/// Returns a message if the file exists and `force` is not set, or if it
/// cannot be written.
pub fn init(schedule_path: &Path, args: &InitArgs, config: &Config) -> Result<(), String> {
    if schedule_path.exists() && !args.force {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            schedule_path.display()
        ));
    }
    let schedule = Schedule::with_rotation(
        args.first,
        args.year,
        config.rules.include_summer,
        args.semesters,
    );
    info!("Created {} semesters", schedule.len());
    for (number, semester) in schedule.semesters.iter().enumerate() {
        println!("✓ Semester {} ({})", number + 1, semester_name(semester));
    }
    save_schedule(schedule_path, &schedule)
}

/// Toggle the completed flag of one course
///
/// # Errors
/// Returns a message if the schedule cannot be loaded, the course is not in
/// the given semester, or the result cannot be written.
pub fn complete(
    schedule_path: &Path,
    semester: usize,
    course: &str,
    output: Option<&Path>,
) -> Result<(), String> {
    let mut schedule = read_schedule(schedule_path)?;
    let index = semester_index(semester)?;
    let course_id = normalize_course_key(course);

    let completed = schedule
        .toggle_completed(index, &course_id)
        .map_err(|e| e.to_string())?;
    let state = if completed { "completed" } else { "not completed" };
    println!("✓ {course_id} marked {state}");

    save_schedule(output.unwrap_or(schedule_path), &schedule)
}

/// Append `count` empty semesters
///
/// # Errors
/// Returns a message if the schedule cannot be loaded or written.
pub fn extend(
    schedule_path: &Path,
    count: usize,
    output: Option<&Path>,
    config: &Config,
) -> Result<(), String> {
    let mut schedule = read_schedule(schedule_path)?;
    for _ in 0..count {
        let index = schedule.push_semester(config.rules.include_summer);
        let name = semester_name(&schedule.semesters[index]);
        info!("Added semester {} ({name})", index + 1);
        println!("✓ Added semester {} ({name})", index + 1);
    }
    save_schedule(output.unwrap_or(schedule_path), &schedule)
}

/// Season and, when dated, year of a semester, e.g. "Fall 2025"
fn semester_name(semester: &Semester) -> String {
    match semester.year {
        Some(year) => format!("{} {year}", semester.label),
        None => semester.label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semester_planner::core::planner::load_schedule;
    use tempfile::TempDir;

    fn init_args(year: Option<u16>) -> InitArgs {
        InitArgs {
            first: SemesterLabel::Fall,
            year,
            semesters: 4,
            force: false,
        }
    }

    #[test]
    fn test_semester_name() {
        let mut semester = Semester::new(0, SemesterLabel::Spring);
        assert_eq!(semester_name(&semester), "Spring");
        semester.year = Some(2026);
        assert_eq!(semester_name(&semester), "Spring 2026");
    }

    #[test]
    fn test_init_writes_dated_rotation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plan.json");
        let config = Config::from_defaults();

        init(&path, &init_args(Some(2025)), &config).unwrap();

        let schedule = load_schedule(&path).unwrap();
        let dated: Vec<(SemesterLabel, Option<u16>)> =
            schedule.semesters.iter().map(|s| (s.label, s.year)).collect();
        assert_eq!(
            dated,
            vec![
                (SemesterLabel::Fall, Some(2025)),
                (SemesterLabel::Spring, Some(2026)),
                (SemesterLabel::Fall, Some(2026)),
                (SemesterLabel::Spring, Some(2027)),
            ]
        );
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plan.json");
        let config = Config::from_defaults();

        init(&path, &init_args(None), &config).unwrap();
        assert!(init(&path, &init_args(None), &config).is_err());

        let forced = InitArgs {
            force: true,
            semesters: 2,
            ..init_args(None)
        };
        init(&path, &forced, &config).unwrap();
        assert_eq!(load_schedule(&path).unwrap().len(), 2);
    }

    #[test]
    fn test_extend_continues_years() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plan.json");
        let config = Config::from_defaults();
        init(&path, &init_args(Some(2025)), &config).unwrap();

        extend(&path, 2, None, &config).unwrap();

        let schedule = load_schedule(&path).unwrap();
        assert_eq!(schedule.len(), 6);
        assert_eq!(schedule.semesters[4].label, SemesterLabel::Fall);
        assert_eq!(schedule.semesters[4].year, Some(2027));
        assert_eq!(schedule.semesters[5].year, Some(2028));
    }
}
