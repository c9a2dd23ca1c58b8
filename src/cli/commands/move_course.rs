//! Move command handler

use super::{output_path, read_plan, save_schedule, semester_index};
use crate::args::PlanInput;
use semester_planner::config::Config;
use semester_planner::core::planner::normalize_course_key;
use semester_planner::{info, verbose, Engine, MoveReport, MoveRequest, MoveStatus};
use std::path::Path;

/// Move-specific arguments
pub struct MoveArgs<'a> {
    /// Course to move
    pub course: &'a str,
    /// Destination semester, 1-based
    pub to: usize,
    /// Current semester, 1-based; located when `None`
    pub from: Option<usize>,
    /// Explicit output path
    pub output: Option<&'a Path>,
    /// Print diagnostics as JSON
    pub json: bool,
}

/// Run the move command
///
/// # Errors
/// Returns a message if a payload cannot be loaded, the request does not
/// match the schedule, or the result cannot be written.
pub fn run(input: &PlanInput, args: &MoveArgs<'_>, config: &Config) -> Result<(), String> {
    let (catalog, schedule) = read_plan(input, config)?;
    let course_id = normalize_course_key(args.course);
    let target = semester_index(args.to)?;
    let origin = match args.from {
        Some(number) => semester_index(number)?,
        None => schedule
            .locate(&course_id)
            .ok_or_else(|| format!("{course_id} is not in the schedule"))?,
    };
    let credits = schedule
        .entry(origin, &course_id)
        .map(|entry| entry.credits)
        .ok_or_else(|| format!("{course_id} is not in semester {}", origin + 1))?;

    let engine = Engine::new(catalog, config.engine_config());
    let request = MoveRequest {
        course_id,
        credits,
        origin,
        target,
    };
    let report = engine
        .move_course(schedule, &request)
        .map_err(|e| format!("Move failed: {e}"))?;

    print_report(&request, &report, args.json)?;

    if report.status == MoveStatus::Applied {
        let out = output_path(args.output, &input.schedule, config);
        save_schedule(&out, &report.schedule)?;
    } else {
        info!("Schedule left unchanged; nothing written");
    }
    Ok(())
}

fn print_report(request: &MoveRequest, report: &MoveReport, json: bool) -> Result<(), String> {
    if json {
        let text = serde_json::to_string_pretty(&report.diagnostics)
            .map_err(|e| format!("Failed to encode diagnostics: {e}"))?;
        println!("{text}");
        return Ok(());
    }

    match report.status {
        MoveStatus::Applied => println!(
            "✓ Moved {} to semester {}",
            request.course_id,
            request.target + 1
        ),
        MoveStatus::Rejected => println!(
            "✗ {} cannot move to semester {}",
            request.course_id,
            request.target + 1
        ),
        MoveStatus::Unchanged => println!(
            "✓ {} is already in semester {}",
            request.course_id,
            request.target + 1
        ),
    }
    print!("{}", report.diagnostics);

    let flagged = report.diagnostics.failures().count();
    verbose!(
        "{} course(s) checked, {flagged} flagged",
        report.diagnostics.len()
    );
    Ok(())
}
