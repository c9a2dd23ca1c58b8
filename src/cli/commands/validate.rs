//! Validate command handler

use super::{output_path, read_plan, save_schedule};
use crate::args::PlanInput;
use semester_planner::config::Config;
use semester_planner::Engine;
use std::path::Path;

/// Run the validate command: annotate every course of the plan in place
///
/// # Errors
/// Returns a message if a payload cannot be loaded, a scheduled course is not
/// in the catalog, or the result cannot be written.
pub fn run(
    input: &PlanInput,
    output: Option<&Path>,
    json: bool,
    config: &Config,
) -> Result<(), String> {
    let (catalog, schedule) = read_plan(input, config)?;
    let engine = Engine::new(catalog, config.engine_config());
    let (schedule, diagnostics) = engine
        .validate_schedule(schedule)
        .map_err(|e| format!("Validation failed: {e}"))?;

    if json {
        let text = serde_json::to_string_pretty(&diagnostics)
            .map_err(|e| format!("Failed to encode diagnostics: {e}"))?;
        println!("{text}");
    } else {
        let flagged: Vec<_> = diagnostics.failures().collect();
        if flagged.is_empty() {
            println!("✓ All {} scheduled courses are valid", diagnostics.len());
        } else {
            println!(
                "✗ {} of {} scheduled courses are flagged:",
                flagged.len(),
                diagnostics.len()
            );
            for d in flagged {
                println!(
                    "  {} (semester {}): {}",
                    d.course_id,
                    d.semester_index + 1,
                    d.message.as_deref().unwrap_or_default()
                );
            }
        }
    }

    let out = output_path(output, &input.schedule, config);
    save_schedule(&out, &schedule)
}
