//! Command-line interface entry point for `planner`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use semester_planner::config::Config;
use semester_planner::logger::{enable_debug, init_file_logging, set_level, set_verbose, Level};
use semester_planner::{error, info};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag wins over config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    set_verbose(verbose);
    set_level(level);

    let config_log_path = (!config.logging.file.is_empty())
        .then(|| std::path::PathBuf::from(&config.logging.file));

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if let Some(parent) = log_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else if cfg!(feature = "file-logging") {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let result = match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
            Ok(())
        }
        Command::Move {
            input,
            course,
            to,
            from,
            output,
            json,
        } => commands::move_course::run(
            &input,
            &commands::move_course::MoveArgs {
                course: &course,
                to,
                from,
                output: output.as_deref(),
                json,
            },
            &config,
        ),
        Command::Validate {
            input,
            output,
            json,
        } => commands::validate::run(&input, output.as_deref(), json, &config),
        Command::Dependents { catalog, course } => {
            commands::dependents::run(&catalog, course.as_deref(), &config)
        }
        Command::Complete {
            schedule,
            semester,
            course,
            output,
        } => commands::edit::complete(&schedule, semester, &course, output.as_deref()),
        Command::Init {
            schedule,
            first,
            year,
            semesters,
            force,
        } => commands::edit::init(
            &schedule,
            &commands::edit::InitArgs {
                first,
                year,
                semesters,
                force,
            },
            &config,
        ),
        Command::Extend {
            schedule,
            count,
            output,
        } => commands::edit::extend(&schedule, count, output.as_deref(), &config),
    };

    if let Err(message) = result {
        error!("{message}");
        eprintln!("✗ {message}");
        std::process::exit(1);
    }
}
