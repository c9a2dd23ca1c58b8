//! CLI argument definitions for `planner`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use semester_planner::config::ConfigOverrides;
use semester_planner::core::models::SemesterLabel;
use semester_planner::logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Level::from(*self))
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `credit_threshold`, `out_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

/// Arguments shared by commands that read a catalog and a schedule
#[derive(Debug, Clone, clap::Args)]
pub struct PlanInput {
    /// Catalog file (`.toml` or `.json`)
    #[arg(value_name = "CATALOG")]
    pub catalog: PathBuf,

    /// Schedule file (`.json`)
    #[arg(value_name = "SCHEDULE")]
    pub schedule: PathBuf,

    /// Courses completed outside the schedule (transfer or waived)
    #[arg(long = "taken", value_name = "COURSE", num_args = 1..)]
    pub taken: Vec<String>,

    /// Credit hours earned before the first semester
    #[arg(long, value_name = "CREDITS")]
    pub starting_credits: Option<u32>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Move a course to another semester and re-check its dependents.
    ///
    /// Semesters are numbered from 1.
    Move {
        #[command(flatten)]
        input: PlanInput,

        /// Course to move (e.g. "CMP SCI 2250")
        #[arg(short, long, value_name = "COURSE")]
        course: String,

        /// Destination semester
        #[arg(short, long, value_name = "N")]
        to: usize,

        /// Semester the course is in now (located automatically when omitted)
        #[arg(short, long, value_name = "N")]
        from: Option<usize>,

        /// Where to write the updated schedule (defaults to config `out_dir`)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print diagnostics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check every course of a schedule where it stands.
    Validate {
        #[command(flatten)]
        input: PlanInput,

        /// Where to write the annotated schedule (defaults to config `out_dir`)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print diagnostics as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the courses that require a course.
    Dependents {
        /// Catalog file (`.toml` or `.json`)
        #[arg(value_name = "CATALOG")]
        catalog: PathBuf,

        /// Course key (omit to print the whole index)
        #[arg(value_name = "COURSE")]
        course: Option<String>,
    },
    /// Toggle the completed flag of a scheduled course.
    Complete {
        /// Schedule file (`.json`), updated in place unless `--output` is given
        #[arg(value_name = "SCHEDULE")]
        schedule: PathBuf,

        /// Semester holding the course
        #[arg(short, long, value_name = "N")]
        semester: usize,

        /// Course key
        #[arg(short, long, value_name = "COURSE")]
        course: String,

        /// Where to write the updated schedule
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Create an empty schedule following the season rotation.
    Init {
        /// Schedule file to create (`.json`)
        #[arg(value_name = "SCHEDULE")]
        schedule: PathBuf,

        /// Season of the first semester (Fall, Spring, Summer)
        #[arg(long, value_name = "SEASON", default_value = "Fall")]
        first: SemesterLabel,

        /// Calendar year of the first semester (leave semesters undated when omitted)
        #[arg(short, long, value_name = "YEAR")]
        year: Option<u16>,

        /// Number of semesters
        #[arg(short = 'n', long, value_name = "COUNT", default_value_t = 8)]
        semesters: usize,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Append empty semesters following the season rotation.
    Extend {
        /// Schedule file (`.json`), updated in place unless `--output` is given
        #[arg(value_name = "SCHEDULE")]
        schedule: PathBuf,

        /// Number of semesters to add
        #[arg(short = 'n', long, value_name = "COUNT", default_value_t = 1)]
        count: usize,

        /// Where to write the updated schedule
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "planner",
    about = "Semester planner: move courses and validate prerequisites",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override the default credit threshold
    #[arg(long = "credit-threshold", value_name = "CREDITS")]
    pub credit_threshold: Option<u32>,

    /// Override the course name that marks elective slots
    #[arg(long = "elective-marker", value_name = "NAME")]
    pub elective_marker: Option<String>,

    /// Override whether new semesters rotate through Summer (true/false)
    #[arg(long = "include-summer", value_parser = BoolishValueParser::new())]
    pub include_summer: Option<bool>,

    /// Override config output directory
    #[arg(long = "config-out-dir", value_name = "DIR")]
    pub config_out_dir: Option<PathBuf>,

    /// Override config output directory (short form)
    #[arg(long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// `--out-dir` takes precedence over `--config-out-dir` when both are
    /// provided. `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            credit_threshold: self.credit_threshold,
            elective_marker: self.elective_marker.clone(),
            include_summer: self.include_summer,
            out_dir: self
                .out_dir
                .as_ref()
                .or(self.config_out_dir.as_ref())
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}
