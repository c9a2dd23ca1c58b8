//! Configuration module for the semester planner

use crate::core::engine::{EngineConfig, DEFAULT_CREDIT_THRESHOLD, DEFAULT_ELECTIVE_MARKER};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the planner config directory in path values
const HOME_VARIABLE: &str = "$PLANNER_HOME";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

const fn default_credit_threshold() -> u32 {
    DEFAULT_CREDIT_THRESHOLD
}

fn default_elective_marker() -> String {
    DEFAULT_ELECTIVE_MARKER.to_string()
}

/// Validation rule settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Minimum cumulative credits for courses flagged `credit_threshold = true`
    #[serde(default = "default_credit_threshold")]
    pub credit_threshold: u32,
    /// Course name marking elective slots
    #[serde(default = "default_elective_marker")]
    pub elective_marker: String,
    /// Whether new semesters rotate through Summer
    #[serde(default)]
    pub include_summer: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            credit_threshold: DEFAULT_CREDIT_THRESHOLD,
            elective_marker: default_elective_marker(),
            include_summer: false,
        }
    }
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for updated schedules and diagnostics
    #[serde(default)]
    pub out_dir: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Validation rules
    #[serde(default)]
    pub rules: RulesConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override credit threshold
    pub credit_threshold: Option<u32>,
    /// Override elective marker
    pub elective_marker: Option<String>,
    /// Override summer rotation
    pub include_summer: Option<bool>,
    /// Override output directory
    pub out_dir: Option<String>,
}

impl Config {
    /// Get the planner config directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/semester-planner`
    /// - macOS: `~/Library/Application Support/semester-planner`
    /// - Windows: `%APPDATA%\semester-planner`
    #[must_use]
    pub fn get_planner_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("semester-planner")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only string fields that are empty here and non-empty in `defaults` are
    /// updated; rule values carry serde defaults already.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }
        if self.rules.elective_marker.is_empty() && !defaults.rules.elective_marker.is_empty() {
            self.rules
                .elective_marker
                .clone_from(&defaults.rules.elective_marker);
            changed = true;
        }
        if self.paths.out_dir.is_empty() && !defaults.paths.out_dir.is_empty() {
            self.paths.out_dir.clone_from(&defaults.paths.out_dir);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Only non-`None` values replace config values; the config file is not
    /// modified.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(threshold) = overrides.credit_threshold {
            self.rules.credit_threshold = threshold;
        }
        if let Some(marker) = &overrides.elective_marker {
            self.rules.elective_marker.clone_from(marker);
        }
        if let Some(include_summer) = overrides.include_summer {
            self.rules.include_summer = include_summer;
        }

        if let Some(out_dir) = &overrides.out_dir {
            self.paths.out_dir.clone_from(out_dir);
        }
    }

    /// Rule settings for the validation engine
    #[must_use]
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            elective_marker: self.rules.elective_marker.clone(),
            credit_threshold: self.rules.credit_threshold,
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds,
    /// inside [`get_planner_dir`](Self::get_planner_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_planner_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$PLANNER_HOME` in a string to the planner config directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(HOME_VARIABLE) {
            let home = Self::get_planner_dir();
            value.replace(HOME_VARIABLE, home.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields use their serde defaults. `$PLANNER_HOME` is expanded
    /// in path values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.out_dir = Self::expand_variables(&config.paths.out_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML. The
    /// defaults are compiled into the binary and covered by tests.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// An existing file gets any missing fields merged in from the defaults
    /// and is saved back. On first run the defaults are written out. Any
    /// error while loading falls back to the defaults.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to the platform config file
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `credit_threshold`,
    /// `elective_marker`, `include_summer`, `out_dir` (dashes accepted in
    /// place of underscores).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "credit_threshold" | "credit-threshold" => {
                Some(self.rules.credit_threshold.to_string())
            }
            "elective_marker" | "elective-marker" => Some(self.rules.elective_marker.clone()),
            "include_summer" | "include-summer" => Some(self.rules.include_summer.to_string()),
            "out_dir" | "out-dir" => Some(self.paths.out_dir.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config; call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "credit_threshold" | "credit-threshold" => {
                self.rules.credit_threshold = value
                    .parse::<u32>()
                    .map_err(|_| format!("Invalid credit threshold: '{value}'"))?;
            }
            "elective_marker" | "elective-marker" => {
                if value.is_empty() {
                    return Err("Elective marker cannot be empty".to_string());
                }
                self.rules.elective_marker = value.to_string();
            }
            "include_summer" | "include-summer" => {
                self.rules.include_summer = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'include_summer': '{value}'"))?;
            }
            "out_dir" | "out-dir" => self.paths.out_dir = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset a single configuration value to its default
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "credit_threshold" | "credit-threshold" => {
                self.rules.credit_threshold = defaults.rules.credit_threshold;
            }
            "elective_marker" | "elective-marker" => self
                .rules
                .elective_marker
                .clone_from(&defaults.rules.elective_marker),
            "include_summer" | "include-summer" => {
                self.rules.include_summer = defaults.rules.include_summer;
            }
            "out_dir" | "out-dir" => self.paths.out_dir.clone_from(&defaults.paths.out_dir),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults by deleting the config file
    ///
    /// The next [`load()`](Config::load) recreates it. Succeeds if the file
    /// does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[rules]")?;
        writeln!(f, "  credit_threshold = {}", self.rules.credit_threshold)?;
        writeln!(f, "  elective_marker = \"{}\"", self.rules.elective_marker)?;
        writeln!(f, "  include_summer = {}", self.rules.include_summer)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  out_dir = \"{}\"", self.paths.out_dir)?;

        Ok(())
    }
}
