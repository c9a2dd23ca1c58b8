//! Config command handler

use crate::args::ConfigSubcommand;
use semester_planner::config::Config;
use std::io::{self, Write};

/// Keys accepted by `config get|set|unset`
const KEYS: [&str; 7] = [
    "level",
    "file",
    "verbose",
    "credit_threshold",
    "elective_marker",
    "include_summer",
    "out_dir",
];

/// Dispatch config subcommands
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    let result = match subcommand {
        None => {
            handle_config_get(config, None);
            Ok(())
        }
        Some(ConfigSubcommand::Get { key }) => {
            handle_config_get(config, key);
            Ok(())
        }
        Some(ConfigSubcommand::Set { key, value }) => handle_config_set(config, &key, &value),
        Some(ConfigSubcommand::Unset { key }) => handle_config_unset(config, defaults, &key),
        Some(ConfigSubcommand::Reset) => handle_config_reset(),
    };

    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

/// Handle the config get subcommand
pub fn handle_config_get(config: &Config, key: Option<String>) {
    let Some(k) = key else {
        println!("\n=== Configuration ===\n");
        print!("{config}");
        println!("\nFile: {}", Config::get_config_file_path().display());
        return;
    };

    match config.get(&k) {
        Some(value) => println!("{value}"),
        None => {
            eprintln!("Unknown config key: '{k}'");
            eprintln!("Known keys: {}", KEYS.join(", "));
        }
    }
}

/// Handle the config set subcommand
///
/// # Errors
/// Returns a message if the value is rejected or the file cannot be written.
pub fn handle_config_set(config: &mut Config, key: &str, value: &str) -> Result<(), String> {
    config.set(key, value)?;
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;
    println!("✓ Set {key} = {value}");
    Ok(())
}

/// Handle the config unset subcommand
///
/// # Errors
/// Returns a message if the key is unknown or the file cannot be written.
pub fn handle_config_unset(config: &mut Config, defaults: &Config, key: &str) -> Result<(), String> {
    config.unset(key, defaults)?;
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;
    let value = config.get(key).unwrap_or_default();
    println!("✓ Reset {key} to default ({value})");
    Ok(())
}

/// Handle the config reset subcommand
///
/// # Errors
/// Returns a message if the config file exists but cannot be removed.
pub fn handle_config_reset() -> Result<(), String> {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return Ok(());
    }

    print!("Reset planner config to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    if matches!(response.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
        Config::reset().map_err(|e| format!("Failed to remove config file: {e}"))?;
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
    Ok(())
}
