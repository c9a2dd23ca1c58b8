//! Leveled console and file logging for the planner.
//! Feature flags: `log-info`, `log-debug`, `verbose`, `file-logging`.
//!
//! Errors and warnings go to stderr; info and debug go to stdout. When a log
//! file is open, leveled messages are appended there instead.

use std::fmt::{self, Arguments};
use std::str::FromStr;
#[cfg(feature = "log-debug")]
use std::sync::atomic::AtomicBool;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::LazyLock;

#[cfg(feature = "file-logging")]
use std::{
    fs::{File, OpenOptions},
    io::Write,
    sync::Mutex,
};

/// Logging levels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Error-level messages (always enabled).
    Error = 1,
    /// Warning-level messages (always enabled).
    Warn = 2,
    /// Info-level messages (requires `log-info` feature).
    Info = 3,
    /// Debug-level messages (requires `log-debug` feature and runtime enablement).
    Debug = 4,
}

impl Level {
    const fn prefix(self) -> &'static str {
        match self {
            Self::Error => "[ERROR]",
            Self::Warn => "[WARN]",
            Self::Info => "[INFO]",
            Self::Debug => "[DEBUG]",
        }
    }

    const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Error,
            2 => Self::Warn,
            3 => Self::Info,
            _ => Self::Debug,
        }
    }

    /// Whether this level is compiled in
    const fn compiled(self) -> bool {
        match self {
            Self::Info => cfg!(feature = "log-info"),
            Self::Debug => cfg!(feature = "log-debug"),
            Self::Error | Self::Warn => true,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        f.write_str(name)
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" | "err" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            other => Err(format!("Unknown log level: '{other}'")),
        }
    }
}

const fn default_level() -> u8 {
    if cfg!(feature = "log-debug") {
        Level::Debug as u8
    } else if cfg!(feature = "log-info") {
        Level::Info as u8
    } else {
        Level::Warn as u8
    }
}

static LOG_LEVEL: LazyLock<AtomicU8> = LazyLock::new(|| AtomicU8::new(default_level()));
#[cfg(feature = "log-debug")]
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(true);
#[cfg(feature = "verbose")]
static VERBOSE_ENABLED: AtomicBool = AtomicBool::new(false);
#[cfg(feature = "file-logging")]
static LOG_FILE: LazyLock<Mutex<Option<File>>> = LazyLock::new(|| Mutex::new(None));

/// Set the global log level.
pub fn set_level(level: Level) {
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);
}

/// The current global log level.
#[must_use]
pub fn level() -> Level {
    Level::from_u8(LOG_LEVEL.load(Ordering::SeqCst))
}

/// Parse a level name (case-insensitive) and set it. Returns `true` on success.
#[must_use]
pub fn set_level_from_str(level: &str) -> bool {
    level.parse::<Level>().map(set_level).is_ok()
}

/// Enable debug logging at runtime.
pub fn enable_debug() {
    #[cfg(feature = "log-debug")]
    DEBUG_ENABLED.store(true, Ordering::SeqCst);
}

/// Disable debug logging at runtime.
pub fn disable_debug() {
    #[cfg(feature = "log-debug")]
    DEBUG_ENABLED.store(false, Ordering::SeqCst);
}

/// Returns whether debug logging is enabled (always false without `log-debug`).
#[must_use]
pub fn is_debug_enabled() -> bool {
    #[cfg(feature = "log-debug")]
    {
        DEBUG_ENABLED.load(Ordering::SeqCst)
    }
    #[cfg(not(feature = "log-debug"))]
    {
        false
    }
}

/// Enable or disable verbose output (no-op without `verbose`).
pub fn set_verbose(enabled: bool) {
    #[cfg(feature = "verbose")]
    VERBOSE_ENABLED.store(enabled, Ordering::SeqCst);
    #[cfg(not(feature = "verbose"))]
    let _ = enabled;
}

/// Returns whether verbose output is enabled (always false without `verbose`).
#[must_use]
pub fn is_verbose_enabled() -> bool {
    #[cfg(feature = "verbose")]
    {
        VERBOSE_ENABLED.load(Ordering::SeqCst)
    }
    #[cfg(not(feature = "verbose"))]
    {
        false
    }
}

/// Append leveled messages to `path` instead of the console.
///
/// Returns `true` if the file was opened; always `false` without `file-logging`.
#[must_use]
pub fn init_file_logging(path: &std::path::Path) -> bool {
    #[cfg(feature = "file-logging")]
    {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .is_ok_and(|file| {
                LOG_FILE.lock().is_ok_and(|mut slot| {
                    *slot = Some(file);
                    true
                })
            })
    }
    #[cfg(not(feature = "file-logging"))]
    {
        let _ = path;
        false
    }
}

/// Stop writing to the log file, returning to console output.
pub fn close_file_logging() {
    #[cfg(feature = "file-logging")]
    if let Ok(mut slot) = LOG_FILE.lock() {
        *slot = None;
    }
}

/// Write to the log file if one is open. Returns `false` when the caller
/// should fall back to the console.
fn write_to_file(line: &str) -> bool {
    #[cfg(feature = "file-logging")]
    {
        if let Ok(mut slot) = LOG_FILE.lock() {
            if let Some(file) = slot.as_mut() {
                let _ = writeln!(file, "{line}");
                let _ = file.flush();
                return true;
            }
        }
        false
    }
    #[cfg(not(feature = "file-logging"))]
    {
        let _ = line;
        false
    }
}

fn should_log(level: Level) -> bool {
    if !level.compiled() {
        return false;
    }
    level <= self::level() && (level != Level::Debug || is_debug_enabled())
}

/// Internal logging dispatcher used by public macros.
pub fn log_impl(level: Level, args: Arguments) {
    if !should_log(level) {
        return;
    }
    let line = format!("{} {args}", level.prefix());
    if write_to_file(&line) {
        return;
    }
    match level {
        Level::Error | Level::Warn => eprintln!("{line}"),
        Level::Info | Level::Debug => println!("{line}"),
    }
}

#[macro_export]
/// Logs an error-level message (always enabled).
macro_rules! error { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Error, format_args!($($arg)*)) }; }
#[macro_export]
/// Logs a warning-level message (always enabled).
macro_rules! warn  { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Warn,  format_args!($($arg)*)) }; }
#[macro_export]
/// Logs an info-level message (requires `log-info` feature).
macro_rules! info  { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Info,  format_args!($($arg)*)) }; }
#[macro_export]
/// Logs a debug-level message (requires `log-debug` feature and runtime enablement).
macro_rules! debug { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Debug, format_args!($($arg)*)) }; }
#[macro_export]
/// Prints a verbose message when verbose output is enabled. Never written to log files.
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::logger::is_verbose_enabled() { println!($($arg)*); }
    }
}
