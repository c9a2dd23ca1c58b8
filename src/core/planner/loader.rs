//! Catalog and schedule payload loading
//!
//! Catalogs are TOML or JSON. A TOML catalog is a list of `[[courses]]`
//! tables; a JSON catalog is either `{"courses": [...]}` or an ordered list
//! of `[course_id, {...}]` pairs. Each course accepts:
//!
//! - `prerequisites`: items are a course key, or a list of keys where any one
//!   satisfies the item (a one-element list is a plain key)
//! - `concurrent`: companion course that may share the semester
//! - `semesters_offered`: a label or list of labels (`Fall`, `Spring`, `Summer`)
//! - `credits`: integer or numeric string
//! - `placement`: `{ exactly = n }` or `{ at_most = n }`
//! - `credit_threshold`: `true` for the configured default, or a number
//!
//! Schedules are JSON: either a full schedule object or a bare list of semesters.

use crate::core::engine::EngineConfig;
use crate::core::error::{EngineError, LoadError};
use crate::core::models::{Catalog, CourseInfo, Schedule, Semester, SemesterLabel, Term};
use crate::{debug, warn};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Supported payload encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFormat {
    /// TOML document
    Toml,
    /// JSON document
    Json,
}

impl PayloadFormat {
    /// Pick the format from a file extension
    ///
    /// # Errors
    /// Returns [`LoadError::UnsupportedFormat`] for anything but `.toml` / `.json`.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            _ => Err(LoadError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCatalog {
    Table {
        #[serde(alias = "course")]
        courses: Vec<RawCourse>,
    },
    Pairs(Vec<(String, RawCourse)>),
}

#[derive(Debug, Default, Deserialize)]
struct RawCourse {
    #[serde(default, alias = "course")]
    id: Option<String>,
    #[serde(default, alias = "prerequisite")]
    prerequisites: Vec<RawTerm>,
    #[serde(default)]
    concurrent: Option<String>,
    #[serde(default, alias = "offered")]
    semesters_offered: Option<RawOffered>,
    #[serde(default, alias = "credit")]
    credits: Option<RawCredits>,
    #[serde(default)]
    placement: Option<crate::core::models::Placement>,
    #[serde(default)]
    credit_threshold: Option<RawThreshold>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTerm {
    One(String),
    Group(Vec<String>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawOffered {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCredits {
    Number(u32),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawThreshold {
    Flag(bool),
    Explicit(u32),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSchedule {
    Full(Schedule),
    Semesters(Vec<Semester>),
}

/// Normalize a course key: collapse whitespace and drop parenthetical notes
///
/// Handles inputs like `"CMP SCI  1250"` or `"MATH 1320 (or coreq)"`.
#[must_use]
pub fn normalize_course_key(input: &str) -> String {
    let cleaned = input.split('(').next().unwrap_or(input);
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a catalog document
///
/// # Errors
/// Returns a parse error for invalid documents and
/// [`EngineError::MalformedCatalog`] for entries missing required fields.
pub fn parse_catalog_str(
    content: &str,
    format: PayloadFormat,
    config: &EngineConfig,
) -> Result<Catalog, LoadError> {
    let raw: RawCatalog = match format {
        PayloadFormat::Toml => toml::from_str(content)?,
        PayloadFormat::Json => serde_json::from_str(content)?,
    };

    let entries: Vec<RawCourse> = match raw {
        RawCatalog::Table { courses } => courses,
        RawCatalog::Pairs(pairs) => pairs
            .into_iter()
            .map(|(id, mut course)| {
                course.id = Some(id);
                course
            })
            .collect(),
    };

    let mut catalog = Catalog::new();
    for raw_course in entries {
        catalog.insert(resolve_course(raw_course, config)?)?;
    }

    for info in catalog.iter() {
        for term in &info.prerequisite {
            for prereq in term.course_ids() {
                if !catalog.contains(prereq) {
                    debug!(
                        "{} references {prereq}, which is not in the catalog",
                        info.course_id
                    );
                }
            }
        }
    }

    Ok(catalog)
}

/// Load a catalog file, choosing the format from its extension
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_catalog<P: AsRef<Path>>(path: P, config: &EngineConfig) -> Result<Catalog, LoadError> {
    let path = path.as_ref();
    let format = PayloadFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    parse_catalog_str(&content, format, config)
}

/// Parse a JSON schedule document
///
/// Semesters are renumbered positionally and credit totals are recomputed
/// from their courses; a warning is logged for each total that was wrong.
///
/// # Errors
/// Returns an error if the JSON does not describe a schedule.
pub fn parse_schedule_str(content: &str) -> Result<Schedule, LoadError> {
    let mut schedule = match serde_json::from_str::<RawSchedule>(content)? {
        RawSchedule::Full(schedule) => schedule,
        RawSchedule::Semesters(semesters) => Schedule::new(semesters),
    };
    schedule.reindex();
    for index in schedule.recompute_credits() {
        warn!(
            "Semester {} credit total did not match its courses; recomputed",
            index + 1
        );
    }
    Ok(schedule)
}

/// Load a JSON schedule file
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_schedule<P: AsRef<Path>>(path: P) -> Result<Schedule, LoadError> {
    let content = fs::read_to_string(path)?;
    parse_schedule_str(&content)
}

/// Write any serializable payload as pretty JSON
///
/// # Errors
/// Returns an error if serialization or the write fails.
pub fn write_json<P: AsRef<Path>, T: serde::Serialize>(path: P, value: &T) -> Result<(), LoadError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}

fn resolve_course(raw: RawCourse, config: &EngineConfig) -> Result<CourseInfo, EngineError> {
    let course_id = raw
        .id
        .as_deref()
        .map(normalize_course_key)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| EngineError::malformed("<unnamed>", "missing course key"))?;

    let credits = match raw.credits {
        Some(RawCredits::Number(n)) => n,
        Some(RawCredits::Text(text)) => text.trim().parse::<u32>().map_err(|_| {
            EngineError::malformed(&course_id, format!("invalid credits '{text}'"))
        })?,
        None => return Err(EngineError::malformed(&course_id, "missing credits")),
    };

    let labels = match raw.semesters_offered {
        Some(RawOffered::One(label)) => vec![label],
        Some(RawOffered::Many(labels)) => labels,
        None => Vec::new(),
    };
    let offered = labels
        .iter()
        .map(|label| {
            label
                .parse::<SemesterLabel>()
                .map_err(|e| EngineError::malformed(&course_id, e))
        })
        .collect::<Result<BTreeSet<_>, _>>()?;
    if offered.is_empty() {
        return Err(EngineError::malformed(&course_id, "no offered semesters"));
    }

    let mut prerequisite = Vec::new();
    match raw.credit_threshold {
        Some(RawThreshold::Flag(true)) => {
            prerequisite.push(Term::CreditThreshold(config.credit_threshold));
        }
        Some(RawThreshold::Explicit(min)) => prerequisite.push(Term::CreditThreshold(min)),
        Some(RawThreshold::Flag(false)) | None => {}
    }
    for term in raw.prerequisites {
        let term = match term {
            RawTerm::One(id) => {
                let id = normalize_course_key(&id);
                if id.is_empty() {
                    return Err(EngineError::malformed(&course_id, "empty prerequisite"));
                }
                Term::Single(id)
            }
            RawTerm::Group(ids) => {
                let mut ids: Vec<String> = ids.iter().map(|id| normalize_course_key(id)).collect();
                ids.retain(|id| !id.is_empty());
                match ids.len() {
                    0 => {
                        return Err(EngineError::malformed(
                            &course_id,
                            "empty prerequisite group",
                        ))
                    }
                    1 => Term::Single(ids.remove(0)),
                    _ => Term::AnyOf(ids),
                }
            }
        };
        if !prerequisite.contains(&term) {
            prerequisite.push(term);
        }
    }

    let concurrent = raw
        .concurrent
        .as_deref()
        .map(normalize_course_key)
        .filter(|c| !c.is_empty());

    Ok(CourseInfo {
        course_id,
        prerequisite,
        concurrent,
        offered_semesters: offered,
        credits,
        placement: raw.placement,
    })
}
