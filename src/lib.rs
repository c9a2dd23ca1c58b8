//! Semester course-schedule planner
//!
//! Validates moves of courses between semesters of a degree plan against
//! catalog rules (prerequisites, offering seasons, fixed placements, credit
//! thresholds) and re-validates the courses that depend on a moved one.

pub mod core;
pub mod logger;

pub use crate::core::config;
pub use crate::core::engine::{Engine, EngineConfig, MoveReport, MoveRequest, MoveStatus};
pub use crate::core::error::{EngineError, LoadError};
pub use crate::core::get_version;
