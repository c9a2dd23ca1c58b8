//! Data models for the semester planner

pub mod catalog;
pub mod course;
pub mod dependencies;
pub mod schedule;
pub mod semester;

pub use catalog::Catalog;
pub use course::{CourseInfo, Placement, PrereqExpr, Term};
pub use dependencies::DependencyIndex;
pub use schedule::Schedule;
pub use semester::{CourseEntry, Semester, SemesterLabel};
