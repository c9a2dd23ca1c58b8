//! Payload loading for the planner: catalogs in, schedules in and out

pub mod loader;

pub use loader::{
    load_catalog, load_schedule, normalize_course_key, parse_catalog_str, parse_schedule_str,
    write_json, PayloadFormat,
};
