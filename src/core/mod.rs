//! Core planner functionality shared by the library and the CLI

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod planner;

/// Returns the current version of the `semester-planner` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
