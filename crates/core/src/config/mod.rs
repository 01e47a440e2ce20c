//! Configuration loading and schema definitions
//!
//! Scoring tunables, alert and ranking thresholds, and logging settings.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
