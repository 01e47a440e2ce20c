//! Core utilities for the DogFinder relevance engine
//!
//! This crate provides the ambient pieces shared by the engine crates and the
//! CLI harness:
//!
//! - **Error handling**: errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based scoring, alert, ranking and logging settings
//!   with validation
//!
//! # Example
//!
//! ```rust,no_run
//! use dogfinder_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! println!("alert threshold: {}", config.schema.alerts.threshold);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{
        AlertsConfig, Config, ConfigSchema, PenaltyConfig, RankingConfig, ScoringConfig,
        WeightProfile,
    };
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
}
