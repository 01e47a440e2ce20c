//! Subcommand implementations

pub mod alert;
pub mod rank;
pub mod score;
pub mod similar;

use dogfinder_core::config::Config;
use dogfinder_matching::RelevanceScorer;

/// Scorer configured from the loaded settings.
fn scorer(config: &Config) -> RelevanceScorer<'static> {
    RelevanceScorer::new(config.schema.scoring.clone())
}

/// Printable sighting id.
fn display_id(id: Option<&str>) -> &str {
    id.unwrap_or("<no id>")
}
