//! Relevance engine for lost-dog sightings.
//!
//! Scores how well a reported sighting matches what a searcher is looking
//! for, orders search results, and decides when a new sighting is strong
//! enough to alert an owner.
//!
//! Inputs come straight from the sighting store and are often incomplete or
//! malformed. Scoring never fails: a signal that cannot be evaluated simply
//! contributes nothing.
//!
//! # Example
//!
//! ```
//! use dogfinder_matching::{GeoPoint, SearchQuery, SightingRecord, VisualTag};
//!
//! let query = SearchQuery::new().with_visual_tags([VisualTag::new("Husky", 0.9)]);
//! let sighting = SightingRecord {
//!     breed: Some("Pomeranian".into()),
//!     location: Some(GeoPoint::new(19.4326, -99.1332).into()),
//!     ..SightingRecord::default()
//! };
//!
//! // Huskies and pomeranians are often confused by image classifiers.
//! let relevance = dogfinder_matching::score(&query, &sighting);
//! assert!((relevance - 0.6885).abs() < 1e-9);
//! ```

mod alerts;
mod decode;
mod model;
mod ranking;
mod scorer;

pub use alerts::{AlertScanner, NotifiedIds, ScanDecision, ScanOutcome, DEFAULT_NOTIFIED_CAPACITY};
pub use model::{AlertProfile, SearchQuery, SightingRecord};
pub use ranking::{rank, score_all, RankedSighting, RankingOrder};
pub use scorer::{RelevanceScorer, ScoreBreakdown, ScoringMode};

pub use dogfinder_breeds::{BreedTaxonomy, VisualTag};
pub use dogfinder_geo::{GeoPoint, Location};

use once_cell::sync::Lazy;

static DEFAULT_SCORER: Lazy<RelevanceScorer<'static>> = Lazy::new(RelevanceScorer::default);

/// Relevance of `record` to `query` with the default weights and the
/// built-in breed taxonomy.
#[inline]
pub fn score(query: &SearchQuery, record: &SightingRecord) -> f64 {
    DEFAULT_SCORER.score(query, record)
}
