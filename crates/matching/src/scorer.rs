//! Composite relevance scoring.
//!
//! A score is the sum of independent terms, accumulated in a fixed order:
//!
//! 1. breed hint vs declared breed (text similarity)
//! 2. search term vs details and vs manual location (text similarity)
//! 3. proximity (distance decay)
//! 4. mismatch penalty, photo-driven queries only
//! 5. visual tag agreement, photo-driven queries only
//!
//! and clamped at zero. The penalty is decided from the visual term but
//! subtracted before it is added, so totals are reproducible bit for bit. There is no upper clamp: a strong match on several
//! signals can exceed 1.0.

use crate::model::{non_blank, SearchQuery, SightingRecord};
use crate::VisualTag;
use dogfinder_breeds::BreedTaxonomy;
use dogfinder_core::config::{ScoringConfig, WeightProfile};
use dogfinder_geo::{distance_km, DecayBand, DistanceDecay};
use dogfinder_search::text_similarity;
use serde::Serialize;

/// Which weight profile a query is scored with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// The query carries visual tags
    Visual,
    /// Text and location only
    #[default]
    Textual,
}

/// Every term of one composite score.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub mode: ScoringMode,
    pub breed: f64,
    pub details: f64,
    pub manual_location: f64,
    pub proximity: f64,
    pub visual: f64,
    /// Amount subtracted, reported as a positive number
    pub penalty: f64,
    /// Sum of the terms minus the penalty, clamped at zero
    pub total: f64,
}

/// Scores sightings against queries.
///
/// Holds only read-only state, so one scorer can be shared across threads.
#[derive(Debug, Clone)]
pub struct RelevanceScorer<'t> {
    config: ScoringConfig,
    decay: DistanceDecay,
    taxonomy: &'t BreedTaxonomy,
}

impl RelevanceScorer<'static> {
    /// A scorer using the built-in breed taxonomy.
    pub fn new(config: ScoringConfig) -> Self {
        Self::with_taxonomy(config, BreedTaxonomy::builtin())
    }
}

impl Default for RelevanceScorer<'static> {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl<'t> RelevanceScorer<'t> {
    /// A scorer using a caller-supplied breed taxonomy.
    pub fn with_taxonomy(config: ScoringConfig, taxonomy: &'t BreedTaxonomy) -> Self {
        let decay = DistanceDecay::new(
            config
                .decay
                .iter()
                .map(|band| DecayBand::new(band.max_km, band.factor)),
        );
        Self {
            config,
            decay,
            taxonomy,
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn taxonomy(&self) -> &'t BreedTaxonomy {
        self.taxonomy
    }

    /// Photo-driven queries are dominated by visual agreement; the rest lean
    /// on breed and free text.
    pub fn mode(&self, query: &SearchQuery) -> ScoringMode {
        if query.has_visual_tags() {
            ScoringMode::Visual
        } else {
            ScoringMode::Textual
        }
    }

    fn weights(&self, mode: ScoringMode) -> &WeightProfile {
        match mode {
            ScoringMode::Visual => &self.config.visual_weights,
            ScoringMode::Textual => &self.config.textual_weights,
        }
    }

    /// Relevance of `record` to `query`: finite and never negative.
    pub fn score(&self, query: &SearchQuery, record: &SightingRecord) -> f64 {
        self.explain(query, record).total
    }

    /// Relevance of `record` to `query`, term by term.
    pub fn explain(&self, query: &SearchQuery, record: &SightingRecord) -> ScoreBreakdown {
        let mode = self.mode(query);
        let weights = *self.weights(mode);
        let record_breed = non_blank(&record.breed);

        let mut breakdown = ScoreBreakdown {
            mode,
            ..ScoreBreakdown::default()
        };

        if let (Some(hint), Some(breed)) = (non_blank(&query.breed_hint), record_breed) {
            breakdown.breed = text_similarity(hint, breed) * weights.breed;
        }

        if let Some(term) = non_blank(&query.search_term) {
            if let Some(details) = non_blank(&record.details) {
                breakdown.details = text_similarity(term, details) * self.config.details_factor;
            }
            if let Some(manual) = non_blank(&record.manual_location) {
                breakdown.manual_location = text_similarity(term, manual) * weights.location;
            }
        }

        breakdown.proximity = self.proximity(query, record, weights.location);

        if mode == ScoringMode::Visual {
            breakdown.visual = self.visual_agreement(&query.visual_tags, record, weights.visual);
            breakdown.penalty =
                self.mismatch_penalty(&query.visual_tags, record_breed, breakdown.visual);
        }

        let sum = breakdown.breed
            + breakdown.details
            + breakdown.manual_location
            + breakdown.proximity
            - breakdown.penalty
            + breakdown.visual;
        breakdown.total = if sum.is_finite() { sum.max(0.0) } else { 0.0 };

        tracing::trace!(
            record = record.id.as_deref().unwrap_or("-"),
            ?breakdown,
            "Scored sighting"
        );

        breakdown
    }

    /// Decayed location weight; zero unless both sides carry a valid point.
    fn proximity(&self, query: &SearchQuery, record: &SightingRecord, full_weight: f64) -> f64 {
        let (Some(from), Some(to)) = (query.location.as_ref(), record.location.as_ref()) else {
            return 0.0;
        };

        match (from.resolve(), to.resolve()) {
            (Some(from), Some(to)) => self.decay.score(distance_km(&from, &to), full_weight),
            _ => 0.0,
        }
    }

    /// Best agreement between the query's tags and the record, first against
    /// the record's own tags and, when that is weak, against its declared
    /// breed.
    fn visual_agreement(&self, tags: &[VisualTag], record: &SightingRecord, weight: f64) -> f64 {
        let config = &self.config;
        let mut best = 0.0_f64;

        for search_tag in tags {
            for record_tag in &record.ai_tags {
                if self.taxonomy.are_similar(&search_tag.label, &record_tag.label) {
                    let blended = config.search_tag_share * search_tag.confidence()
                        + config.record_tag_share * record_tag.confidence();
                    best = best.max(blended * weight);
                }
            }
        }

        if best < config.fallback_below {
            if let Some(breed) = non_blank(&record.breed) {
                for search_tag in tags {
                    if self.taxonomy.are_similar(&search_tag.label, breed) {
                        best = best.max(search_tag.confidence() * weight * config.fallback_factor);
                    }
                }
            }
        }

        best
    }

    /// A confident top guess contradicting the declared breed, with nothing
    /// visual in favour of the match, counts against it.
    fn mismatch_penalty(&self, tags: &[VisualTag], record_breed: Option<&str>, visual: f64) -> f64 {
        let (Some(top), Some(breed)) = (tags.first(), record_breed) else {
            return 0.0;
        };
        let penalty = &self.config.penalty;

        if top.confidence() > penalty.min_top_probability
            && visual < penalty.max_visual_score
            && !self.taxonomy.are_similar(&top.label, breed)
        {
            penalty.amount
        } else {
            0.0
        }
    }
}
