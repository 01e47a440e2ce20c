//! Ranking of candidate sightings for a search.
//!
//! Scores are computed independently per candidate, so scoring a batch is
//! parallel when the `parallel` feature is enabled.

use crate::model::{SearchQuery, SightingRecord};
use crate::scorer::RelevanceScorer;
use dogfinder_core::config::RankingConfig;
use serde::Serialize;
use std::cmp::Ordering;

/// A candidate together with its relevance to the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSighting<'r> {
    pub record: &'r SightingRecord,
    pub relevance: f64,
}

/// How a result list was ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingOrder {
    /// No criteria: newest first, nothing filtered
    Recency,
    /// Highest relevance first
    Relevance,
}

/// Score every candidate against `query`, preserving input order.
pub fn score_all<'r>(
    scorer: &RelevanceScorer<'_>,
    query: &SearchQuery,
    candidates: &'r [SightingRecord],
) -> Vec<RankedSighting<'r>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        candidates
            .par_iter()
            .map(|record| score_single(scorer, query, record))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        candidates
            .iter()
            .map(|record| score_single(scorer, query, record))
            .collect()
    }
}

/// Order candidates for display.
///
/// Without criteria the list is browsed newest first. A search term or a
/// photo drops candidates at or below `min_relevance` and sorts the rest by
/// relevance. A location alone sorts by relevance without filtering, so
/// distant sightings still show up last. Ties keep input order.
pub fn rank<'r>(
    scorer: &RelevanceScorer<'_>,
    query: &SearchQuery,
    candidates: &'r [SightingRecord],
    config: &RankingConfig,
) -> (RankingOrder, Vec<RankedSighting<'r>>) {
    let mut ranked = score_all(scorer, query, candidates);

    let order = if query.has_criteria() {
        if query.has_search_term() || query.has_visual_tags() {
            ranked.retain(|r| r.relevance > config.min_relevance);
        }
        ranked.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));
        RankingOrder::Relevance
    } else {
        ranked.sort_by(|a, b| newest_first(a.record, b.record));
        RankingOrder::Recency
    };

    if let Some(max) = config.max_results {
        ranked.truncate(max);
    }

    tracing::debug!(
        candidates = candidates.len(),
        kept = ranked.len(),
        ?order,
        "Ranked sightings"
    );

    (order, ranked)
}

#[inline]
fn score_single<'r>(
    scorer: &RelevanceScorer<'_>,
    query: &SearchQuery,
    record: &'r SightingRecord,
) -> RankedSighting<'r> {
    RankedSighting {
        record,
        relevance: scorer.score(query, record),
    }
}

/// Records without a timestamp sort after every dated record.
fn newest_first(a: &SightingRecord, b: &SightingRecord) -> Ordering {
    match (&a.created_at, &b.created_at) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
