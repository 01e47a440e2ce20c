//! `rank` command

use super::{display_id, scorer};
use crate::input::read_json;
use crate::OutputFormat;
use anyhow::Result;
use dogfinder_core::config::{Config, RankingConfig};
use dogfinder_matching::{rank, RankingOrder, SearchQuery, SightingRecord};
use dogfinder_telemetry::{metrics, names, Timer};
use owo_colors::OwoColorize;
use std::path::Path;

pub fn run(
    config: &Config,
    query_path: &Path,
    sightings_path: &Path,
    limit: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let query: SearchQuery = read_json(query_path, "query")?;
    let sightings: Vec<SightingRecord> = read_json(sightings_path, "sightings")?;

    let ranking = RankingConfig {
        max_results: limit.or(config.schema.ranking.max_results),
        ..config.schema.ranking.clone()
    };

    let timer = Timer::start(names::RANK_DURATION_MS);
    let (order, ranked) = rank(&scorer(config), &query, &sightings, &ranking);
    timer.stop();

    let registry = metrics();
    registry.gauge(names::CANDIDATES, sightings.len() as u64);
    registry.increment_by(names::SIGHTINGS_SCORED, sightings.len() as u64);
    registry.increment_by(names::SIGHTINGS_KEPT, ranked.len() as u64);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "order": order,
                "total": sightings.len(),
                "results": ranked,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            let heading = match order {
                RankingOrder::Recency => "newest first",
                RankingOrder::Relevance => "by relevance",
            };
            println!(
                "{} {} of {} sightings, {}",
                "Ranked".bold(),
                ranked.len(),
                sightings.len(),
                heading
            );
            for (position, entry) in ranked.iter().enumerate() {
                println!(
                    "  {:>3}. {:<24} {:.4}  {}",
                    position + 1,
                    display_id(entry.record.id.as_deref()),
                    entry.relevance,
                    entry.record.breed.as_deref().unwrap_or("").dimmed()
                );
            }
        }
    }

    Ok(())
}
