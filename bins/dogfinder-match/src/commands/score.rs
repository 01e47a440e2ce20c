//! `score` command

use super::scorer;
use crate::input::read_json;
use crate::OutputFormat;
use anyhow::Result;
use dogfinder_core::config::Config;
use dogfinder_matching::{ScoreBreakdown, SearchQuery, SightingRecord};
use dogfinder_telemetry::{metrics, names, Timer};
use owo_colors::OwoColorize;
use std::path::Path;

pub fn run(
    config: &Config,
    query_path: &Path,
    sighting_path: &Path,
    explain: bool,
    format: OutputFormat,
) -> Result<()> {
    let query: SearchQuery = read_json(query_path, "query")?;
    let sighting: SightingRecord = read_json(sighting_path, "sighting")?;

    let timer = Timer::start(names::SCORE_DURATION_MS);
    let breakdown = scorer(config).explain(&query, &sighting);
    timer.stop();
    metrics().increment(names::SIGHTINGS_SCORED);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": sighting.id,
                "relevance": breakdown.total,
                "breakdown": breakdown,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            println!("{} {:.4}", "Relevance:".bold(), breakdown.total);
            if explain {
                print_breakdown(&breakdown);
            }
        }
    }

    Ok(())
}

fn print_breakdown(breakdown: &ScoreBreakdown) {
    println!("  {:<16} {:?}", "mode", breakdown.mode);
    let rows = [
        ("breed", breakdown.breed),
        ("details", breakdown.details),
        ("manual location", breakdown.manual_location),
        ("proximity", breakdown.proximity),
        ("visual", breakdown.visual),
    ];
    for (label, value) in rows {
        println!("  {:<16} {:+.4}", label, value);
    }
    if breakdown.penalty > 0.0 {
        println!("  {:<16} {}", "penalty", format!("{:+.4}", -breakdown.penalty).red());
    }
}
