//! `alert` command

use super::{display_id, scorer};
use crate::input::{read_json, read_json_or_default, write_json};
use crate::OutputFormat;
use anyhow::Result;
use dogfinder_core::config::Config;
use dogfinder_matching::{AlertProfile, AlertScanner, NotifiedIds, ScanDecision, SightingRecord};
use dogfinder_telemetry::{metrics, names, Event};
use owo_colors::OwoColorize;
use std::path::Path;

pub fn run(
    config: &Config,
    profile_path: &Path,
    sightings_path: &Path,
    notified_path: Option<&Path>,
    write: bool,
    format: OutputFormat,
) -> Result<()> {
    let profile: AlertProfile = read_json(profile_path, "alert profile")?;
    let sightings: Vec<SightingRecord> = read_json(sightings_path, "sightings")?;

    let capacity = config.schema.alerts.notified_capacity;
    let notified = match notified_path {
        Some(path) => {
            let ids: Vec<String> = read_json_or_default(path, "notified ids")?;
            NotifiedIds::from_ids(ids, capacity)
        }
        None => NotifiedIds::with_capacity(capacity),
    };

    let scanner = AlertScanner::new(scorer(config), &config.schema.alerts);
    let outcome = scanner.scan(Some(&profile), &sightings, notified);

    match outcome.decision {
        ScanDecision::Notify { score } => {
            metrics().increment(names::ALERTS_FIRED);
            Event::new(
                "alert_fired",
                serde_json::json!({
                    "sighting": outcome.to_notify.and_then(|s| s.id.as_deref()),
                    "score": score,
                }),
            )
            .log();
        }
        _ => metrics().increment(names::ALERTS_SKIPPED),
    }

    if write {
        if let Some(path) = notified_path {
            write_json(path, &outcome.notified_ids, "notified ids")?;
        }
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        OutputFormat::Text => print_decision(&outcome.decision, outcome.to_notify, scanner.threshold()),
    }

    Ok(())
}

fn print_decision(decision: &ScanDecision, sighting: Option<&SightingRecord>, threshold: f64) {
    match decision {
        ScanDecision::Notify { score } => println!(
            "{} sighting {} scored {:.4} (threshold {:.2})",
            "🔔 Alert:".green().bold(),
            display_id(sighting.and_then(|s| s.id.as_deref())),
            score,
            threshold
        ),
        ScanDecision::BelowThreshold { score } => println!(
            "{} newest sighting scored {:.4} (threshold {:.2})",
            "No alert:".yellow(),
            score,
            threshold
        ),
        ScanDecision::AlreadyNotified => {
            println!("{} newest sighting was already notified", "No alert:".yellow())
        }
        ScanDecision::MissingId => {
            println!("{} newest sighting has no id", "No alert:".yellow())
        }
        ScanDecision::NoCandidates => println!("{} no sightings", "No alert:".yellow()),
        ScanDecision::NoProfile => println!("{} no alert profile", "No alert:".yellow()),
    }
}
