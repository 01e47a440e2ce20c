//! `similar` command

use crate::OutputFormat;
use anyhow::Result;
use dogfinder_breeds::BreedTaxonomy;
use owo_colors::OwoColorize;

pub fn run(a: &str, b: &str, format: OutputFormat) -> Result<()> {
    let tier = BreedTaxonomy::builtin().match_tier(a, b);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "a": a,
                "b": b,
                "similar": tier.is_some(),
                "tier": tier,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => match tier {
            Some(tier) => println!("{} ({:?} match)", "✓ similar".green(), tier),
            None => println!("{}", "✗ not similar".yellow()),
        },
    }

    Ok(())
}
