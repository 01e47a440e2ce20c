//! Configuration schema definitions
//!
//! Every default reproduces the reference tuning of the relevance engine, so
//! an empty (or missing) configuration file scores exactly like the built-in
//! constants.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub alerts: AlertsConfig,

    #[serde(default)]
    pub ranking: RankingConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfigSchema {
    /// Check every tunable for values the scorer cannot work with.
    pub fn validate(&self) -> Result<()> {
        self.scoring.validate()?;
        self.alerts.validate()?;
        self.ranking.validate()
    }
}

/// Per-signal weights for one scoring mode.
///
/// In a configuration file each weight is optional; omitted weights keep the
/// value of the mode's constant ([`WeightProfile::VISUAL`] or
/// [`WeightProfile::TEXTUAL`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightProfile {
    /// Weight of visual-tag agreement
    pub visual: f64,
    /// Full weight of the proximity and manual-location terms
    pub location: f64,
    /// Weight of the breed text term
    pub breed: f64,
    /// Nominal weight of the free-text details signal. The details term is
    /// scaled by [`ScoringConfig::details_factor`] in both modes.
    pub details: f64,
}

/// Weights as written in a configuration file, any of them omitted.
#[derive(Debug, Deserialize)]
struct WeightOverrides {
    visual: Option<f64>,
    location: Option<f64>,
    breed: Option<f64>,
    details: Option<f64>,
}

impl WeightOverrides {
    fn over(self, base: WeightProfile) -> WeightProfile {
        WeightProfile {
            visual: self.visual.unwrap_or(base.visual),
            location: self.location.unwrap_or(base.location),
            breed: self.breed.unwrap_or(base.breed),
            details: self.details.unwrap_or(base.details),
        }
    }
}

impl WeightProfile {
    /// Weights used when the query carries visual tags.
    pub const VISUAL: Self = Self {
        visual: 0.85,
        location: 0.10,
        breed: 0.05,
        details: 0.0,
    };

    /// Weights used for text and location driven searches.
    pub const TEXTUAL: Self = Self {
        visual: 0.0,
        location: 0.35,
        breed: 0.40,
        details: 0.25,
    };

    fn validate(&self, section: &str) -> Result<()> {
        check_non_negative(&format!("{section}.visual"), self.visual)?;
        check_non_negative(&format!("{section}.location"), self.location)?;
        check_non_negative(&format!("{section}.breed"), self.breed)?;
        check_non_negative(&format!("{section}.details"), self.details)
    }
}

/// Scoring engine tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(
        default = "default_visual_weights",
        deserialize_with = "visual_weights_over_defaults"
    )]
    pub visual_weights: WeightProfile,

    #[serde(
        default = "default_textual_weights",
        deserialize_with = "textual_weights_over_defaults"
    )]
    pub textual_weights: WeightProfile,

    /// Multiplier of the search-term vs details similarity, independent of mode
    #[serde(default = "default_details_factor")]
    pub details_factor: f64,

    /// Share of the query tag's probability in a tag-vs-tag match
    #[serde(default = "default_search_tag_share")]
    pub search_tag_share: f64,

    /// Share of the record tag's probability in a tag-vs-tag match
    #[serde(default = "default_record_tag_share")]
    pub record_tag_share: f64,

    /// Tag-vs-tag scores below this also try the tag-vs-declared-breed path
    #[serde(default = "default_fallback_below")]
    pub fallback_below: f64,

    /// Discount applied to the tag-vs-declared-breed path
    #[serde(default = "default_fallback_factor")]
    pub fallback_factor: f64,

    #[serde(default)]
    pub penalty: PenaltyConfig,

    /// Distance decay bands, ascending by `max_km`
    #[serde(default = "default_decay")]
    pub decay: Vec<DecayBandConfig>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            visual_weights: default_visual_weights(),
            textual_weights: default_textual_weights(),
            details_factor: default_details_factor(),
            search_tag_share: default_search_tag_share(),
            record_tag_share: default_record_tag_share(),
            fallback_below: default_fallback_below(),
            fallback_factor: default_fallback_factor(),
            penalty: PenaltyConfig::default(),
            decay: default_decay(),
        }
    }
}

impl ScoringConfig {
    fn validate(&self) -> Result<()> {
        self.visual_weights.validate("scoring.visual_weights")?;
        self.textual_weights.validate("scoring.textual_weights")?;
        check_non_negative("scoring.details_factor", self.details_factor)?;
        check_non_negative("scoring.search_tag_share", self.search_tag_share)?;
        check_non_negative("scoring.record_tag_share", self.record_tag_share)?;
        check_non_negative("scoring.fallback_below", self.fallback_below)?;
        check_non_negative("scoring.fallback_factor", self.fallback_factor)?;
        self.penalty.validate()?;

        let mut previous = 0.0_f64;
        for (i, band) in self.decay.iter().enumerate() {
            let field = format!("scoring.decay[{i}]");
            check_non_negative(&format!("{field}.factor"), band.factor)?;
            if !band.max_km.is_finite() || band.max_km <= previous {
                return Err(Error::config_invalid(
                    &format!("{field}.max_km"),
                    format_args!("{} must be finite and greater than {}", band.max_km, previous),
                ));
            }
            previous = band.max_km;
        }
        Ok(())
    }
}

fn default_visual_weights() -> WeightProfile {
    WeightProfile::VISUAL
}

fn default_textual_weights() -> WeightProfile {
    WeightProfile::TEXTUAL
}

fn visual_weights_over_defaults<'de, D>(deserializer: D) -> std::result::Result<WeightProfile, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(WeightOverrides::deserialize(deserializer)?.over(WeightProfile::VISUAL))
}

fn textual_weights_over_defaults<'de, D>(deserializer: D) -> std::result::Result<WeightProfile, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(WeightOverrides::deserialize(deserializer)?.over(WeightProfile::TEXTUAL))
}

fn default_details_factor() -> f64 {
    0.1
}

fn default_search_tag_share() -> f64 {
    0.8
}

fn default_record_tag_share() -> f64 {
    0.2
}

fn default_fallback_below() -> f64 {
    0.2
}

fn default_fallback_factor() -> f64 {
    0.9
}

fn default_decay() -> Vec<DecayBandConfig> {
    vec![
        DecayBandConfig { max_km: 5.0, factor: 1.0 },
        DecayBandConfig { max_km: 15.0, factor: 0.6 },
        DecayBandConfig { max_km: 40.0, factor: 0.2 },
    ]
}

/// One step of the distance decay: distances below `max_km` earn `factor`
/// of the full location weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayBandConfig {
    pub max_km: f64,
    pub factor: f64,
}

/// Penalty for a confident top visual guess that contradicts the record's
/// declared breed without any corroborating visual evidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenaltyConfig {
    /// The top tag must be strictly more probable than this
    #[serde(default = "default_min_top_probability")]
    pub min_top_probability: f64,

    /// The visual term must be strictly below this
    #[serde(default = "default_max_visual_score")]
    pub max_visual_score: f64,

    /// Amount subtracted from the composite score
    #[serde(default = "default_penalty_amount")]
    pub amount: f64,
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self {
            min_top_probability: default_min_top_probability(),
            max_visual_score: default_max_visual_score(),
            amount: default_penalty_amount(),
        }
    }
}

impl PenaltyConfig {
    fn validate(&self) -> Result<()> {
        check_probability("scoring.penalty.min_top_probability", self.min_top_probability)?;
        check_non_negative("scoring.penalty.max_visual_score", self.max_visual_score)?;
        check_non_negative("scoring.penalty.amount", self.amount)
    }
}

fn default_min_top_probability() -> f64 {
    0.6
}

fn default_max_visual_score() -> f64 {
    0.1
}

fn default_penalty_amount() -> f64 {
    0.5
}

/// Proactive alert configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertsConfig {
    /// Minimum relevance that fires a notification
    #[serde(default = "default_alert_threshold")]
    pub threshold: f64,

    /// How many notified sighting ids are remembered
    #[serde(default = "default_notified_capacity")]
    pub notified_capacity: usize,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            threshold: default_alert_threshold(),
            notified_capacity: default_notified_capacity(),
        }
    }
}

impl AlertsConfig {
    fn validate(&self) -> Result<()> {
        check_non_negative("alerts.threshold", self.threshold)?;
        if self.notified_capacity == 0 {
            return Err(Error::config_invalid(
                "alerts.notified_capacity",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

fn default_alert_threshold() -> f64 {
    0.7
}

fn default_notified_capacity() -> usize {
    20
}

/// Result list configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Results must score strictly above this when a search term or visual
    /// tags are active
    #[serde(default = "default_min_relevance")]
    pub min_relevance: f64,

    /// Truncate ranked results to this many entries
    #[serde(default)]
    pub max_results: Option<usize>,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            min_relevance: default_min_relevance(),
            max_results: None,
        }
    }
}

impl RankingConfig {
    fn validate(&self) -> Result<()> {
        check_non_negative("ranking.min_relevance", self.min_relevance)
    }
}

fn default_min_relevance() -> f64 {
    0.1
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of compact text
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn check_non_negative(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::config_invalid(
            field,
            format_args!("{value} must be a finite, non-negative number"),
        ))
    }
}

fn check_probability(field: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::config_invalid(
            field,
            format_args!("{value} must lie within [0, 1]"),
        ))
    }
}
