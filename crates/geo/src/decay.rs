//! Distance decay.
//!
//! Maps a physical distance to the fraction of a location weight it earns,
//! as a step function over ascending distance bands.

use serde::{Deserialize, Serialize};

/// Distances strictly below `max_km` earn `factor` of the full weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayBand {
    /// Exclusive upper bound of the band in kilometers
    pub max_km: f64,
    /// Fraction of the full weight earned inside the band
    pub factor: f64,
}

impl DecayBand {
    /// Creates a new band.
    pub const fn new(max_km: f64, factor: f64) -> Self {
        Self { max_km, factor }
    }
}

/// Reference bands: under 5 km full weight, under 15 km 60%, under 40 km 20%.
pub const REFERENCE_BANDS: [DecayBand; 3] = [
    DecayBand::new(5.0, 1.0),
    DecayBand::new(15.0, 0.6),
    DecayBand::new(40.0, 0.2),
];

/// A step decay function over ascending bands.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceDecay {
    bands: Vec<DecayBand>,
}

impl DistanceDecay {
    /// Creates a decay from bands ordered by ascending `max_km`.
    pub fn new(bands: impl IntoIterator<Item = DecayBand>) -> Self {
        Self {
            bands: bands.into_iter().collect(),
        }
    }

    /// The bands of this decay, nearest first.
    pub fn bands(&self) -> &[DecayBand] {
        &self.bands
    }

    /// Score contributed by a distance given the full location weight.
    ///
    /// Distances past the last band, negative distances and non-finite
    /// distances all contribute nothing.
    pub fn score(&self, distance_km: f64, full_weight: f64) -> f64 {
        score_with(&self.bands, distance_km, full_weight)
    }
}

impl Default for DistanceDecay {
    fn default() -> Self {
        Self::new(REFERENCE_BANDS)
    }
}

/// Score of a distance under the reference bands.
///
/// # Example
/// ```
/// use dogfinder_geo::location_score;
///
/// assert_eq!(location_score(0.0, 0.35), 0.35);
/// assert_eq!(location_score(50.0, 0.35), 0.0);
/// ```
#[inline]
pub fn location_score(distance_km: f64, full_weight: f64) -> f64 {
    score_with(&REFERENCE_BANDS, distance_km, full_weight)
}

fn score_with(bands: &[DecayBand], distance_km: f64, full_weight: f64) -> f64 {
    if !distance_km.is_finite() || distance_km < 0.0 {
        return 0.0;
    }

    bands
        .iter()
        .find(|band| distance_km < band.max_km)
        .map_or(0.0, |band| band.factor * full_weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_steps() {
        assert_eq!(location_score(0.0, 1.0), 1.0);
        assert_eq!(location_score(4.99, 1.0), 1.0);
        assert_eq!(location_score(5.0, 1.0), 0.6);
        assert_eq!(location_score(14.99, 1.0), 0.6);
        assert_eq!(location_score(15.0, 1.0), 0.2);
        assert_eq!(location_score(39.99, 1.0), 0.2);
        assert_eq!(location_score(40.0, 1.0), 0.0);
        assert_eq!(location_score(50.0, 1.0), 0.0);
    }

    #[test]
    fn test_scales_with_weight() {
        assert_eq!(location_score(0.0, 0.35), 0.35);
        assert!((location_score(10.0, 0.10) - 0.06).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_distances() {
        assert_eq!(location_score(f64::NAN, 1.0), 0.0);
        assert_eq!(location_score(f64::INFINITY, 1.0), 0.0);
        assert_eq!(location_score(-1.0, 1.0), 0.0);
    }

    #[test]
    fn test_custom_bands() {
        let decay = DistanceDecay::new([DecayBand::new(1.0, 1.0), DecayBand::new(100.0, 0.5)]);
        assert_eq!(decay.score(0.5, 0.2), 0.2);
        assert_eq!(decay.score(60.0, 0.2), 0.1);
        assert_eq!(decay.score(100.0, 0.2), 0.0);
    }

    #[test]
    fn test_default_is_reference() {
        assert_eq!(DistanceDecay::default().bands(), &REFERENCE_BANDS);
    }
}
