//! Geospatial utilities for sighting relevance.
//!
//! This crate provides:
//! - Haversine distance calculations
//! - Lenient location decoding (point objects and JSON-encoded strings)
//! - Step decay from physical distance to a fraction of a location weight
//!
//! # Example
//!
//! ```
//! use dogfinder_geo::{distance_km, location_score, GeoPoint};
//!
//! let query = GeoPoint::new(19.4320, -99.1330);
//! let record = GeoPoint::new(19.4326, -99.1332);
//!
//! let distance = distance_km(&query, &record);
//! assert!(distance < 0.1); // ~70 m
//! assert_eq!(location_score(distance, 0.35), 0.35);
//! ```

mod decay;
mod error;
mod haversine;
mod location;

pub use decay::{location_score, DecayBand, DistanceDecay, REFERENCE_BANDS};
pub use error::{GeoError, GeoErrorCode, Result};
pub use haversine::{distance_km, EARTH_RADIUS_KM};
pub use location::Location;

/// A geographic point with latitude and longitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl GeoPoint {
    /// Creates a new point.
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Returns true if both coordinates are finite and within range.
    #[inline]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Returns the point unchanged if valid, otherwise an error naming it.
    pub fn validated(self) -> Result<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(GeoError::InvalidCoordinate(format!(
                "({}, {})",
                self.latitude, self.longitude
            )))
        }
    }

    /// Strictly parses a JSON-encoded `{"latitude": .., "longitude": ..}` string.
    pub fn from_json_str(encoded: &str) -> Result<Self> {
        let point: Self = serde_json::from_str(encoded)?;
        point.validated()
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}
