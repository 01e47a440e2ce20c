//! Lenient location input.
//!
//! Sighting records and queries carry their location either as a point
//! object or as that object serialized into a string. Anything else is kept
//! verbatim so that decoding the surrounding record never fails.

use crate::{GeoError, GeoPoint, Result};
use serde::{Deserialize, Serialize};

/// A location as supplied by a caller, not yet validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Location {
    /// `{"latitude": .., "longitude": ..}`
    Point(GeoPoint),
    /// `"{\"latitude\": .., \"longitude\": ..}"`
    Encoded(String),
    /// Any other JSON value
    Unrecognized(serde_json::Value),
}

impl Location {
    /// Decodes the location, failing on anything that is not a valid point.
    pub fn try_resolve(&self) -> Result<GeoPoint> {
        match self {
            Location::Point(point) => point.validated(),
            Location::Encoded(encoded) => GeoPoint::from_json_str(encoded),
            Location::Unrecognized(value) => Err(GeoError::UnrecognizedShape(value.to_string())),
        }
    }

    /// Decodes the location, treating anything malformed as absent.
    ///
    /// # Example
    /// ```
    /// use dogfinder_geo::{GeoPoint, Location};
    ///
    /// let encoded = Location::Encoded(r#"{"latitude":19.43,"longitude":-99.13}"#.into());
    /// assert_eq!(encoded.resolve(), Some(GeoPoint::new(19.43, -99.13)));
    ///
    /// let garbage = Location::Encoded("somewhere near the park".into());
    /// assert_eq!(garbage.resolve(), None);
    /// ```
    pub fn resolve(&self) -> Option<GeoPoint> {
        match self.try_resolve() {
            Ok(point) => Some(point),
            Err(error) => {
                tracing::debug!(%error, "Discarding malformed location");
                None
            }
        }
    }
}

impl From<GeoPoint> for Location {
    fn from(point: GeoPoint) -> Self {
        Location::Point(point)
    }
}
