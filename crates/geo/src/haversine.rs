//! Haversine distance calculation.
//!
//! The Haversine formula calculates the great-circle distance between two points
//! on a sphere given their longitudes and latitudes.

use crate::GeoPoint;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculates the great-circle distance between two points in kilometers.
///
/// # Example
/// ```
/// use dogfinder_geo::{distance_km, GeoPoint};
///
/// let zocalo = GeoPoint::new(19.4326, -99.1332);
/// let coyoacan = GeoPoint::new(19.3500, -99.1620);
///
/// let distance = distance_km(&zocalo, &coyoacan);
/// assert!((distance - 9.7).abs() < 0.5);
/// ```
#[inline]
pub fn distance_km(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const MEXICO_CITY: GeoPoint = GeoPoint { latitude: 19.4326, longitude: -99.1332 };
    const GUADALAJARA: GeoPoint = GeoPoint { latitude: 20.6597, longitude: -103.3496 };
    const MADRID: GeoPoint = GeoPoint { latitude: 40.4168, longitude: -3.7038 };

    #[test]
    fn test_mexico_city_to_guadalajara() {
        let distance = distance_km(&MEXICO_CITY, &GUADALAJARA);
        // Expected: ~460 km
        assert!((distance - 460.0).abs() < 10.0, "CDMX-GDL: {}", distance);
    }

    #[test]
    fn test_mexico_city_to_madrid() {
        let distance = distance_km(&MEXICO_CITY, &MADRID);
        // Expected: ~9,070 km
        assert!((distance - 9070.0).abs() < 60.0, "CDMX-MAD: {}", distance);
    }

    #[test]
    fn test_same_point_zero_distance() {
        assert_eq!(distance_km(&MEXICO_CITY, &MEXICO_CITY), 0.0);
    }

    #[test]
    fn test_nearby_points() {
        let query = GeoPoint::new(19.4320, -99.1330);
        let record = GeoPoint::new(19.4326, -99.1332);
        let distance = distance_km(&query, &record);
        assert!(distance > 0.05 && distance < 0.1, "distance: {}", distance);
    }

    proptest! {
        #[test]
        fn prop_symmetric_and_non_negative(
            lat1 in -90.0f64..=90.0, lon1 in -180.0f64..=180.0,
            lat2 in -90.0f64..=90.0, lon2 in -180.0f64..=180.0,
        ) {
            let p1 = GeoPoint::new(lat1, lon1);
            let p2 = GeoPoint::new(lat2, lon2);
            let d1 = distance_km(&p1, &p2);
            let d2 = distance_km(&p2, &p1);
            prop_assert!(d1 >= 0.0);
            prop_assert!(d1.is_finite());
            prop_assert!((d1 - d2).abs() < 1e-6);
        }
    }
}
