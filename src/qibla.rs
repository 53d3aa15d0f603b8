//! Direction and distance to the Kaaba on a spherical Earth.

use core::fmt;

#[allow(unused_imports)]
use core_maths::CoreFloat;

use crate::location::GeoLocation;
use crate::math::{darctan2, dcos, dsin, normalize_degrees_360};

/// Latitude of the Kaaba in degrees north.
pub const KAABA_LATITUDE: f64 = 21.4225;
/// Longitude of the Kaaba in degrees east.
pub const KAABA_LONGITUDE: f64 = 39.8262;

/// IUGG mean Earth radius in kilometres.
pub const EARTH_MEAN_RADIUS_KM: f64 = 6371.0088;

const KM_PER_MILE: f64 = 1.609_344;

/// Sixteen-wind compass rose, clockwise from north.
const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW", "NNW",
];

/// Initial great-circle bearing towards the Kaaba.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QiblaBearing {
    /// Clockwise from true north, in [0, 360)
    pub degrees_from_true_north: f64,
}

impl QiblaBearing {
    /// Nearest point of the sixteen-wind compass, e.g. `"NE"`.
    pub fn compass_point(&self) -> &'static str {
        let sector = (self.degrees_from_true_north / 22.5).round() as usize % COMPASS_POINTS.len();
        COMPASS_POINTS[sector]
    }
}

impl fmt::Display for QiblaBearing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}° {}", self.degrees_from_true_north, self.compass_point())
    }
}

/// Bearing from `location` towards the Kaaba.
///
/// At the Kaaba itself the direction is undefined and reported as 0°.
///
/// # Example
///
/// ```
/// use salat::{compute_bearing, GeoLocation};
///
/// let new_york = GeoLocation::new(40.7128, -74.0060).unwrap();
/// let qibla = compute_bearing(&new_york);
/// assert!((58.0..59.0).contains(&qibla.degrees_from_true_north));
/// assert_eq!(qibla.compass_point(), "ENE");
/// ```
pub fn compute_bearing(location: &GeoLocation) -> QiblaBearing {
    let degrees = initial_bearing(location.latitude(), location.longitude(), KAABA_LATITUDE, KAABA_LONGITUDE);
    QiblaBearing {
        degrees_from_true_north: degrees,
    }
}

/// Great-circle distance from `location` to the Kaaba in kilometres.
pub fn distance_to_kaaba_km(location: &GeoLocation) -> f64 {
    haversine(location.latitude(), location.longitude(), KAABA_LATITUDE, KAABA_LONGITUDE)
}

/// Great-circle distance from `location` to the Kaaba in statute miles.
pub fn distance_to_kaaba_miles(location: &GeoLocation) -> f64 {
    distance_to_kaaba_km(location) / KM_PER_MILE
}

/// Haversine distance between two locations in kilometres.
pub fn haversine_km(from: &GeoLocation, to: &GeoLocation) -> f64 {
    haversine(from.latitude(), from.longitude(), to.latitude(), to.longitude())
}

fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let half_dlat = (lat2 - lat1).to_radians() / 2.0;
    let half_dlon = (lon2 - lon1).to_radians() / 2.0;
    let a = half_dlat.sin().powi(2) + dcos(lat1) * dcos(lat2) * half_dlon.sin().powi(2);
    2.0 * EARTH_MEAN_RADIUS_KM * a.sqrt().min(1.0).asin()
}

/// Forward azimuth from the first point to the second, in [0, 360).
fn initial_bearing(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let delta_lon = lon2 - lon1;
    let y = dsin(delta_lon) * dcos(lat2);
    let x = dcos(lat1) * dsin(lat2) - dsin(lat1) * dcos(lat2) * dcos(delta_lon);
    if y == 0.0 && x == 0.0 {
        return 0.0;
    }
    normalize_degrees_360(darctan2(y, x))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn at(latitude: f64, longitude: f64) -> GeoLocation {
        GeoLocation::new(latitude, longitude).unwrap()
    }

    #[test]
    fn bearing_at_the_kaaba_is_defined() {
        let bearing = compute_bearing(&GeoLocation::makkah());
        assert_eq!(bearing.degrees_from_true_north, 0.0);
        assert_eq!(distance_to_kaaba_km(&GeoLocation::makkah()), 0.0);
    }

    #[test]
    fn bearings_match_published_values() {
        // Reference values from common Qibla tables, to a tenth of a degree
        let cases = [
            (at(40.7128, -74.0060), 58.5),  // New York
            (at(51.5074, -0.1278), 119.0),  // London
            (at(-6.2088, 106.8456), 295.1), // Jakarta
            (at(-33.8688, 151.2093), 277.5), // Sydney
        ];
        for (location, expected) in cases {
            let bearing = compute_bearing(&location).degrees_from_true_north;
            assert!((bearing - expected).abs() < 0.2, "{location:?}: {bearing}");
        }
    }

    #[test]
    fn points_due_south_of_the_kaaba_face_north() {
        let bearing = compute_bearing(&at(10.0, KAABA_LONGITUDE)).degrees_from_true_north;
        assert!(bearing.abs() < 1e-9);
        let bearing = compute_bearing(&at(30.0, KAABA_LONGITUDE)).degrees_from_true_north;
        assert!((bearing - 180.0).abs() < 1e-9);
    }

    #[test]
    fn bearing_is_always_in_range() {
        for latitude in (-90..=90).step_by(15) {
            for longitude in (-180..=180).step_by(20) {
                let bearing = compute_bearing(&at(f64::from(latitude), f64::from(longitude)));
                assert!((0.0..360.0).contains(&bearing.degrees_from_true_north), "{bearing:?}");
            }
        }
    }

    #[test]
    fn distances_use_the_haversine_formula() {
        let london = at(51.5074, -0.1278);
        let km = distance_to_kaaba_km(&london);
        assert!((km - 4_790.0).abs() < 20.0, "{km}");
        assert!((distance_to_kaaba_miles(&london) - km / 1.609_344).abs() < 1e-9);
        assert_eq!(haversine_km(&london, &london), 0.0);
    }

    #[test]
    fn compass_points_round_to_the_nearest_wind() {
        let point = |degrees_from_true_north| QiblaBearing { degrees_from_true_north }.compass_point();
        assert_eq!(point(0.0), "N");
        assert_eq!(point(11.0), "N");
        assert_eq!(point(12.0), "NNE");
        assert_eq!(point(119.0), "ESE");
        assert_eq!(point(355.0), "N");
    }
}
