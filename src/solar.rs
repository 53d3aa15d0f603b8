//! Low-precision solar ephemeris.
//!
//! Declination and equation of time from the mean-element series published
//! in the Astronomical Almanac. Good to roughly a minute of time between
//! 1583 and 3000, which is all prayer timings need.

use chrono::NaiveDate;
#[allow(unused_imports)]
use core_maths::CoreFloat;

use crate::math::{darcsin, darctan2, dcos, dsin, normalize_degrees_360, normalize_hours_24};
use crate::time::{check_supported_date, julian_day, normalize_time_offset_minutes, J2000_EPOCH_JD};
use crate::CalculationError;

/// Mean anomaly of the Sun at J2000.0 (degrees)
const MEAN_ANOMALY_BASE: f64 = 357.529;
/// Daily motion of the mean anomaly (degrees per day)
const MEAN_ANOMALY_RATE: f64 = 0.985_600_28;
/// Mean longitude of the Sun at J2000.0 (degrees)
const MEAN_LONGITUDE_BASE: f64 = 280.459;
/// Daily motion of the mean longitude (degrees per day)
const MEAN_LONGITUDE_RATE: f64 = 0.985_647_36;
/// Obliquity of the ecliptic at J2000.0 (degrees)
const OBLIQUITY_BASE: f64 = 23.439;
/// Daily drift of the obliquity (degrees per day)
const OBLIQUITY_RATE: f64 = 0.000_000_36;

/// Declination and equation of time of the Sun at one moment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolarParameters {
    /// Apparent declination in degrees (positive north)
    pub declination_degrees: f64,
    /// Apparent minus mean solar time, in minutes
    pub equation_of_time_minutes: f64,
}

/// Solar parameters at 12:00 UT on `date`.
///
/// # Errors
///
/// [`CalculationError::OutOfRangeDate`] outside the years 1583..=3000.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use salat::solar_parameters;
///
/// let solstice = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
/// let sun = solar_parameters(solstice).unwrap();
/// assert!((sun.declination_degrees - 23.44).abs() < 0.05);
/// ```
pub fn solar_parameters(date: NaiveDate) -> Result<SolarParameters, CalculationError> {
    check_supported_date(date)?;
    Ok(solar_parameters_at_julian_day(julian_day(date, 12.0)))
}

/// Solar parameters at an arbitrary Julian Day (UT).
///
/// No range check is applied; callers that accept user dates should go
/// through [`solar_parameters`].
pub fn solar_parameters_at_julian_day(julian_day: f64) -> SolarParameters {
    let d = julian_day - J2000_EPOCH_JD;

    let mean_anomaly = normalize_degrees_360(MEAN_ANOMALY_BASE + MEAN_ANOMALY_RATE * d);
    let mean_longitude = normalize_degrees_360(MEAN_LONGITUDE_BASE + MEAN_LONGITUDE_RATE * d);
    let ecliptic_longitude = normalize_degrees_360(
        mean_longitude + 1.915 * dsin(mean_anomaly) + 0.020 * dsin(2.0 * mean_anomaly),
    );
    let obliquity = OBLIQUITY_BASE - OBLIQUITY_RATE * d;

    let right_ascension_hours = normalize_hours_24(
        darctan2(dcos(obliquity) * dsin(ecliptic_longitude), dcos(ecliptic_longitude)) / 15.0,
    );
    let declination = darcsin(dsin(obliquity) * dsin(ecliptic_longitude));
    let equation_of_time = normalize_time_offset_minutes((mean_longitude / 15.0 - right_ascension_hours) * 60.0);

    SolarParameters {
        declination_degrees: declination,
        equation_of_time_minutes: equation_of_time,
    }
}
