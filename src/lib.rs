//! # Salat
//!
//! Islamic prayer times, Qibla direction and Hijri dates for any location on Earth.
//!
//! Prayer times come from a low-precision solar model (declination and the
//! equation of time), good to about a minute between 1583 and 3000. The
//! conventional calculation methods (Muslim World League, ISNA, Egyptian,
//! Umm al-Qura, Karachi, Dubai) are built in, with Hanafi Asr, high-latitude
//! fallbacks and per-prayer minute adjustments. All instants are UTC; a
//! [`GeoLocation`] with a time zone turns them into wall-clock times.
//!
//! ## Basic Usage
//!
//! ```
//! use chrono::NaiveDate;
//! use salat::{compute_bearing, compute_daily_schedule, gregorian_to_hijri};
//! use salat::{CalculationMethodConfig, GeoLocation, Prayer};
//!
//! let makkah = GeoLocation::makkah();
//! let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
//!
//! let schedule = compute_daily_schedule(&makkah, date, &CalculationMethodConfig::default()).unwrap();
//! for instant in schedule.prayers() {
//!     let local = instant.local_time(&makkah);
//!     assert!(local.date_naive() == date);
//! }
//! assert!(schedule.get(Prayer::Fajr).at < schedule.get(Prayer::Isha).at);
//!
//! // Standing at the Kaaba the bearing is reported as 0°
//! assert_eq!(compute_bearing(&makkah).degrees_from_true_north, 0.0);
//!
//! assert_eq!(gregorian_to_hijri(date).to_string(), "14 Dhu al-Hijjah 1445 AH");
//! ```
//!
//! For a running display, [`PrayerScheduleTracker`] caches the day's schedule
//! and answers "which prayer now, which next, how long until it" on every tick.
#![no_std]

extern crate alloc;

pub mod hijri;
pub mod location;
mod math;
pub mod method;
pub mod prayer;
pub mod qibla;
pub mod solar;
pub mod time;
pub mod tracker;
pub mod types;

#[cfg(test)]
mod tests;

use thiserror::Error;

pub use hijri::{gregorian_to_hijri, HijriDate};
pub use location::{GeoLocation, LocationCache};
pub use method::{AsrMethod, CalculationMethod, CalculationMethodConfig, HighLatitudeRule, IshaRule, PrayerAdjustments};
pub use prayer::{compute_daily_schedule, compute_schedule_range};
pub use qibla::{compute_bearing, distance_to_kaaba_km, distance_to_kaaba_miles, QiblaBearing};
pub use solar::{solar_parameters, SolarParameters};
pub use tracker::{Countdown, LiveScheduleView, PrayerScheduleTracker};
pub use types::{DailyPrayerSchedule, Prayer, PrayerInstant, PrayerPeriod};

/// Errors returned by the calculations in this crate.
///
/// - `OutOfRangeDate`: the date is outside 1583..=3000 or cannot be represented
/// - `UnresolvableAngle`: the sun never reaches the depression a prayer needs
/// - `InvalidLocation`: latitude or longitude out of range or not finite
/// - `UnknownTimezone`: the name is not in the IANA database
/// - `NonMonotonicSchedule`: adjustments reordered the prayers of a day
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculationError {
    /// Date outside the supported years
    #[error("date out of supported range")]
    OutOfRangeDate,

    /// Polar day, polar night, or twilight that never gets deep enough with
    /// no high-latitude rule to fall back on
    #[error("sun never reaches the required angle for {0}")]
    UnresolvableAngle(Prayer),

    /// Latitude outside [-90, 90] or longitude outside [-180, 180] degrees
    #[error("location out of range")]
    InvalidLocation,

    /// Name not found in the IANA time zone database
    #[error("unknown time zone")]
    UnknownTimezone,

    /// Prayer instants not strictly increasing after adjustments
    #[error("prayer times out of order")]
    NonMonotonicSchedule,
}
