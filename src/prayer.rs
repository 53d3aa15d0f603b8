//! Daily prayer times from solar hour angles.
//!
//! Every event is solved in clock hours from the location's civil midnight
//! on the requested date, then turned into an absolute instant through the
//! Julian day. Solar noon always lands on that civil date, even in zones
//! whose clock runs a day ahead of the sun.

use alloc::vec::Vec;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
#[allow(unused_imports)]
use core_maths::CoreFloat;

use crate::location::GeoLocation;
use crate::math::{darccos, darccot, dcos, dsin, dtan, normalize_hour_angle, normalize_hours_24};
use crate::method::{CalculationMethodConfig, IshaRule};
use crate::solar::{solar_parameters_at_julian_day, SolarParameters};
use crate::time::{check_supported_date, julian_day, julian_day_to_utc};
use crate::types::{DailyPrayerSchedule, Prayer};
use crate::CalculationError;

/// Depression of the sun's centre at sunrise and sunset: 34' of refraction
/// plus 16' of semi-diameter.
pub const SUNRISE_DEPRESSION_DEGREES: f64 = 0.833;

/// Passes over the day; each re-evaluates the sun at the previous estimate.
const REFINEMENT_PASSES: usize = 2;

/// Computes the prayer schedule for `date` (the location's calendar date).
///
/// # Errors
///
/// - [`CalculationError::OutOfRangeDate`] outside the years 1583..=3000
/// - [`CalculationError::UnresolvableAngle`] when the sun never reaches a
///   required angle and no [`HighLatitudeRule`](crate::HighLatitudeRule)
///   covers it, or when the sun does not rise or set at all
/// - [`CalculationError::NonMonotonicSchedule`] when adjustments reorder
///   the prayers
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use salat::{compute_daily_schedule, CalculationMethodConfig, GeoLocation, Prayer};
///
/// let makkah = GeoLocation::makkah();
/// let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
/// let schedule = compute_daily_schedule(&makkah, date, &CalculationMethodConfig::default()).unwrap();
///
/// let dhuhr = schedule.get(Prayer::Dhuhr).local_time(&makkah);
/// assert_eq!(dhuhr.format("%H:%M").to_string(), "12:22");
/// ```
pub fn compute_daily_schedule(
    location: &GeoLocation,
    date: NaiveDate,
    config: &CalculationMethodConfig,
) -> Result<DailyPrayerSchedule, CalculationError> {
    check_supported_date(date)?;
    let day = SolarDay::new(location, date);

    let mut estimate = DayTimes::INITIAL.shifted(day.clock_shift);
    let mut solved = RawTimes::default();
    for _ in 0..REFINEMENT_PASSES {
        solved = day.solve(&estimate, config);
        estimate = estimate.refined_by(&solved);
    }

    let times = day.resolve(&solved, config)?;
    let adjustments = config.adjustments;
    let instants = [
        day.instant_at(times.fajr + adjustments.fajr / 60.0)?,
        day.instant_at(times.sunrise + adjustments.sunrise / 60.0)?,
        day.instant_at(times.dhuhr + adjustments.dhuhr / 60.0)?,
        day.instant_at(times.asr + adjustments.asr / 60.0)?,
        day.instant_at(times.maghrib + adjustments.maghrib / 60.0)?,
        day.instant_at(times.isha + adjustments.isha / 60.0)?,
    ];
    DailyPrayerSchedule::try_new(date, instants, day.instant_at(times.dhuhr)?)
}

/// Schedules for `days` consecutive dates starting at `first`, e.g. for a
/// monthly timetable. Fails on the first date that fails.
///
/// # Errors
///
/// Same as [`compute_daily_schedule`], plus
/// [`CalculationError::OutOfRangeDate`] if the range runs past the calendar.
pub fn compute_schedule_range(
    location: &GeoLocation,
    first: NaiveDate,
    days: u32,
    config: &CalculationMethodConfig,
) -> Result<Vec<DailyPrayerSchedule>, CalculationError> {
    first
        .iter_days()
        .take(days as usize)
        .map(|date| compute_daily_schedule(location, date, config))
        .collect()
}

/// Which side of solar noon an event falls on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Side {
    Morning,
    Evening,
}

/// Event times in clock hours after civil midnight.
#[derive(Copy, Clone, Debug, PartialEq)]
struct DayTimes {
    fajr: f64,
    sunrise: f64,
    dhuhr: f64,
    asr: f64,
    maghrib: f64,
    isha: f64,
}

impl DayTimes {
    const INITIAL: DayTimes = DayTimes {
        fajr: 5.0,
        sunrise: 6.0,
        dhuhr: 12.0,
        asr: 13.0,
        maghrib: 18.0,
        isha: 18.0,
    };

    fn shifted(&self, hours: f64) -> DayTimes {
        DayTimes {
            fajr: self.fajr + hours,
            sunrise: self.sunrise + hours,
            dhuhr: self.dhuhr + hours,
            asr: self.asr + hours,
            maghrib: self.maghrib + hours,
            isha: self.isha + hours,
        }
    }

    /// Keeps the previous estimate wherever the last pass found nothing.
    fn refined_by(&self, solved: &RawTimes) -> DayTimes {
        DayTimes {
            fajr: solved.fajr.unwrap_or(self.fajr),
            sunrise: solved.sunrise.unwrap_or(self.sunrise),
            dhuhr: solved.dhuhr,
            asr: solved.asr.unwrap_or(self.asr),
            maghrib: solved.sunset.unwrap_or(self.maghrib),
            isha: solved.isha.unwrap_or(self.isha),
        }
    }
}

/// One pass of astronomy; `None` marks an angle the sun never reaches.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
struct RawTimes {
    fajr: Option<f64>,
    sunrise: Option<f64>,
    dhuhr: f64,
    asr: Option<f64>,
    sunset: Option<f64>,
    /// Only filled for [`IshaRule::Angle`]
    isha: Option<f64>,
}

/// The observer and date, fixed for all events of the day.
struct SolarDay {
    latitude: f64,
    /// Julian day of the civil midnight starting `date`
    base_julian_day: f64,
    /// Clock time minus local mean time, in hours, folded into [-12, 12]
    clock_shift: f64,
}

impl SolarDay {
    fn new(location: &GeoLocation, date: NaiveDate) -> Self {
        let offset_hours = f64::from(location.utc_offset_on(date).local_minus_utc()) / 3600.0;
        Self {
            latitude: location.latitude(),
            base_julian_day: julian_day(date, 0.0) - offset_hours / 24.0,
            // Zones across the date line run a whole day ahead of the sun
            clock_shift: normalize_hour_angle(offset_hours - location.longitude() / 15.0),
        }
    }

    fn sun_at(&self, hours: f64) -> SolarParameters {
        solar_parameters_at_julian_day(self.base_julian_day + hours / 24.0)
    }

    /// Solar transit in clock hours.
    fn transit(&self, sun: &SolarParameters) -> f64 {
        normalize_hours_24(12.0 + self.clock_shift - sun.equation_of_time_minutes / 60.0)
    }

    /// Hour angle, in hours, at which the sun's centre sits `depression`
    /// degrees below the horizon. Negative depression means altitude.
    fn hour_angle(&self, depression: f64, declination: f64) -> Option<f64> {
        let cos_hour_angle = (-dsin(depression) - dsin(declination) * dsin(self.latitude))
            / (dcos(declination) * dcos(self.latitude));
        if !(-1.0..=1.0).contains(&cos_hour_angle) {
            return None;
        }
        Some(normalize_hour_angle(darccos(cos_hour_angle) / 15.0))
    }

    fn time_at_depression(&self, depression: f64, estimate: f64, side: Side) -> Option<f64> {
        let sun = self.sun_at(estimate);
        let noon = self.transit(&sun);
        let hour_angle = self.hour_angle(depression, sun.declination_degrees)?;
        Some(match side {
            Side::Morning => noon - hour_angle,
            Side::Evening => noon + hour_angle,
        })
    }

    /// Asr begins when the shadow is `shadow_factor` object heights longer
    /// than the noon shadow.
    fn asr_time(&self, shadow_factor: f64, estimate: f64) -> Option<f64> {
        let sun = self.sun_at(estimate);
        let altitude = darccot(shadow_factor + dtan((self.latitude - sun.declination_degrees).abs()));
        let hour_angle = self.hour_angle(-altitude, sun.declination_degrees)?;
        Some(self.transit(&sun) + hour_angle)
    }

    fn solve(&self, estimate: &DayTimes, config: &CalculationMethodConfig) -> RawTimes {
        let isha = match config.isha {
            IshaRule::Angle(angle) => self.time_at_depression(angle, estimate.isha, Side::Evening),
            IshaRule::MinutesAfterMaghrib(_) => None,
        };
        RawTimes {
            fajr: self.time_at_depression(config.fajr_angle, estimate.fajr, Side::Morning),
            sunrise: self.time_at_depression(SUNRISE_DEPRESSION_DEGREES, estimate.sunrise, Side::Morning),
            dhuhr: self.transit(&self.sun_at(estimate.dhuhr)),
            asr: self.asr_time(config.asr.shadow_factor(), estimate.asr),
            sunset: self.time_at_depression(SUNRISE_DEPRESSION_DEGREES, estimate.maghrib, Side::Evening),
            isha,
        }
    }

    /// Fills gaps left by unreachable angles according to the high-latitude
    /// rule, or fails.
    fn resolve(&self, raw: &RawTimes, config: &CalculationMethodConfig) -> Result<DayTimes, CalculationError> {
        let sunrise = raw.sunrise.ok_or(CalculationError::UnresolvableAngle(Prayer::Sunrise))?;
        let sunset = raw.sunset.ok_or(CalculationError::UnresolvableAngle(Prayer::Maghrib))?;
        let asr = raw.asr.ok_or(CalculationError::UnresolvableAngle(Prayer::Asr))?;
        let night = 24.0 - (sunset - sunrise);

        let fajr = match config.high_latitude.night_portion(config.fajr_angle) {
            Some(portion) => {
                let limit = portion * night;
                match raw.fajr {
                    Some(fajr) if sunrise - fajr <= limit => fajr,
                    _ => {
                        tracing::debug!(latitude = self.latitude, portion, "fajr limited to a portion of the night");
                        sunrise - limit
                    }
                }
            }
            None => raw.fajr.ok_or(CalculationError::UnresolvableAngle(Prayer::Fajr))?,
        };

        let isha = match config.isha {
            IshaRule::MinutesAfterMaghrib(minutes) => sunset + minutes / 60.0,
            IshaRule::Angle(angle) => match config.high_latitude.night_portion(angle) {
                Some(portion) => {
                    let limit = portion * night;
                    match raw.isha {
                        Some(isha) if isha - sunset <= limit => isha,
                        _ => {
                            tracing::debug!(latitude = self.latitude, portion, "isha limited to a portion of the night");
                            sunset + limit
                        }
                    }
                }
                None => raw.isha.ok_or(CalculationError::UnresolvableAngle(Prayer::Isha))?,
            },
        };

        Ok(DayTimes {
            fajr,
            sunrise,
            dhuhr: raw.dhuhr,
            asr,
            maghrib: sunset,
            isha,
        })
    }

    /// Absolute instant of clock hour `hours`, to the nearest second.
    fn instant_at(&self, hours: f64) -> Result<DateTime<Utc>, CalculationError> {
        let instant = julian_day_to_utc(self.base_julian_day + hours / 24.0)?;
        let seconds = (instant.timestamp_millis() + 500).div_euclid(1000);
        Utc.timestamp_opt(seconds, 0).single().ok_or(CalculationError::OutOfRangeDate)
    }
}
