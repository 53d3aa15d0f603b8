use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
#[allow(unused_imports)]
use core_maths::CoreFloat;
use julian_day_converter::{julian_day_to_unix_millis, unix_millis_to_julian_day};

use crate::CalculationError;

/// First calendar year the solar model is trusted for.
pub const MIN_SUPPORTED_YEAR: i32 = 1583;
/// Last calendar year the solar model is trusted for.
pub const MAX_SUPPORTED_YEAR: i32 = 3000;

/// Julian Day of the J2000.0 epoch.
pub(crate) const J2000_EPOCH_JD: f64 = 2_451_545.0;

/// Offset between `NaiveDate::num_days_from_ce` and the Julian Day Number.
pub(crate) const CE_TO_JDN_OFFSET: i64 = 1_721_425;

/// Normalize a time offset (in minutes) to a small range around zero.
///
/// This function assumes that the input value is effectively an offset that
/// might be off by approximately a whole number of days. It "wraps" values
/// that are more than 20 minutes away from zero by adding or subtracting
/// one full day (1440 minutes), so that the result lies in the range
/// \[-20, 20\] minutes.
///
/// This is useful in astronomical calculations such as the equation of time,
/// where angle wrapping can produce results that differ from the expected
/// small offset by almost a full day.
pub(crate) fn normalize_time_offset_minutes(minutes: f64) -> f64 {
    let mut limited = minutes;
    if limited < -20.0_f64 {
        limited += 1440.0_f64;
    } else if limited > 20.0_f64 {
        limited -= 1440.0_f64;
    }
    limited
}

/// Rejects dates the low-precision solar model is not meant for.
///
/// # Errors
///
/// [`CalculationError::OutOfRangeDate`] for years before 1583 or after 3000.
pub fn check_supported_date(date: NaiveDate) -> Result<(), CalculationError> {
    if (MIN_SUPPORTED_YEAR..=MAX_SUPPORTED_YEAR).contains(&date.year()) {
        Ok(())
    } else {
        Err(CalculationError::OutOfRangeDate)
    }
}

/// Compute the astronomical Julian Day for a calendar date at `hours_ut`
/// hours of Universal Time.
///
/// Uses the Meeus formulation: January and February are treated as months
/// 13 and 14 of the previous year, and the Gregorian correction is applied
/// for dates on or after 1582-10-15.
pub fn julian_day(date: NaiveDate, hours_ut: f64) -> f64 {
    let mut year = date.year();
    let mut month = date.month();
    let day_decimal = f64::from(date.day()) + hours_ut / 24.0;

    // If month is January or February, treat them as month 13/14 of the
    // previous year (standard step in the Julian Day algorithm).
    if month < 3 {
        month += 12;
        year -= 1;
    }

    let mut julian_day = (365.25 * (f64::from(year) + 4716.0)).floor()
        + (30.6001 * f64::from(month + 1)).floor()
        + day_decimal
        - 1524.5;
    // Gregorian calendar correction for dates on/after 1582-10-15
    if julian_day > 2_299_160.0 {
        let a = (f64::from(year) / 100.0).floor();
        julian_day += 2.0 - a + (a / 4.0).floor();
    }
    julian_day
}

/// Julian Day Number (integer day count, noon-based) of a calendar date.
pub fn julian_day_number(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) + CE_TO_JDN_OFFSET
}

/// Calendar date for a Julian Day Number.
pub(crate) fn date_from_julian_day_number(jdn: i64) -> Option<NaiveDate> {
    let days_from_ce = i32::try_from(jdn - CE_TO_JDN_OFFSET).ok()?;
    NaiveDate::from_num_days_from_ce_opt(days_from_ce)
}

/// Convert a Julian Day (UT) to a UTC instant, rounded to the millisecond.
///
/// # Errors
///
/// [`CalculationError::OutOfRangeDate`] if the instant is not representable.
pub fn julian_day_to_utc(julian_day: f64) -> Result<DateTime<Utc>, CalculationError> {
    if !julian_day.is_finite() {
        return Err(CalculationError::OutOfRangeDate);
    }
    Utc.timestamp_millis_opt(julian_day_to_unix_millis(julian_day))
        .single()
        .ok_or(CalculationError::OutOfRangeDate)
}

/// Convert a UTC instant to a Julian Day (UT).
pub fn utc_to_julian_day(instant: DateTime<Utc>) -> f64 {
    unix_millis_to_julian_day(instant.timestamp_millis())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn j2000_epoch_is_noon_on_new_year_2000() {
        let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        assert_eq!(julian_day(date, 12.0), J2000_EPOCH_JD);
        assert_eq!(julian_day_number(date), 2_451_545);
    }

    #[test]
    fn julian_day_matches_meeus_reference() {
        // Meeus, Astronomical Algorithms, example 7.a
        let date = NaiveDate::from_ymd_opt(1957, 10, 4).unwrap();
        assert!((julian_day(date, 19.0 + 26.0 / 60.0 + 24.0 / 3600.0) - 2_436_116.31).abs() < 1e-6);
    }

    #[test]
    fn julian_day_round_trips_through_utc() {
        let instant = Utc.with_ymd_and_hms(2024, 6, 21, 9, 22, 30).unwrap();
        let back = julian_day_to_utc(utc_to_julian_day(instant)).unwrap();
        assert!((back - instant).num_milliseconds().abs() <= 1);
    }

    #[test]
    fn julian_day_numbers_map_back_to_dates() {
        let date = NaiveDate::from_ymd_opt(622, 7, 19).unwrap();
        assert_eq!(julian_day_number(date), 1_948_440);
        assert_eq!(date_from_julian_day_number(1_948_440), Some(date));
    }

    #[test]
    fn years_outside_the_model_are_rejected() {
        let early = NaiveDate::from_ymd_opt(1500, 1, 1).unwrap();
        let late = NaiveDate::from_ymd_opt(3001, 1, 1).unwrap();
        let fine = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(check_supported_date(early), Err(CalculationError::OutOfRangeDate));
        assert_eq!(check_supported_date(late), Err(CalculationError::OutOfRangeDate));
        assert_eq!(check_supported_date(fine), Ok(()));
    }

    #[test]
    fn equation_of_time_wraps_by_whole_days() {
        assert_eq!(normalize_time_offset_minutes(-1435.0), 5.0);
        assert_eq!(normalize_time_offset_minutes(1430.0), -10.0);
        assert_eq!(normalize_time_offset_minutes(12.0), 12.0);
    }
}
