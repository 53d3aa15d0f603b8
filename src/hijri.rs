//! Arithmetical (tabular) Hijri calendar.
//!
//! Thirty-year cycle with leap years 2, 5, 7, 10, 13, 16, 18, 21, 24, 26 and
//! 29, odd months of 30 days and even months of 29, and a 30-day Dhu al-Hijjah
//! in leap years. The epoch, 1 Muharram 1 AH, is Friday 16 July 622 in the
//! Julian calendar (19 July 622 proleptic Gregorian), Julian Day Number
//! 1 948 440.
//!
//! This is a civil approximation and may differ from sighting-based or Umm
//! al-Qura dates by a day or two; [`HijriDate::from_gregorian_with_offset`]
//! lets callers apply a local correction.

use core::fmt;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::time::{date_from_julian_day_number, julian_day_number};

/// Julian Day Number of 1 Muharram 1 AH.
pub const HIJRI_EPOCH_JDN: i64 = 1_948_440;

/// Days in one 30-year cycle: 19 common years of 354 plus 11 leap years of 355.
const DAYS_PER_CYCLE: i64 = 10_631;

const MONTH_NAMES: [&str; 12] = [
    "Muharram",
    "Safar",
    "Rabi' al-Awwal",
    "Rabi' al-Thani",
    "Jumada al-Awwal",
    "Jumada al-Thani",
    "Rajab",
    "Sha'ban",
    "Ramadan",
    "Shawwal",
    "Dhu al-Qi'dah",
    "Dhu al-Hijjah",
];

/// A date in the tabular Hijri calendar.
///
/// Years before the epoch are numbered proleptically (0, -1, ...).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HijriDate {
    year: i32,
    month: u32,
    day: u32,
    weekday: Weekday,
}

/// Converts a Gregorian date to the tabular Hijri calendar.
///
/// Every date converts. Dates before 19 July 622 fall before 1 Muharram 1 AH
/// and get a year of 0 or less: 18 July 622 is 29 Dhu al-Hijjah 0.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use salat::gregorian_to_hijri;
///
/// let hijri = gregorian_to_hijri(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
/// assert_eq!(hijri.to_string(), "1 Ramadan 1445 AH");
/// assert_eq!(hijri.weekday_name(), "Monday");
/// ```
pub fn gregorian_to_hijri(date: NaiveDate) -> HijriDate {
    HijriDate::from_julian_day_number(julian_day_number(date), date.weekday())
}

/// Whether `year` has a 355th day.
pub fn is_leap_year(year: i32) -> bool {
    (14 + 11 * i64::from(year)).rem_euclid(30) < 11
}

/// Days in `month` of `year`, or `None` for a month outside 1..=12.
pub fn month_length(year: i32, month: u32) -> Option<u32> {
    match month {
        12 if is_leap_year(year) => Some(30),
        1..=12 if month % 2 == 1 => Some(30),
        1..=12 => Some(29),
        _ => None,
    }
}

/// Julian Day Number of 1 Muharram of `year`.
fn year_start(year: i32) -> i64 {
    let year = i64::from(year);
    (year - 1) * 354 + (3 + 11 * year).div_euclid(30) + HIJRI_EPOCH_JDN
}

impl HijriDate {
    /// Validates a Hijri date; the weekday is derived from the calendar.
    pub fn new(year: i32, month: u32, day: u32) -> Option<HijriDate> {
        if day == 0 || day > month_length(year, month)? {
            return None;
        }
        let weekday = Self::weekday_of(Self::julian_day_number_of(year, month, day));
        Some(HijriDate {
            year,
            month,
            day,
            weekday,
        })
    }

    /// Converts `date` and then moves `offset_days` days, for communities
    /// whose sighting runs ahead of or behind the tabular calendar.
    pub fn from_gregorian_with_offset(date: NaiveDate, offset_days: i32) -> HijriDate {
        let jdn = julian_day_number(date) + i64::from(offset_days);
        HijriDate::from_julian_day_number(jdn, Self::weekday_of(jdn))
    }

    fn from_julian_day_number(jdn: i64, weekday: Weekday) -> HijriDate {
        let elapsed = jdn - HIJRI_EPOCH_JDN;
        // Mean year of 10631 / 30 days gives the year to within one
        let estimate = (30 * elapsed + 10_646).div_euclid(DAYS_PER_CYCLE);
        // chrono dates plus an i32 offset keep this well inside i32
        let mut year = i32::try_from(estimate).unwrap_or(1);
        while jdn < year_start(year) {
            year -= 1;
        }
        while jdn >= year_start(year + 1) {
            year += 1;
        }

        let mut remaining = jdn - year_start(year);
        let mut month = 1;
        while month < 12 {
            let length = i64::from(month_length(year, month).unwrap_or(29));
            if remaining < length {
                break;
            }
            remaining -= length;
            month += 1;
        }

        HijriDate {
            year,
            month,
            // remaining < 30 by construction of year_start
            day: u32::try_from(remaining + 1).unwrap_or(1),
            weekday,
        }
    }

    fn julian_day_number_of(year: i32, month: u32, day: u32) -> i64 {
        let preceding: i64 = (1..month).filter_map(|m| month_length(year, m)).map(i64::from).sum();
        year_start(year) + preceding + i64::from(day) - 1
    }

    /// JDN 0 was a Monday.
    fn weekday_of(jdn: i64) -> Weekday {
        match jdn.rem_euclid(7) {
            0 => Weekday::Mon,
            1 => Weekday::Tue,
            2 => Weekday::Wed,
            3 => Weekday::Thu,
            4 => Weekday::Fri,
            5 => Weekday::Sat,
            _ => Weekday::Sun,
        }
    }

    /// Hijri year, 0 or negative for dates before the epoch.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month number, 1 (Muharram) to 12 (Dhu al-Hijjah).
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month as usize).saturating_sub(1) % MONTH_NAMES.len()]
    }

    /// English name of the (Gregorian) weekday.
    pub fn weekday_name(&self) -> &'static str {
        match self.weekday {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }

    /// Transliterated Arabic name of the weekday.
    pub fn arabic_weekday_name(&self) -> &'static str {
        match self.weekday {
            Weekday::Mon => "al-Ithnayn",
            Weekday::Tue => "ath-Thulatha'",
            Weekday::Wed => "al-Arba'a'",
            Weekday::Thu => "al-Khamis",
            Weekday::Fri => "al-Jumu'ah",
            Weekday::Sat => "as-Sabt",
            Weekday::Sun => "al-Ahad",
        }
    }

    /// The Gregorian date of this day, `None` beyond chrono's range.
    pub fn to_gregorian(&self) -> Option<NaiveDate> {
        date_from_julian_day_number(Self::julian_day_number_of(self.year, self.month, self.day))
    }

    /// The following day.
    pub fn succ(&self) -> HijriDate {
        let jdn = Self::julian_day_number_of(self.year, self.month, self.day) + 1;
        HijriDate::from_julian_day_number(jdn, self.weekday.succ())
    }
}

impl fmt::Display for HijriDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} AH", self.day, self.month_name(), self.year)
    }
}
