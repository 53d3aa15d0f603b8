use core::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use crate::location::GeoLocation;
use crate::CalculationError;

/// The five daily prayers plus sunrise, which ends the Fajr period.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    /// The five obligatory prayers in daily order.
    pub const DAILY: [Prayer; 5] = [Prayer::Fajr, Prayer::Dhuhr, Prayer::Asr, Prayer::Maghrib, Prayer::Isha];

    pub fn name(self) -> &'static str {
        match self {
            Prayer::Fajr => "Fajr",
            Prayer::Sunrise => "Sunrise",
            Prayer::Dhuhr => "Dhuhr",
            Prayer::Asr => "Asr",
            Prayer::Maghrib => "Maghrib",
            Prayer::Isha => "Isha",
        }
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One prayer and the moment it begins.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrayerInstant {
    pub prayer: Prayer,
    pub at: DateTime<Utc>,
}

impl PrayerInstant {
    /// The instant on the location's wall clock.
    pub fn local_time(&self, location: &GeoLocation) -> DateTime<FixedOffset> {
        self.at.with_timezone(&location.utc_offset_at(self.at))
    }
}

/// Which prayer period "now" falls in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrayerPeriod {
    /// Before today's Fajr; last night's Isha is still running
    BeforeFajr,
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerPeriod {
    /// The prayer whose time is running, `None` before Fajr.
    pub fn prayer(self) -> Option<Prayer> {
        match self {
            PrayerPeriod::BeforeFajr => None,
            PrayerPeriod::Fajr => Some(Prayer::Fajr),
            PrayerPeriod::Dhuhr => Some(Prayer::Dhuhr),
            PrayerPeriod::Asr => Some(Prayer::Asr),
            PrayerPeriod::Maghrib => Some(Prayer::Maghrib),
            PrayerPeriod::Isha => Some(Prayer::Isha),
        }
    }

    fn from_prayer(prayer: Prayer) -> Self {
        match prayer {
            Prayer::Fajr | Prayer::Sunrise => PrayerPeriod::Fajr,
            Prayer::Dhuhr => PrayerPeriod::Dhuhr,
            Prayer::Asr => PrayerPeriod::Asr,
            Prayer::Maghrib => PrayerPeriod::Maghrib,
            Prayer::Isha => PrayerPeriod::Isha,
        }
    }
}

/// Prayer times for one calendar day at one location.
///
/// Only [`compute_daily_schedule`](crate::compute_daily_schedule) builds
/// these, so Fajr < Sunrise < Dhuhr < Asr < Maghrib < Isha always holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DailyPrayerSchedule {
    date: NaiveDate,
    fajr: DateTime<Utc>,
    sunrise: DateTime<Utc>,
    dhuhr: DateTime<Utc>,
    asr: DateTime<Utc>,
    maghrib: DateTime<Utc>,
    isha: DateTime<Utc>,
    solar_noon: DateTime<Utc>,
}

impl DailyPrayerSchedule {
    /// Builds a schedule from instants in the order Fajr, Sunrise, Dhuhr,
    /// Asr, Maghrib, Isha.
    ///
    /// # Errors
    ///
    /// [`CalculationError::NonMonotonicSchedule`] unless the instants are
    /// strictly increasing.
    pub(crate) fn try_new(
        date: NaiveDate,
        instants: [DateTime<Utc>; 6],
        solar_noon: DateTime<Utc>,
    ) -> Result<Self, CalculationError> {
        if instants.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(CalculationError::NonMonotonicSchedule);
        }
        let [fajr, sunrise, dhuhr, asr, maghrib, isha] = instants;
        Ok(Self {
            date,
            fajr,
            sunrise,
            dhuhr,
            asr,
            maghrib,
            isha,
            solar_noon,
        })
    }

    /// The local calendar date this schedule belongs to.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Moment of solar transit, before any Dhuhr adjustment.
    pub fn solar_noon(&self) -> DateTime<Utc> {
        self.solar_noon
    }

    pub fn get(&self, prayer: Prayer) -> PrayerInstant {
        let at = match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => self.sunrise,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        };
        PrayerInstant { prayer, at }
    }

    /// The five obligatory prayers in order; sunrise is left out.
    pub fn prayers(&self) -> [PrayerInstant; 5] {
        Prayer::DAILY.map(|prayer| self.get(prayer))
    }

    /// The period running at `now`: the last prayer that has begun, or
    /// [`PrayerPeriod::BeforeFajr`] before today's Fajr.
    pub fn period_at(&self, now: DateTime<Utc>) -> PrayerPeriod {
        self.prayers()
            .iter()
            .rev()
            .find(|instant| instant.at <= now)
            .map_or(PrayerPeriod::BeforeFajr, |instant| PrayerPeriod::from_prayer(instant.prayer))
    }

    /// The first prayer that begins strictly after `now`, `None` once Isha
    /// has begun.
    pub fn next_after(&self, now: DateTime<Utc>) -> Option<PrayerInstant> {
        self.prayers().into_iter().find(|instant| instant.at > now)
    }
}
