//! Live "current / next prayer" state driven by an external clock.
//!
//! Solar work happens once per local day; each tick is only comparisons and
//! a subtraction. The caller owns the timer and calls [`PrayerScheduleTracker::tick`].

use core::fmt;

use chrono::{DateTime, NaiveDate, Utc};

use crate::location::GeoLocation;
use crate::method::CalculationMethodConfig;
use crate::prayer::compute_daily_schedule;
use crate::types::{DailyPrayerSchedule, Prayer, PrayerInstant, PrayerPeriod};
use crate::CalculationError;

/// What a countdown display needs at one moment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LiveScheduleView {
    pub period: PrayerPeriod,
    /// `None` before Fajr
    pub current: Option<Prayer>,
    pub next: Prayer,
    pub next_at: DateTime<Utc>,
    pub seconds_until_next: u64,
}

impl LiveScheduleView {
    /// View at `now` from today's schedule and, once Isha has begun,
    /// tomorrow's.
    ///
    /// Returns `None` when the next prayer lies beyond the schedules given,
    /// i.e. after Isha with no `tomorrow`.
    pub fn at(
        today: &DailyPrayerSchedule,
        tomorrow: Option<&DailyPrayerSchedule>,
        now: DateTime<Utc>,
    ) -> Option<LiveScheduleView> {
        let next = today
            .next_after(now)
            .or_else(|| tomorrow.and_then(|schedule| schedule.next_after(now)))?;
        let period = today.period_at(now);
        Some(LiveScheduleView {
            period,
            current: period.prayer(),
            next: next.prayer,
            next_at: next.at,
            seconds_until_next: seconds_until(next, now),
        })
    }

    pub fn countdown(&self) -> Countdown {
        Countdown(self.seconds_until_next)
    }
}

/// Whole seconds until `next`, rounded up so a pending prayer never shows 0.
fn seconds_until(next: PrayerInstant, now: DateTime<Utc>) -> u64 {
    let millis = (next.at - now).num_milliseconds().max(0);
    u64::try_from(millis).map_or(0, |millis| millis.div_ceil(1000))
}

/// A duration in seconds that displays as `HH:MM:SS`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Countdown(pub u64);

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.0 / 3600;
        let minutes = self.0 % 3600 / 60;
        let seconds = self.0 % 60;
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}")
    }
}

/// Keeps the day's schedule for one location and answers ticks.
///
/// Besides today's schedule the tracker holds its neighbours when they are
/// needed: tomorrow's once Isha has begun, and yesterday's before Fajr so
/// that an Isha a high-latitude rule pushed past midnight is still reported.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use salat::{CalculationMethodConfig, GeoLocation, Prayer, PrayerScheduleTracker};
///
/// let mut tracker = PrayerScheduleTracker::new(GeoLocation::makkah(), CalculationMethodConfig::default());
/// let now = Utc.with_ymd_and_hms(2024, 6, 21, 10, 0, 0).unwrap();
///
/// assert!(tracker.needs_new_schedule(now));
/// let view = tracker.tick(now).unwrap();
/// assert_eq!(view.current, Some(Prayer::Dhuhr));
/// assert_eq!(view.next, Prayer::Asr);
/// assert!(!tracker.needs_new_schedule(now));
/// ```
#[derive(Clone, Debug)]
pub struct PrayerScheduleTracker {
    location: GeoLocation,
    config: CalculationMethodConfig,
    yesterday: Option<DailyPrayerSchedule>,
    today: Option<DailyPrayerSchedule>,
    tomorrow: Option<DailyPrayerSchedule>,
}

impl PrayerScheduleTracker {
    pub fn new(location: GeoLocation, config: CalculationMethodConfig) -> Self {
        Self {
            location,
            config,
            yesterday: None,
            today: None,
            tomorrow: None,
        }
    }

    pub fn location(&self) -> &GeoLocation {
        &self.location
    }

    pub fn config(&self) -> &CalculationMethodConfig {
        &self.config
    }

    /// The schedule in use, if one has been computed.
    pub fn schedule(&self) -> Option<&DailyPrayerSchedule> {
        self.today.as_ref()
    }

    /// Whether the next [`tick`](Self::tick) at `now` has to compute a
    /// schedule: for a new local day, for yesterday before Fajr, or for
    /// tomorrow after Isha.
    pub fn needs_new_schedule(&self, now: DateTime<Utc>) -> bool {
        let date = self.location.local_date(now);
        let Some(today) = self.cached(date) else {
            return true;
        };
        let neighbour = if now < today.get(Prayer::Fajr).at {
            date.pred_opt()
        } else if today.next_after(now).is_none() {
            date.succ_opt()
        } else {
            return false;
        };
        neighbour.map_or(true, |date| self.cached(date).is_none())
    }

    /// Replaces the location, dropping cached schedules when the move is
    /// material.
    pub fn set_location(&mut self, location: GeoLocation) {
        if self.location.is_materially_different(&location) {
            tracing::debug!(latitude = location.latitude(), longitude = location.longitude(), "location changed");
            self.invalidate();
        }
        self.location = location;
    }

    pub fn set_config(&mut self, config: CalculationMethodConfig) {
        if self.config != config {
            self.invalidate();
        }
        self.config = config;
    }

    /// Forgets all cached schedules.
    pub fn invalidate(&mut self) {
        self.yesterday = None;
        self.today = None;
        self.tomorrow = None;
    }

    /// Current period, next prayer and countdown at `now`.
    ///
    /// Computes today's schedule when the local day has changed, tomorrow's
    /// once Isha has begun, and yesterday's before Fajr. Until yesterday's
    /// Isha has passed, the view reports yesterday's Maghrib as current and
    /// its Isha as next.
    ///
    /// # Errors
    ///
    /// Any error of [`compute_daily_schedule`] for today or tomorrow; the
    /// tracker keeps its previous state. A failure for yesterday only means
    /// the night is read from today's schedule.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Result<LiveScheduleView, CalculationError> {
        let today = self.roll_to(self.location.local_date(now))?;

        if now < today.get(Prayer::Fajr).at {
            match self.yesterday_of(&today) {
                Ok(yesterday) => {
                    if let Some(view) = LiveScheduleView::at(&yesterday, None, now) {
                        return Ok(view);
                    }
                }
                Err(error) => tracing::debug!(%error, "no schedule for the previous day"),
            }
        }

        if let Some(view) = LiveScheduleView::at(&today, None, now) {
            return Ok(view);
        }

        let tomorrow = self.tomorrow_of(&today)?;
        LiveScheduleView::at(&today, Some(&tomorrow), now).ok_or(CalculationError::NonMonotonicSchedule)
    }

    fn cached(&self, date: NaiveDate) -> Option<DailyPrayerSchedule> {
        [self.yesterday, self.today, self.tomorrow]
            .into_iter()
            .flatten()
            .find(|schedule| schedule.date() == date)
    }

    /// Makes `date` today, reusing whichever cached schedules still apply.
    fn roll_to(&mut self, date: NaiveDate) -> Result<DailyPrayerSchedule, CalculationError> {
        if let Some(today) = self.today.filter(|schedule| schedule.date() == date) {
            return Ok(today);
        }

        let today = match self.cached(date) {
            Some(cached) => cached,
            None => self.compute(date)?,
        };
        let yesterday = date.pred_opt().and_then(|date| self.cached(date));
        let tomorrow = date.succ_opt().and_then(|date| self.cached(date));
        self.yesterday = yesterday;
        self.today = Some(today);
        self.tomorrow = tomorrow;
        Ok(today)
    }

    fn yesterday_of(&mut self, today: &DailyPrayerSchedule) -> Result<DailyPrayerSchedule, CalculationError> {
        let date = today.date().pred_opt().ok_or(CalculationError::OutOfRangeDate)?;
        if let Some(yesterday) = self.yesterday.filter(|schedule| schedule.date() == date) {
            return Ok(yesterday);
        }
        let yesterday = self.compute(date)?;
        self.yesterday = Some(yesterday);
        Ok(yesterday)
    }

    fn tomorrow_of(&mut self, today: &DailyPrayerSchedule) -> Result<DailyPrayerSchedule, CalculationError> {
        let date = today.date().succ_opt().ok_or(CalculationError::OutOfRangeDate)?;
        if let Some(tomorrow) = self.tomorrow.filter(|schedule| schedule.date() == date) {
            return Ok(tomorrow);
        }
        let tomorrow = self.compute(date)?;
        self.tomorrow = Some(tomorrow);
        Ok(tomorrow)
    }

    fn compute(&self, date: NaiveDate) -> Result<DailyPrayerSchedule, CalculationError> {
        tracing::debug!(%date, latitude = self.location.latitude(), longitude = self.location.longitude(), "computing prayer schedule");
        compute_daily_schedule(&self.location, date, &self.config)
    }
}
