//! Observer coordinates and the caller-owned location cache.

use alloc::string::String;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Offset, TimeZone, Utc};
use chrono_tz::Tz;
#[allow(unused_imports)]
use core_maths::CoreFloat;

use crate::qibla::{haversine_km, KAABA_LATITUDE, KAABA_LONGITUDE};
use crate::CalculationError;

/// Distance beyond which a new fix counts as a different place, in kilometres.
pub const MATERIAL_DISTANCE_KM: f64 = 1.0;

/// A validated observer position.
///
/// Latitude and longitude are in degrees (north and east positive). The
/// optional IANA zone decides which calendar day "now" belongs to; without
/// one the nautical zone `round(longitude / 15)` hours is used.
///
/// # Example
///
/// ```
/// use salat::GeoLocation;
///
/// let london = GeoLocation::new(51.5074, -0.1278)
///     .unwrap()
///     .with_timezone_name("Europe/London")
///     .unwrap()
///     .with_city("London");
/// assert_eq!(london.city(), Some("London"));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GeoLocation {
    latitude: f64,
    longitude: f64,
    timezone: Option<Tz>,
    city: Option<String>,
    country: Option<String>,
}

impl GeoLocation {
    /// Creates a location after checking both coordinates.
    ///
    /// # Errors
    ///
    /// [`CalculationError::InvalidLocation`] if latitude is outside [-90, 90],
    /// longitude outside [-180, 180], or either is not finite.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CalculationError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CalculationError::InvalidLocation);
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CalculationError::InvalidLocation);
        }
        Ok(Self {
            latitude,
            longitude,
            timezone: None,
            city: None,
            country: None,
        })
    }

    /// The Kaaba in Makkah, used when no device position is available.
    pub fn makkah() -> Self {
        Self {
            latitude: KAABA_LATITUDE,
            longitude: KAABA_LONGITUDE,
            timezone: Some(Tz::Asia__Riyadh),
            city: Some(String::from("Makkah")),
            country: Some(String::from("Saudi Arabia")),
        }
    }

    /// Attaches an IANA time zone.
    #[must_use]
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = Some(timezone);
        self
    }

    /// Attaches an IANA time zone given by name, e.g. `"Asia/Jakarta"`.
    ///
    /// # Errors
    ///
    /// [`CalculationError::UnknownTimezone`] if the name is not in the tz database.
    pub fn with_timezone_name(self, name: &str) -> Result<Self, CalculationError> {
        let timezone = name.parse::<Tz>().map_err(|_| CalculationError::UnknownTimezone)?;
        Ok(self.with_timezone(timezone))
    }

    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn timezone(&self) -> Option<Tz> {
        self.timezone
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// Offset from UTC in effect at `instant` for this location.
    pub fn utc_offset_at(&self, instant: DateTime<Utc>) -> FixedOffset {
        match self.timezone {
            Some(timezone) => timezone.offset_from_utc_datetime(&instant.naive_utc()).fix(),
            None => self.nautical_offset(),
        }
    }

    /// Offset from UTC in effect at local noon on `date`.
    pub fn utc_offset_on(&self, date: NaiveDate) -> FixedOffset {
        match (self.timezone, date.and_hms_opt(12, 0, 0)) {
            (Some(timezone), Some(noon)) => timezone
                .offset_from_local_datetime(&noon)
                .earliest()
                .map_or_else(|| self.utc_offset_at(noon.and_utc()), |offset| offset.fix()),
            _ => self.nautical_offset(),
        }
    }

    /// The calendar date at this location at `instant`.
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.utc_offset_at(instant)).date_naive()
    }

    /// Whether `other` is far enough away, or in another zone, that a
    /// schedule computed for `self` no longer applies.
    pub fn is_materially_different(&self, other: &GeoLocation) -> bool {
        self.timezone != other.timezone || haversine_km(self, other) > MATERIAL_DISTANCE_KM
    }

    fn nautical_offset(&self) -> FixedOffset {
        // round(lon / 15) lies in [-12, 12], always a valid offset
        let hours = (self.longitude / 15.0).round() as i32;
        FixedOffset::east_opt(hours * 3600).unwrap_or(Utc.fix())
    }
}

/// A single cached location with an explicit expiry.
///
/// The cache belongs to the caller; nothing in the crate reads it implicitly.
#[derive(Clone, Debug)]
pub struct LocationCache {
    ttl: Duration,
    entry: Option<(GeoLocation, DateTime<Utc>)>,
}

impl Default for LocationCache {
    fn default() -> Self {
        Self::new(Duration::seconds(Self::DEFAULT_TTL_SECONDS))
    }
}

impl LocationCache {
    /// Five minutes.
    pub const DEFAULT_TTL_SECONDS: i64 = 300;

    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    pub fn store(&mut self, location: GeoLocation, now: DateTime<Utc>) {
        self.entry = Some((location, now));
    }

    /// The cached location, unless it has expired at `now`.
    pub fn get(&self, now: DateTime<Utc>) -> Option<&GeoLocation> {
        match &self.entry {
            Some((location, stored_at)) if now - *stored_at < self.ttl => Some(location),
            _ => None,
        }
    }

    /// The cached location, or Makkah when nothing fresh is cached.
    pub fn get_or_fallback(&self, now: DateTime<Utc>) -> GeoLocation {
        self.get(now).cloned().unwrap_or_else(GeoLocation::makkah)
    }

    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.get(now).is_some()
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}
