//! Calculation method presets and the knobs they are built from.

/// Named sets of twilight angles used by the major authorities.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CalculationMethod {
    /// Muslim World League: Fajr 18°, Isha 17°
    MuslimWorldLeague,
    /// Islamic Society of North America: Fajr 15°, Isha 15°
    Isna,
    /// Egyptian General Authority of Survey: Fajr 19.5°, Isha 17.5°
    Egyptian,
    /// Umm al-Qura University, Makkah: Fajr 18.5°, Isha 90 minutes after Maghrib
    UmmAlQura,
    /// University of Islamic Sciences, Karachi: Fajr 18°, Isha 18°
    Karachi,
    /// Gulf region (Dubai): Fajr 18.2°, Isha 18.2°
    Dubai,
    /// Angles supplied by the caller
    Custom,
}

impl CalculationMethod {
    /// Human readable name of the preset.
    pub fn name(self) -> &'static str {
        match self {
            CalculationMethod::MuslimWorldLeague => "Muslim World League",
            CalculationMethod::Isna => "Islamic Society of North America",
            CalculationMethod::Egyptian => "Egyptian General Authority of Survey",
            CalculationMethod::UmmAlQura => "Umm al-Qura University, Makkah",
            CalculationMethod::Karachi => "University of Islamic Sciences, Karachi",
            CalculationMethod::Dubai => "Dubai",
            CalculationMethod::Custom => "Custom",
        }
    }

    /// Fajr depression angle and Isha rule of the preset.
    ///
    /// `Custom` has no angles of its own and reports the Muslim World League
    /// values as a starting point.
    pub fn parameters(self) -> (f64, IshaRule) {
        match self {
            CalculationMethod::MuslimWorldLeague | CalculationMethod::Custom => (18.0, IshaRule::Angle(17.0)),
            CalculationMethod::Isna => (15.0, IshaRule::Angle(15.0)),
            CalculationMethod::Egyptian => (19.5, IshaRule::Angle(17.5)),
            CalculationMethod::UmmAlQura => (18.5, IshaRule::MinutesAfterMaghrib(90.0)),
            CalculationMethod::Karachi => (18.0, IshaRule::Angle(18.0)),
            CalculationMethod::Dubai => (18.2, IshaRule::Angle(18.2)),
        }
    }
}

/// How the start of Isha is found.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IshaRule {
    /// Sun at this many degrees below the horizon after sunset
    Angle(f64),
    /// A fixed interval after Maghrib, in minutes
    MinutesAfterMaghrib(f64),
}

/// Juristic convention for the start of Asr.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AsrMethod {
    /// Shafi'i, Maliki and Hanbali: shadow equals object height plus noon shadow
    #[default]
    Standard,
    /// Hanafi: shadow equals twice the object height plus noon shadow
    Hanafi,
}

impl AsrMethod {
    pub fn shadow_factor(self) -> f64 {
        match self {
            AsrMethod::Standard => 1.0,
            AsrMethod::Hanafi => 2.0,
        }
    }
}

/// Fallback for Fajr and Isha when the sun never reaches the twilight angle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HighLatitudeRule {
    /// No fallback: unreachable angles are an error
    #[default]
    None,
    /// Fajr and Isha at most half the night away from sunrise and sunset
    MiddleOfNight,
    /// Fajr and Isha at most one seventh of the night away
    SeventhOfNight,
    /// The night portion is angle / 60 of the night
    TwilightAngle,
}

impl HighLatitudeRule {
    /// Fraction of the night allotted to a twilight of `angle` degrees, or
    /// `None` when no fallback is configured.
    pub fn night_portion(self, angle: f64) -> Option<f64> {
        match self {
            HighLatitudeRule::None => None,
            HighLatitudeRule::MiddleOfNight => Some(1.0 / 2.0),
            HighLatitudeRule::SeventhOfNight => Some(1.0 / 7.0),
            HighLatitudeRule::TwilightAngle => Some(angle / 60.0),
        }
    }
}

/// Per-prayer offsets in minutes, applied after the astronomical times.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrayerAdjustments {
    pub fajr: f64,
    pub sunrise: f64,
    pub dhuhr: f64,
    pub asr: f64,
    pub maghrib: f64,
    pub isha: f64,
}

/// Everything [`compute_daily_schedule`](crate::compute_daily_schedule)
/// needs besides the location and date.
///
/// # Example
///
/// ```
/// use salat::{AsrMethod, CalculationMethod, CalculationMethodConfig, HighLatitudeRule};
///
/// let config = CalculationMethodConfig::new(CalculationMethod::Isna)
///     .with_asr(AsrMethod::Hanafi)
///     .with_high_latitude_rule(HighLatitudeRule::SeventhOfNight);
/// assert_eq!(config.fajr_angle, 15.0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalculationMethodConfig {
    pub method: CalculationMethod,
    /// Fajr depression angle in degrees
    pub fajr_angle: f64,
    pub isha: IshaRule,
    pub asr: AsrMethod,
    pub high_latitude: HighLatitudeRule,
    pub adjustments: PrayerAdjustments,
}

impl Default for CalculationMethodConfig {
    fn default() -> Self {
        Self::new(CalculationMethod::MuslimWorldLeague)
    }
}

impl CalculationMethodConfig {
    /// A preset with Standard Asr and no high-latitude fallback.
    pub fn new(method: CalculationMethod) -> Self {
        let (fajr_angle, isha) = method.parameters();
        Self {
            method,
            fajr_angle,
            isha,
            asr: AsrMethod::Standard,
            high_latitude: HighLatitudeRule::None,
            adjustments: PrayerAdjustments::default(),
        }
    }

    /// A config with caller-chosen angles.
    pub fn custom(fajr_angle: f64, isha: IshaRule) -> Self {
        Self {
            fajr_angle,
            isha,
            ..Self::new(CalculationMethod::Custom)
        }
    }

    #[must_use]
    pub fn with_asr(mut self, asr: AsrMethod) -> Self {
        self.asr = asr;
        self
    }

    #[must_use]
    pub fn with_high_latitude_rule(mut self, rule: HighLatitudeRule) -> Self {
        self.high_latitude = rule;
        self
    }

    #[must_use]
    pub fn with_adjustments(mut self, adjustments: PrayerAdjustments) -> Self {
        self.adjustments = adjustments;
        self
    }
}
