extern crate std;
use super::{date, utc};
use crate::method::{AsrMethod, HighLatitudeRule, PrayerAdjustments};
use crate::{
    compute_daily_schedule, gregorian_to_hijri, CalculationMethod, CalculationMethodConfig, GeoLocation, HijriDate,
    PrayerScheduleTracker,
};

#[test]
fn method_configuration_survives_persistence() {
    let config = CalculationMethodConfig::new(CalculationMethod::UmmAlQura)
        .with_asr(AsrMethod::Hanafi)
        .with_high_latitude_rule(HighLatitudeRule::SeventhOfNight)
        .with_adjustments(PrayerAdjustments {
            dhuhr: 2.0,
            ..PrayerAdjustments::default()
        });

    let json = serde_json::to_string(&config).unwrap();
    let restored: CalculationMethodConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, config);
}

#[test]
fn hijri_dates_serialize_with_their_weekday() {
    let hijri = gregorian_to_hijri(date(2024, 3, 11));
    let json = serde_json::to_value(hijri).unwrap();
    assert_eq!(json["year"], 1445);
    assert_eq!(json["month"], 9);
    assert_eq!(json["day"], 1);

    let restored: HijriDate = serde_json::from_value(json).unwrap();
    assert_eq!(restored, hijri);
}

#[test]
fn schedules_and_views_serialize_for_display_layers() {
    let makkah = GeoLocation::makkah();
    let schedule = compute_daily_schedule(&makkah, date(2024, 6, 21), &CalculationMethodConfig::default()).unwrap();
    let json = serde_json::to_value(schedule).unwrap();
    assert_eq!(json["date"], "2024-06-21");
    assert!(json["fajr"].as_str().unwrap().starts_with("2024-06-21T01:"));

    let mut tracker = PrayerScheduleTracker::new(makkah.clone(), CalculationMethodConfig::default());
    let view = tracker.tick(utc(2024, 6, 21, 10, 0)).unwrap();
    let json = serde_json::to_value(view).unwrap();
    assert_eq!(json["current"], "Dhuhr");
    assert_eq!(json["next"], "Asr");

    let json = serde_json::to_value(&makkah).unwrap();
    assert_eq!(json["timezone"], "Asia/Riyadh");
    assert_eq!(json["city"], "Makkah");
}
