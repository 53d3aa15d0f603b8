#![allow(missing_docs, clippy::unwrap_used)]
use chrono::Utc;
use salat::{
    compute_bearing, distance_to_kaaba_km, gregorian_to_hijri, CalculationMethod, CalculationMethodConfig,
    GeoLocation, PrayerScheduleTracker,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let now = Utc::now();
    let makkah = GeoLocation::makkah();
    let today = makkah.local_date(now);
    let config = CalculationMethodConfig::new(CalculationMethod::UmmAlQura);

    println!("Prayer Times - {}", makkah.city().unwrap_or("Makkah"));
    println!("Location: {:.4}°N, {:.4}°E", makkah.latitude(), makkah.longitude());
    println!("Date: {} ({})", today.format("%B %d, %Y"), gregorian_to_hijri(today));
    println!("Method: {}", config.method.name());
    println!("{:=<60}", "");

    let schedule = salat::compute_daily_schedule(&makkah, today, &config)?;
    for instant in schedule.prayers() {
        println!("  {:<8} {}", instant.prayer, instant.local_time(&makkah).format("%H:%M"));
    }
    println!();

    let mut tracker = PrayerScheduleTracker::new(makkah.clone(), config);
    let view = tracker.tick(now)?;
    match view.current {
        Some(prayer) => println!("Current: {prayer}"),
        None => println!("Current: before Fajr"),
    }
    println!("Next: {} in {}", view.next, view.countdown());
    println!();

    // Somewhere farther away, for a meaningful direction
    let london = GeoLocation::new(51.5074, -0.1278)?.with_timezone_name("Europe/London")?;
    println!("Qibla from London: {}", compute_bearing(&london));
    println!("Distance to the Kaaba: {:.0} km", distance_to_kaaba_km(&london));

    Ok(())
}
