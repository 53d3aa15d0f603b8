extern crate std;
use super::date;
use crate::hijri::{month_length, HijriDate};
use crate::gregorian_to_hijri;
use chrono::{Datelike, Days};
use proptest::prelude::*;

proptest! {
#[allow(clippy::unwrap_used)]

    #[test]
    fn consecutive_days_are_consecutive_hijri_days(day_offset in 0u64..200_000) {
        let today = date(1600, 1, 1).checked_add_days(Days::new(day_offset)).unwrap();
        let tomorrow = today.succ_opt().unwrap();

        let hijri_today = gregorian_to_hijri(today);
        let hijri_tomorrow = gregorian_to_hijri(tomorrow);
        prop_assert_eq!(hijri_today.succ(), hijri_tomorrow);

        if hijri_tomorrow.day() == 1 {
            prop_assert_eq!(Some(hijri_today.day()), month_length(hijri_today.year(), hijri_today.month()));
        } else {
            prop_assert_eq!(hijri_tomorrow.day(), hijri_today.day() + 1);
            prop_assert_eq!(hijri_tomorrow.month(), hijri_today.month());
        }
    }

    #[test]
    fn conversion_is_invertible_and_keeps_the_weekday(day_offset in 0u64..200_000) {
        let gregorian = date(1600, 1, 1).checked_add_days(Days::new(day_offset)).unwrap();
        let hijri = gregorian_to_hijri(gregorian);

        prop_assert_eq!(hijri.weekday(), gregorian.weekday());
        prop_assert_eq!(hijri.to_gregorian(), Some(gregorian));
        prop_assert_eq!(HijriDate::new(hijri.year(), hijri.month(), hijri.day()), Some(hijri));
    }

    #[test]
    fn offsets_move_by_whole_days(day_offset in 0u64..100_000, offset in -3i32..=3) {
        let gregorian = date(1700, 1, 1).checked_add_days(Days::new(day_offset)).unwrap();
        let shifted = HijriDate::from_gregorian_with_offset(gregorian, offset);
        let expected = if offset >= 0 {
            gregorian.checked_add_days(Days::new(offset.unsigned_abs().into()))
        } else {
            gregorian.checked_sub_days(Days::new(offset.unsigned_abs().into()))
        };
        prop_assert_eq!(shifted, gregorian_to_hijri(expected.unwrap()));
    }
}

#[test]
fn a_year_has_354_or_355_days() {
    let mut date = HijriDate::new(1440, 1, 1).unwrap();
    let mut days = 0;
    while date.year() == 1440 {
        date = date.succ();
        days += 1;
    }
    assert_eq!(days, 354);
    assert_eq!((date.year(), date.month(), date.day()), (1441, 1, 1));

    let days_in_1445: u32 = (1..=12).filter_map(|month| month_length(1445, month)).sum();
    assert_eq!(days_in_1445, 355);
}
