#![forbid(unsafe_code)]

//! Property-based invariant tests for the date model and spinner range.
//!
//! These tests verify structural invariants that must hold for any valid
//! inputs:
//!
//! 1. `CivilDate::new` is self-normalizing: re-construction is identity.
//! 2. `days_in_month` stays within 28..=31 and matches day clamping.
//! 3. `add_days(1)` advances the weekday by one, modulo seven.
//! 4. `add_months` keeps the day valid in the target month.
//! 5. Two-digit year normalization lands in the documented windows.
//! 6. Wrapping ranges invert: decrement undoes increment.
//! 7. `DateModel` setters never leave an invalid day behind.

use proptest::prelude::*;
use telepane_widgets::date_model::{
    CivilDate, DateModel, LITERAL_YEAR_MIN, YEAR_MAX, YEAR_MIN, days_in_month, normalize_year,
};
use telepane_widgets::spinner::NumericRange;

fn date_strategy() -> impl Strategy<Value = CivilDate> {
    (1800i32..=9000, 0u32..12, 1u32..=31).prop_map(|(y, m, d)| CivilDate::new(y, m, d))
}

proptest! {
    #[test]
    fn constructed_dates_are_normalized(date in date_strategy()) {
        prop_assert_eq!(CivilDate::new(date.year, date.month, date.day), date);
        prop_assert!(date.day >= 1);
        prop_assert!(date.day <= days_in_month(date.year, date.month));
    }

    #[test]
    fn days_in_month_bounds(year in YEAR_MIN..=YEAR_MAX, month in 0u32..12) {
        let days = days_in_month(year, month);
        prop_assert!((28..=31).contains(&days));
    }

    #[test]
    fn add_one_day_advances_weekday(date in date_strategy()) {
        let next = date.add_days(1);
        prop_assert_eq!(next.weekday(), (date.weekday() + 1) % 7);
    }

    #[test]
    fn add_months_keeps_day_valid(date in date_strategy(), delta in -48i32..=48) {
        let shifted = date.add_months(delta);
        prop_assert!(shifted.month < 12);
        prop_assert!(shifted.day >= 1);
        prop_assert!(shifted.day <= days_in_month(shifted.year, shifted.month));
        // The day never grows past the original: only clamping may change it.
        prop_assert!(shifted.day <= date.day);
    }

    #[test]
    fn normalized_years_land_in_windows(input in -100000i32..=100000) {
        match normalize_year(input) {
            Some(year) if (0..=29).contains(&input) => prop_assert_eq!(year, input + 2000),
            Some(year) if (30..=99).contains(&input) => prop_assert_eq!(year, input + 1900),
            Some(year) => {
                prop_assert_eq!(year, input);
                prop_assert!((LITERAL_YEAR_MIN..=YEAR_MAX).contains(&year));
            }
            None => {
                prop_assert!(!(0..=99).contains(&input));
                prop_assert!(!(LITERAL_YEAR_MIN..=YEAR_MAX).contains(&input));
            }
        }
    }

    #[test]
    fn wrapping_steps_invert(
        (min, max) in (1i32..=500).prop_flat_map(|min| (Just(min), min + 1..=1000)),
        seed in 1i32..=1000,
    ) {
        let mut range = NumericRange::new(min, max, seed);
        let start = range.value();
        range.increment();
        range.decrement();
        prop_assert_eq!(range.value(), start);
        range.decrement();
        range.increment();
        prop_assert_eq!(range.value(), start);
    }

    #[test]
    fn model_setters_keep_day_valid(
        year in YEAR_MIN..=YEAR_MAX,
        month in 0u32..12,
        day in 1u32..=31,
    ) {
        let mut model = DateModel::new();
        model.set_day(day);
        model.set_month(month);
        model.set_year(year);
        prop_assert!(model.day() >= 1);
        prop_assert!(model.day() <= model.days_in_current_month());
        prop_assert_eq!(model.last_valid_year(), year);
    }
}
