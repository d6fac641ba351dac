#![forbid(unsafe_code)]

//! The logical date held by a date widget.
//!
//! [`DateModel`] owns the (year, month, day) triple, derives the weekday,
//! and enforces calendar validity: the day is clamped to the days in the
//! current month whenever year or month changes, and free-text year input
//! goes through the 2-digit disambiguation rule before it is accepted.
//!
//! Weekday indices are 0..6 with 0 = Sunday, so a caller-supplied name list
//! ordered Sunday-first is indexed directly.

use chrono::{Datelike, NaiveDate};

/// Inclusive year range the model accepts.
pub const YEAR_MIN: i32 = 1;
/// Inclusive upper bound of the year range.
pub const YEAR_MAX: i32 = 9999;
/// Smallest year accepted literally by free-text input.
pub const LITERAL_YEAR_MIN: i32 = 1752;

/// A plain calendar date, used for overlay highlights and cell tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilDate {
    /// Year, `1..=9999`.
    pub year: i32,
    /// Month, 0-based `0..=11`.
    pub month: u32,
    /// Day of month, 1-based.
    pub day: u32,
}

impl CivilDate {
    /// Create a date, clamping the day into the month.
    #[must_use]
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        let year = year.clamp(YEAR_MIN, YEAR_MAX);
        let month = month.min(11);
        let day = day.clamp(1, days_in_month(year, month));
        Self { year, month, day }
    }

    /// Weekday index, 0 = Sunday .. 6 = Saturday.
    #[must_use]
    pub fn weekday(&self) -> u32 {
        self.to_naive().weekday().num_days_from_sunday()
    }

    /// The date `delta` days away (negative moves backwards).
    ///
    /// Saturates at the supported year range.
    #[must_use]
    pub fn add_days(&self, delta: i64) -> Self {
        let shifted = self.to_naive() + chrono::Duration::days(delta);
        let year = shifted.year();
        if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
            return *self;
        }
        Self {
            year,
            month: shifted.month0(),
            day: shifted.day(),
        }
    }

    /// The date `delta` months away, day clamped into the target month.
    #[must_use]
    pub fn add_months(&self, delta: i32) -> Self {
        let total = self.year * 12 + self.month as i32 + delta;
        let year = total.div_euclid(12);
        let month = total.rem_euclid(12) as u32;
        if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
            return *self;
        }
        Self::new(year, month, self.day)
    }

    fn to_naive(&self) -> NaiveDate {
        // Fields are kept valid by construction.
        NaiveDate::from_ymd_opt(self.year, self.month + 1, self.day)
            .unwrap_or(NaiveDate::MIN)
    }
}

/// Number of days in `(year, month)` for the Gregorian calendar.
///
/// Probes downward from 31, accepting the first day count that forms a real
/// calendar date. This handles 30/31-day months and leap years uniformly,
/// without a month-length table.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let mut day = 31;
    while day > 28 && NaiveDate::from_ymd_opt(year, month + 1, day).is_none() {
        day -= 1;
    }
    day
}

/// Normalize free-text year input against the prior valid year.
///
/// 2-digit years are disambiguated (`0..=29` → 2000s, `30..=99` → 1900s);
/// values of [`LITERAL_YEAR_MIN`] or above are taken literally; everything
/// else is rejected and `None` is returned so the caller restores the prior
/// value.
#[must_use]
pub fn normalize_year(input: i32) -> Option<i32> {
    match input {
        0..=29 => Some(2000 + input),
        30..=99 => Some(1900 + input),
        v if v >= LITERAL_YEAR_MIN && v <= YEAR_MAX => Some(v),
        _ => None,
    }
}

/// The logical date of a date widget.
///
/// Invariant: `day <= days_in_month(year, month)` at all times; mutating
/// year or month re-clamps the day downward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateModel {
    year: i32,
    month: u32,
    day: u32,
    /// Last committed year; seeds the spinner when the year field activates
    /// and is restored when free-text input is rejected.
    last_valid_year: i32,
}

impl Default for DateModel {
    fn default() -> Self {
        Self::new()
    }
}

impl DateModel {
    /// Create a model holding 1970-01-01.
    #[must_use]
    pub fn new() -> Self {
        Self {
            year: 1970,
            month: 0,
            day: 1,
            last_valid_year: 1970,
        }
    }

    /// Current year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Current month, 0-based.
    #[must_use]
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Current day of month, 1-based.
    #[must_use]
    pub fn day(&self) -> u32 {
        self.day
    }

    /// The last committed year.
    #[must_use]
    pub fn last_valid_year(&self) -> i32 {
        self.last_valid_year
    }

    /// Derived weekday, 0 = Sunday .. 6 = Saturday.
    #[must_use]
    pub fn weekday(&self) -> u32 {
        self.date().weekday()
    }

    /// Days in the currently held (year, month).
    #[must_use]
    pub fn days_in_current_month(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// The held date as a [`CivilDate`].
    #[must_use]
    pub fn date(&self) -> CivilDate {
        CivilDate {
            year: self.year,
            month: self.month,
            day: self.day,
        }
    }

    /// Set the year, clamping into range and re-clamping the day.
    ///
    /// Returns `true` if anything changed.
    pub fn set_year(&mut self, year: i32) -> bool {
        let year = year.clamp(YEAR_MIN, YEAR_MAX);
        let changed = year != self.year;
        self.year = year;
        self.last_valid_year = year;
        self.reclamp_day() || changed
    }

    /// Set the month (0-based), clamping into range and re-clamping the day.
    ///
    /// Returns `true` if anything changed.
    pub fn set_month(&mut self, month: u32) -> bool {
        let month = month.min(11);
        let changed = month != self.month;
        self.month = month;
        self.reclamp_day() || changed
    }

    /// Set the day, clamped to `1..=days_in_month`.
    ///
    /// Returns `true` if the day changed.
    pub fn set_day(&mut self, day: u32) -> bool {
        let day = day.clamp(1, self.days_in_current_month());
        let changed = day != self.day;
        self.day = day;
        changed
    }

    /// Set the full date at once.
    pub fn set_date(&mut self, date: CivilDate) -> bool {
        let year_changed = self.set_year(date.year);
        let month_changed = self.set_month(date.month);
        let day_changed = self.set_day(date.day);
        year_changed || month_changed || day_changed
    }

    /// Commit free-text year input.
    ///
    /// Applies the 2-digit disambiguation rule; rejected input leaves the
    /// model untouched. Returns `true` when the committed year differs from
    /// the prior valid year.
    pub fn commit_year_text(&mut self, text: &str) -> bool {
        let Some(value) = text.trim().parse::<i32>().ok().and_then(normalize_year) else {
            return false;
        };
        if value == self.last_valid_year {
            return false;
        }
        self.set_year(value);
        true
    }

    fn reclamp_day(&mut self) -> bool {
        let max = self.days_in_current_month();
        if self.day > max {
            self.day = max;
            true
        } else {
            false
        }
    }
}
