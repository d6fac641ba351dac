#![forbid(unsafe_code)]

//! Stateless per-field formatting rules.
//!
//! Display text is derived from the model on every change; the formatter
//! itself holds only the localization inputs supplied at construction and
//! the month presentation (numeric for the medium style, localized name
//! otherwise).

use crate::date_model::DateModel;

/// The logical fields of a date widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Derived weekday name; never directly editable.
    Weekday,
    /// Day of month.
    Day,
    /// Month.
    Month,
    /// Year.
    Year,
}

/// Locale date-field order token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatePattern {
    /// Month, day, year.
    MonthDayYear,
    /// Day, month, year.
    DayMonthYear,
    /// Locale default; the effective order depends on the widget style.
    #[default]
    Default,
}

impl DatePattern {
    /// Parse a locale pattern token; anything unrecognized is the default.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token {
            "MDY" => Self::MonthDayYear,
            "DMY" => Self::DayMonthYear,
            _ => Self::Default,
        }
    }
}

/// Localization inputs supplied at construction.
#[derive(Debug, Clone)]
pub struct Localization {
    /// Ordered month names, January first.
    pub month_names: [String; 12],
    /// Full weekday names, Sunday first.
    pub weekday_names: [String; 7],
    /// Abbreviated weekday names, Sunday first.
    pub weekday_short_names: [String; 7],
    /// Glyph rendered between numeric date fields.
    pub date_separator: String,
    /// Locale date-field order.
    pub date_pattern: DatePattern,
}

impl Localization {
    /// English names with a `/` separator and the default pattern.
    #[must_use]
    pub fn english() -> Self {
        let name = |s: &str| s.to_owned();
        Self {
            month_names: [
                "January", "February", "March", "April", "May", "June", "July", "August",
                "September", "October", "November", "December",
            ]
            .map(name),
            weekday_names: [
                "Sunday",
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
            ]
            .map(name),
            weekday_short_names: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"].map(name),
            date_separator: "/".to_owned(),
            date_pattern: DatePattern::Default,
        }
    }

    /// Same names with an explicit pattern.
    #[must_use]
    pub fn english_with_pattern(pattern: DatePattern) -> Self {
        Self {
            date_pattern: pattern,
            ..Self::english()
        }
    }
}

/// Formats field display text from the model.
#[derive(Debug, Clone)]
pub struct FieldFormatter {
    loc: Localization,
    numeric_month: bool,
}

impl FieldFormatter {
    /// Create a formatter; `numeric_month` selects zero-padded numbers over
    /// localized month names (the medium style).
    #[must_use]
    pub fn new(loc: Localization, numeric_month: bool) -> Self {
        Self { loc, numeric_month }
    }

    /// The localization inputs.
    #[must_use]
    pub fn localization(&self) -> &Localization {
        &self.loc
    }

    /// Display text for one field.
    #[must_use]
    pub fn format(&self, kind: FieldKind, model: &DateModel) -> String {
        match kind {
            FieldKind::Weekday => self.loc.weekday_names[model.weekday() as usize].clone(),
            FieldKind::Day => pad2(model.day()),
            FieldKind::Month if self.numeric_month => pad2(model.month() + 1),
            FieldKind::Month => self.loc.month_names[model.month() as usize].clone(),
            FieldKind::Year => model.last_valid_year().to_string(),
        }
    }

    /// Abbreviated weekday name for a weekday index (0 = Sunday).
    #[must_use]
    pub fn short_weekday(&self, weekday: u32) -> &str {
        &self.loc.weekday_short_names[weekday as usize % 7]
    }

    /// Month name for a 0-based month.
    #[must_use]
    pub fn month_name(&self, month: u32) -> &str {
        &self.loc.month_names[month as usize % 12]
    }
}

/// Zero-pad a value to two digits.
#[must_use]
pub fn pad2(value: u32) -> String {
    format!("{value:02}")
}
