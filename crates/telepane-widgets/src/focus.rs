#![forbid(unsafe_code)]

//! Focus arbitration across the editable fields.
//!
//! Exactly one of {month, day, year} is active at any time; the arbiter
//! exclusively owns that designation. It also decides the left-to-right roll
//! order (which depends on the locale date pattern and the widget style) and
//! skips fields the style hides. The side effects of an activation change —
//! selection flags on the labels and the spinner rebinding — are applied by
//! the composite from the decisions returned here.

use crate::WidgetStyle;
use crate::date_model::{DateModel, LITERAL_YEAR_MIN, YEAR_MAX};
use crate::formatter::{DatePattern, FieldKind};

/// Roll direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollDirection {
    /// Towards the previous field in display order.
    Previous,
    /// Towards the next field in display order.
    Next,
}

/// Left-to-right order of the editable fields for a pattern/style pair.
///
/// `MDY` and `DMY` are explicit; the default pattern is year-first for the
/// medium style and month-first otherwise.
#[must_use]
pub fn roll_order(pattern: DatePattern, style: WidgetStyle) -> [FieldKind; 3] {
    use FieldKind::{Day, Month, Year};
    match pattern {
        DatePattern::MonthDayYear => [Month, Day, Year],
        DatePattern::DayMonthYear => [Day, Month, Year],
        DatePattern::Default if style.contains(WidgetStyle::MEDIUM) => [Year, Month, Day],
        DatePattern::Default => [Month, Day, Year],
    }
}

/// The spinner binding for a field: `(min, max, value)`.
///
/// Day binds to the current month's length, month to 1..12 (displayed
/// 1-based), year to the supported literal range seeded with the last
/// committed year.
#[must_use]
pub fn spinner_binding(slot: FieldKind, model: &DateModel) -> (i32, i32, i32) {
    match slot {
        FieldKind::Day => (1, model.days_in_current_month() as i32, model.day() as i32),
        FieldKind::Month => (1, 12, model.month() as i32 + 1),
        FieldKind::Year => (LITERAL_YEAR_MIN, YEAR_MAX, model.last_valid_year()),
        // The weekday field is derived and never binds the spinner.
        FieldKind::Weekday => (0, 0, 0),
    }
}

/// Tracks the active editable field.
#[derive(Debug, Clone)]
pub struct FocusArbiter {
    active: FieldKind,
    /// Set on (re)activation and focus gain; the next typed digit starts a
    /// fresh buffer instead of appending.
    fresh_edit: bool,
}

impl FocusArbiter {
    /// Create an arbiter with `initial` active.
    #[must_use]
    pub fn new(initial: FieldKind) -> Self {
        Self {
            active: initial,
            fresh_edit: true,
        }
    }

    /// The currently active field.
    #[must_use]
    pub fn active(&self) -> FieldKind {
        self.active
    }

    /// Whether `slot` is the active field.
    #[must_use]
    pub fn is_active(&self, slot: FieldKind) -> bool {
        self.active == slot
    }

    /// Whether the next typed digit starts a fresh buffer.
    #[must_use]
    pub fn fresh_edit(&self) -> bool {
        self.fresh_edit
    }

    /// Mark the next edit as fresh (focus gained, field re-entered, jump).
    pub fn mark_fresh(&mut self) {
        self.fresh_edit = true;
    }

    /// Record that an edit consumed the fresh flag.
    pub fn consume_fresh(&mut self) {
        self.fresh_edit = false;
    }

    /// Make `slot` the active field.
    ///
    /// No-op when `slot` is already active. Returns the previously active
    /// field when activation changed, so the caller can clear its selection
    /// flag and rebind the spinner.
    pub fn activate(&mut self, slot: FieldKind) -> Option<FieldKind> {
        if slot == self.active || slot == FieldKind::Weekday {
            return None;
        }
        let previous = self.active;
        self.active = slot;
        self.fresh_edit = true;
        Some(previous)
    }

    /// Move activation to the nearest visible field in `direction`.
    ///
    /// Wraps around the order; fields reported invisible are skipped. When
    /// no other field is visible this is a no-op and `None` is returned.
    pub fn roll(
        &mut self,
        direction: RollDirection,
        order: [FieldKind; 3],
        visible: impl Fn(FieldKind) -> bool,
    ) -> Option<FieldKind> {
        let position = order.iter().position(|k| *k == self.active)?;
        for step in 1..order.len() {
            let index = match direction {
                RollDirection::Next => (position + step) % order.len(),
                RollDirection::Previous => (position + order.len() - step) % order.len(),
            };
            if visible(order[index]) {
                return self.activate(order[index]);
            }
        }
        None
    }
}

impl Default for FocusArbiter {
    fn default() -> Self {
        Self::new(FieldKind::Month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use FieldKind::{Day, Month, Year};

    #[test]
    fn test_roll_order_patterns() {
        assert_eq!(
            roll_order(DatePattern::MonthDayYear, WidgetStyle::LONG),
            [Month, Day, Year]
        );
        assert_eq!(
            roll_order(DatePattern::DayMonthYear, WidgetStyle::empty()),
            [Day, Month, Year]
        );
        assert_eq!(
            roll_order(DatePattern::Default, WidgetStyle::MEDIUM),
            [Year, Month, Day]
        );
        assert_eq!(
            roll_order(DatePattern::Default, WidgetStyle::LONG),
            [Month, Day, Year]
        );
    }

    #[test]
    fn test_activate_is_noop_for_same_slot() {
        let mut arbiter = FocusArbiter::new(Month);
        assert_eq!(arbiter.activate(Month), None);
        assert_eq!(arbiter.activate(Day), Some(Month));
        assert!(arbiter.fresh_edit());
    }

    #[test]
    fn test_weekday_never_activates() {
        let mut arbiter = FocusArbiter::new(Month);
        assert_eq!(arbiter.activate(FieldKind::Weekday), None);
        assert_eq!(arbiter.active(), Month);
    }

    #[test]
    fn test_roll_wraps() {
        let mut arbiter = FocusArbiter::new(Year);
        let order = [Month, Day, Year];
        assert_eq!(arbiter.roll(RollDirection::Next, order, |_| true), Some(Year));
        assert_eq!(arbiter.active(), Month);
        assert_eq!(
            arbiter.roll(RollDirection::Previous, order, |_| true),
            Some(Month)
        );
        assert_eq!(arbiter.active(), Year);
    }

    #[test]
    fn test_roll_skips_hidden_fields() {
        // Short style: the day field is hidden.
        let mut arbiter = FocusArbiter::new(Month);
        let order = [Month, Day, Year];
        arbiter.roll(RollDirection::Next, order, |k| k != Day);
        assert_eq!(arbiter.active(), Year);
    }

    #[test]
    fn test_roll_single_visible_is_noop() {
        let mut arbiter = FocusArbiter::new(Month);
        let order = [Month, Day, Year];
        assert_eq!(
            arbiter.roll(RollDirection::Next, order, |k| k == Month),
            None
        );
        assert_eq!(arbiter.active(), Month);
    }

    #[test]
    fn test_spinner_bindings() {
        let mut model = DateModel::new();
        model.set_year(2024);
        model.set_month(1); // February 2024, leap year
        assert_eq!(spinner_binding(Day, &model), (1, 29, 1));
        assert_eq!(spinner_binding(Month, &model), (1, 12, 2));
        assert_eq!(spinner_binding(Year, &model), (1752, 9999, 2024));
    }
}
