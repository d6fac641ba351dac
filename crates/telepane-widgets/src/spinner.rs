#![forbid(unsafe_code)]

//! Shared numeric spinner.
//!
//! One spinner serves every editable field of the composite: whichever field
//! is active owns the spinner, and activation rebinds its range and value in
//! one step so no intermediate state is observable.

use telepane_core::control::ControlBase;
use telepane_core::delegate_control;

/// A bounded integer value with wrap-around stepping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericRange {
    min: i32,
    max: i32,
    value: i32,
    wrap: bool,
}

impl NumericRange {
    /// Create a range; `value` is clamped into `min..=max`.
    #[must_use]
    pub fn new(min: i32, max: i32, value: i32) -> Self {
        let max = max.max(min);
        Self {
            min,
            max,
            value: value.clamp(min, max),
            wrap: true,
        }
    }

    /// Lower bound (inclusive).
    #[must_use]
    pub fn min(&self) -> i32 {
        self.min
    }

    /// Upper bound (inclusive).
    #[must_use]
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Current value; always within `min..=max`.
    #[must_use]
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Whether stepping wraps at the bounds.
    #[must_use]
    pub fn wrap(&self) -> bool {
        self.wrap
    }

    /// Set the value, clamped into range. Returns `true` on change.
    pub fn set_value(&mut self, value: i32) -> bool {
        let value = value.clamp(self.min, self.max);
        let changed = value != self.value;
        self.value = value;
        changed
    }

    /// Step up, wrapping from `max` to `min`.
    pub fn increment(&mut self) -> bool {
        if self.value == self.max {
            if self.wrap {
                self.set_value(self.min)
            } else {
                false
            }
        } else {
            self.set_value(self.value + 1)
        }
    }

    /// Step down, wrapping from `min` to `max`.
    pub fn decrement(&mut self) -> bool {
        if self.value == self.min {
            if self.wrap {
                self.set_value(self.max)
            } else {
                false
            }
        } else {
            self.set_value(self.value - 1)
        }
    }

    /// Whether `value` fits the range.
    #[must_use]
    pub fn accepts(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// The spinner control shared by the editable fields.
#[derive(Debug, Clone)]
pub struct Spinner {
    base: ControlBase,
    range: NumericRange,
}

impl Spinner {
    /// Create a spinner with an initial binding.
    #[must_use]
    pub fn new(min: i32, max: i32, value: i32) -> Self {
        Self {
            base: ControlBase::new(),
            range: NumericRange::new(min, max, value),
        }
    }

    /// The current range binding.
    #[must_use]
    pub fn range(&self) -> &NumericRange {
        &self.range
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> i32 {
        self.range.value()
    }

    /// Rebind range and value in one step.
    ///
    /// Atomic from the caller's perspective: after this call the spinner
    /// fully reflects the new field, never a mix of old and new binding.
    pub fn rebind(&mut self, min: i32, max: i32, value: i32) {
        self.range = NumericRange::new(min, max, value);
    }

    /// Set the value, clamped into the bound range. Returns `true` on change.
    pub fn set_value(&mut self, value: i32) -> bool {
        self.range.set_value(value)
    }

    /// Step up with wrap. Returns `true` on change.
    pub fn step_up(&mut self) -> bool {
        self.range.increment()
    }

    /// Step down with wrap. Returns `true` on change.
    pub fn step_down(&mut self) -> bool {
        self.range.decrement()
    }

    /// Jump to the bound minimum. Returns `true` on change.
    pub fn jump_to_min(&mut self) -> bool {
        self.range.set_value(self.range.min())
    }

    /// Jump to the bound maximum. Returns `true` on change.
    pub fn jump_to_max(&mut self) -> bool {
        self.range.set_value(self.range.max())
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new(1, 12, 1)
    }
}

delegate_control!(Spinner, base);
