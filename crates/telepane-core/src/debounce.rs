#![forbid(unsafe_code)]

//! Trailing-edge debounce timer.
//!
//! A single-shot, cancellable timer advanced cooperatively by the host event
//! loop. There is no background thread: the loop calls [`DebounceTimer::tick`]
//! with the elapsed wall time after it has finished dispatching synchronous
//! input for the turn, so a firing is always ordered after the input that
//! scheduled it.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use telepane_core::debounce::DebounceTimer;
//!
//! let mut timer = DebounceTimer::new(Duration::from_millis(110));
//! timer.restart();
//! assert!(!timer.tick(Duration::from_millis(100)));
//! timer.restart(); // a new trigger restarts the quiet period
//! assert!(!timer.tick(Duration::from_millis(100)));
//! assert!(timer.tick(Duration::from_millis(10)));
//! assert!(!timer.pending());
//! ```

use std::time::Duration;

/// A restartable single-shot timer with trailing-edge semantics.
#[derive(Debug, Clone)]
pub struct DebounceTimer {
    period: Duration,
    remaining: Option<Duration>,
}

impl DebounceTimer {
    /// Create a stopped timer with the given quiet period.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            remaining: None,
        }
    }

    /// The configured quiet period.
    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Start the timer, or reset the full quiet period if already pending.
    ///
    /// At most one expiry is ever outstanding; restarting never stacks a
    /// second one.
    pub fn restart(&mut self) {
        self.remaining = Some(self.period);
    }

    /// Cancel a pending expiry, if any.
    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    /// Whether an expiry is outstanding.
    #[must_use]
    pub fn pending(&self) -> bool {
        self.remaining.is_some()
    }

    /// Advance the timer by elapsed wall time.
    ///
    /// Returns `true` exactly once per [`restart`](Self::restart) burst, when
    /// the quiet period has fully elapsed. The timer stops after firing.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        match self.remaining {
            Some(left) if left <= elapsed => {
                self.remaining = None;
                true
            }
            Some(left) => {
                self.remaining = Some(left - elapsed);
                false
            }
            None => false,
        }
    }
}
