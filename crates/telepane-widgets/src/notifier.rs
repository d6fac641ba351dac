#![forbid(unsafe_code)]

//! Outgoing change notifications with trailing-edge batching.
//!
//! Every committed mutation immediately mirrors the (day, month, year)
//! triple into the remote object model, but the interaction-completed
//! `Selection` event — the one that triggers dependent server logic — is
//! debounced: a burst of spinner or keyboard edits yields one completion
//! notification after the user pauses, not one per keystroke.
//!
//! The notifier consults the injected suspension guard before anything
//! leaves the client, so server-driven bulk updates never echo.

use crate::date_model::CivilDate;
use std::rc::Rc;
use std::time::Duration;
use telepane_core::debounce::DebounceTimer;
use telepane_remote::{PropertyValue, RemotePeer, SuspensionGuard, WidgetId};

/// The interaction-completed event name.
pub const SELECTION_EVENT: &str = "Selection";

/// Quiet period before the completion notification fires.
pub const COMPLETION_DELAY: Duration = Duration::from_millis(110);

/// Coalesces outgoing change notifications for one widget.
pub struct ChangeNotifier {
    widget: WidgetId,
    peer: Rc<dyn RemotePeer>,
    guard: Rc<dyn SuspensionGuard>,
    timer: DebounceTimer,
    /// Triple carried by the next completion notification.
    last_sent: Option<CivilDate>,
}

impl ChangeNotifier {
    /// Create a notifier bound to one widget instance.
    #[must_use]
    pub fn new(widget: WidgetId, peer: Rc<dyn RemotePeer>, guard: Rc<dyn SuspensionGuard>) -> Self {
        Self {
            widget,
            peer,
            guard,
            timer: DebounceTimer::new(COMPLETION_DELAY),
            last_sent: None,
        }
    }

    /// Report a committed value mutation.
    ///
    /// Pushes the property triple immediately; (re)starts the completion
    /// timer only when the remote side actually listens for `Selection`.
    /// Does nothing at all while suspended.
    pub fn notify_changed(&mut self, date: CivilDate) {
        if self.guard.is_suspended() {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(widget = %self.widget, year = date.year, month = date.month, day = date.day, "push date properties");
        self.peer
            .set_property(self.widget, "day", PropertyValue::from(date.day));
        self.peer
            .set_property(self.widget, "month", PropertyValue::from(date.month));
        self.peer
            .set_property(self.widget, "year", PropertyValue::from(date.year));
        self.last_sent = Some(date);
        if self.peer.is_listening(self.widget, SELECTION_EVENT) {
            self.timer.restart();
        }
    }

    /// Advance the debounce timer; fires at most one completion event.
    ///
    /// Called by the host loop after synchronous input handling, so a firing
    /// is always ordered after the edit that scheduled it. A firing while
    /// suspended is swallowed, not re-scheduled.
    pub fn tick(&mut self, elapsed: Duration) {
        if !self.timer.tick(elapsed) {
            return;
        }
        if self.guard.is_suspended() {
            return;
        }
        let Some(date) = self.last_sent else { return };
        #[cfg(feature = "tracing")]
        tracing::debug!(widget = %self.widget, "selection completed");
        self.peer.notify(
            self.widget,
            SELECTION_EVENT,
            &[
                ("day", PropertyValue::from(date.day)),
                ("month", PropertyValue::from(date.month)),
                ("year", PropertyValue::from(date.year)),
            ],
        );
    }

    /// Whether a completion notification is outstanding.
    #[must_use]
    pub fn pending(&self) -> bool {
        self.timer.pending()
    }

    /// Cancel an outstanding completion notification.
    ///
    /// Called on teardown before the widget is dropped; nothing fires after
    /// this.
    pub fn cancel(&mut self) {
        self.timer.cancel();
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("widget", &self.widget)
            .field("pending", &self.timer.pending())
            .finish_non_exhaustive()
    }
}
