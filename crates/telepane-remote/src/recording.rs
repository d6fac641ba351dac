#![forbid(unsafe_code)]

//! Recording doubles for tests.
//!
//! [`RecordingPeer`] captures everything a widget sends so tests can assert
//! on exact traffic: property pushes, event notifications, and their order.

use crate::peer::{PropertyValue, RemotePeer, WidgetId};
use std::cell::RefCell;
use std::collections::HashSet;

/// One captured outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outgoing {
    /// A `set_property` call.
    Set {
        /// Target widget.
        widget: WidgetId,
        /// Property name.
        name: String,
        /// Property value.
        value: PropertyValue,
    },
    /// A `notify` call.
    Notify {
        /// Target widget.
        widget: WidgetId,
        /// Event name.
        event: String,
        /// Payload properties.
        properties: Vec<(String, PropertyValue)>,
    },
}

/// A [`RemotePeer`] that records all traffic.
#[derive(Debug, Default)]
pub struct RecordingPeer {
    log: RefCell<Vec<Outgoing>>,
    listening: RefCell<HashSet<String>>,
}

impl RecordingPeer {
    /// Create a peer with no listeners attached.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a remote listener for `event`.
    pub fn listen(&self, event: &str) {
        self.listening.borrow_mut().insert(event.to_owned());
    }

    /// All captured messages, in send order.
    #[must_use]
    pub fn log(&self) -> Vec<Outgoing> {
        self.log.borrow().clone()
    }

    /// Discard captured messages.
    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    /// Captured `set_property` calls for one property name.
    #[must_use]
    pub fn sets_of(&self, property: &str) -> Vec<PropertyValue> {
        self.log
            .borrow()
            .iter()
            .filter_map(|m| match m {
                Outgoing::Set { name, value, .. } if name == property => Some(value.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of captured `notify` calls for one event name.
    #[must_use]
    pub fn notify_count(&self, event: &str) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|m| matches!(m, Outgoing::Notify { event: e, .. } if e == event))
            .count()
    }
}

impl RemotePeer for RecordingPeer {
    fn set_property(&self, widget: WidgetId, name: &str, value: PropertyValue) {
        self.log.borrow_mut().push(Outgoing::Set {
            widget,
            name: name.to_owned(),
            value,
        });
    }

    fn notify(&self, widget: WidgetId, event: &str, properties: &[(&str, PropertyValue)]) {
        self.log.borrow_mut().push(Outgoing::Notify {
            widget,
            event: event.to_owned(),
            properties: properties
                .iter()
                .map(|(k, v)| ((*k).to_owned(), v.clone()))
                .collect(),
        });
    }

    fn is_listening(&self, _widget: WidgetId, event: &str) -> bool {
        self.listening.borrow().contains(event)
    }
}
