#![forbid(unsafe_code)]

//! Document capability: viewport, z-order, and document-level events.
//!
//! Widgets that float overlays need facts that only the surrounding client
//! document knows: the viewport size, the z-order of sibling top-level
//! layers, and document-level events (window blur, visibility changes,
//! pointer-downs outside the widget). Rather than reading those from a
//! process-wide singleton, widgets receive a [`DocumentHandle`] at
//! construction and subscribe to its [`EventHub`] with explicit,
//! cancel-on-drop [`Subscription`] handles tied to the widget's lifecycle.

use crate::geometry::Rect;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// An event originating at the document level rather than at a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocEvent {
    /// The browser window lost focus.
    WindowBlur,
    /// Document visibility changed; `false` means hidden.
    VisibilityChanged(bool),
    /// A pointer-down anywhere in the document, in page coordinates.
    PointerDown {
        /// Page-relative column.
        x: i32,
        /// Page-relative row.
        y: i32,
    },
}

type Handler = Rc<dyn Fn(&DocEvent)>;

#[derive(Default)]
struct HubInner {
    next_id: u64,
    handlers: Vec<(u64, Handler)>,
}

/// A single-threaded broadcast hub for [`DocEvent`]s.
///
/// Handlers run synchronously, in subscription order, on the event loop
/// thread. A handler may cancel subscriptions (including its own) while the
/// hub is dispatching; dispatch works over a snapshot, so a handler cancelled
/// mid-dispatch still sees the event that was in flight.
#[derive(Clone, Default)]
pub struct EventHub {
    inner: Rc<RefCell<HubInner>>,
}

impl EventHub {
    /// Create an empty hub.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler; the returned handle unsubscribes on
    /// [`Subscription::cancel`] or on drop.
    pub fn subscribe(&self, handler: impl Fn(&DocEvent) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.handlers.push((id, Rc::new(handler)));
        Subscription {
            hub: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Broadcast an event to all current subscribers.
    pub fn emit(&self, event: &DocEvent) {
        let snapshot: Vec<Handler> = self
            .inner
            .borrow()
            .handlers
            .iter()
            .map(|(_, h)| Rc::clone(h))
            .collect();
        for handler in snapshot {
            handler(event);
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().handlers.len()
    }
}

impl std::fmt::Debug for EventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHub")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Handle to a registered [`EventHub`] handler.
///
/// Cancelling is idempotent; dropping the handle cancels it, so holding the
/// subscriptions inside the owning widget gives release-on-destruct cleanup.
#[derive(Debug)]
pub struct Subscription {
    hub: Weak<RefCell<HubInner>>,
    id: u64,
}

impl Subscription {
    /// Unsubscribe the handler.
    pub fn cancel(&mut self) {
        if let Some(inner) = self.hub.upgrade() {
            inner.borrow_mut().handlers.retain(|(id, _)| *id != self.id);
        }
        self.hub = Weak::new();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// What a widget may ask of the client document it lives in.
pub trait DocumentHandle {
    /// Current viewport rectangle, in page coordinates.
    fn viewport(&self) -> Rect;

    /// Highest z-index among the document's top-level layers.
    fn top_z_index(&self) -> i32;

    /// The document-level event hub.
    fn events(&self) -> &EventHub;
}

/// A plain in-memory document, suitable for hosts and tests.
#[derive(Debug)]
pub struct ClientDocument {
    viewport: RefCell<Rect>,
    layers: RefCell<Vec<i32>>,
    events: EventHub,
}

impl ClientDocument {
    /// Create a document with the given viewport.
    #[must_use]
    pub fn new(viewport: Rect) -> Self {
        Self {
            viewport: RefCell::new(viewport),
            layers: RefCell::new(Vec::new()),
            events: EventHub::new(),
        }
    }

    /// Update the viewport (e.g. on window resize).
    pub fn set_viewport(&self, viewport: Rect) {
        *self.viewport.borrow_mut() = viewport;
    }

    /// Record the z-index of a top-level layer.
    pub fn push_layer(&self, z: i32) {
        self.layers.borrow_mut().push(z);
    }
}

impl DocumentHandle for ClientDocument {
    fn viewport(&self) -> Rect {
        *self.viewport.borrow()
    }

    fn top_z_index(&self) -> i32 {
        self.layers.borrow().iter().copied().max().unwrap_or(0)
    }

    fn events(&self) -> &EventHub {
        &self.events
    }
}
