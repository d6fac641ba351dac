#![forbid(unsafe_code)]

//! Telepane public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for hosts that
//! embed telepane widgets. It re-exports common types from the internal
//! crates and offers a lightweight prelude for day-to-day usage.

// --- Core re-exports -------------------------------------------------------

pub use telepane_core::control::{Control, ControlBase, StateFlags};
pub use telepane_core::debounce::DebounceTimer;
pub use telepane_core::document::{
    ClientDocument, DocEvent, DocumentHandle, EventHub, Subscription,
};
pub use telepane_core::event::{
    Event, KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind,
};
pub use telepane_core::geometry::Rect;

// --- Remote re-exports -----------------------------------------------------

pub use telepane_remote::{
    PropertyValue, RemotePeer, SuspendScope, SuspensionGuard, UpdateGuard, WidgetId,
};

#[cfg(feature = "test-helpers")]
pub use telepane_remote::recording::{Outgoing, RecordingPeer};

// --- Widget re-exports -----------------------------------------------------

pub use telepane_widgets::calendar::{CalendarCell, CalendarOverlay, CellActivation};
pub use telepane_widgets::date_field::{DateField, SlotId};
pub use telepane_widgets::date_model::{CivilDate, DateModel};
pub use telepane_widgets::formatter::{DatePattern, FieldKind, Localization};
pub use telepane_widgets::spinner::{NumericRange, Spinner};
pub use telepane_widgets::WidgetStyle;

// --- Prelude --------------------------------------------------------------

/// Convenience imports for hosts embedding the widgets.
pub mod prelude {
    pub use crate::{
        CivilDate, ClientDocument, Control, DateField, DatePattern, DocEvent, DocumentHandle,
        Event, FieldKind, KeyCode, KeyEvent, Localization, Modifiers, PropertyValue, Rect,
        RemotePeer, SlotId, StateFlags, SuspensionGuard, UpdateGuard, WidgetId, WidgetStyle,
    };
}
