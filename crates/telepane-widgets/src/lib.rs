#![forbid(unsafe_code)]

//! Composite widgets for telepane.
//!
//! The centerpiece is [`DateField`](date_field::DateField), a composite
//! date-entry control: independently focusable text segments, one shared
//! spinner, an optional drop-down calendar overlay, and trailing-edge
//! batching of change notifications to the remote peer.

pub mod button;
pub mod calendar;
pub mod date_field;
pub mod date_model;
pub mod focus;
pub mod formatter;
pub mod label;
pub mod notifier;
pub mod router;
pub mod spinner;

pub use date_field::{DateField, SlotId};
pub use date_model::{CivilDate, DateModel};
pub use formatter::{DatePattern, FieldKind, Localization};

use bitflags::bitflags;

bitflags! {
    /// Style flags fixed at construction time.
    ///
    /// These mirror the style bits the server passes when it realizes the
    /// widget; they never change over a widget's lifetime.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct WidgetStyle: u8 {
        /// Compact: the day field is hidden.
        const SHORT = 0b0001;
        /// Numeric month with date-separator glyphs between fields.
        const MEDIUM = 0b0010;
        /// Verbose: leading localized weekday name.
        const LONG = 0b0100;
        /// Drop-down button plus calendar overlay; the spinner is hidden.
        const DROP_DOWN = 0b1000;
    }
}
