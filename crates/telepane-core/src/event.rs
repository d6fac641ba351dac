#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! This module defines the event types routed into telepane widgets by the
//! hosting client shell. All events derive `Clone`, `PartialEq`, and `Eq`
//! for use in tests and pattern matching.
//!
//! # Design Notes
//!
//! - Pointer coordinates are page-relative (0-indexed, origin top-left)
//! - `Modifiers` use bitflags for easy combination
//! - Document-level events (window blur, visibility) live in
//!   [`crate::document`]; they reach widgets through the document hub,
//!   not through this dispatch path

use bitflags::bitflags;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A pointer (mouse) event.
    Mouse(MouseEvent),

    /// Input focus gained or lost by the receiving widget.
    ///
    /// `true` = focus gained, `false` = focus lost.
    Focus(bool),
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether no modifier key at all is held.
    ///
    /// Plain-navigation key semantics apply only in this case; Ctrl, Shift,
    /// Alt and Meta all disqualify.
    #[must_use]
    pub const fn plain(&self) -> bool {
        self.modifiers.is_empty()
    }

    /// Check if Shift is the only modifier held.
    #[must_use]
    pub fn shift_only(&self) -> bool {
        self.modifiers == Modifiers::SHIFT
    }
}

/// The key that a [`KeyEvent`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character key.
    Char(char),
    /// Enter / Return.
    Enter,
    /// Escape.
    Escape,
    /// Space bar.
    Space,
    /// Tab.
    Tab,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Home.
    Home,
    /// End.
    End,
}

impl KeyCode {
    /// The digit value for `Char('0')..Char('9')`, if any.
    #[must_use]
    pub fn digit(&self) -> Option<u32> {
        match self {
            Self::Char(c) => c.to_digit(10),
            _ => None,
        }
    }
}

bitflags! {
    /// Modifier keys held during an input event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Control key.
        const CTRL = 0b0010;
        /// Alt key.
        const ALT = 0b0100;
        /// Meta / Command key.
        const META = 0b1000;
    }
}

/// A pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// What kind of pointer action happened.
    pub kind: MouseEventKind,

    /// Page-relative column (0-indexed).
    pub x: i32,

    /// Page-relative row (0-indexed).
    pub y: i32,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// Create a new mouse event with no modifiers.
    #[must_use]
    pub const fn new(kind: MouseEventKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    /// Position as an `(x, y)` pair.
    #[must_use]
    pub const fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

/// The kind of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    /// A button was pressed.
    Down(MouseButton),
    /// A button was released.
    Up(MouseButton),
    /// A completed click (press and release on the same target).
    Click(MouseButton),
    /// The pointer moved.
    Moved,
    /// Scroll wheel rotated up/away from the user.
    ScrollUp,
    /// Scroll wheel rotated down/towards the user.
    ScrollDown,
}

/// A mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Left / primary button.
    Left,
    /// Right / secondary button.
    Right,
    /// Middle button.
    Middle,
}
