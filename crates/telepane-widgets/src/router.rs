#![forbid(unsafe_code)]

//! Keyboard routing.
//!
//! A two-state machine: `Closed` routes keys to field navigation and value
//! editing, `Open` routes them to the calendar overlay. The router itself is
//! a pure classifier — it owns no state beyond what the caller passes in —
//! so every key/modifier combination can be table-tested in isolation.
//!
//! Modifier policy: plain-navigation semantics apply only when no modifier
//! key is held; Ctrl, Shift, Alt and Meta all disqualify. The exceptions
//! while open are Shift+Tab (closes the overlay, like Tab) and
//! Shift+PageUp/PageDown (still re-synchronizes the host from the overlay).

use telepane_core::event::{KeyCode, KeyEvent};

/// Which state the router is in; mirrors the overlay's open flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterState {
    /// Overlay hidden: keys edit the fields.
    Closed,
    /// Overlay shown: keys drive the calendar.
    Open,
}

/// Field-editing action while closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAction {
    /// Move activation left in display order.
    RollPrevious,
    /// Move activation right in display order.
    RollNext,
    /// Step the bound spinner up (wraps).
    SpinUp,
    /// Step the bound spinner down (wraps).
    SpinDown,
    /// Append a digit to the active field's transient buffer.
    Digit(u32),
    /// Jump the spinner to its bound minimum.
    JumpToMin,
    /// Jump the spinner to its bound maximum.
    JumpToMax,
}

/// Overlay-directed action while open.
///
/// In the open state the overlay's own keyboard handling always runs first;
/// these describe what the host does afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAction {
    /// Close the overlay (Enter, Escape, Space, Tab, Shift+Tab).
    Close,
    /// Adopt the overlay's highlighted date and notify.
    SyncHighlight,
}

/// Where a key event goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Field/value editing.
    Field(FieldAction),
    /// Overlay follow-up.
    Overlay(OverlayAction),
    /// Not for us; propagates to the surrounding shell.
    Ignored,
}

/// Classify a key event for the given state.
#[must_use]
pub fn route(key: &KeyEvent, state: RouterState) -> Route {
    match state {
        RouterState::Closed => route_closed(key),
        RouterState::Open => route_open(key),
    }
}

fn route_closed(key: &KeyEvent) -> Route {
    if !key.plain() {
        return Route::Ignored;
    }
    let action = match key.code {
        KeyCode::Left => FieldAction::RollPrevious,
        KeyCode::Right => FieldAction::RollNext,
        KeyCode::Up => FieldAction::SpinUp,
        KeyCode::Down => FieldAction::SpinDown,
        KeyCode::Home => FieldAction::JumpToMin,
        KeyCode::End => FieldAction::JumpToMax,
        code => match code.digit() {
            Some(d) => FieldAction::Digit(d),
            None => return Route::Ignored,
        },
    };
    Route::Field(action)
}

fn route_open(key: &KeyEvent) -> Route {
    if key.plain() {
        match key.code {
            KeyCode::Enter | KeyCode::Escape | KeyCode::Space | KeyCode::Tab => {
                Route::Overlay(OverlayAction::Close)
            }
            KeyCode::Left
            | KeyCode::Right
            | KeyCode::Up
            | KeyCode::Down
            | KeyCode::PageUp
            | KeyCode::PageDown => Route::Overlay(OverlayAction::SyncHighlight),
            _ => Route::Ignored,
        }
    } else if key.shift_only() {
        match key.code {
            KeyCode::Tab => Route::Overlay(OverlayAction::Close),
            KeyCode::PageUp | KeyCode::PageDown => Route::Overlay(OverlayAction::SyncHighlight),
            _ => Route::Ignored,
        }
    } else {
        Route::Ignored
    }
}
