#![forbid(unsafe_code)]

//! Push-button control.

use telepane_core::control::{Control, ControlBase, StateFlags};
use telepane_core::delegate_control;

/// A clickable button (here: the drop-down toggle of the date field).
#[derive(Debug, Clone, Default)]
pub struct Button {
    base: ControlBase,
}

impl Button {
    /// Create a visible button.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: ControlBase::new(),
        }
    }

    /// Track pointer hover; returns `true` when the hover state flipped.
    pub fn set_hover(&mut self, hover: bool) -> bool {
        if self.base.state().contains(StateFlags::HOVER) == hover {
            return false;
        }
        if hover {
            self.base.add_state(StateFlags::HOVER);
        } else {
            self.base.remove_state(StateFlags::HOVER);
        }
        true
    }
}

delegate_control!(Button, base);
