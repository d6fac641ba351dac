#![forbid(unsafe_code)]

//! Control capability trait and presentation state flags.
//!
//! Composite widgets hold owned instances of small concrete controls rather
//! than inheriting their behavior. The [`Control`] trait is the narrow
//! capability every sub-control exposes to its composite: bounds, visibility,
//! and presentation state tags. Appearance itself (colors, fonts, theming)
//! is owned by the rendering layer and is out of scope here.

use crate::geometry::Rect;
use bitflags::bitflags;

bitflags! {
    /// Presentation state tags of a control.
    ///
    /// These drive appearance selection in the rendering layer; the runtime
    /// core only toggles them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct StateFlags: u8 {
        /// The control carries the active-field selection highlight.
        const SELECTED = 0b0001;
        /// The pointer hovers over the control.
        const HOVER = 0b0010;
        /// The control is pressed.
        const PRESSED = 0b0100;
        /// The control is disabled.
        const DISABLED = 0b1000;
    }
}

/// The capability interface of a positioned, stateful sub-control.
pub trait Control {
    /// Current bounds, relative to the composite's container.
    fn bounds(&self) -> Rect;

    /// Move/resize the control.
    fn set_bounds(&mut self, bounds: Rect);

    /// Whether the control participates in layout and hit testing.
    fn visible(&self) -> bool;

    /// Show or hide the control.
    fn set_visible(&mut self, visible: bool);

    /// Current presentation state tags.
    fn state(&self) -> StateFlags;

    /// Add a presentation state tag.
    fn add_state(&mut self, flag: StateFlags);

    /// Remove a presentation state tag.
    fn remove_state(&mut self, flag: StateFlags);

    /// Whether the control is visible and the point falls inside its bounds.
    fn hit(&self, x: i32, y: i32) -> bool {
        self.visible() && self.bounds().contains(x, y)
    }
}

/// Common bookkeeping shared by concrete controls.
///
/// Embedded by value; concrete controls delegate their [`Control`] impl to it.
#[derive(Debug, Clone)]
pub struct ControlBase {
    bounds: Rect,
    visible: bool,
    state: StateFlags,
}

impl Default for ControlBase {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlBase {
    /// Create a base for a visible control with empty bounds.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bounds: Rect::default(),
            visible: true,
            state: StateFlags::empty(),
        }
    }

    /// Create a base for a hidden control.
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            visible: false,
            ..Self::new()
        }
    }
}

impl Control for ControlBase {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn state(&self) -> StateFlags {
        self.state
    }

    fn add_state(&mut self, flag: StateFlags) {
        self.state |= flag;
    }

    fn remove_state(&mut self, flag: StateFlags) {
        self.state &= !flag;
    }
}

/// Delegate a [`Control`] impl to an embedded [`ControlBase`] field.
#[macro_export]
macro_rules! delegate_control {
    ($ty:ty, $field:ident) => {
        impl $crate::control::Control for $ty {
            fn bounds(&self) -> $crate::geometry::Rect {
                $crate::control::Control::bounds(&self.$field)
            }
            fn set_bounds(&mut self, bounds: $crate::geometry::Rect) {
                $crate::control::Control::set_bounds(&mut self.$field, bounds);
            }
            fn visible(&self) -> bool {
                $crate::control::Control::visible(&self.$field)
            }
            fn set_visible(&mut self, visible: bool) {
                $crate::control::Control::set_visible(&mut self.$field, visible);
            }
            fn state(&self) -> $crate::control::StateFlags {
                $crate::control::Control::state(&self.$field)
            }
            fn add_state(&mut self, flag: $crate::control::StateFlags) {
                $crate::control::Control::add_state(&mut self.$field, flag);
            }
            fn remove_state(&mut self, flag: $crate::control::StateFlags) {
                $crate::control::Control::remove_state(&mut self.$field, flag);
            }
        }
    };
}
