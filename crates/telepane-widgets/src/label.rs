#![forbid(unsafe_code)]

//! Text segment control.
//!
//! One [`Label`] per logical field (and per separator glyph) of a composite
//! widget. Labels hold display text and presentation state; they never
//! interpret input themselves.

use telepane_core::control::ControlBase;
use telepane_core::delegate_control;

/// Horizontal text alignment within the label bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// Align to the left edge.
    Left,
    /// Center within the bounds.
    #[default]
    Center,
    /// Align to the right edge.
    Right,
}

/// A positioned text segment.
#[derive(Debug, Clone, Default)]
pub struct Label {
    base: ControlBase,
    text: String,
    align: TextAlign,
}

impl Label {
    /// Create a visible label with the given text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            base: ControlBase::new(),
            text: text.into(),
            align: TextAlign::default(),
        }
    }

    /// Create a hidden label with the given text.
    #[must_use]
    pub fn hidden(text: impl Into<String>) -> Self {
        Self {
            base: ControlBase::hidden(),
            ..Self::new(text)
        }
    }

    /// Set the alignment (builder).
    #[must_use]
    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    /// Current display text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the display text.
    ///
    /// Returns `true` if the text actually changed.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.text {
            false
        } else {
            self.text = text;
            true
        }
    }

    /// Text alignment.
    #[must_use]
    pub fn align(&self) -> TextAlign {
        self.align
    }
}

delegate_control!(Label, base);
