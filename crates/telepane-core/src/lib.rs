#![forbid(unsafe_code)]

//! Core: geometry, canonical events, control capabilities, and the
//! document capability shared by every telepane widget.

pub mod control;
pub mod debounce;
pub mod document;
pub mod event;
pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, info, trace, warn};
