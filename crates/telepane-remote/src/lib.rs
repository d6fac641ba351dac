#![forbid(unsafe_code)]

//! Remote peer interfaces.
//!
//! Every telepane widget mirrors its state into a server-side object model.
//! This crate defines the client side of that contract: the fire-and-forget
//! [`RemotePeer`] channel, typed [`PropertyValue`]s, and the
//! [`SuspensionGuard`] consulted before any outgoing notification. The wire
//! transport itself is out of scope; hosts implement [`RemotePeer`] on top of
//! whatever framing they use.

pub mod peer;
pub mod suspend;

#[cfg(any(test, feature = "test-helpers"))]
pub mod recording;

pub use peer::{PropertyValue, RemotePeer, WidgetId};
pub use suspend::{SuspendScope, SuspensionGuard, UpdateGuard};
