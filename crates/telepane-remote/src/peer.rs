#![forbid(unsafe_code)]

//! The remote peer channel.

/// Identifies a widget instance across the remote channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub u64);

impl WidgetId {
    /// Create a widget id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for WidgetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "w{}", self.0)
    }
}

/// A property value mirrored to the remote object model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// An integer property.
    Int(i64),
    /// A boolean property.
    Bool(bool),
    /// A string property.
    Str(String),
}

impl From<i32> for PropertyValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u32> for PropertyValue {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

/// The client end of the channel to the server-side object model.
///
/// Both operations are fire-and-forget; ordering is FIFO per widget. Hosts
/// implement this on top of their actual transport.
pub trait RemotePeer {
    /// Mirror a property change into the remote object model.
    fn set_property(&self, widget: WidgetId, name: &str, value: PropertyValue);

    /// Deliver an event notification with its payload properties.
    fn notify(&self, widget: WidgetId, event: &str, properties: &[(&str, PropertyValue)]);

    /// Whether the remote side has a listener attached for `event`.
    ///
    /// Widgets use this to skip scheduling notifications nobody consumes.
    fn is_listening(&self, widget: WidgetId, event: &str) -> bool;
}
