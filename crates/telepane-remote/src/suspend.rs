#![forbid(unsafe_code)]

//! Outgoing-notification suspension.
//!
//! While the client applies a batch of server-initiated property changes,
//! widgets must stay silent or every applied setter would echo straight back
//! to the server. The event-dispatch layer owns an [`UpdateGuard`] and
//! suspends it around such batches; notification-emitting components receive
//! a read-only [`SuspensionGuard`] view at construction and consult it before
//! every outgoing message.

use std::cell::Cell;
use std::rc::Rc;

/// Read-only view of the suspension state.
pub trait SuspensionGuard {
    /// Whether outgoing notifications are currently suppressed.
    fn is_suspended(&self) -> bool;
}

/// The dispatch layer's owned suspension flag.
///
/// Cloning shares the flag; widgets hold clones as `Rc<dyn SuspensionGuard>`.
#[derive(Debug, Clone, Default)]
pub struct UpdateGuard {
    suspended: Rc<Cell<bool>>,
}

impl UpdateGuard {
    /// Create a guard in the not-suspended state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Suspend notifications for the lifetime of the returned scope.
    ///
    /// Scopes nest; notifications resume when the outermost scope drops.
    #[must_use]
    pub fn suspend(&self) -> SuspendScope {
        let previous = self.suspended.replace(true);
        SuspendScope {
            flag: Rc::clone(&self.suspended),
            previous,
        }
    }
}

impl SuspensionGuard for UpdateGuard {
    fn is_suspended(&self) -> bool {
        self.suspended.get()
    }
}

/// RAII scope that holds the guard suspended.
#[derive(Debug)]
pub struct SuspendScope {
    flag: Rc<Cell<bool>>,
    previous: bool,
}

impl Drop for SuspendScope {
    fn drop(&mut self) {
        self.flag.set(self.previous);
    }
}
