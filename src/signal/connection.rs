/*!
 * Connection Handles
 *
 * The sole strong owner of a handler slot. Disconnecting blocks on the
 * slot's busy flag, so it cannot return while the handler might still be
 * mid-invocation; the very next step releases the slot's storage.
 */

use super::slot::SlotControl;
use log::debug;
use std::fmt;
use std::marker::PhantomPinned;
use std::sync::Arc;

/// Movable handle owning a registered handler.
///
/// Returned by [`Signal::connect_fn`](crate::Signal::connect_fn) for plain
/// function pointers (capture-free closures coerce). Dropping the handle
/// disconnects. Moves are plain ownership transfers with no
/// synchronization: operations on one `Connection` *instance* are
/// single-threaded-caller only, which Rust's borrow rules already enforce.
///
/// A handler must not disconnect or release its own connection from inside
/// its body; that self-waits on the busy flag it is currently holding.
pub struct Connection {
    slot: Option<Arc<dyn SlotControl>>,
}

impl Connection {
    /// An unconnected handle.
    pub const fn new() -> Self {
        Self { slot: None }
    }

    pub(crate) fn from_slot(slot: Arc<dyn SlotControl>) -> Self {
        Self { slot: Some(slot) }
    }

    /// Whether this handle currently owns a slot.
    pub fn is_connected(&self) -> bool {
        self.slot.is_some()
    }

    /// Sever the handler. Blocks until any in-flight invocation finishes,
    /// then releases the slot's storage. Idempotent.
    pub fn disconnect(&mut self) {
        if let Some(slot) = self.slot.take() {
            slot.busy().enter(slot.spin());
            // Sole strong reference dropped here; a notifier that already
            // upgraded its weak entry keeps the storage alive until its
            // own temporary reference goes away, but can no longer enter.
            drop(slot);
            debug!("connection disconnected");
        }
    }

    /// Detach the slot, leaving this handle disconnected.
    ///
    /// Blocks exactly like [`disconnect`](Self::disconnect), but transfers
    /// ownership out instead of dropping it. The detached slot's busy flag
    /// stays held, so notifications silently skip it until the value is
    /// attached to a new handle.
    pub fn release(&mut self) -> Detached {
        match self.slot.take() {
            Some(slot) => {
                slot.busy().enter(slot.spin());
                debug!("connection released");
                Detached { slot: Some(slot) }
            }
            None => Detached { slot: None },
        }
    }

    /// Adopt a previously released slot, first disconnecting whatever this
    /// handle currently owns. Delivery to the adopted slot resumes on the
    /// next notification, provided its registry is still alive.
    pub fn attach(&mut self, detached: Detached) {
        self.disconnect();
        if let Some(slot) = &detached.slot {
            slot.busy().exit();
            debug!("connection attached");
        }
        self.slot = detached.slot;
    }
}

impl From<Detached> for Connection {
    fn from(detached: Detached) -> Self {
        let mut conn = Self::new();
        conn.attach(detached);
        conn
    }
}

impl Default for Connection {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("connected", &self.is_connected())
            .finish()
    }
}

/// Pinned handle owning a registered handler.
///
/// Returned by [`Signal::connect`](crate::Signal::connect) for capturing
/// callables. Marked `!Unpin` and deliberately without any accessor to the
/// inner handle: [`release`](Self::release) is the one sanctioned way to
/// transfer the slot elsewhere.
pub struct PinnedConnection {
    inner: Connection,
    _pinned: PhantomPinned,
}

impl PinnedConnection {
    pub(crate) fn from_slot(slot: Arc<dyn SlotControl>) -> Self {
        Self {
            inner: Connection::from_slot(slot),
            _pinned: PhantomPinned,
        }
    }

    /// Whether this handle currently owns a slot.
    pub fn is_connected(&self) -> bool {
        self.inner.is_connected()
    }

    /// See [`Connection::disconnect`].
    pub fn disconnect(&mut self) {
        self.inner.disconnect();
    }

    /// See [`Connection::release`].
    pub fn release(&mut self) -> Detached {
        self.inner.release()
    }
}

impl From<Detached> for PinnedConnection {
    fn from(detached: Detached) -> Self {
        Self {
            inner: Connection::from(detached),
            _pinned: PhantomPinned,
        }
    }
}

impl fmt::Debug for PinnedConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinnedConnection")
            .field("connected", &self.is_connected())
            .finish()
    }
}

/// A slot detached from its handle by [`Connection::release`].
///
/// While detached, the slot is skipped by every notification round.
/// Dropping the value destroys the handler outright; attaching it to a
/// handle re-enables delivery.
#[must_use = "dropping a detached slot destroys the handler"]
pub struct Detached {
    slot: Option<Arc<dyn SlotControl>>,
}

impl fmt::Debug for Detached {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Detached")
            .field("occupied", &self.slot.is_some())
            .finish()
    }
}
