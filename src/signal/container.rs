/*!
 * Connection Container
 *
 * Scope-bound collection of pinned connections. Adopting a connection
 * moves its slot into the container; dropping the container disconnects
 * everything it adopted.
 */

use super::connection::{Connection, PinnedConnection};
use std::fmt;

/// Owns the slots of adopted pinned connections for its own lifetime.
///
/// Not cloneable: the container is the sole owner of everything it holds.
/// Useful when a component registers many stateful handlers and wants them
/// all severed at once when it goes away.
#[derive(Default)]
pub struct ConnectionSet {
    connections: Vec<Connection>,
}

impl ConnectionSet {
    pub const fn new() -> Self {
        Self {
            connections: Vec::new(),
        }
    }

    /// Adopt a pinned connection. The slot is released from the pinned
    /// handle and re-attached to a handle stored in the container, so
    /// delivery continues uninterrupted from the next notification on.
    pub fn push(&mut self, mut pinned: PinnedConnection) {
        self.connections.push(Connection::from(pinned.release()));
    }

    /// Number of adopted connections, including ones disconnected since.
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Disconnect and discard every adopted connection now, blocking per
    /// slot like [`Connection::disconnect`].
    pub fn clear(&mut self) {
        self.connections.clear();
    }
}

impl fmt::Debug for ConnectionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSet")
            .field("connections", &self.connections.len())
            .finish()
    }
}
