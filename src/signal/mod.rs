/*!
 * Signal Module
 *
 * Registry, connection handles, and the type-erased adapter
 */

mod connection;
mod container;
mod erased;
mod registry;
mod slot;

// Re-export public API
pub use connection::{Connection, Detached, PinnedConnection};
pub use container::ConnectionSet;
pub use erased::ErasedSignal;
pub use registry::Signal;
