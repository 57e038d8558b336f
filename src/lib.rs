/*!
 * Sigslot Library
 * Thread-aware signal/slot primitive with handle-owned handler storage
 *
 * A [`Signal`] accepts handler registrations and invokes every live
 * handler on demand. The handle returned at registration is the sole
 * owner of the handler's storage; it may disconnect concurrently with an
 * in-flight notification and never races the notifying thread, because
 * both sides arbitrate through the slot's busy flag. Disconnection blocks
 * until the handler is out of flight; notification never blocks, it skips
 * busy slots for that round.
 *
 * Registries of different signatures can be stored together through
 * [`ErasedSignal`] and recovered with a checked downcast.
 */

pub mod errors;
pub mod signal;
pub mod sync;

// Re-exports
pub use errors::{SignalError, SignalResult};
pub use signal::{Connection, ConnectionSet, Detached, ErasedSignal, PinnedConnection, Signal};
pub use sync::SpinConfig;
